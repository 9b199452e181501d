use std::iter::Peekable;

use crate::{
    ast::{Expr, Statement},
    config::Limits,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_additive, statement::parse_statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses one input line into a [`Statement`].
///
/// Rejects inputs whose bracket nesting exceeds `limits.max_depth` before any
/// recursive descent starts, and rejects tokens left over after a complete
/// statement.
///
/// # Parameters
/// - `tokens`: `(Token, offset)` pairs produced by the lexer.
/// - `limits`: Nesting bounds.
///
/// # Returns
/// The parsed statement.
///
/// # Example
/// ```
/// use computor::{
///     ast::{Expr, Statement},
///     config::Limits,
///     interpreter::{lexer::tokenize, parser::core::parse},
/// };
///
/// let tokens = tokenize("X = 2").unwrap();
/// let statement = parse(&tokens, &Limits::default()).unwrap();
/// assert_eq!(statement,
///            Statement::Assign { name: "x".into(),
///                                expr: Expr::Number("2".into()) });
/// ```
pub fn parse(tokens: &[(Token, usize)], limits: &Limits) -> ParseResult<Statement> {
    check_nesting(tokens, limits.max_depth)?;

    let mut iter = tokens.iter().peekable();
    let statement = parse_statement(tokens, &mut iter)?;

    if let Some((token, offset)) = iter.next() {
        return Err(ParseError::UnexpectedTrailingTokens { token:  token.to_string(),
                                                          offset: *offset, });
    }

    log::debug!("parsed {}", statement.kind());
    Ok(statement)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, addition, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := additive`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_additive(tokens)
}

/// Fails when parentheses and brackets nest deeper than `limit`.
fn check_nesting(tokens: &[(Token, usize)], limit: usize) -> ParseResult<()> {
    let mut depth = 0usize;
    for (token, _) in tokens {
        match token {
            Token::LParen | Token::LBracket => {
                depth += 1;
                if depth > limit {
                    return Err(ParseError::TooDeep { limit });
                }
            },
            Token::RParen | Token::RBracket => depth = depth.saturating_sub(1),
            _ => {},
        }
    }
    Ok(())
}

/// Consumes the next token if it equals `expected`.
///
/// # Errors
/// `Expected` naming `description` when another token is found,
/// `UnexpectedEndOfInput` when the stream is exhausted.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                   expected: &Token,
                                                   description: &'static str)
                                                   -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((token, offset)) if token == expected => Ok(*offset),
        Some((token, offset)) => Err(ParseError::Expected { expected: description,
                                                            found:    token.to_string(),
                                                            offset:   *offset, }),
        None => Err(ParseError::UnexpectedEndOfInput),
    }
}

/// Lowercases an identifier, rejecting the reserved imaginary unit.
///
/// # Parameters
/// - `name`: The identifier as written.
/// - `role`: What the identifier is being declared as, for the error message.
pub(in crate::interpreter::parser) fn declared_name(name: &str,
                                                   role: &'static str)
                                                   -> ParseResult<String> {
    let lower = name.to_ascii_lowercase();
    if lower == "i" {
        return Err(ParseError::IdentifierReserved { name: name.to_string(),
                                                    role });
    }
    Ok(lower)
}
