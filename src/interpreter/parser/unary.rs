use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, expect, parse_expression},
            matrix::parse_matrix,
        },
    },
};

/// Parses a factor: the tightest-binding unit of an expression.
///
/// A factor is one of:
/// - a unary minus applied to another factor, so `-x^2` is `(-x)^2`;
/// - a parenthesized expression;
/// - a matrix literal;
/// - a number;
/// - `i` (any case), the imaginary unit;
/// - a call `name(expr)`;
/// - a variable.
///
/// Identifiers are lowercased here.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the factor.
///
/// # Returns
/// The parsed factor.
///
/// # Errors
/// - `UnexpectedEndOfInput` if the stream ends.
/// - `ConsecutiveSigns` for `- -x` or `-+x`.
/// - `UnexpectedToken` for tokens that cannot start a factor.
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, offset)) = tokens.peek().copied() else {
        return Err(ParseError::UnexpectedEndOfInput);
    };

    match token {
        Token::Minus => {
            tokens.next();
            if let Some((Token::Plus | Token::Minus, next)) = tokens.peek() {
                return Err(ParseError::ConsecutiveSigns { offset: *next });
            }
            Ok(Expr::negate(parse_factor(tokens)?))
        },
        Token::LParen => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, "')'")?;
            Ok(expr)
        },
        Token::LBracket => parse_matrix(tokens),
        Token::Number(text) => {
            tokens.next();
            Ok(Expr::Number(text.clone()))
        },
        Token::Identifier(name) => {
            tokens.next();
            parse_identifier(tokens, name)
        },
        other => Err(ParseError::UnexpectedToken { token:  other.to_string(),
                                                   offset: *offset, }),
    }
}

/// Resolves an identifier that has just been consumed into the imaginary
/// unit, a call or a variable.
fn parse_identifier<'a, I>(tokens: &mut Peekable<I>, name: &str) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = name.to_ascii_lowercase();
    if name == "i" {
        return Ok(Expr::Imaginary);
    }

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let argument = parse_expression(tokens)?;
        expect(tokens, &Token::RParen, "')'")?;
        return Ok(Expr::Call { name,
                               argument: Box::new(argument) });
    }

    Ok(Expr::Variable(name))
}
