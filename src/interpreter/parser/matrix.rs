use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, expect, parse_expression},
    },
};

/// Parses a matrix literal in either accepted form.
///
/// - Nested rows: `[[a, b], [c, d]]`, rows separated by `,` or `;`.
/// - Flat rows: `[a, b; c, d]`, elements separated by `,`, rows by `;`.
///
/// A trailing separator before a closing `]` is allowed, as in `[1, 2;]`,
/// `[[1, 2],]` or `[1, 2,]`.
///
/// Row lengths are not checked here; a jagged literal fails when evaluated.
///
/// # Errors
/// - `EmptyMatrix` for `[]` or an empty nested row.
/// - `Expected` when a separator or closing bracket is missing.
pub fn parse_matrix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let open = expect(tokens, &Token::LBracket, "'['")?;

    match tokens.peek() {
        Some((Token::RBracket, _)) => Err(ParseError::EmptyMatrix { offset: open }),
        Some((Token::LBracket, _)) => parse_nested_rows(tokens),
        Some(_) => parse_flat_rows(tokens),
        None => Err(ParseError::UnexpectedEndOfInput),
    }
}

/// `[` has been consumed and the next token opens the first row.
fn parse_nested_rows<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut rows = Vec::new();
    loop {
        let row_open = expect(tokens, &Token::LBracket, "'[' to start a matrix row")?;
        if let Some((Token::RBracket, _)) = tokens.peek() {
            return Err(ParseError::EmptyMatrix { offset: row_open });
        }
        rows.push(parse_row(tokens)?);
        expect(tokens, &Token::RBracket, "']' to close the matrix row")?;

        match tokens.next() {
            Some((Token::Comma | Token::Semicolon, _)) => {
                if closes_matrix(tokens) {
                    return Ok(Expr::Matrix(rows));
                }
            },
            Some((Token::RBracket, _)) => return Ok(Expr::Matrix(rows)),
            Some((token, offset)) => {
                return Err(ParseError::Expected { expected: "',', ';' or ']'",
                                                  found:    token.to_string(),
                                                  offset:   *offset, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput),
        }
    }
}

/// `[` has been consumed and the next token starts the first element.
fn parse_flat_rows<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut rows = Vec::new();
    loop {
        rows.push(parse_row(tokens)?);

        match tokens.next() {
            Some((Token::Semicolon, _)) => {
                if closes_matrix(tokens) {
                    return Ok(Expr::Matrix(rows));
                }
            },
            Some((Token::RBracket, _)) => return Ok(Expr::Matrix(rows)),
            Some((token, offset)) => {
                return Err(ParseError::Expected { expected: "',', ';' or ']'",
                                                  found:    token.to_string(),
                                                  offset:   *offset, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput),
        }
    }
}

/// Consumes the `]` that follows a trailing separator, if there is one.
fn closes_matrix<'a, I>(tokens: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next_if(|(token, _)| *token == Token::RBracket).is_some()
}

/// Parses comma separated elements, stopping at the first token that is not
/// a comma. A comma followed by `]` or `;` ends the row.
fn parse_row<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut row = vec![parse_expression(tokens)?];
    while let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        if let Some((Token::RBracket | Token::Semicolon, _)) = tokens.peek() {
            break;
        }
        row.push(parse_expression(tokens)?);
    }
    Ok(row)
}
