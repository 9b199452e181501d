use std::iter::Peekable;

use crate::{
    ast::Statement,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, declared_name, expect, parse_expression},
    },
};

/// Parses a single statement.
///
/// The statement shape is decided by lookahead over the whole token slice
/// before anything is consumed:
/// - an equation, when the line contains both `=` and `?` and the `=` is not
///   the second token after a leading identifier;
/// - a function assignment, `IDENT ( IDENT ) = expr`;
/// - a variable assignment, `IDENT = expr`;
/// - otherwise a bare expression.
///
/// # Parameters
/// - `all`: The complete token slice, used for lookahead.
/// - `tokens`: Iterator over the same slice, positioned at its start.
pub fn parse_statement<'a, I>(all: &[(Token, usize)],
                              tokens: &mut Peekable<I>)
                              -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if is_equation(all) {
        return parse_equation(tokens);
    }
    if is_function_assignment(all) {
        return parse_function_assignment(tokens);
    }
    if is_assignment(all) {
        return parse_assignment(tokens);
    }
    Ok(Statement::Expression(parse_expression(tokens)?))
}

fn kinds(all: &[(Token, usize)]) -> impl Iterator<Item = &Token> {
    all.iter().map(|(token, _)| token)
}

/// `=` and `?` both present, and the `=` is not in assignment position.
fn is_equation(all: &[(Token, usize)]) -> bool {
    if is_assignment(all) {
        return false;
    }
    kinds(all).any(|t| *t == Token::Assign) && kinds(all).any(|t| *t == Token::Question)
}

fn is_assignment(all: &[(Token, usize)]) -> bool {
    matches!(all, [(Token::Identifier(_), _), (Token::Assign, _), ..])
}

fn is_function_assignment(all: &[(Token, usize)]) -> bool {
    matches!(all,
             [(Token::Identifier(_), _),
              (Token::LParen, _),
              (Token::Identifier(_), _),
              (Token::RParen, _),
              (Token::Assign, _),
              ..])
}

fn next_identifier<'a, I>(tokens: &mut Peekable<I>) -> String
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => name.clone(),
        _ => String::new(),
    }
}

/// Parses `name = expr`. The caller has already matched the shape.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = declared_name(&next_identifier(tokens), "variable name")?;
    expect(tokens, &Token::Assign, "'='")?;
    let expr = parse_expression(tokens)?;

    Ok(Statement::Assign { name, expr })
}

/// Parses `name(param) = body`. The caller has already matched the shape.
fn parse_function_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = declared_name(&next_identifier(tokens), "function name")?;
    expect(tokens, &Token::LParen, "'('")?;
    let param = declared_name(&next_identifier(tokens), "function argument")?;
    expect(tokens, &Token::RParen, "')'")?;
    expect(tokens, &Token::Assign, "'='")?;
    let body = parse_expression(tokens)?;

    Ok(Statement::FunctionAssign { name, param, body })
}

/// Parses `left = right ?` or `left = ?`.
fn parse_equation<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_expression(tokens)?;
    expect(tokens, &Token::Assign, "'='")?;

    if let Some((Token::Question, _)) = tokens.peek() {
        tokens.next();
        return Ok(Statement::Equation { left, right: None });
    }

    let right = parse_expression(tokens)?;
    expect(tokens, &Token::Question, "'?'")?;

    Ok(Statement::Equation { left,
                             right: Some(right) })
}
