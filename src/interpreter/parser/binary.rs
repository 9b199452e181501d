use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_factor},
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators `+` and `-`. A sign directly
/// after another sign (`+-`, `--`) is rejected.
///
/// The rule is: `additive := term (("+" | "-") term)*`
///
/// # Parameters
/// - `tokens`: Token stream with byte offsets.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_term(tokens)?;
    while let Some((token, _)) = tokens.peek() {
        let op = match token {
            Token::Plus => BinaryOperator::Add,
            Token::Minus => BinaryOperator::Sub,
            _ => break,
        };
        tokens.next();

        if let Some((Token::Plus | Token::Minus, offset)) = tokens.peek() {
            return Err(ParseError::ConsecutiveSigns { offset: *offset });
        }

        let right = parse_term(tokens)?;
        left = Expr::binary(op, left, right);
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative `*`, `/`, `%` and matrix product `**`. A factor
/// directly followed by a number, identifier, `(` or `[` is an implicit
/// multiplication, so `2x` and `3(x + 1)` parse as products.
///
/// The rule is: `term := power ((("*" | "/" | "%" | "**") power) | power)*`
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_power(tokens)?;
    while let Some((token, _)) = tokens.peek() {
        let op = match token {
            Token::Star => Some(BinaryOperator::Mul),
            Token::Slash => Some(BinaryOperator::Div),
            Token::Percent => Some(BinaryOperator::Mod),
            Token::MatMul => Some(BinaryOperator::MatMul),
            Token::Number(_) | Token::Identifier(_) | Token::LParen | Token::LBracket => None,
            _ => break,
        };

        let op = match op {
            Some(op) => {
                tokens.next();
                op
            },
            None => BinaryOperator::Mul,
        };

        let right = parse_power(tokens)?;
        left = Expr::binary(op, left, right);
    }
    Ok(left)
}

/// Parses exponentiation expressions.
///
/// Handles repeated exponentiation with right-associativity:
/// `a ^ b ^ c` parses as `a ^ (b ^ c)`. Operands are collected in a loop and
/// folded from the right, so long chains do not recurse.
///
/// The rule is: `power := factor ("^" factor)*`
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut operands = vec![parse_factor(tokens)?];
    while let Some((Token::Caret, _)) = tokens.peek() {
        tokens.next();
        operands.push(parse_factor(tokens)?);
    }

    let mut result = operands.pop().ok_or(ParseError::UnexpectedEndOfInput)?;
    while let Some(base) = operands.pop() {
        result = Expr::binary(BinaryOperator::Pow, base, result);
    }
    Ok(result)
}
