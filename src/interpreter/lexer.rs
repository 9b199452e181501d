use std::fmt;

use logos::Logos;

use crate::error::LexError;

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Whitespace is skipped and never produces a token.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.` or `0.125`.
    #[regex(r"[0-9]+(\.[0-9]*)?", |lex| lex.slice().to_string())]
    Number(String),
    /// Identifier tokens; ASCII letters only, such as `x` or `funA`.
    #[regex(r"[A-Za-z]+", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `=`
    #[token("=")]
    Assign,
    /// `?`
    #[token("?")]
    Question,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `**`
    #[token("**")]
    MatMul,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Number(text) | Self::Identifier(text) => text.as_str(),
            Self::Assign => "=",
            Self::Question => "?",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::MatMul => "**",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Semicolon => ";",
            Self::Comma => ",",
        };
        write!(f, "{s}")
    }
}

/// Converts one input line into tokens paired with their byte offsets.
///
/// # Errors
/// Returns a [`LexError`] naming the first character that starts no token.
///
/// # Example
/// ```
/// use computor::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2x ** y").unwrap();
/// assert_eq!(tokens[0], (Token::Number("2".into()), 0));
/// assert_eq!(tokens[1], (Token::Identifier("x".into()), 1));
/// assert_eq!(tokens[2], (Token::MatMul, 3));
///
/// let err = tokenize("2 $ 3").unwrap_err();
/// assert_eq!((err.character, err.offset), ('$', 2));
/// ```
pub fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, LexError> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        let offset = lexer.span().start;
        match token {
            Ok(tok) => tokens.push((tok, offset)),
            Err(()) => {
                let character = lexer.slice().chars().next().unwrap_or_default();
                return Err(LexError { character, offset });
            },
        }
    }

    log::trace!("tokens: {tokens:?}");
    Ok(tokens)
}
