use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Token {
    ILLEGAL(char),
    EOF,

    IDENT(String),
    INT(String),
    STRING(String),

    ASSIGN,   // =
    PLUS,     // +
    MINUS,    // -
    BANG,     // !
    ASTERISK, // *
    SLASH,    // /

    LT,  // <
    GT,  // >
    EQ,  // ==
    NEQ, // !=

    COMMA,     // ,
    SEMICOLON, // ;
    COLON,     // :

    LPAREN,   // (
    RPAREN,   // )
    LBRACE,   // {
    RBRACE,   // }
    LBRACKET, // [
    RBRACKET, // ]

    FUNCTION,
    LET,
    TRUE,
    FALSE,
    IF,
    ELSE,
    RETURN,
}

static KEYWORDS: Lazy<HashMap<&'static str, Token>> = Lazy::new(|| {
    use Token::*;
    let mut map = HashMap::new();
    map.insert("fn", FUNCTION);
    map.insert("let", LET);
    map.insert("true", TRUE);
    map.insert("false", FALSE);
    map.insert("if", IF);
    map.insert("else", ELSE);
    map.insert("return", RETURN);
    map
});

pub fn lookup_ident(ident: &str) -> Token {
    KEYWORDS
        .get(ident)
        .cloned()
        .unwrap_or_else(|| Token::IDENT(ident.to_string()))
}

impl Display for Token {
    // the token type name used in parser diagnostics
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Token::*;
        let name = match self {
            ILLEGAL(..) => "ILLEGAL",
            EOF => "EOF",
            IDENT(..) => "IDENT",
            INT(..) => "INT",
            STRING(..) => "STRING",
            ASSIGN => "=",
            PLUS => "+",
            MINUS => "-",
            BANG => "!",
            ASTERISK => "*",
            SLASH => "/",
            LT => "<",
            GT => ">",
            EQ => "==",
            NEQ => "!=",
            COMMA => ",",
            SEMICOLON => ";",
            COLON => ":",
            LPAREN => "(",
            RPAREN => ")",
            LBRACE => "{",
            RBRACE => "}",
            LBRACKET => "[",
            RBRACKET => "]",
            FUNCTION => "FUNCTION",
            LET => "LET",
            TRUE => "TRUE",
            FALSE => "FALSE",
            IF => "IF",
            ELSE => "ELSE",
            RETURN => "RETURN",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use crate::token::{lookup_ident, Token};

    #[test]
    fn test_lookup_ident() {
        let tests = vec![
            ("fn", Token::FUNCTION),
            ("let", Token::LET),
            ("true", Token::TRUE),
            ("false", Token::FALSE),
            ("if", Token::IF),
            ("else", Token::ELSE),
            ("return", Token::RETURN),
            ("foobar", Token::IDENT("foobar".to_string())),
            ("letter", Token::IDENT("letter".to_string())),
        ];
        for (input, expected) in tests {
            assert_eq!(expected, lookup_ident(input));
        }
    }
}
