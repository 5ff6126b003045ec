use std::fmt;

/// A single unit of a pattern, either an operand or an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Any character that is not an operator.
    Literal(char),
    /// `.`
    Wildcard,
    /// Implicit concatenation, made explicit by the tokenizer.
    Concat,
    /// `|`
    Union,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    Optional,
    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl Token {
    /// Map one pattern character to its token.
    ///
    /// Example:
    /// - `'a'` → `Literal('a')`
    /// - `'*'` → `Star`
    /// - `'&'` → `Literal('&')`
    pub fn from_char(c: char) -> Self {
        match c {
            '(' => Token::LParen,
            ')' => Token::RParen,
            '|' => Token::Union,
            '*' => Token::Star,
            '+' => Token::Plus,
            '?' => Token::Optional,
            '.' => Token::Wildcard,
            c => Token::Literal(c),
        }
    }

    /// Binding strength used by the postfix converter. Parentheses are 0
    /// and are never compared.
    pub fn precedence(self) -> u8 {
        match self {
            Token::Star | Token::Plus | Token::Optional => 3,
            Token::Concat => 2,
            Token::Union => 1,
            _ => 0,
        }
    }

    pub fn is_operand(self) -> bool {
        matches!(self, Token::Literal(_) | Token::Wildcard)
    }

    pub fn is_quantifier(self) -> bool {
        matches!(self, Token::Star | Token::Plus | Token::Optional)
    }

    pub fn is_binary(self) -> bool {
        matches!(self, Token::Concat | Token::Union)
    }

    pub fn is_paren(self) -> bool {
        matches!(self, Token::LParen | Token::RParen)
    }

    /// True if a unit can end at this token, so a concatenation may follow.
    pub fn can_end_unit(self) -> bool {
        self.is_operand() || self.is_quantifier() || self == Token::RParen
    }

    /// True if a new unit can begin at this token.
    pub fn can_start_unit(self) -> bool {
        self.is_operand() || self == Token::LParen
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(c) => write!(f, "{c}"),
            Token::Wildcard => f.write_str("."),
            Token::Concat => f.write_str("&"),
            Token::Union => f.write_str("|"),
            Token::Star => f.write_str("*"),
            Token::Plus => f.write_str("+"),
            Token::Optional => f.write_str("?"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

/// Render a token sequence back to text, e.g. the postfix form `ab&c|`.
pub fn render_postfix(tokens: &[Token]) -> String {
    tokens.iter().map(Token::to_string).collect()
}
