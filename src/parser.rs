use crate::error::Error;
use crate::token::{render_postfix, Token};

/// Tokenizer for patterns.
///
/// The `Parser` struct holds the pattern and the current position, and
/// remembers the previous token so it can make implicit concatenation
/// explicit.
pub struct Parser<'a> {
    pub pattern: &'a str,
    pub pos: usize,
    prev: Option<Token>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given pattern.
    pub fn new(pattern: &'a str) -> Self {
        Self {
            pattern,
            pos: 0,
            prev: None,
        }
    }

    /// Peek at the next character in the pattern without advancing.
    fn peek(&self) -> Option<char> {
        self.pattern[self.pos..].chars().next()
    }

    /// Advance the parser by one character and return it.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Scan the whole pattern into a token stream, inserting `Concat`
    /// wherever two units sit next to each other.
    ///
    /// Example:
    /// - Pattern: `ab`      → [Literal('a'), Concat, Literal('b')]
    /// - Pattern: `a*(b)`   → [Literal('a'), Star, Concat, LParen, Literal('b'), RParen]
    /// - Pattern: `a|b`     → [Literal('a'), Union, Literal('b')]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(self.pattern.len() * 2);
        while let Some(ch) = self.advance() {
            let curr = Token::from_char(ch);
            if let Some(prev) = self.prev {
                if prev.can_end_unit() && curr.can_start_unit() {
                    tokens.push(Token::Concat);
                }
            }
            tokens.push(curr);
            self.prev = Some(curr);
        }
        tokens
    }
}

/// Tokenize `pattern` with explicit concatenation. Never fails.
pub fn tokenize(pattern: &str) -> Vec<Token> {
    Parser::new(pattern).tokenize()
}

/// Convert a pattern to postfix.
///
/// Example:
/// - Pattern: `ab|c`     → `ab&c|`
/// - Pattern: `(a|b)*c`  → `ab|*c&`
pub fn to_postfix(pattern: &str) -> Result<Vec<Token>, Error> {
    let postfix = tokens_to_postfix(tokenize(pattern))?;
    log::debug!("postfix of {pattern:?} is {:?}", render_postfix(&postfix));
    Ok(postfix)
}

/// Shunting-yard over an already tokenized stream.
pub fn tokens_to_postfix(tokens: impl IntoIterator<Item = Token>) -> Result<Vec<Token>, Error> {
    let mut output = Vec::new();
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::LParen => stack.push(token),
            Token::RParen => loop {
                match stack.pop() {
                    Some(Token::LParen) => break,
                    Some(op) => output.push(op),
                    None => return Err(Error::MismatchedParentheses),
                }
            },
            // left-associative: pop on equal precedence
            op if op.is_binary() => {
                pop_operators(&mut stack, &mut output, |top| {
                    top.precedence() >= op.precedence()
                });
                stack.push(op);
            }
            q if q.is_quantifier() => {
                pop_operators(&mut stack, &mut output, |top| {
                    top.precedence() > q.precedence()
                });
                stack.push(q);
            }
            operand => output.push(operand),
        }
    }

    while let Some(top) = stack.pop() {
        if top.is_paren() {
            return Err(Error::MismatchedParentheses);
        }
        output.push(top);
    }

    Ok(output)
}

/// Move operators from the stack to the output while `should_pop` holds,
/// stopping at the first parenthesis marker.
fn pop_operators(
    stack: &mut Vec<Token>,
    output: &mut Vec<Token>,
    should_pop: impl Fn(Token) -> bool,
) {
    while let Some(&top) = stack.last() {
        if top.is_paren() || !should_pop(top) {
            break;
        }
        output.push(top);
        stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use Token::*;

    fn postfix(pattern: &str) -> String {
        render_postfix(&to_postfix(pattern).unwrap())
    }

    #[test]
    fn inserts_concat_between_units() {
        assert_eq!(tokenize("ab"), vec![Literal('a'), Concat, Literal('b')]);
        assert_eq!(
            tokenize("a*(b)."),
            vec![
                Literal('a'),
                Star,
                Concat,
                LParen,
                Literal('b'),
                RParen,
                Concat,
                Wildcard
            ]
        );
        assert_eq!(tokenize("a|b"), vec![Literal('a'), Union, Literal('b')]);
    }

    #[test]
    fn no_concat_around_operators() {
        assert_eq!(tokenize("(|)"), vec![LParen, Union, RParen]);
        assert_eq!(tokenize("a**"), vec![Literal('a'), Star, Star]);
        assert_eq!(tokenize("a+?"), vec![Literal('a'), Plus, Optional]);
    }

    #[test]
    fn empty_pattern_tokenizes_to_nothing() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn ampersand_is_a_literal() {
        assert_eq!(tokenize("a&"), vec![Literal('a'), Concat, Literal('&')]);
    }

    #[test]
    fn multibyte_literals() {
        assert_eq!(tokenize("é."), vec![Literal('é'), Concat, Wildcard]);
    }

    #[test]
    fn postfix_precedence() {
        assert_eq!(postfix("abc"), "ab&c&");
        assert_eq!(postfix("ab|c"), "ab&c|");
        assert_eq!(postfix("a|bc"), "abc&|");
        assert_eq!(postfix("a|b|c"), "ab|c|");
        assert_eq!(postfix("ab*"), "ab*&");
        assert_eq!(postfix("(a|b)*c"), "ab|*c&");
        assert_eq!(postfix("(ab|cd)e"), "ab&cd&|e&");
        assert_eq!(postfix("a**"), "a**");
        assert_eq!(postfix("a.c?"), "a.&c?&");
    }

    #[test]
    fn postfix_drops_parentheses() {
        let tokens = to_postfix("((a))").unwrap();
        assert_eq!(tokens, vec![Literal('a')]);
    }

    #[test]
    fn unclosed_group() {
        assert_eq!(to_postfix("(ab"), Err(Error::MismatchedParentheses));
        assert_eq!(to_postfix("(("), Err(Error::MismatchedParentheses));
    }

    #[test]
    fn unopened_group() {
        assert_eq!(to_postfix("ab)"), Err(Error::MismatchedParentheses));
        assert_eq!(to_postfix(")("), Err(Error::MismatchedParentheses));
    }

    #[test]
    fn empty_group_converts_to_nothing() {
        assert_eq!(to_postfix("()"), Ok(vec![]));
        assert_eq!(to_postfix(""), Ok(vec![]));
    }
}
