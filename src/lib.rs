//! Full-string regular expression matching with Thompson NFAs.
//!
//! A pattern goes through four stages: tokenizing (with explicit
//! concatenation), shunting-yard conversion to postfix, Thompson
//! construction and finally subset simulation over the input.
//!
//! Supported syntax is literals, `.`, `|`, `*`, `+`, `?` and grouping with
//! parentheses. A match must cover the whole input.
//!
//! ```
//! assert_eq!(thompson_match::full_match("(ab|cd)e", "abe"), Ok(true));
//! assert_eq!(thompson_match::full_match("(ab|cd)e", "ace"), Ok(false));
//! ```
use std::str::FromStr;

pub mod error;
pub mod matcher;
pub mod nfa;
pub mod parser;
pub mod token;

#[cfg(feature = "dot")]
mod dot;

pub use error::Error;
pub use matcher::{epsilon_closure, nfa_match, Matcher};
pub use nfa::{build_automaton, Automaton, Edge, Label, State, StateId};
pub use parser::{to_postfix, tokenize};
pub use token::{render_postfix, Token};

/// Whether `pattern` matches all of `text`.
pub fn full_match(pattern: &str, text: &str) -> Result<bool, Error> {
    let postfix = to_postfix(pattern)?;
    let nfa = build_automaton(&postfix)?;
    Ok(nfa_match(&nfa, text))
}

/// A compiled pattern that can be matched many times.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    automaton: Automaton,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let automaton = build_automaton(&to_postfix(pattern)?)?;
        log::info!("compiled {pattern:?} into {} states", automaton.len());
        Ok(Regex {
            pattern: pattern.to_owned(),
            automaton,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        nfa_match(&self.automaton, text)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }
}

impl FromStr for Regex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Regex::new(s)
    }
}
