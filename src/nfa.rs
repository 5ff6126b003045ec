use std::fmt;

use crate::error::Error;
use crate::token::Token;

/// Index of a state inside an [`Automaton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an edge requires of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// Taken without consuming input.
    Epsilon,
    MatchChar(char),
    MatchAny,
}

impl Label {
    /// Whether this edge can consume `c`. Epsilon edges never do.
    pub fn matches(self, c: char) -> bool {
        match self {
            Label::Epsilon => false,
            Label::MatchChar(t) => t == c,
            Label::MatchAny => true,
        }
    }

    pub fn is_epsilon(self) -> bool {
        self == Label::Epsilon
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => f.write_str("ε"),
            Label::MatchChar(c) => write!(f, "{c}"),
            Label::MatchAny => f.write_str("any"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub label: Label,
    pub target: StateId,
}

#[derive(Debug, Clone, Default)]
pub struct State {
    edges: Vec<Edge>,
}

impl State {
    /// Outgoing edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// A Thompson NFA: an arena of states with one start state and a set of
/// accept states. Read-only once built.
#[derive(Debug, Clone)]
pub struct Automaton {
    states: Vec<State>,
    start: StateId,
    accepts: Vec<StateId>,
}

impl Automaton {
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accepts(&self) -> &[StateId] {
        &self.accepts
    }

    pub fn is_accept(&self, id: StateId) -> bool {
        self.accepts.contains(&id)
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    /// All states with their ids, in allocation order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, state)| (StateId(i), state))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// An unfinished piece of automaton: entered at `start`, left through any
/// of `accepts`.
#[derive(Debug, Clone)]
struct Fragment {
    start: StateId,
    accepts: Vec<StateId>,
}

pub(crate) struct Builder {
    states: Vec<State>,
    stack: Vec<Fragment>,
}

impl Builder {
    fn new() -> Self {
        Builder {
            states: vec![],
            stack: vec![],
        }
    }

    /// Evaluate a postfix sequence into a single automaton.
    pub fn build(postfix: &[Token]) -> Result<Automaton, Error> {
        let mut builder = Builder::new();
        for &token in postfix {
            builder.push_token(token)?;
        }
        builder.finish()
    }

    fn add_state(&mut self) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(State::default());
        id
    }

    fn add_edge(&mut self, from: StateId, label: Label, target: StateId) {
        self.states[from.0].edges.push(Edge { label, target });
    }

    fn add_epsilon(&mut self, from: StateId, target: StateId) {
        self.add_edge(from, Label::Epsilon, target);
    }

    fn pop(&mut self, operator: Token) -> Result<Fragment, Error> {
        self.stack
            .pop()
            .ok_or(Error::InsufficientOperands { operator })
    }

    /// Pop the right then the left operand of a binary operator.
    fn pop_pair(&mut self, operator: Token) -> Result<(Fragment, Fragment), Error> {
        if self.stack.len() < 2 {
            return Err(Error::InsufficientOperands { operator });
        }
        let right = self.pop(operator)?;
        let left = self.pop(operator)?;
        Ok((left, right))
    }

    fn push_token(&mut self, token: Token) -> Result<(), Error> {
        let fragment = match token {
            Token::Literal(c) => self.build_match(Label::MatchChar(c)),
            Token::Wildcard => self.build_match(Label::MatchAny),
            Token::Concat => {
                let (left, right) = self.pop_pair(token)?;
                self.build_concat(left, right)
            }
            Token::Union => {
                let (left, right) = self.pop_pair(token)?;
                self.build_union(left, right)
            }
            Token::Star => {
                let inner = self.pop(token)?;
                self.build_repeat(inner, true, true)
            }
            Token::Plus => {
                let inner = self.pop(token)?;
                self.build_repeat(inner, false, true)
            }
            Token::Optional => {
                let inner = self.pop(token)?;
                self.build_repeat(inner, true, false)
            }
            // a parenthesis never survives a correct conversion
            Token::LParen | Token::RParen => {
                return Err(Error::InsufficientOperands { operator: token })
            }
        };
        self.stack.push(fragment);
        Ok(())
    }

    fn build_match(&mut self, label: Label) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();
        self.add_edge(start, label, accept);
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    fn build_concat(&mut self, left: Fragment, right: Fragment) -> Fragment {
        for &accept in &left.accepts {
            self.add_epsilon(accept, right.start);
        }
        Fragment {
            start: left.start,
            accepts: right.accepts,
        }
    }

    fn build_union(&mut self, left: Fragment, right: Fragment) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();
        self.add_epsilon(start, left.start);
        self.add_epsilon(start, right.start);
        for &from in left.accepts.iter().chain(&right.accepts) {
            self.add_epsilon(from, accept);
        }
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    /// Star is `skip + repeat`, plus is `repeat` and optional is `skip`.
    fn build_repeat(&mut self, inner: Fragment, skip: bool, repeat: bool) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();
        self.add_epsilon(start, inner.start);
        if skip {
            self.add_epsilon(start, accept);
        }
        for &from in &inner.accepts {
            if repeat {
                self.add_epsilon(from, inner.start);
            }
            self.add_epsilon(from, accept);
        }
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    fn finish(mut self) -> Result<Automaton, Error> {
        if self.stack.len() != 1 {
            return Err(Error::LeftoverFragments {
                count: self.stack.len(),
            });
        }
        let Some(Fragment { start, accepts }) = self.stack.pop() else {
            return Err(Error::LeftoverFragments { count: 0 });
        };
        log::debug!(
            "built automaton with {} states, start {start}, accepts {accepts:?}",
            self.states.len()
        );
        Ok(Automaton {
            states: self.states,
            start,
            accepts,
        })
    }
}

/// Build an automaton from a postfix token sequence.
pub fn build_automaton(postfix: &[Token]) -> Result<Automaton, Error> {
    Builder::build(postfix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::to_postfix;

    use Token::*;

    fn epsilons(nfa: &Automaton, id: StateId) -> Vec<StateId> {
        nfa.state(id)
            .edges()
            .iter()
            .filter(|e| e.label.is_epsilon())
            .map(|e| e.target)
            .collect()
    }

    #[test]
    fn leaf_is_two_states() {
        let nfa = build_automaton(&[Literal('a')]).unwrap();
        assert_eq!(nfa.len(), 2);
        assert_eq!(nfa.accepts().len(), 1);

        let edges = nfa.state(nfa.start()).edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].label, Label::MatchChar('a'));
        assert!(nfa.is_accept(edges[0].target));
    }

    #[test]
    fn wildcard_leaf() {
        let nfa = build_automaton(&[Wildcard]).unwrap();
        let edges = nfa.state(nfa.start()).edges();
        assert_eq!(edges[0].label, Label::MatchAny);
    }

    #[test]
    fn concat_links_left_accept_to_right_start() {
        let nfa = build_automaton(&[Literal('a'), Literal('b'), Concat]).unwrap();
        assert_eq!(nfa.len(), 4);
        // a: 0 -> 1, b: 2 -> 3
        assert_eq!(nfa.start(), StateId(0));
        assert_eq!(epsilons(&nfa, StateId(1)), vec![StateId(2)]);
        assert_eq!(nfa.accepts(), &[StateId(3)]);
    }

    #[test]
    fn union_adds_fresh_start_and_accept() {
        let nfa = build_automaton(&[Literal('a'), Literal('b'), Union]).unwrap();
        assert_eq!(nfa.len(), 6);
        let start = nfa.start();
        assert_eq!(epsilons(&nfa, start), vec![StateId(0), StateId(2)]);
        let accept = nfa.accepts()[0];
        assert_eq!(epsilons(&nfa, StateId(1)), vec![accept]);
        assert_eq!(epsilons(&nfa, StateId(3)), vec![accept]);
    }

    #[test]
    fn star_loops_and_skips() {
        let nfa = build_automaton(&[Literal('a'), Star]).unwrap();
        let start = nfa.start();
        let accept = nfa.accepts()[0];
        assert_eq!(epsilons(&nfa, start), vec![StateId(0), accept]);
        assert_eq!(epsilons(&nfa, StateId(1)), vec![StateId(0), accept]);
    }

    #[test]
    fn plus_loops_without_skip() {
        let nfa = build_automaton(&[Literal('a'), Plus]).unwrap();
        let start = nfa.start();
        let accept = nfa.accepts()[0];
        assert_eq!(epsilons(&nfa, start), vec![StateId(0)]);
        assert_eq!(epsilons(&nfa, StateId(1)), vec![StateId(0), accept]);
    }

    #[test]
    fn optional_skips_without_loop() {
        let nfa = build_automaton(&[Literal('a'), Optional]).unwrap();
        let start = nfa.start();
        let accept = nfa.accepts()[0];
        assert_eq!(epsilons(&nfa, start), vec![StateId(0), accept]);
        assert_eq!(epsilons(&nfa, StateId(1)), vec![accept]);
    }

    #[test]
    fn missing_operands() {
        assert_eq!(
            build_automaton(&[Literal('a'), Concat]).unwrap_err(),
            Error::InsufficientOperands { operator: Concat }
        );
        assert_eq!(
            build_automaton(&[Literal('a'), Union]).unwrap_err(),
            Error::InsufficientOperands { operator: Union }
        );
        assert_eq!(
            build_automaton(&[Star]).unwrap_err(),
            Error::InsufficientOperands { operator: Star }
        );
        assert_eq!(
            build_automaton(&[Plus]).unwrap_err(),
            Error::InsufficientOperands { operator: Plus }
        );
        assert_eq!(
            build_automaton(&[Optional]).unwrap_err(),
            Error::InsufficientOperands { operator: Optional }
        );
    }

    #[test]
    fn parens_are_rejected() {
        assert_eq!(
            build_automaton(&[Literal('a'), LParen]).unwrap_err(),
            Error::InsufficientOperands { operator: LParen }
        );
    }

    #[test]
    fn leftover_fragments() {
        assert_eq!(
            build_automaton(&[]).unwrap_err(),
            Error::LeftoverFragments { count: 0 }
        );
        assert_eq!(
            build_automaton(&[Literal('a'), Literal('b')]).unwrap_err(),
            Error::LeftoverFragments { count: 2 }
        );
    }

    #[test]
    fn every_state_is_fresh_per_token() {
        // 2 per leaf, 2 per union and quantifier, none for concat
        let nfa = build_automaton(&to_postfix("(a|b)*c").unwrap()).unwrap();
        assert_eq!(nfa.len(), 2 + 2 + 2 + 2 + 2);
        assert_eq!(nfa.states().count(), nfa.len());
    }
}
