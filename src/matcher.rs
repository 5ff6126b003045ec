use std::collections::BTreeSet;

use crate::nfa::{Automaton, StateId};

/// Return every state reachable from `seeds` through zero or more epsilon
/// edges. Star and plus create epsilon cycles, so `visited` guards the walk.
pub fn epsilon_closure(
    nfa: &Automaton,
    seeds: impl IntoIterator<Item = StateId>,
) -> BTreeSet<StateId> {
    let mut visited = BTreeSet::new();
    let mut pending: Vec<StateId> = seeds.into_iter().collect();

    while let Some(id) = pending.pop() {
        if !visited.insert(id) {
            continue;
        }
        for edge in nfa.state(id).edges() {
            if edge.label.is_epsilon() && !visited.contains(&edge.target) {
                pending.push(edge.target);
            }
        }
    }

    visited
}

/// Runs an automaton one character at a time.
pub struct Matcher<'a> {
    nfa: &'a Automaton,
    active: BTreeSet<StateId>,
}

impl<'a> Matcher<'a> {
    pub fn new(nfa: &'a Automaton) -> Self {
        Matcher {
            nfa,
            active: epsilon_closure(nfa, [nfa.start()]),
        }
    }

    /// Consume `c`. If nothing can consume it the active set becomes empty.
    pub fn accept(&mut self, c: char) {
        let nfa = self.nfa;
        let moved = self
            .active
            .iter()
            .flat_map(|&id| nfa.state(id).edges())
            .filter(|edge| edge.label.matches(c))
            .map(|edge| edge.target)
            .collect::<Vec<_>>();
        self.active = epsilon_closure(self.nfa, moved);
        log::trace!("after {c:?}: {} active states", self.active.len());
    }

    /// Consume the whole input and report whether it is accepted. Stops
    /// reading as soon as no state is active.
    pub fn accepts(&mut self, input: impl IntoIterator<Item = char>) -> bool {
        for c in input {
            self.accept(c);
            if self.is_empty() {
                log::trace!("no active states left at {c:?}");
                return false;
            }
        }
        self.is_accepting()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn is_accepting(&self) -> bool {
        self.active.iter().any(|&id| self.nfa.is_accept(id))
    }

    pub fn active(&self) -> &BTreeSet<StateId> {
        &self.active
    }
}

/// Decide whether `nfa` accepts all of `text`.
pub fn nfa_match(nfa: &Automaton, text: &str) -> bool {
    Matcher::new(nfa).accepts(text.chars())
}
