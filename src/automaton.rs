//! The compiled automaton and its search-time traversal.

use crate::node::Node;
use crate::state_id::{dead_id, fail_id, start_id, NodeId};
use crate::Location;

/// An immutable, compiled Aho-Corasick automaton conditioned for
/// leftmost-longest matching.
///
/// Node ids are stable indices into `nodes`; nothing mutates this array
/// after [`crate::trainer::train`] returns it.
#[derive(Debug)]
pub(crate) struct Automaton<S> {
    nodes: Vec<Node<S>>,
}

impl<S: NodeId> Automaton<S> {
    pub(crate) fn new(nodes: Vec<Node<S>>) -> Self {
        debug_assert!(
            nodes.len() >= 3,
            "automaton must have at least the three reserved states"
        );
        Automaton { nodes }
    }

    #[inline]
    fn node(&self, id: S) -> &Node<S> {
        &self.nodes[id.to_usize()]
    }

    /// Follows fail-links from `current` on byte `b` until a non-FAIL
    /// transition is found. Because START and DEAD are byte-complete
    /// (trainer phases 3 and 4), this always terminates without returning
    /// FAIL.
    #[inline]
    fn follow(&self, mut current: S, b: u8) -> S {
        loop {
            let next = self.node(current).transition(b);
            if next != fail_id() {
                return next;
            }
            debug_assert_ne!(
                current,
                start_id(),
                "START must be byte-complete and must never hit FAIL"
            );
            current = self.node(current).fail();
        }
    }

    /// Returns the leftmost-longest match whose beginning is `>= at`, or
    /// `None` if there is none.
    ///
    /// `at` must satisfy `at <= text.len()`.
    pub(crate) fn find(&self, text: &[u8], at: usize) -> Option<Location> {
        debug_assert!(at <= text.len(), "at out of range: {at} > {}", text.len());

        let mut current: S = start_id();
        let mut last: Option<Location> = None;
        let mut i = at;

        while i < text.len() {
            current = self.follow(current, text[i]);
            i += 1;

            if current == dead_id() {
                debug_assert!(
                    last.is_some(),
                    "DEAD must only be reachable after a match was observed"
                );
                return last;
            }

            let node = self.node(current);
            if let Some(&m) = node.matches().first() {
                last = Some(Location { m, end: i });
            }
        }

        last
    }
}
