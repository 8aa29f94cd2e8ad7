//! Compiles a pattern list into a leftmost-longest-conditioned Aho-Corasick
//! node array.
//!
//! Building failure transitions is the most interesting part of building
//! the Aho-Corasick automaton, because they are what allow searches to be
//! performed in linear time. A failure transition is a single transition
//! associated with each state that points back to the longest proper
//! suffix of the pattern being searched that is itself a prefix of some
//! pattern. The failure transition is followed whenever there exists no
//! transition on the current state for the current input byte.
//!
//! This crate additionally *conditions* failure links for leftmost-longest
//! matching: a failure link is only followed if doing so could not let a
//! strictly longer match, starting further right, overshoot one already
//! pending. Where that could happen, the link is severed to DEAD instead,
//! so the search commits to the best match already found rather than
//! continuing to scan for something that would ultimately lose the
//! leftmost-longest tie-break anyway.

use std::collections::{TryReserveError, VecDeque};

use log::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::node::Node;
use crate::state_id::{dead_id, fail_id, start_id, usize_to_node_id, NodeId};
use crate::{Match, Pattern};

/// Builds the node array for an automaton from `patterns`, in declaration
/// order: trie construction, then start/dead absorption, then breadth-first
/// failure-link resolution with leftmost-longest conditioning. See the
/// individual phase functions below for the details of each step.
pub(crate) fn train<S: NodeId>(patterns: &[Pattern]) -> Result<Vec<Node<S>>> {
    if patterns.is_empty() {
        warn!("training an automaton with zero patterns; it will never match");
    }
    for p in patterns {
        if p.value.is_empty() {
            return Err(Error::EmptyPattern);
        }
    }

    let mut nodes = base_states::<S>()?;
    build_trie(&mut nodes, patterns)?;
    absorb_start(&mut nodes);
    absorb_dead(&mut nodes);
    resolve_failure_links(&mut nodes)?;
    clamp_start_if_matches_empty(&mut nodes);

    debug!(
        "trained automaton: {} patterns, {} states",
        patterns.len(),
        nodes.len()
    );
    Ok(nodes)
}

/// Phase 1. Allocates the three reserved nodes, in order FAIL, DEAD, START.
fn base_states<S: NodeId>() -> std::result::Result<Vec<Node<S>>, TryReserveError> {
    let mut nodes = Vec::new();
    nodes.try_reserve(3)?;
    nodes.push(Node::new(start_id(), 0));
    nodes.push(Node::new(start_id(), 0));
    nodes.push(Node::new(start_id(), 0));
    trace!("allocated reserved states: FAIL=0, DEAD=1, START=2");
    Ok(nodes)
}

/// Phase 2. Walks each pattern's bytes from START, creating new states on
/// demand, and records a [`Match`] at each pattern's terminal state.
fn build_trie<S: NodeId>(nodes: &mut Vec<Node<S>>, patterns: &[Pattern]) -> Result<()> {
    for pat in patterns {
        let mut current: S = start_id();
        for (i, &b) in pat.value.iter().enumerate() {
            let next = nodes[current.to_usize()].transition(b);
            if next != fail_id() {
                current = next;
                continue;
            }
            let depth = (i + 1) as u32;
            let id = add_state(nodes, start_id(), depth)?;
            nodes[current.to_usize()].set_transition(b, id);
            current = id;
        }
        nodes[current.to_usize()]
            .try_push_match(Match {
                id: pat.id,
                len: pat.value.len(),
            })
            .map_err(Error::from)?;
    }
    trace!("trie construction complete: {} states", nodes.len());
    Ok(())
}

/// Phase 3. Every byte for which START has no trie transition becomes a
/// self-loop, so START absorbs unmatched prefix bytes without ever hitting
/// FAIL.
fn absorb_start<S: NodeId>(nodes: &mut [Node<S>]) {
    let start: S = start_id();
    for b in 0..=255u8 {
        if nodes[start.to_usize()].transition(b) == fail_id() {
            nodes[start.to_usize()].set_transition(b, start);
        }
    }
}

/// Phase 4. DEAD absorbs every byte into itself.
fn absorb_dead<S: NodeId>(nodes: &mut [Node<S>]) {
    let dead: S = dead_id();
    for b in 0..=255u8 {
        nodes[dead.to_usize()].set_transition(b, dead);
    }
}

/// The BFS queue entry for Phase 5: a state together with the depth, if
/// any, at which the longest match pending along the path taken to reach
/// it began.
struct Position<S> {
    id: S,
    pending_match_start_depth: Option<u32>,
}

/// Phase 5. Breadth-first failure-link resolution with leftmost-longest
/// conditioning.
fn resolve_failure_links<S: NodeId>(nodes: &mut [Node<S>]) -> Result<()> {
    let start: S = start_id();
    let dead: S = dead_id();

    let mut queue: VecDeque<Position<S>> = VecDeque::new();
    for b in 0..=255u8 {
        let seed = nodes[start.to_usize()].transition(b);
        if seed == start {
            continue;
        }
        let seed_node = &nodes[seed.to_usize()];
        let pending_match_start_depth = if nodes[start.to_usize()].is_match() {
            // Vacuous for non-empty patterns (rejected at construction),
            // kept so a future empty-pattern-supporting variant does not
            // need to touch this loop.
            Some(0)
        } else if seed_node.is_match() {
            Some(seed_node.depth() - seed_node.longest_match_len().unwrap() as u32 + 1)
        } else {
            None
        };
        if seed_node.is_match() {
            // Once a top-level single-byte pattern fires, commit to it
            // rather than continuing to scan from this state.
            nodes[seed.to_usize()].set_fail(dead);
        }
        queue.push_back(Position {
            id: seed,
            pending_match_start_depth,
        });
    }

    while let Some(p) = queue.pop_front() {
        let p_fail = nodes[p.id.to_usize()].fail();
        let mut enqueued_any = false;

        for b in 0..=255u8 {
            let c = nodes[p.id.to_usize()].transition(b);
            if c == fail_id() {
                continue;
            }
            enqueued_any = true;

            let c_node = &nodes[c.to_usize()];
            let c_pending = match p.pending_match_start_depth {
                Some(d) => Some(d),
                None if c_node.is_match() => {
                    Some(c_node.depth() - c_node.longest_match_len().unwrap() as u32 + 1)
                }
                None => None,
            };

            let f = fail_transition(nodes, p_fail, b);

            let sever = match c_pending {
                Some(pending_depth) => {
                    let extent = nodes[c.to_usize()].depth() - pending_depth + 1;
                    extent > nodes[f.to_usize()].depth()
                }
                None => false,
            };

            if sever {
                nodes[c.to_usize()].set_fail(dead);
            } else {
                nodes[c.to_usize()].set_fail(f);
                merge_matches(nodes, f, c).map_err(Error::from)?;
            }

            queue.push_back(Position {
                id: c,
                pending_match_start_depth: c_pending,
            });
        }

        if nodes[p.id.to_usize()].is_match() && !enqueued_any {
            nodes[p.id.to_usize()].set_fail(dead);
        }
    }

    trace!("failure links resolved");
    Ok(())
}

/// Phase 6. If START itself bears a match (unreachable today; see the
/// empty-pattern design note), its self-loops must not re-enter START.
fn clamp_start_if_matches_empty<S: NodeId>(nodes: &mut [Node<S>]) {
    let start: S = start_id();
    if !nodes[start.to_usize()].is_match() {
        return;
    }
    let dead: S = dead_id();
    for b in 0..=255u8 {
        if nodes[start.to_usize()].transition(b) == start {
            nodes[start.to_usize()].set_transition(b, dead);
        }
    }
}

/// Walks `x`'s fail chain until a transition on `b` resolves to something
/// other than FAIL. START and DEAD are byte-complete (Phases 3-4), so this
/// always terminates: every fail chain bottoms out at one of them.
///
/// A single `nodes[x].transition(b)` lookup is not enough on its own —
/// intermediate trie nodes are not byte-complete, so the first hop can
/// itself be FAIL and must be walked further.
fn fail_transition<S: NodeId>(nodes: &[Node<S>], mut x: S, b: u8) -> S {
    loop {
        let t = nodes[x.to_usize()].transition(b);
        if t != fail_id() {
            return t;
        }
        x = nodes[x.to_usize()].fail();
    }
}

/// Appends `f`'s matches to `c`'s, in `f`'s order. No-op if `f == c`
/// (matches are already present).
fn merge_matches<S: NodeId>(
    nodes: &mut [Node<S>],
    f: S,
    c: S,
) -> std::result::Result<(), TryReserveError> {
    if f == c {
        return Ok(());
    }
    let (fi, ci) = (f.to_usize(), c.to_usize());
    let (lo, hi) = if fi < ci { (fi, ci) } else { (ci, fi) };
    let (low, high) = get_two_mut(nodes, lo, hi);
    let (fail_node, succ_node) = if fi < ci { (low, high) } else { (high, low) };
    let borrowed = fail_node.matches().to_vec();
    succ_node.try_extend_matches(&borrowed)
}

fn add_state<S: NodeId>(nodes: &mut Vec<Node<S>>, fail: S, depth: u32) -> Result<S> {
    let id = usize_to_node_id(nodes.len()).ok_or(Error::NodeSpaceExhausted)?;
    nodes.try_reserve(1).map_err(Error::from)?;
    nodes.push(Node::new(fail, depth));
    Ok(id)
}

/// Returns mutable borrows of two distinct elements of `xs`. Panics if
/// `i == j`.
fn get_two_mut<T>(xs: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    assert_ne!(i, j, "get_two_mut requires distinct indices");
    if i < j {
        let (before, after) = xs.split_at_mut(j);
        (&mut before[i], &mut after[0])
    } else {
        let (before, after) = xs.split_at_mut(i);
        (&mut after[0], &mut before[j])
    }
}
