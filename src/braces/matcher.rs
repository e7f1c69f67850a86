// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Stack-based bracket pairing, one stack per bracket kind.
//!
//! Rules for a candidate of kind `K` at position `p`:
//!
//! - If some pair already opens or closes at `p`, the candidate is ignored.
//!   This makes re-scanning an overlapping range harmless.
//! - An opening bracket creates a pair at level `1 + open pairs of K`.
//! - A closing bracket closes the most recently opened unclosed pair of `K`
//!   if that pair opened before it. Otherwise it is dropped; unbalanced input
//!   is normal.
//!
//! Kinds never interact: `)` cannot close `[`, and the level of a paren pair
//! does not depend on open curly or square pairs.

use rustc_hash::FxHashSet;

use crate::braces::pair::{BraceKind, BracePair, Side};
use crate::braces::scanner::BracketCandidate;
use crate::span::Span;

#[derive(Debug, Default)]
pub struct PairMatcher {
    /// Pairs in creation order, which is also the order of their open positions.
    pairs: Vec<BracePair>,
    /// Indices into `pairs` of unclosed pairs, per kind.
    stacks: [Vec<usize>; 3],
    /// Positions already used as an open or a close.
    claimed: FxHashSet<usize>,
}

impl PairMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from pairs retained from an earlier pass.
    ///
    /// Unclosed retained pairs become the initial stack contents, so pairs
    /// created afterwards continue their kind's level count. Pairs without an
    /// open span are discarded.
    pub fn seeded(mut retained: Vec<BracePair>) -> Self {
        retained.retain(|pair| !pair.open.is_empty());
        retained.sort_by_key(|pair| pair.open.start);

        let mut matcher = Self::new();
        for pair in retained {
            matcher.claimed.insert(pair.open.start);
            if pair.is_closed() {
                matcher.claimed.insert(pair.close.start);
            } else {
                matcher.stacks[pair.kind.index()].push(matcher.pairs.len());
            }
            matcher.pairs.push(pair);
        }
        matcher
    }

    /// Number of unclosed pairs of `kind`.
    pub fn open_count(&self, kind: BraceKind) -> usize {
        self.stacks[kind.index()].len()
    }

    pub fn push(&mut self, candidate: BracketCandidate) {
        let position = candidate.position;
        if self.claimed.contains(&position) {
            return;
        }

        let stack = &mut self.stacks[candidate.kind.index()];
        match candidate.side {
            Side::Open => {
                let level = stack.len() + 1;
                stack.push(self.pairs.len());
                self.pairs.push(BracePair::opened(candidate.kind, position, level));
                self.claimed.insert(position);
            }
            Side::Close => {
                // A close can only pair with an open before it.
                let Some(&idx) = stack.last() else { return };
                if self.pairs[idx].open.start < position {
                    stack.pop();
                    self.pairs[idx].close = Span::at(position);
                    self.claimed.insert(position);
                }
            }
        }
    }

    pub fn pairs(&self) -> &[BracePair] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<BracePair> {
        self.pairs
    }
}

impl Extend<BracketCandidate> for PairMatcher {
    fn extend<I: IntoIterator<Item = BracketCandidate>>(&mut self, candidates: I) {
        for candidate in candidates {
            self.push(candidate);
        }
    }
}

/// Pairs a candidate stream from scratch.
pub fn match_pairs<I: IntoIterator<Item = BracketCandidate>>(candidates: I) -> Vec<BracePair> {
    let mut matcher = PairMatcher::new();
    matcher.extend(candidates);
    matcher.into_pairs()
}
