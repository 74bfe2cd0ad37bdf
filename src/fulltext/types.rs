//! Fulltext query AST types.
//!
//! A parsed query is a small boolean tree: leaves are words or phrases
//! (optionally negated), internal nodes are AND / OR groups. The tree is
//! dialect-agnostic; every renderer in `compiler` consumes the same shape.
//!
//! "No constraint" is never a node. It is expressed as `Option::None` at
//! every API boundary.

use serde::{Deserialize, Serialize};

/// Operator tag of a [`FulltextQuery`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Op {
    Or,
    And,
    Word,
    NotWord,
}

/// A node of the fulltext query tree.
///
/// Leaves carry the literal word or phrase text (phrases have their
/// internal whitespace collapsed to single spaces). Groups carry their
/// terms in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FulltextQuery {
    Word(String),
    NotWord(String),
    And(Vec<FulltextQuery>),
    Or(Vec<FulltextQuery>),
}

impl FulltextQuery {
    pub fn word(word: impl Into<String>) -> Self {
        FulltextQuery::Word(word.into())
    }

    pub fn not_word(word: impl Into<String>) -> Self {
        FulltextQuery::NotWord(word.into())
    }

    /// Build an AND/OR group, collapsing degenerate cases.
    ///
    /// No terms yields `None`, a single term is returned as-is. Passing a
    /// leaf operator yields `None`.
    pub fn group(op: Op, mut terms: Vec<FulltextQuery>) -> Option<Self> {
        match terms.len() {
            0 => None,
            1 => terms.pop(),
            _ => match op {
                Op::And => Some(FulltextQuery::And(terms)),
                Op::Or => Some(FulltextQuery::Or(terms)),
                Op::Word | Op::NotWord => None,
            },
        }
    }

    pub fn op(&self) -> Op {
        match self {
            FulltextQuery::Word(_) => Op::Word,
            FulltextQuery::NotWord(_) => Op::NotWord,
            FulltextQuery::And(_) => Op::And,
            FulltextQuery::Or(_) => Op::Or,
        }
    }

    /// The word or phrase of a leaf, `None` for groups.
    pub fn word_text(&self) -> Option<&str> {
        match self {
            FulltextQuery::Word(w) | FulltextQuery::NotWord(w) => Some(w),
            _ => None,
        }
    }

    /// The terms of a group, `None` for leaves.
    pub fn terms(&self) -> Option<&[FulltextQuery]> {
        match self {
            FulltextQuery::And(terms) | FulltextQuery::Or(terms) => Some(terms),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, FulltextQuery::Word(_) | FulltextQuery::NotWord(_))
    }

    pub fn is_negated(&self) -> bool {
        matches!(self, FulltextQuery::NotWord(_))
    }

    /// True for a leaf whose text holds more than one word.
    pub fn is_phrase(&self) -> bool {
        self.word_text().is_some_and(|w| w.contains(' '))
    }

    /// True if any leaf of the tree is a phrase.
    pub fn has_phrase(&self) -> bool {
        match self {
            FulltextQuery::And(terms) | FulltextQuery::Or(terms) => {
                terms.iter().any(FulltextQuery::has_phrase)
            }
            leaf => leaf.is_phrase(),
        }
    }
}

/// Prefix-search markers accepted at the end of a word.
const PREFIX_MARKERS: [&str; 3] = [":*", "*", "%"];

/// Split a word into its stem and whether it ends with a prefix-search marker.
///
/// A word made only of a marker is not a prefix search.
pub fn split_prefix(word: &str) -> (&str, bool) {
    for marker in PREFIX_MARKERS {
        if let Some(stem) = word.strip_suffix(marker) {
            if !stem.is_empty() {
                return (stem, true);
            }
        }
    }
    (word, false)
}
