/// Tree transforms backing the PostgreSQL phrase fallback.
///
/// `to_tsquery` has no phrase operator, so a phrase query is split in two:
///
/// ```text
/// "foo bar" baz -"gee man"
///       ↓ break_phrases
/// foo & bar & baz                       (vector pre-filter, superset)
///       ↓ remove_toplevel_anded_words
/// ?? LIKE '% foo bar %' AND ?? NOT LIKE '% gee man %'
/// ```
///
/// Both transforms are pure: they read the input tree and build a new one.
use super::types::{FulltextQuery, Op};

/// Return a phrase-free tree matching a superset of `ft`.
///
/// Positive phrases become ANDs of their words, hoisted into an enclosing
/// AND. Negated phrases are dropped: excluding each of their words would
/// exclude more than the phrase does. Returns `None` if nothing is left.
pub fn break_phrases(ft: &FulltextQuery) -> Option<FulltextQuery> {
    match ft {
        FulltextQuery::And(terms) | FulltextQuery::Or(terms) => {
            let op = ft.op();
            let mut new_terms = Vec::with_capacity(terms.len());
            for term in terms {
                match break_phrases(term) {
                    None => {}
                    Some(FulltextQuery::And(sub)) if op == Op::And => new_terms.extend(sub),
                    Some(broken) => new_terms.push(broken),
                }
            }
            FulltextQuery::group(op, new_terms)
        }
        FulltextQuery::Word(word) if ft.is_phrase() => {
            let words = word.split(' ').map(FulltextQuery::word).collect();
            FulltextQuery::group(Op::And, words)
        }
        FulltextQuery::NotWord(_) if ft.is_phrase() => None,
        leaf => Some(leaf.clone()),
    }
}

/// Strip the plain words ANDed at the top level.
///
/// Those are exactly matched by the vector search already. What remains
/// (phrases, negations, OR groups) needs the LIKE fallback. Returns `None`
/// if nothing remains.
pub fn remove_toplevel_anded_words(ft: &FulltextQuery) -> Option<FulltextQuery> {
    match ft {
        FulltextQuery::Or(_) | FulltextQuery::NotWord(_) => Some(ft.clone()),
        FulltextQuery::Word(_) => ft.is_phrase().then(|| ft.clone()),
        FulltextQuery::And(terms) => {
            let kept = terms
                .iter()
                .filter(|t| t.op() != Op::Word || t.is_phrase())
                .cloned()
                .collect();
            FulltextQuery::group(Op::And, kept)
        }
    }
}
