//! Property-based tests (fuzzing) for the fulltext parser and renderers.
//!
//! Random input must only ever produce clean syntax errors, and every tree
//! the parser accepts must keep its shape guarantees and render to a
//! non-empty fragment in every dialect.
//!
//! Run with: `cargo test --test proptest_fuzz`

use proptest::prelude::*;

use ftsql::fulltext::types::split_prefix;
use ftsql::fulltext::{
    parse_query, render_for_dialect, translate, Dialect, FulltextQuery, PostgresFulltext,
    FT_LIKE_SEP,
};

// =============================================================================
// Strategies
// =============================================================================

/// A plain word. Never starts with `o`, so it cannot spell the OR keyword.
fn word_strategy() -> impl Strategy<Value = String> {
    ("[a-np-z][a-z0-9]{0,7}", prop_oneof![Just(""), Just("*"), Just("%"), Just(":*")])
        .prop_map(|(stem, marker)| format!("{}{}", stem, marker))
}

/// One search-box term: an optionally signed word or phrase.
fn term_strategy() -> impl Strategy<Value = String> {
    let body = prop_oneof![
        3 => word_strategy(),
        1 => prop::collection::vec(word_strategy(), 1..4)
            .prop_map(|words| format!("\"{}\"", words.join(" "))),
    ];
    (prop_oneof![Just(""), Just("-"), Just("+")], body)
        .prop_map(|(sign, body)| format!("{}{}", sign, body))
}

/// A well-formed query: terms, with single ORs only between terms.
fn valid_query_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((term_strategy(), any::<bool>()), 1..12).prop_map(|terms| {
        let last = terms.len() - 1;
        let mut parts = Vec::new();
        for (i, (term, or_after)) in terms.into_iter().enumerate() {
            parts.push(term);
            if or_after && i < last {
                parts.push("OR".to_string());
            }
        }
        parts.join(" ")
    })
}

/// Query-like noise built from the characters the parser reacts to.
fn noisy_query_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("OR".to_string()),
            Just("or".to_string()),
            Just("\"".to_string()),
            Just("-".to_string()),
            Just("+".to_string()),
            Just(" ".to_string()),
            Just("\t".to_string()),
            "[a-z*%:'\\\\]{1,4}",
        ],
        0..20,
    )
    .prop_map(|parts| parts.concat())
}

// =============================================================================
// Tree invariants
// =============================================================================

fn check_and_group(terms: &[FulltextQuery]) -> Result<(), TestCaseError> {
    prop_assert!(terms.len() >= 2, "AND with {} terms", terms.len());
    prop_assert!(terms.iter().all(FulltextQuery::is_leaf), "nested AND: {:?}", terms);
    prop_assert!(!terms[0].is_negated(), "negative-only or negative-first AND");
    let first_negative = terms
        .iter()
        .position(FulltextQuery::is_negated)
        .unwrap_or(terms.len());
    prop_assert!(
        terms[first_negative..].iter().all(FulltextQuery::is_negated),
        "positive term after a negative one: {:?}",
        terms
    );
    Ok(())
}

fn check_branch(ft: &FulltextQuery) -> Result<(), TestCaseError> {
    match ft {
        FulltextQuery::And(terms) => check_and_group(terms),
        FulltextQuery::Word(word) => {
            prop_assert!(!word.is_empty());
            Ok(())
        }
        other => Err(TestCaseError::fail(format!("bad OR branch: {:?}", other))),
    }
}

fn check_tree(ft: &FulltextQuery) -> Result<(), TestCaseError> {
    match ft {
        FulltextQuery::Or(branches) => {
            prop_assert!(branches.len() >= 2, "OR with {} branches", branches.len());
            branches.iter().try_for_each(check_branch)
        }
        other => check_branch(other),
    }
}

/// Every phrase leaf of a tree, with whether it is negated.
fn phrase_leaves(ft: &FulltextQuery, out: &mut Vec<(String, bool)>) {
    match ft {
        FulltextQuery::And(terms) | FulltextQuery::Or(terms) => {
            terms.iter().for_each(|t| phrase_leaves(t, out));
        }
        leaf if leaf.is_phrase() => {
            if let Some(text) = leaf.word_text() {
                out.push((text.to_string(), leaf.is_negated()));
            }
        }
        _ => {}
    }
}

// =============================================================================
// Parser fuzz tests
// =============================================================================

proptest! {
    /// Parsing arbitrary text never panics
    #[test]
    fn fuzz_parse_arbitrary_text(query in ".*") {
        let _ = parse_query(&query);
    }

    /// Parsing operator-heavy noise never panics, and errors carry the query
    #[test]
    fn fuzz_parse_noise(query in noisy_query_strategy()) {
        if let Err(e) = parse_query(&query) {
            prop_assert_eq!(e.query, query);
        }
    }

    /// Every accepted tree keeps its shape guarantees
    #[test]
    fn fuzz_parsed_tree_invariants(query in noisy_query_strategy()) {
        if let Ok(Some(ft)) = parse_query(&query) {
            check_tree(&ft)?;
        }
    }

    /// Well-formed queries always parse
    #[test]
    fn fuzz_valid_queries_parse(query in valid_query_strategy()) {
        let ft = parse_query(&query);
        prop_assert!(ft.is_ok(), "{} -> {:?}", query, ft);
        if let Ok(Some(ft)) = ft {
            check_tree(&ft)?;
        }
    }

    /// Parsing is insensitive to the amount of whitespace between terms
    #[test]
    fn fuzz_whitespace_insensitive(query in valid_query_strategy()) {
        let spaced = query.replace(' ', " \t  ");
        prop_assert_eq!(parse_query(&query).unwrap(), parse_query(&spaced).unwrap());
    }
}

// =============================================================================
// Renderer fuzz tests
// =============================================================================

proptest! {
    /// Rendering never yields an empty fragment
    #[test]
    fn fuzz_render_non_empty(query in valid_query_strategy()) {
        let ast = parse_query(&query).unwrap();
        for dialect in Dialect::ALL {
            let fragment = render_for_dialect(ast.as_ref(), dialect);
            prop_assert!(!fragment.is_empty(), "{} rendered empty for {}", query, dialect);
        }
    }

    /// translate is parse followed by render
    #[test]
    fn fuzz_translate_matches_render(query in valid_query_strategy()) {
        let ast = parse_query(&query).unwrap();
        for dialect in [Dialect::H2, Dialect::MySql, Dialect::Oracle, Dialect::SqlServer] {
            prop_assert_eq!(
                translate(&query, dialect).unwrap(),
                render_for_dialect(ast.as_ref(), dialect)
            );
        }
    }

    /// The PostgreSQL LIKE half appears exactly when the query has a phrase
    #[test]
    fn fuzz_postgres_like_only_for_phrases(query in valid_query_strategy()) {
        let ast = parse_query(&query).unwrap();
        let fragment = render_for_dialect(ast.as_ref(), Dialect::PostgreSql);
        let parts = PostgresFulltext::split(&fragment);
        let has_phrase = ast.as_ref().map_or(false, FulltextQuery::has_phrase);
        prop_assert_eq!(parts.like.is_some(), has_phrase, "{} -> {}", query, fragment);
        prop_assert!(!parts.vector.contains('"'));
        prop_assert!(!parts.vector.contains(FT_LIKE_SEP.trim()));
        prop_assert_eq!(fragment.matches(FT_LIKE_SEP).count(), usize::from(has_phrase));
    }

    /// Prefix words inside phrases are prefixes in both PostgreSQL halves
    #[test]
    fn fuzz_postgres_prefix_agrees_across_halves(query in valid_query_strategy()) {
        let ast = parse_query(&query).unwrap();
        let fragment = render_for_dialect(ast.as_ref(), Dialect::PostgreSql);
        let parts = PostgresFulltext::split(&fragment);
        let mut phrases = Vec::new();
        if let Some(ft) = &ast {
            phrase_leaves(ft, &mut phrases);
        }
        if let Some(like) = parts.like {
            prop_assert!(!like.contains('*'), "literal marker in LIKE: {}", like);
        }
        for (phrase, negated) in &phrases {
            let like = parts.like.unwrap_or_default();
            for word in phrase.split(' ') {
                let (stem, prefix) = split_prefix(word);
                if !prefix {
                    continue;
                }
                prop_assert!(
                    like.contains(&format!(" {}%", stem)),
                    "{} missing as prefix in LIKE: {}", stem, fragment
                );
                if !negated {
                    prop_assert!(
                        parts.vector.contains(&format!("{}:*", stem)),
                        "{} missing as prefix in vector: {}", stem, fragment
                    );
                }
            }
        }
    }

    /// Rendering reads the tree without changing it
    #[test]
    fn fuzz_render_is_pure(query in valid_query_strategy()) {
        if let Some(ft) = parse_query(&query).unwrap() {
            let before = ft.clone();
            for dialect in Dialect::ALL {
                let _ = render_for_dialect(Some(&ft), dialect);
            }
            prop_assert_eq!(ft, before);
        }
    }
}
