//! LIKE-based phrase filter for PostgreSQL.
//!
//! The fragment references the fulltext column through the `??` marker;
//! the caller substitutes the real column expression. It travels appended
//! to the vector query after the ` @#AND#@ ` separator, and the caller ANDs
//! both halves in the final WHERE clause.

use super::types::{split_prefix, FulltextQuery};

/// Separates the vector query from the LIKE fragment. Never a valid
/// tsquery, so it cannot appear in the vector half.
pub const FT_LIKE_SEP: &str = " @#AND#@ ";

/// Placeholder for the fulltext column in the LIKE fragment.
pub const FT_LIKE_COL: &str = "??";

/// Render a tree as LIKE predicates on [`FT_LIKE_COL`].
///
/// ```text
/// abc "foo bar" -"gee man"   (after remove_toplevel_anded_words)
///   → (?? LIKE '% foo bar %' AND ?? NOT LIKE '% gee man %')
/// ```
pub fn generate_like_sql(ft: &FulltextQuery) -> String {
    let mut buf = String::new();
    write_like(ft, &mut buf);
    buf
}

fn write_like(ft: &FulltextQuery, buf: &mut String) {
    match ft {
        FulltextQuery::And(terms) | FulltextQuery::Or(terms) => {
            let sep = if matches!(ft, FulltextQuery::And(_)) {
                " AND "
            } else {
                " OR "
            };
            buf.push('(');
            for (i, term) in terms.iter().enumerate() {
                if i > 0 {
                    buf.push_str(sep);
                }
                write_like(term, buf);
            }
            buf.push(')');
        }
        FulltextQuery::Word(word) => write_predicate(word, false, buf),
        FulltextQuery::NotWord(word) => write_predicate(word, true, buf),
    }
}

fn write_predicate(text: &str, negated: bool, buf: &mut String) {
    buf.push_str(FT_LIKE_COL);
    if negated {
        buf.push_str(" NOT");
    }
    buf.push_str(" LIKE '");
    buf.push_str(&like_pattern(text));
    buf.push('\'');
}

/// Build the `% word word %` pattern of a word or phrase.
///
/// Each word is checked for a prefix marker on its own, so `"foo* bar"`
/// gives `% foo% bar %`. A prefix word at the end leaves the pattern open.
fn like_pattern(text: &str) -> String {
    let mut pattern = String::from("% ");
    let mut open_ended = false;
    for (i, word) in text.split(' ').enumerate() {
        if i > 0 {
            pattern.push(' ');
        }
        let (stem, prefix) = split_prefix(word);
        pattern.push_str(&escape_like_word(stem));
        if prefix {
            pattern.push('%');
        }
        open_ended = prefix;
    }
    if !open_ended {
        pattern.push_str(" %");
    }
    pattern
}

/// Lower-case a word and make it safe inside a single-quoted literal.
fn escape_like_word(word: &str) -> String {
    word.to_lowercase().replace('\'', "''").replace('\\', "")
}

/// A PostgreSQL fragment split into its two halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresFulltext<'a> {
    /// Bind as the `to_tsquery` argument.
    pub vector: &'a str,
    /// LIKE filter to AND alongside, still using the `??` marker.
    pub like: Option<&'a str>,
}

impl<'a> PostgresFulltext<'a> {
    pub fn split(fragment: &'a str) -> Self {
        match fragment.split_once(FT_LIKE_SEP) {
            Some((vector, like)) => Self {
                vector,
                like: Some(like),
            },
            None => Self {
                vector: fragment,
                like: None,
            },
        }
    }

    /// The LIKE filter with the column marker replaced by `column`.
    pub fn like_for_column(&self, column: &str) -> Option<String> {
        self.like.map(|like| like.replace(FT_LIKE_COL, column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_phrase() {
        let ft = FulltextQuery::word("Foo Bar");
        assert_eq!(generate_like_sql(&ft), "?? LIKE '% foo bar %'");
    }

    #[test]
    fn test_and_with_negation() {
        let ft = FulltextQuery::And(vec![
            FulltextQuery::word("foo bar"),
            FulltextQuery::not_word("gee man"),
        ]);
        assert_eq!(
            generate_like_sql(&ft),
            "(?? LIKE '% foo bar %' AND ?? NOT LIKE '% gee man %')"
        );
    }

    #[test]
    fn test_or_nested() {
        let ft = FulltextQuery::Or(vec![
            FulltextQuery::And(vec![
                FulltextQuery::word("foo bar"),
                FulltextQuery::not_word("x"),
            ]),
            FulltextQuery::word("baz"),
        ]);
        assert_eq!(
            generate_like_sql(&ft),
            "((?? LIKE '% foo bar %' AND ?? NOT LIKE '% x %') OR ?? LIKE '% baz %')"
        );
    }

    #[test]
    fn test_escaping() {
        let ft = FulltextQuery::word("o'neil c\\d");
        assert_eq!(generate_like_sql(&ft), "?? LIKE '% o''neil cd %'");
    }

    #[test]
    fn test_prefix_word() {
        let ft = FulltextQuery::word("foo ba*");
        assert_eq!(generate_like_sql(&ft), "?? LIKE '% foo ba%'");
    }

    #[test]
    fn test_prefix_word_inside_phrase() {
        let ft = FulltextQuery::word("foo* bar");
        assert_eq!(generate_like_sql(&ft), "?? LIKE '% foo% bar %'");
        let ft = FulltextQuery::word("Foo:* bar%");
        assert_eq!(generate_like_sql(&ft), "?? LIKE '% foo% bar%'");
        let ft = FulltextQuery::not_word("a b% c");
        assert_eq!(generate_like_sql(&ft), "?? NOT LIKE '% a b% c %'");
    }

    #[test]
    fn test_split_composite() {
        let parts = PostgresFulltext::split("(foo & bar) @#AND#@ ?? LIKE '% foo bar %'");
        assert_eq!(parts.vector, "(foo & bar)");
        assert_eq!(parts.like, Some("?? LIKE '% foo bar %'"));
        assert_eq!(
            parts.like_for_column("ft.fulltext").as_deref(),
            Some("ft.fulltext LIKE '% foo bar %'")
        );
    }

    #[test]
    fn test_split_vector_only() {
        let parts = PostgresFulltext::split("(foo & bar)");
        assert_eq!(parts.vector, "(foo & bar)");
        assert!(parts.like.is_none());
        assert!(parts.like_for_column("c").is_none());
    }
}
