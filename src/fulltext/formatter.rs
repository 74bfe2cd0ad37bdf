/// Compact debug notation for fulltext query trees.
///
/// ```text
/// foo              word
/// {foo bar}        phrase
/// ~foo             negated word or phrase
/// [a AND b]        group
/// null             no constraint
/// ```
///
/// Only meant for logs and test assertions; SQL is produced by `compiler`.
use std::fmt;

use super::types::FulltextQuery;

/// `Display` adapter printing a tree in debug notation.
pub struct Dump<'a>(pub Option<&'a FulltextQuery>);

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("null"),
            Some(ft) => write_node(ft, f),
        }
    }
}

/// Render a tree (or its absence) in debug notation.
pub fn dump(query: Option<&FulltextQuery>) -> String {
    Dump(query).to_string()
}

fn write_node(ft: &FulltextQuery, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match ft {
        FulltextQuery::And(terms) => write_group(terms, "AND", f),
        FulltextQuery::Or(terms) => write_group(terms, "OR", f),
        FulltextQuery::Word(word) => write_word(word, f),
        FulltextQuery::NotWord(word) => {
            f.write_str("~")?;
            write_word(word, f)
        }
    }
}

fn write_group(terms: &[FulltextQuery], op: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", op)?;
        }
        write_node(term, f)?;
    }
    f.write_str("]")
}

fn write_word(word: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if word.contains(' ') {
        write!(f, "{{{}}}", word)
    } else {
        f.write_str(word)
    }
}
