//! Supported fulltext back-ends and their per-dialect settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rendered for a query with no constraint. No index contains this token,
/// so an empty search matches nothing rather than everything.
pub const NEVER_MATCH: &str = "DONTMATCHANYTHINGFOREMPTYQUERY";

/// Target back-end of a rendered fulltext fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// H2 with the Lucene-backed fulltext search.
    H2,
    /// `to_tsquery` vector search, with a LIKE fallback for phrases.
    #[default]
    PostgreSql,
    /// `MATCH ... AGAINST (... IN BOOLEAN MODE)`.
    MySql,
    /// Oracle Text `CONTAINS`.
    Oracle,
    /// SQL Server `CONTAINS` / `CONTAINSTABLE`.
    SqlServer,
}

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::H2,
        Dialect::PostgreSql,
        Dialect::MySql,
        Dialect::Oracle,
        Dialect::SqlServer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::H2 => "h2",
            Dialect::PostgreSql => "postgresql",
            Dialect::MySql => "mysql",
            Dialect::Oracle => "oracle",
            Dialect::SqlServer => "sqlserver",
        }
    }

    /// Fixed fragment for a query that carries no constraint.
    pub fn never_match(&self) -> &'static str {
        NEVER_MATCH
    }

    /// Rewrite legacy spellings in a raw query before it is parsed.
    ///
    /// PostgreSQL users historically wrote `a & b`; the `&` is dropped so
    /// the words are ANDed implicitly.
    pub fn rewrite_query<'q>(&self, query: &'q str) -> std::borrow::Cow<'q, str> {
        match self {
            Dialect::PostgreSql if query.contains(" & ") => query.replace(" & ", " ").into(),
            _ => query.into(),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown dialect name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown fulltext dialect: {0}")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h2" => Ok(Dialect::H2),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::PostgreSql),
            "mysql" => Ok(Dialect::MySql),
            "oracle" => Ok(Dialect::Oracle),
            "sqlserver" | "mssql" => Ok(Dialect::SqlServer),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

/// Oracle Text reserved words. Searching for one of these literally
/// requires escaping it, or it is read as an operator.
pub const ORACLE_RESERVED_WORDS: &[&str] = &[
    "ABOUT", "ACCUM", "AND", "BT", "BTG", "BTI", "BTP", "EQUIV", "FUZZY", "HASPATH", "INPATH",
    "MDATA", "MINUS", "NEAR", "NOT", "NT", "NTG", "NTI", "NTP", "OR", "PT", "RT", "SQE", "SYN",
    "TR", "TRSYN", "TT", "WITHIN",
];

/// How Oracle words are escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleOptions {
    /// Brace every word. When false only reserved words and words with
    /// non-alphanumeric characters are braced.
    pub brace_all_words: bool,
    /// Matched case-insensitively.
    pub reserved_words: Vec<String>,
}

impl Default for OracleOptions {
    fn default() -> Self {
        Self {
            brace_all_words: true,
            reserved_words: ORACLE_RESERVED_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl OracleOptions {
    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved_words
            .iter()
            .any(|r| r.eq_ignore_ascii_case(word))
    }
}

/// Tunables for dialect renderers. The defaults are what
/// [`render_for_dialect`](super::compiler::render_for_dialect) uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub oracle: OracleOptions,
}
