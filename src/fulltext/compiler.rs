/// Fulltext AST → native fulltext syntax compiler.
///
/// Each dialect is a row of tokens plus a term formatter; the infix
/// dialects (H2, PostgreSQL, Oracle, SQL Server) share one tree walk and
/// MySQL's prefix-operator boolean mode has its own. Rendering is total:
/// any tree, or its absence, produces a non-empty fragment.
use tracing::debug;

use super::dialect::{Dialect, OracleOptions, RenderOptions, NEVER_MATCH};
use super::error::ParseResult;
use super::like::{generate_like_sql, FT_LIKE_SEP};
use super::optimizer::{break_phrases, remove_toplevel_anded_words};
use super::parser::parse_query;
use super::types::{split_prefix, FulltextQuery};

/// Render a parsed query for `dialect` with default options.
pub fn render_for_dialect(ast: Option<&FulltextQuery>, dialect: Dialect) -> String {
    Renderer::default().render(ast, dialect)
}

/// Parse `query` and render it for `dialect` with default options.
pub fn translate(query: &str, dialect: Dialect) -> ParseResult<String> {
    Renderer::default().translate(query, dialect)
}

/// Renders fulltext trees with a fixed set of [`RenderOptions`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a tree. `None`, and a bare negated word, render the dialect's
    /// never-match sentinel.
    pub fn render(&self, ast: Option<&FulltextQuery>, dialect: Dialect) -> String {
        let ft = match ast {
            Some(ft) if !ft.is_negated() => ft,
            _ => return dialect.never_match().to_string(),
        };
        match dialect {
            Dialect::H2 => self.render_infix(ft, &H2),
            Dialect::PostgreSql => self.render_postgres(ft),
            Dialect::MySql => render_mysql(ft),
            Dialect::Oracle => self.render_infix(ft, &ORACLE),
            Dialect::SqlServer => self.render_infix(ft, &SQL_SERVER),
        }
    }

    /// Rewrite, parse and render a raw query.
    pub fn translate(&self, query: &str, dialect: Dialect) -> ParseResult<String> {
        let query = dialect.rewrite_query(query);
        let ast = parse_query(&query)?;
        let fragment = self.render(ast.as_ref(), dialect);
        debug!(%dialect, %fragment, "translated fulltext query");
        Ok(fragment)
    }

    fn render_infix(&self, ft: &FulltextQuery, syntax: &InfixSyntax) -> String {
        let mut buf = String::new();
        write_infix(ft, syntax, &self.options, &mut buf);
        buf
    }

    /// Vector query, plus a LIKE filter when phrases are involved.
    fn render_postgres(&self, ft: &FulltextQuery) -> String {
        if !ft.has_phrase() {
            return self.render_infix(ft, &POSTGRES);
        }
        let broken = match break_phrases(ft) {
            Some(broken) if !broken.is_negated() => broken,
            _ => return NEVER_MATCH.to_string(),
        };
        let mut sql = self.render_infix(&broken, &POSTGRES);
        if let Some(noand) = remove_toplevel_anded_words(ft) {
            sql.push_str(FT_LIKE_SEP);
            sql.push_str(&generate_like_sql(&noand));
            debug!("phrase search needs a LIKE filter");
        }
        sql
    }
}

/// Token table of an infix fulltext syntax.
struct InfixSyntax {
    or: &'static str,
    and: &'static str,
    /// Joins a negated term to its positive left sibling.
    and_not: &'static str,
    /// Prefix for a negated term with no positive left sibling.
    not: &'static str,
    term: fn(&str, &RenderOptions, &mut String),
}

const H2: InfixSyntax = InfixSyntax {
    or: " OR ",
    and: " AND ",
    and_not: " NOT ",
    not: "NOT ",
    term: h2_term,
};

const POSTGRES: InfixSyntax = InfixSyntax {
    or: " | ",
    and: " & ",
    and_not: " & !",
    not: "!",
    term: postgres_term,
};

const ORACLE: InfixSyntax = InfixSyntax {
    or: " OR ",
    and: " AND ",
    and_not: " NOT ",
    not: "NOT ",
    term: oracle_term,
};

const SQL_SERVER: InfixSyntax = InfixSyntax {
    or: " OR ",
    and: " AND ",
    and_not: " AND NOT ",
    not: "NOT ",
    term: sql_server_term,
};

fn write_infix(ft: &FulltextQuery, syntax: &InfixSyntax, opts: &RenderOptions, buf: &mut String) {
    match ft {
        FulltextQuery::And(terms) | FulltextQuery::Or(terms) => {
            let is_and = matches!(ft, FulltextQuery::And(_));
            buf.push('(');
            for (i, term) in terms.iter().enumerate() {
                let negated = term.is_negated();
                if i > 0 {
                    buf.push_str(match (is_and, negated) {
                        (true, true) => syntax.and_not,
                        (true, false) => syntax.and,
                        (false, _) => syntax.or,
                    });
                }
                if negated && (i == 0 || !is_and) {
                    buf.push_str(syntax.not);
                }
                write_infix(term, syntax, opts, buf);
            }
            buf.push(')');
        }
        FulltextQuery::Word(word) | FulltextQuery::NotWord(word) => (syntax.term)(word, opts, buf),
    }
}

// Lucene query syntax.
fn h2_term(word: &str, _opts: &RenderOptions, buf: &mut String) {
    if word.contains(' ') {
        buf.push('"');
        buf.push_str(word);
        buf.push('"');
        return;
    }
    match split_prefix(word) {
        (stem, true) => {
            buf.push_str(stem);
            buf.push('*');
        }
        (word, false) => buf.push_str(word),
    }
}

// Phrases never reach this point: they are broken into words first.
fn postgres_term(word: &str, _opts: &RenderOptions, buf: &mut String) {
    match split_prefix(word) {
        (stem, true) => {
            buf.push_str(stem);
            buf.push_str(":*");
        }
        (word, false) => buf.push_str(word),
    }
}

// Adjacent words form a phrase in Oracle Text, so phrase words are
// escaped one by one.
fn oracle_term(word: &str, opts: &RenderOptions, buf: &mut String) {
    for (i, part) in word.split(' ').enumerate() {
        if i > 0 {
            buf.push(' ');
        }
        oracle_word(part, &opts.oracle, buf);
    }
}

fn oracle_word(word: &str, opts: &OracleOptions, buf: &mut String) {
    if let (stem, true) = split_prefix(word) {
        // The wildcard goes outside the braces, or it would be escaped too.
        if is_oracle_plain(stem) {
            buf.push_str(stem);
        } else {
            push_braced(stem, buf);
        }
        buf.push('%');
        return;
    }
    if opts.brace_all_words || opts.is_reserved(word) || !is_oracle_plain(word) {
        push_braced(word, buf);
    } else {
        buf.push_str(word);
    }
}

fn is_oracle_plain(word: &str) -> bool {
    word.chars().all(char::is_alphanumeric)
}

fn push_braced(word: &str, buf: &mut String) {
    buf.push('{');
    buf.push_str(&word.replace('}', "}}"));
    buf.push('}');
}

fn sql_server_term(word: &str, _opts: &RenderOptions, buf: &mut String) {
    buf.push('"');
    match split_prefix(word) {
        (stem, true) => {
            buf.push_str(stem);
            buf.push('*');
        }
        (word, false) => buf.push_str(word),
    }
    buf.push('"');
}

/// Where a MySQL boolean-mode term sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Top,
    /// Under an AND: the term must match.
    Required,
    /// Under an OR: plain terms are optional.
    Optional,
}

fn render_mysql(ft: &FulltextQuery) -> String {
    let mut buf = String::new();
    write_mysql(ft, Position::Top, &mut buf);
    buf
}

fn write_mysql(ft: &FulltextQuery, pos: Position, buf: &mut String) {
    match ft {
        FulltextQuery::And(terms) | FulltextQuery::Or(terms) => {
            let child_pos = if matches!(ft, FulltextQuery::And(_)) {
                Position::Required
            } else {
                Position::Optional
            };
            if pos == Position::Required {
                buf.push('+');
            }
            buf.push('(');
            for (i, term) in terms.iter().enumerate() {
                if i > 0 {
                    buf.push(' ');
                }
                write_mysql(term, child_pos, buf);
            }
            buf.push(')');
        }
        FulltextQuery::Word(word) => {
            if pos != Position::Optional {
                buf.push('+');
            }
            mysql_term(word, buf);
        }
        FulltextQuery::NotWord(word) => {
            buf.push('-');
            mysql_term(word, buf);
        }
    }
}

fn mysql_term(word: &str, buf: &mut String) {
    if word.contains(' ') {
        buf.push('"');
        buf.push_str(word);
        buf.push('"');
        return;
    }
    match split_prefix(word) {
        (stem, true) => {
            buf.push_str(stem);
            buf.push('*');
        }
        (word, false) => buf.push_str(word),
    }
}
