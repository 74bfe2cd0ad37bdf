/// Fulltext query string → AST parser.
///
/// The accepted syntax is the usual search-box one:
///
/// ```text
/// foo bar          both words (implicit AND)
/// "foo bar"        exact phrase
/// foo OR bar       either word; AND binds tighter than OR
/// -foo             must not contain foo
/// +foo             same as foo
/// ```
///
/// Runs of clauses between `OR` keywords become AND groups, and the groups
/// are combined into a single OR. Inside each AND group positive terms are
/// moved before negative ones, and a group with no positive term is elided
/// since it cannot be expressed as a positive constraint.
use tracing::{debug, trace};

use super::error::{ParseResult, QuerySyntaxError, SyntaxErrorKind};
use super::types::{FulltextQuery, Op};

const PLUS: char = '+';
const MINUS: char = '-';
const DOUBLE_QUOTE: char = '"';
const OR_KEYWORD: &str = "OR";

/// Parse a fulltext query.
///
/// Returns `Ok(None)` when the query carries no constraint: empty,
/// whitespace only, empty phrases only, or negative terms only.
pub fn parse_query(query: &str) -> ParseResult<Option<FulltextQuery>> {
    let result = QueryBuilder::new(query).build();
    match &result {
        Ok(ast) => trace!(query, ?ast, "parsed fulltext query"),
        Err(e) => debug!(query, error = %e, "rejected fulltext query"),
    }
    result
}

/// A single whitespace-separated clause, before it is turned into a leaf.
#[derive(Debug, PartialEq)]
enum Clause {
    Or,
    /// `None` text means an empty phrase, which constrains nothing.
    Term {
        negated: bool,
        text: Option<String>,
    },
}

struct QueryBuilder<'a> {
    query: &'a str,
    /// Finished AND groups (or single leaves), to be ORed together.
    branches: Vec<FulltextQuery>,
    /// Clauses of the AND group being read.
    current: Vec<FulltextQuery>,
}

impl<'a> QueryBuilder<'a> {
    fn new(query: &'a str) -> Self {
        Self {
            query,
            branches: Vec::new(),
            current: Vec::new(),
        }
    }

    fn error(&self, kind: SyntaxErrorKind) -> QuerySyntaxError {
        QuerySyntaxError::new(kind, self.query)
    }

    fn build(mut self) -> ParseResult<Option<FulltextQuery>> {
        let query = self.query;
        let mut chunks = query.split_whitespace();
        let mut pending_or = false;

        while let Some(chunk) = chunks.next() {
            match self.read_clause(chunk, &mut chunks)? {
                Clause::Or => {
                    if pending_or {
                        return Err(self.error(SyntaxErrorKind::DoubledOr));
                    }
                    if self.current.is_empty() {
                        return Err(self.error(SyntaxErrorKind::StandaloneOr));
                    }
                    pending_or = true;
                }
                Clause::Term { text: None, .. } => {}
                Clause::Term {
                    negated,
                    text: Some(text),
                } => {
                    if pending_or {
                        self.end_and();
                        pending_or = false;
                    }
                    self.current.push(if negated {
                        FulltextQuery::NotWord(text)
                    } else {
                        FulltextQuery::Word(text)
                    });
                }
            }
        }
        if pending_or {
            return Err(self.error(SyntaxErrorKind::TrailingOr));
        }
        self.end_and();

        Ok(FulltextQuery::group(Op::Or, self.branches))
    }

    /// Read one clause starting at `chunk`, consuming further chunks for
    /// phrases that span whitespace.
    fn read_clause<'q>(
        &self,
        chunk: &'q str,
        rest: &mut impl Iterator<Item = &'q str>,
    ) -> ParseResult<Clause> {
        let (modifier, body) = match chunk.chars().next() {
            Some(c @ (PLUS | MINUS)) => (Some(c), &chunk[c.len_utf8()..]),
            _ => (None, chunk),
        };

        if let Some(first) = body.strip_prefix(DOUBLE_QUOTE) {
            let text = self.read_phrase(first, rest)?;
            return Ok(Clause::Term {
                negated: modifier == Some(MINUS),
                text,
            });
        }

        if modifier.is_none() && body.eq_ignore_ascii_case(OR_KEYWORD) {
            return Ok(Clause::Or);
        }
        if let Some(c) = modifier {
            if body.is_empty() {
                return Err(self.error(SyntaxErrorKind::StandaloneModifier(c)));
            }
        }
        if body.contains(DOUBLE_QUOTE) {
            return Err(self.error(SyntaxErrorKind::QuoteInWord));
        }
        Ok(Clause::Term {
            negated: modifier == Some(MINUS),
            text: Some(body.to_string()),
        })
    }

    /// Read a phrase whose opening quote has been stripped from `first`.
    ///
    /// Returns `None` for an empty or blank phrase.
    fn read_phrase<'q>(
        &self,
        first: &'q str,
        rest: &mut impl Iterator<Item = &'q str>,
    ) -> ParseResult<Option<String>> {
        let mut words: Vec<&str> = Vec::new();
        let mut piece = first;
        loop {
            let closing = piece.strip_suffix(DOUBLE_QUOTE);
            let word = closing.unwrap_or(piece);
            if word.contains(DOUBLE_QUOTE) {
                return Err(self.error(SyntaxErrorKind::QuoteInWord));
            }
            if !word.is_empty() {
                words.push(word);
            }
            if closing.is_some() {
                break;
            }
            piece = rest
                .next()
                .ok_or_else(|| self.error(SyntaxErrorKind::UnterminatedPhrase))?;
        }
        if words.is_empty() {
            Ok(None)
        } else {
            Ok(Some(words.join(" ")))
        }
    }

    /// Close the current AND group and add it to the OR branches.
    fn end_and(&mut self) {
        let terms = std::mem::take(&mut self.current);
        let (positive, negative): (Vec<_>, Vec<_>) =
            terms.into_iter().partition(|t| !t.is_negated());
        if positive.is_empty() {
            if !negative.is_empty() {
                trace!(query = self.query, "elided negative-only group");
            }
            return;
        }
        let mut ordered = positive;
        ordered.extend(negative);
        if let Some(group) = FulltextQuery::group(Op::And, ordered) {
            self.branches.push(group);
        }
    }
}
