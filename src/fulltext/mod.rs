/// Fulltext query translation engine.
///
/// Turns a search-box query into the native fulltext syntax of a SQL
/// back-end:
///
/// ```text
/// Input ("foo bar" -baz OR qux)
///       ↓
/// Parser                  (parser.rs)
///       ↓
/// Fulltext AST            (types.rs)
///       ↓
/// PostgreSQL transforms   (optimizer.rs, like.rs)   phrase fallback only
///       ↓
/// Dialect compiler        (compiler.rs, dialect.rs)
///       ↓
/// SQL fragment, spliced into a statement by the caller
/// ```
///
/// Everything here is pure and stateless: parsing and rendering may run
/// concurrently from any thread.
pub mod compiler;
pub mod dialect;
pub mod error;
pub mod formatter;
pub mod like;
pub mod optimizer;
pub mod parser;
pub mod types;

// Re-export key types for convenience
pub use compiler::{render_for_dialect, translate, Renderer};
pub use dialect::{Dialect, OracleOptions, RenderOptions, UnknownDialect, NEVER_MATCH};
pub use error::{ParseResult, QuerySyntaxError, SyntaxErrorKind};
pub use formatter::{dump, Dump};
pub use like::{generate_like_sql, PostgresFulltext, FT_LIKE_COL, FT_LIKE_SEP};
pub use optimizer::{break_phrases, remove_toplevel_anded_words};
pub use parser::parse_query;
pub use types::{FulltextQuery, Op};
