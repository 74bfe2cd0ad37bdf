//! Optional Python bindings for ftsql via PyO3.
//!
//! Exposes fulltext query parsing and dialect translation. Enabled with the
//! `python` feature flag.
//!
//! ## Usage from Python
//!
//! ```python
//! import ftsql
//!
//! ftsql.parse_query('foo -bar OR baz')     # '[[foo AND ~bar] OR baz]'
//! ftsql.translate('foo -bar OR baz', 'h2') # '((foo NOT bar) OR baz)'
//! ftsql.dialects()                         # ['h2', 'postgresql', ...]
//! ```

use pyo3::prelude::*;

use crate::fulltext::{self, Dialect};

fn syntax_error(e: fulltext::QuerySyntaxError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(e.to_string())
}

/// Parse a fulltext query and return its tree in debug notation.
///
/// Args:
///     query: The search-box query.
///
/// Returns:
///     The tree dump, or None if the query carries no constraint.
///
/// Raises:
///     ValueError: If the query is malformed.
#[pyfunction]
fn parse_query(query: &str) -> PyResult<Option<String>> {
    let ast = fulltext::parse_query(query).map_err(syntax_error)?;
    Ok(ast.map(|ft| fulltext::dump(Some(&ft))))
}

/// Parse a fulltext query and return its tree as JSON.
///
/// Raises:
///     ValueError: If the query is malformed.
#[pyfunction]
fn parse_query_json(query: &str) -> PyResult<String> {
    let ast = fulltext::parse_query(query).map_err(syntax_error)?;
    serde_json::to_string(&ast)
        .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))
}

/// Translate a fulltext query into a dialect's native syntax.
///
/// Args:
///     query: The search-box query.
///     dialect: One of the names returned by `dialects()`.
///
/// Raises:
///     ValueError: If the query is malformed or the dialect unknown.
#[pyfunction]
fn translate(query: &str, dialect: &str) -> PyResult<String> {
    let dialect: Dialect = dialect
        .parse()
        .map_err(|e: fulltext::UnknownDialect| {
            pyo3::exceptions::PyValueError::new_err(e.to_string())
        })?;
    fulltext::translate(query, dialect).map_err(syntax_error)
}

/// Names of the supported dialects.
#[pyfunction]
fn dialects() -> Vec<&'static str> {
    Dialect::ALL.iter().map(Dialect::name).collect()
}

/// ftsql Python module.
#[pymodule]
fn _ftsql(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_query, m)?)?;
    m.add_function(wrap_pyfunction!(parse_query_json, m)?)?;
    m.add_function(wrap_pyfunction!(translate, m)?)?;
    m.add_function(wrap_pyfunction!(dialects, m)?)?;
    m.add("NEVER_MATCH", fulltext::NEVER_MATCH)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
