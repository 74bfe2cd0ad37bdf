pub mod config;
pub mod fulltext;

#[cfg(feature = "python")]
pub mod python;

pub use fulltext::{
    parse_query, render_for_dialect, translate, Dialect, FulltextQuery, QuerySyntaxError,
};
