//! Half-width katakana lookup tables.
//!
//! The han→zen tables come from an embedded TOML source; the zen→han and
//! diacritic-suffix tables are derived from them when the process-wide
//! [`KanaTables`] instance is first built.

mod config;
mod table;
mod tables;

pub use config::{parse_kana_toml, KanaTableError, KanaTableSpec};
pub use tables::KanaTables;

/// Returns the embedded default kana table TOML.
pub fn default_toml() -> &'static str {
    table::DEFAULT_TOML
}
