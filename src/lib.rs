//! Japanese width/script conversion engine.
//!
//! Thin facade over [`kana_core`]: re-exports the conversion API and owns the
//! optional tracing setup used by the command-line front end.

pub mod trace_init;

pub use kana_core::converter::{
    convert, convert_mask, convert_mode, explain, Explanation, ExplainStep, Rule,
};
pub use kana_core::kana::{KanaTableError, KanaTables};
pub use kana_core::ops::{ConvertOps, MNEMONIC_TABLE};
pub use kana_core::settings::{settings, Settings, SettingsError};
pub use kana_core::unicode;

pub use trace_init::init_tracing;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
