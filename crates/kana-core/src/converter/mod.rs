//! Width/script conversion over a character sequence.
//!
//! A single left-to-right scan applies an ordered rule chain to each
//! character; the first rule that changes the character wins. Half-width
//! katakana may fuse with a following diacritic mark (stride 2), and
//! full-width voiced katakana split back into base + mark on the way down.

pub mod explain;
mod rules;
mod scan;


use tracing::{debug, debug_span};

use crate::kana::KanaTables;
use crate::ops::ConvertOps;

use scan::{Engine, Scan};

pub use explain::{explain, ExplainStep, Explanation};
pub use rules::Rule;

/// Convert `text` with the requested operations.
///
/// Characters in `ignore` are copied verbatim. An empty operation set
/// returns the input unchanged.
pub fn convert(text: &str, ops: ConvertOps, ignore: &str) -> String {
    convert_with_tables(KanaTables::global(), text, ops, ignore)
}

/// Like [`convert`], taking a raw integer mask. Non-positive masks are no-ops.
pub fn convert_mask(text: &str, mask: i64, ignore: &str) -> String {
    convert(text, ConvertOps::from_mask(mask), ignore)
}

/// Like [`convert`], taking the mnemonic notation (`"KV"`, `"as"`, ...).
pub fn convert_mode(text: &str, mode: &str, ignore: &str) -> String {
    convert(text, ConvertOps::from_mnemonic(mode), ignore)
}

/// Convert using an explicit set of kana tables instead of the global ones.
pub fn convert_with_tables(
    tables: &KanaTables,
    text: &str,
    ops: ConvertOps,
    ignore: &str,
) -> String {
    if text.is_empty() {
        return String::new();
    }
    if !ops.has_conversion() {
        return text.to_string();
    }
    let _span = debug_span!("convert", ops = %ops, chars = text.chars().count()).entered();

    let engine = Engine::new(ops, tables);
    let mut scan = Scan::new(text, ignore);
    let mut out = String::with_capacity(text.len());
    let mut changed = 0usize;
    while let Some(step) = engine.next_step(&mut scan) {
        if step.rule.is_some() {
            changed += 1;
        }
        step.write_to(&mut out);
    }

    debug!(changed, out_len = out.len());
    out
}
