//! Conversion between half-width and full-width ASCII, digits, letters and
//! spaces, and between half-width katakana, full-width katakana and hiragana.

pub mod converter;
pub mod kana;
pub mod ops;
pub mod settings;
pub mod unicode;
