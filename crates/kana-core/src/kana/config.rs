use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::unicode::{is_hankaku_diacritic, is_hankaku_katakana};

#[derive(Deserialize)]
struct KanaConfig {
    unvoiced: BTreeMap<String, String>,
    #[serde(default)]
    voiced: BTreeMap<String, String>,
    #[serde(default)]
    aspirated: BTreeMap<String, String>,
    #[serde(default)]
    narrow_only: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum KanaTableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[unvoiced] table is empty")]
    Empty,
    #[error("[{table}] key is not a single half-width katakana character: {key:?}")]
    NotHalfWidthKana { table: &'static str, key: String },
    #[error("[{table}] value for {key:?} is not a single character: {value:?}")]
    NotSingleChar {
        table: &'static str,
        key: String,
        value: String,
    },
    #[error("[{table}] base {key:?} has no [unvoiced] entry")]
    UnknownBase { table: &'static str, key: String },
    #[error("[narrow_only] key is not a single character: {0:?}")]
    InvalidNarrowKey(String),
    #[error("[narrow_only] value for {key:?} must be a half-width kana optionally followed by a mark: {value:?}")]
    InvalidNarrowSpelling { key: String, value: String },
    #[error("full-width {0:?} is produced by more than one entry")]
    DuplicateTarget(char),
    #[error("kana tables already initialized")]
    AlreadyInitialized,
}

/// Validated table source: han→zen maps plus full-width-only spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanaTableSpec {
    pub unvoiced: BTreeMap<char, char>,
    pub voiced: BTreeMap<char, char>,
    pub aspirated: BTreeMap<char, char>,
    /// Full-width character → (half-width base, optional mark).
    pub narrow_only: BTreeMap<char, (char, Option<char>)>,
}

impl KanaTableSpec {
    pub fn entry_count(&self) -> usize {
        self.unvoiced.len() + self.voiced.len() + self.aspirated.len() + self.narrow_only.len()
    }
}

/// Parse and validate a kana table TOML.
pub fn parse_kana_toml(toml_str: &str) -> Result<KanaTableSpec, KanaTableError> {
    let config: KanaConfig =
        toml::from_str(toml_str).map_err(|e| KanaTableError::Parse(e.to_string()))?;

    if config.unvoiced.is_empty() {
        return Err(KanaTableError::Empty);
    }

    let unvoiced = parse_han_table("unvoiced", &config.unvoiced)?;
    let voiced = parse_han_table("voiced", &config.voiced)?;
    let aspirated = parse_han_table("aspirated", &config.aspirated)?;

    for (table, map) in [("voiced", &voiced), ("aspirated", &aspirated)] {
        if let Some(base) = map.keys().find(|k| !unvoiced.contains_key(*k)) {
            return Err(KanaTableError::UnknownBase {
                table,
                key: base.to_string(),
            });
        }
    }

    let mut narrow_only = BTreeMap::new();
    for (key, value) in &config.narrow_only {
        let full = single_char(key).ok_or_else(|| KanaTableError::InvalidNarrowKey(key.clone()))?;
        let spelling = parse_narrow_spelling(value).ok_or_else(|| {
            KanaTableError::InvalidNarrowSpelling {
                key: key.clone(),
                value: value.clone(),
            }
        })?;
        narrow_only.insert(full, spelling);
    }

    // Each full-width glyph must invert to exactly one half-width spelling.
    let mut targets = BTreeSet::new();
    let produced = unvoiced
        .values()
        .chain(voiced.values())
        .chain(aspirated.values())
        .chain(narrow_only.keys());
    for &full in produced {
        if !targets.insert(full) {
            return Err(KanaTableError::DuplicateTarget(full));
        }
    }

    Ok(KanaTableSpec {
        unvoiced,
        voiced,
        aspirated,
        narrow_only,
    })
}

fn parse_han_table(
    table: &'static str,
    raw: &BTreeMap<String, String>,
) -> Result<BTreeMap<char, char>, KanaTableError> {
    let mut map = BTreeMap::new();
    for (key, value) in raw {
        let han = single_char(key)
            .filter(|&c| is_hankaku_katakana(c))
            .ok_or_else(|| KanaTableError::NotHalfWidthKana {
                table,
                key: key.clone(),
            })?;
        let zen = single_char(value).ok_or_else(|| KanaTableError::NotSingleChar {
            table,
            key: key.clone(),
            value: value.clone(),
        })?;
        map.insert(han, zen);
    }
    Ok(map)
}

fn parse_narrow_spelling(value: &str) -> Option<(char, Option<char>)> {
    let mut chars = value.chars();
    let base = chars.next().filter(|&c| is_hankaku_katakana(c) && !is_hankaku_diacritic(c))?;
    let mark = chars.next();
    if mark.is_some_and(|m| !is_hankaku_diacritic(m)) || chars.next().is_some() {
        return None;
    }
    Some((base, mark))
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_toml() {
        let toml = r#"
[unvoiced]
"ｶ" = "カ"
"ﾊ" = "ハ"

[voiced]
"ｶ" = "ガ"

[aspirated]
"ﾊ" = "パ"

[narrow_only]
"ヴ" = "ｳﾞ"
"ヵ" = "ｶ"
"#;
        let spec = parse_kana_toml(toml).unwrap();
        assert_eq!(spec.unvoiced[&'ｶ'], 'カ');
        assert_eq!(spec.voiced[&'ｶ'], 'ガ');
        assert_eq!(spec.aspirated[&'ﾊ'], 'パ');
        assert_eq!(spec.narrow_only[&'ヴ'], ('ｳ', Some('ﾞ')));
        assert_eq!(spec.narrow_only[&'ヵ'], ('ｶ', None));
        assert_eq!(spec.entry_count(), 6);
    }

    #[test]
    fn parse_default_toml() {
        let spec = parse_kana_toml(super::super::table::DEFAULT_TOML).unwrap();
        assert_eq!(spec.unvoiced.len(), 61);
        assert_eq!(spec.voiced.len(), 20);
        assert_eq!(spec.aspirated.len(), 5);
        assert_eq!(spec.narrow_only.len(), 3);
        // Diacritic marks are left unmapped.
        assert!(!spec.unvoiced.contains_key(&'ﾞ'));
        assert!(!spec.unvoiced.contains_key(&'ﾟ'));
    }

    #[test]
    fn optional_sections_default_to_empty() {
        let spec = parse_kana_toml("[unvoiced]\n\"ｱ\" = \"ア\"\n").unwrap();
        assert!(spec.voiced.is_empty());
        assert!(spec.aspirated.is_empty());
        assert!(spec.narrow_only.is_empty());
    }

    #[test]
    fn error_empty_unvoiced() {
        let err = parse_kana_toml("[unvoiced]\n").unwrap_err();
        assert!(matches!(err, KanaTableError::Empty));
    }

    #[test]
    fn error_full_width_key() {
        let err = parse_kana_toml("[unvoiced]\n\"カ\" = \"ガ\"\n").unwrap_err();
        assert!(matches!(
            err,
            KanaTableError::NotHalfWidthKana {
                table: "unvoiced",
                ..
            }
        ));
    }

    #[test]
    fn error_multi_char_value() {
        let err = parse_kana_toml("[unvoiced]\n\"ｶ\" = \"カカ\"\n").unwrap_err();
        assert!(matches!(err, KanaTableError::NotSingleChar { .. }));
    }

    #[test]
    fn error_voiced_without_base() {
        let toml = r#"
[unvoiced]
"ｱ" = "ア"

[voiced]
"ｶ" = "ガ"
"#;
        let err = parse_kana_toml(toml).unwrap_err();
        assert!(matches!(err, KanaTableError::UnknownBase { table: "voiced", .. }));
        assert!(err.to_string().contains("voiced"));
    }

    #[test]
    fn error_invalid_narrow_spelling() {
        for bad in ["", "ｳｳ", "ｳﾞﾞ", "ﾞ", "ウ"] {
            let toml = format!("[unvoiced]\n\"ｳ\" = \"ウ\"\n[narrow_only]\n\"ヴ\" = \"{bad}\"\n");
            let err = parse_kana_toml(&toml).unwrap_err();
            assert!(
                matches!(err, KanaTableError::InvalidNarrowSpelling { .. }),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn error_duplicate_target() {
        let toml = r#"
[unvoiced]
"ｶ" = "カ"

[narrow_only]
"カ" = "ｶ"
"#;
        let err = parse_kana_toml(toml).unwrap_err();
        assert!(matches!(err, KanaTableError::DuplicateTarget('カ')));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_kana_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, KanaTableError::Parse(_)));
    }

    #[test]
    fn error_missing_unvoiced_section() {
        let err = parse_kana_toml("[voiced]\n\"ｶ\" = \"ガ\"\n").unwrap_err();
        assert!(matches!(err, KanaTableError::Parse(_)));
    }
}
