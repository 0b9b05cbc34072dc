use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use crate::unicode::{HANKAKU_ASPIRATED_MARK, HANKAKU_VOICED_MARK};

use super::config::{parse_kana_toml, KanaTableError, KanaTableSpec};
use super::table::DEFAULT_TOML;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// The five kana lookup tables. Immutable once built.
#[derive(Debug)]
pub struct KanaTables {
    unvoiced: HashMap<char, char>,
    voiced: HashMap<char, char>,
    aspirated: HashMap<char, char>,
    zen_to_han: HashMap<char, char>,
    diacritic_suffix: HashMap<char, char>,
}

impl KanaTables {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), KanaTableError> {
        // Validate eagerly
        parse_kana_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| KanaTableError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static KanaTables {
        static INSTANCE: OnceLock<KanaTables> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let spec = parse_kana_toml(toml_str).expect("kana TOML must be valid");
            let tables = KanaTables::from_spec(&spec);
            debug!(
                unvoiced = tables.unvoiced.len(),
                zen_to_han = tables.zen_to_han.len(),
                "kana tables built"
            );
            tables
        })
    }

    /// Build the han→zen tables and derive their zen→han inverses.
    pub fn from_spec(spec: &KanaTableSpec) -> Self {
        let mut zen_to_han = HashMap::new();
        let mut diacritic_suffix = HashMap::new();

        for (&han, &zen) in &spec.unvoiced {
            zen_to_han.insert(zen, han);
        }
        for (marks, mark) in [
            (&spec.voiced, HANKAKU_VOICED_MARK),
            (&spec.aspirated, HANKAKU_ASPIRATED_MARK),
        ] {
            for (&han, &zen) in marks {
                zen_to_han.insert(zen, han);
                diacritic_suffix.insert(zen, mark);
            }
        }
        for (&zen, &(han, mark)) in &spec.narrow_only {
            zen_to_han.insert(zen, han);
            if let Some(mark) = mark {
                diacritic_suffix.insert(zen, mark);
            }
        }

        Self {
            unvoiced: spec.unvoiced.iter().map(|(&k, &v)| (k, v)).collect(),
            voiced: spec.voiced.iter().map(|(&k, &v)| (k, v)).collect(),
            aspirated: spec.aspirated.iter().map(|(&k, &v)| (k, v)).collect(),
            zen_to_han,
            diacritic_suffix,
        }
    }

    /// Half-width katakana → full-width, ignoring any following mark.
    pub fn widen(&self, c: char) -> Option<char> {
        self.unvoiced.get(&c).copied()
    }

    /// Fuse a half-width base and the character after it into one full-width
    /// glyph, if they form a voiced or aspirated pair.
    pub fn fuse(&self, base: char, mark: char) -> Option<char> {
        match mark {
            HANKAKU_VOICED_MARK => self.voiced.get(&base).copied(),
            HANKAKU_ASPIRATED_MARK => self.aspirated.get(&base).copied(),
            _ => None,
        }
    }

    /// Full-width katakana → half-width base character.
    pub fn narrow(&self, c: char) -> Option<char> {
        self.zen_to_han.get(&c).copied()
    }

    /// Mark that must follow [`narrow`](Self::narrow)'s result, if any.
    pub fn diacritic_suffix(&self, c: char) -> Option<char> {
        self.diacritic_suffix.get(&c).copied()
    }

    pub fn zen_to_han_len(&self) -> usize {
        self.zen_to_han.len()
    }
}
