use std::fs;
use std::process;

use kana_core::kana::{self, KanaTables};
use kana_core::settings::{self, SettingsError};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn tables_export() {
    print!("{}", kana::default_toml());
}

pub fn tables_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let spec = die!(kana::parse_kana_toml(&content), "Error: {}");
    let tables = KanaTables::from_spec(&spec);
    println!(
        "OK: unvoiced={}, voiced={}, aspirated={}, narrow_only={}, zen_to_han={}",
        spec.unvoiced.len(),
        spec.voiced.len(),
        spec.aspirated.len(),
        spec.narrow_only.len(),
        tables.zen_to_han_len()
    );
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: convert.mode={} ({}), convert.ignore={:?}, convert.keep_diacritic_marks_apart={}",
        s.convert.mode,
        s.default_ops().bits(),
        s.convert.ignore,
        s.convert.keep_diacritic_marks_apart
    );
}

/// Install a settings file as the global settings. Must run before `settings()`.
pub fn load_settings(file: &str) -> Result<(), SettingsError> {
    let content =
        fs::read_to_string(file).map_err(|e| SettingsError::Parse(format!("{file}: {e}")))?;
    settings::init_custom(content)
}

/// Install a kana table file as the global tables. Must run before the first conversion.
pub fn load_tables(file: &str) -> Result<(), kana::KanaTableError> {
    let content =
        fs::read_to_string(file).map_err(|e| kana::KanaTableError::Parse(format!("{file}: {e}")))?;
    KanaTables::init_custom(content)
}
