use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::process;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use kana_core::converter::{convert, explain, Explanation};
use kana_core::ops::{describe, ConvertOps, MNEMONIC_TABLE};
use kana_core::settings::Settings;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertCmdError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Operation selection shared by `convert` and `explain`.
#[derive(Debug, Default, Clone)]
pub struct OpsArgs {
    pub mode: Option<String>,
    pub mask: Option<i64>,
    pub ignore: Option<String>,
    pub keep_marks_apart: bool,
}

impl OpsArgs {
    /// Explicit flags win over the settings file.
    pub fn resolve(&self, settings: &Settings) -> (ConvertOps, String) {
        let mut ops = match (&self.mode, self.mask) {
            (Some(mode), _) => ConvertOps::from_mnemonic(mode),
            (None, Some(mask)) => ConvertOps::from_mask(mask),
            (None, None) => settings.default_ops(),
        };
        if self.keep_marks_apart {
            ops.insert(ConvertOps::KEEP_DIACRITIC_MARKS_APART);
        }
        let ignore = self
            .ignore
            .clone()
            .unwrap_or_else(|| settings.convert.ignore.clone());
        (ops, ignore)
    }
}

#[derive(Serialize)]
struct ConvertedLine<'a> {
    input: &'a str,
    output: &'a str,
}

/// Convert every line of `reader`, writing one result per line.
pub fn convert_lines<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    ops: ConvertOps,
    ignore: &str,
    json: bool,
) -> Result<usize, ConvertCmdError> {
    let mut count = 0;
    for line in reader.lines() {
        let line = line?;
        let output = convert(&line, ops, ignore);
        if json {
            serde_json::to_writer(
                &mut *writer,
                &ConvertedLine {
                    input: &line,
                    output: &output,
                },
            )?;
            writeln!(writer)?;
        } else {
            writeln!(writer, "{output}")?;
        }
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

pub fn convert_cmd(text: Option<&str>, input: Option<&str>, args: &OpsArgs, json: bool) {
    let (ops, ignore) = args.resolve(kana_core::settings::settings());
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match (text, input) {
        (Some(text), _) => {
            die!(
                convert_lines(text.as_bytes(), &mut out, ops, &ignore, json),
                "Error: {}"
            );
        }
        (None, Some(path)) => {
            let file = die!(fs::File::open(path), "Error opening {path}: {}");
            die!(
                convert_lines(BufReader::new(file), &mut out, ops, &ignore, json),
                "Error: {}"
            );
        }
        (None, None) => {
            let stdin = io::stdin();
            die!(
                convert_lines(stdin.lock(), &mut out, ops, &ignore, json),
                "Error: {}"
            );
        }
    }
}

pub fn explain_cmd(text: &str, args: &OpsArgs, json: bool) {
    let (ops, ignore) = args.resolve(kana_core::settings::settings());
    let result = explain(text, ops, &ignore);
    if json {
        let s = die!(serde_json::to_string_pretty(&result), "Error: {}");
        println!("{s}");
    } else {
        print!("{}", format_text(&result));
    }
}

pub fn modes_cmd() {
    print!("{}", format_modes());
}

fn pad(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}

/// Human-readable step table. Widths are terminal columns as measured by
/// `unicode-width` over the whole string, so a half-width mark following a
/// half-width kana adds no column of its own (`"ｶﾞ"` is one column wide).
pub fn format_text(result: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== \"{}\" -> \"{}\" (mode={}{}) ===\n",
        result.input,
        result.output,
        if result.mode.is_empty() { "-" } else { &result.mode },
        if result.keep_diacritic_marks_apart {
            ", marks apart"
        } else {
            ""
        },
    ));
    out.push_str(&format!(
        "  width {} -> {}, {} of {} steps changed\n",
        result.input.width(),
        result.output.width(),
        result.changed(),
        result.steps.len(),
    ));

    if result.steps.is_empty() {
        return out;
    }

    let col = result
        .steps
        .iter()
        .map(|s| s.input.width().max(s.output.width()))
        .max()
        .unwrap_or(1);

    out.push('\n');
    for step in &result.steps {
        let rule = match (step.rule, step.ignored) {
            (_, true) => "(ignored)".to_string(),
            (Some(rule), false) => rule.name().to_string(),
            (None, false) => "-".to_string(),
        };
        out.push_str(&format!(
            "  {:>4}  {:<9} {} w={}  ->  {} w={}  {}\n",
            step.index,
            step.class.name(),
            pad(&step.input, col),
            step.input.width(),
            pad(&step.output, col),
            step.output.width(),
            rule,
        ));
    }
    out
}

/// Mnemonic letters with their bits and meaning.
pub fn format_modes() -> String {
    let mut out = String::new();
    for (letter, op) in MNEMONIC_TABLE {
        out.push_str(&format!(
            "  {letter}  0x{:06x}  {}\n",
            op.bits(),
            describe(op)
        ));
    }
    out.push_str(&format!(
        "  (modifier) 0x{:06x}  {}\n",
        ConvertOps::KEEP_DIACRITIC_MARKS_APART.bits(),
        describe(ConvertOps::KEEP_DIACRITIC_MARKS_APART)
    ));
    out
}
