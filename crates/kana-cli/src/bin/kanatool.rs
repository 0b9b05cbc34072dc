use std::path::Path;
use std::process;

use clap::{Args, Parser, Subcommand};

use kana_cli::commands::config_ops;
use kana_cli::commands::convert_ops::{self, OpsArgs};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(name = "kanatool", about = "Japanese width/script conversion")]
struct Cli {
    /// Write JSON trace events to DIR/kana-trace.jsonl (requires the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct OpsFlags {
    /// Mnemonic mode, e.g. "KV", "as", "Hc"
    #[arg(short, long, conflicts_with = "mask")]
    mode: Option<String>,
    /// Raw integer operation mask
    #[arg(long)]
    mask: Option<i64>,
    /// Characters to copy through unchanged
    #[arg(long)]
    ignore: Option<String>,
    /// Do not fuse half-width katakana with a following ﾞ / ﾟ
    #[arg(long)]
    keep_marks_apart: bool,
    /// Settings TOML providing the default mode and ignore set
    #[arg(long)]
    settings: Option<String>,
    /// Custom kana table TOML
    #[arg(long)]
    tables: Option<String>,
}

impl OpsFlags {
    fn load(self) -> OpsArgs {
        if let Some(file) = &self.settings {
            die!(
                config_ops::load_settings(file),
                "Error loading settings {file}: {}"
            );
        }
        if let Some(file) = &self.tables {
            die!(
                config_ops::load_tables(file),
                "Error loading kana tables {file}: {}"
            );
        }
        OpsArgs {
            mode: self.mode,
            mask: self.mask,
            ignore: self.ignore,
            keep_marks_apart: self.keep_marks_apart,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Convert TEXT, or each line of --input / stdin
    Convert {
        /// Text to convert (reads lines from --input or stdin when omitted)
        text: Option<String>,
        /// Input file, one text per line
        #[arg(long, conflicts_with = "text")]
        input: Option<String>,
        /// Emit JSON lines {"input", "output"}
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        ops: OpsFlags,
    },
    /// Show which rule handled each character
    Explain {
        /// Text to explain
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        ops: OpsFlags,
    },
    /// List mnemonic letters and their bits
    Modes,
    /// Print the default kana table TOML
    TablesExport,
    /// Validate a kana table TOML file
    TablesValidate {
        /// Kana table TOML file
        file: String,
    },
    /// Print the default settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Settings TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(dir) = &cli.trace_dir {
        kana_engine::init_tracing(Path::new(dir));
    }

    match cli.command {
        Command::Convert {
            text,
            input,
            json,
            ops,
        } => {
            let args = ops.load();
            convert_ops::convert_cmd(text.as_deref(), input.as_deref(), &args, json);
        }
        Command::Explain { text, json, ops } => {
            let args = ops.load();
            convert_ops::explain_cmd(&text, &args, json);
        }
        Command::Modes => convert_ops::modes_cmd(),
        Command::TablesExport => config_ops::tables_export(),
        Command::TablesValidate { file } => config_ops::tables_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
