use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "incsort")]
#[command(about = "Group and sort #include directives in C/C++ sources")]
#[command(version)]
pub struct Cli {
    /// Verbose output (also list unchanged and skipped files)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory for config.toml (default: ~/.incsort)
    #[arg(long, global = true, env = "INCSORT_BASE")]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Directory holding config.toml
    pub fn config_dir(&self) -> PathBuf {
        self.base_dir
            .clone()
            .or_else(|| dirs::home_dir().map(|h| h.join(".incsort")))
            .unwrap_or_else(|| PathBuf::from(".incsort"))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sort includes in files and directories
    Fmt {
        /// Files or directories (default: current directory)
        paths: Vec<PathBuf>,

        /// Don't write; fail if any file needs sorting
        #[arg(long)]
        check: bool,

        /// Dry run (report what would change without writing)
        #[arg(short, long)]
        dry_run: bool,

        /// Additional glob for file or directory names to skip (e.g., --exclude=third_party)
        #[arg(long, value_name = "GLOB")]
        exclude: Vec<String>,
    },

    /// Read a document from stdin and write it sorted to stdout
    Stdin {
        /// File name of the document (drives the self header and extension filter)
        #[arg(long)]
        filename: PathBuf,
    },

    /// List include categories in output order
    Categories,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., files.extensions)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., files.exclude)
        key: String,

        /// Value to set (e.g., "h,cpp" or "[h, cpp]")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Create config file with defaults
    Init,
}
