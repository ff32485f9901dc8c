pub mod category;
pub mod config;
pub mod edit;
pub mod error;
pub mod formatter;
pub mod locator;

pub use category::{
    sort_include_lines, BuiltinCategory, Category, IncludeClassifier, IncludeEntry,
    BUILTIN_CATEGORIES,
};
pub use config::Config;
pub use edit::{compute_edit, sort_includes, IncludeEdit};
pub use error::{IncsortError, Result};
pub use formatter::{
    is_target_file, CollectedFiles, FileFilter, FileOutcome, FileStatus, FormatOptions, FormatSummary, Formatter,
};
pub use locator::{is_include_line, locate_include_block, IncludeBlock};
