use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::edit::compute_edit;
use crate::error::{IncsortError, Result};

/// Extensions handled by default (compared case-insensitively)
pub const DEFAULT_EXTENSIONS: &[&str] = &["h", "c", "cpp", "hpp"];

/// Directory/file name patterns skipped while walking by default
pub const DEFAULT_EXCLUDES: &[&str] = &[".git", "build", "target", "node_modules"];

/// Callback type for per-file progress reporting
pub type FileCallback<'a> = Option<&'a dyn Fn(&FileOutcome)>;

/// Whether `path` has one of the default C/C++ extensions
pub fn is_target_file(path: &Path) -> bool {
    has_extension(path, DEFAULT_EXTENSIONS)
}

fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let Some(ext) = path.extension() else {
        return false;
    };
    let ext = ext.to_string_lossy();
    extensions
        .iter()
        .any(|e| e.as_ref().trim_start_matches('.').eq_ignore_ascii_case(&ext))
}

/// Which files to sort and which to skip
#[derive(Debug, Clone)]
pub struct FileFilter {
    extensions: Vec<String>,
    exclude: Vec<glob::Pattern>,
}

impl FileFilter {
    pub fn new(extensions: &[String], exclude: &[String]) -> Result<Self> {
        let exclude = exclude
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            extensions: extensions.to_vec(),
            exclude,
        })
    }

    /// Default extensions and exclusions
    pub fn with_defaults() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDES
                .iter()
                .filter_map(|p| glob::Pattern::new(p).ok())
                .collect(),
        }
    }

    /// Add an exclude pattern
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(glob::Pattern::new(pattern)?);
        Ok(self)
    }

    pub fn is_target(&self, path: &Path) -> bool {
        has_extension(path, &self.extensions)
    }

    /// Check a single path component (file or directory name)
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(name))
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Include block was reordered (or would be, when not writing)
    Sorted,
    /// Include block already in order
    Unchanged,
    /// No include block found
    NoIncludes,
    /// File could not be read, walked or written
    Failed,
}

impl FileStatus {
    /// Status tag; `writes` distinguishes applied from pending changes
    pub fn label(self, writes: bool) -> &'static str {
        match self {
            Self::Sorted if writes => "SORTED",
            Self::Sorted => "WOULD SORT",
            Self::Unchanged => "OK",
            Self::NoIncludes => "SKIP",
            Self::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
    /// Sorted include block, set for `Sorted`
    pub replacement: Option<String>,
    /// Error message, set for `Failed`
    pub error: Option<String>,
}

impl FileOutcome {
    fn new(path: PathBuf, status: FileStatus) -> Self {
        Self {
            path,
            status,
            replacement: None,
            error: None,
        }
    }

    fn failed(path: PathBuf, error: impl ToString) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(path, FileStatus::Failed)
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Report files that would change without writing
    pub check: bool,
    /// Show what would change without writing
    pub dry_run: bool,
}

impl FormatOptions {
    pub fn writes(&self) -> bool {
        !self.check && !self.dry_run
    }
}

#[derive(Debug, Default)]
pub struct FormatSummary {
    pub sorted: usize,
    pub unchanged: usize,
    pub no_includes: usize,
    pub failed: usize,
    pub files: Vec<FileOutcome>,
}

impl FormatSummary {
    fn record(&mut self, outcome: FileOutcome) {
        match outcome.status {
            FileStatus::Sorted => self.sorted += 1,
            FileStatus::Unchanged => self.unchanged += 1,
            FileStatus::NoIncludes => self.no_includes += 1,
            FileStatus::Failed => self.failed += 1,
        }
        self.files.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }
}

/// Target files found under the requested paths
#[derive(Debug, Default)]
pub struct CollectedFiles {
    pub files: Vec<PathBuf>,
    /// Entries the walk could not read (reported as `Failed`)
    pub errors: Vec<FileOutcome>,
}

impl CollectedFiles {
    fn push(&mut self, path: PathBuf, seen: &mut HashSet<PathBuf>) {
        let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if seen.insert(key) {
            self.files.push(path);
        }
    }
}

pub struct Formatter {
    filter: FileFilter,
}

impl Formatter {
    pub fn new(filter: FileFilter) -> Self {
        Self { filter }
    }

    /// Expand paths into the list of target files.
    ///
    /// Directories are walked recursively, skipping excluded names. A file
    /// given explicitly must have a target extension. A file reached more
    /// than once is listed once.
    pub fn collect_files(&self, paths: &[PathBuf]) -> Result<CollectedFiles> {
        let mut collected = CollectedFiles::default();
        let mut seen = HashSet::new();

        for path in paths {
            if !path.exists() {
                return Err(IncsortError::PathNotFound { path: path.clone() });
            }

            if path.is_file() {
                if !self.filter.is_target(path) {
                    return Err(IncsortError::UnsupportedFile { path: path.clone() });
                }
                collected.push(path.clone(), &mut seen);
                continue;
            }

            let walker = WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| {
                    e.depth() == 0 || !self.filter.is_excluded(&e.file_name().to_string_lossy())
                });

            for entry in walker {
                match entry {
                    Ok(entry) => {
                        if entry.file_type().is_file() && self.filter.is_target(entry.path()) {
                            collected.push(entry.into_path(), &mut seen);
                        }
                    }
                    Err(e) => {
                        let failed_path = e.path().unwrap_or(path.as_path()).to_path_buf();
                        collected.errors.push(FileOutcome::failed(failed_path, e));
                    }
                }
            }
        }

        Ok(collected)
    }

    /// Sort one file's includes, writing it back when `write` is set
    pub fn format_file(&self, path: &Path, write: bool) -> Result<FileOutcome> {
        let file_error = |source| IncsortError::FileAccess {
            path: path.to_path_buf(),
            source,
        };

        let text = fs::read_to_string(path).map_err(file_error)?;

        let Some(edit) = compute_edit(&text, path) else {
            return Ok(FileOutcome::new(path.to_path_buf(), FileStatus::NoIncludes));
        };

        let sorted = edit.apply(&text);
        if sorted == text {
            return Ok(FileOutcome::new(path.to_path_buf(), FileStatus::Unchanged));
        }

        if write {
            fs::write(path, sorted).map_err(file_error)?;
        }
        Ok(FileOutcome {
            replacement: Some(edit.new_text),
            ..FileOutcome::new(path.to_path_buf(), FileStatus::Sorted)
        })
    }

    /// Sort includes in every target file under `paths`.
    ///
    /// A file that fails is recorded as `Failed` and the run continues.
    pub fn format_paths(
        &self,
        paths: &[PathBuf],
        options: FormatOptions,
        on_file: FileCallback,
    ) -> Result<FormatSummary> {
        let mut summary = FormatSummary::default();
        let collected = self.collect_files(paths)?;

        let formatted = collected.files.into_iter().map(|path| {
            self.format_file(&path, options.writes())
                .unwrap_or_else(|e| FileOutcome::failed(path, e))
        });

        for outcome in collected.errors.into_iter().chain(formatted) {
            if let Some(cb) = on_file {
                cb(&outcome);
            }
            summary.record(outcome);
        }

        Ok(summary)
    }

    /// Sort text read from a pipe. Non-target file names pass through untouched.
    pub fn format_text(&self, text: &str, file_name: &Path) -> String {
        if !self.filter.is_target(file_name) {
            return text.to_string();
        }
        match compute_edit(text, file_name) {
            Some(edit) => edit.apply(text),
            None => text.to_string(),
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(FileFilter::with_defaults())
    }
}
