use crate::config::WalkerConfig;
use crate::core::{Error, Language, Result, SourceFile};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level directories that usually hold application code
const PRIORITY_DIRS: &[&str] = &["app", "components", "lib", "pages"];

pub struct FileWalker {
    root: PathBuf,
    max_files: usize,
    respect_gitignore: bool,
    skip_dirs: Vec<String>,
    max_file_bytes: u64,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self::from_config(root, &WalkerConfig::default())
    }

    pub fn from_config(root: PathBuf, config: &WalkerConfig) -> Self {
        Self {
            root,
            max_files: config.max_files,
            respect_gitignore: config.respect_gitignore,
            skip_dirs: config.skip_dirs.clone(),
            max_file_bytes: 0,
        }
    }

    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Files above this size are listed with empty content so the analyzer
    /// reports them as too large instead of reading them (0 reads all).
    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    /// Relative paths of every source file in a known language, application
    /// code first, capped at `max_files`.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let skip_dirs = self.skip_dirs.clone();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir && entry.depth() > 0 && is_skipped_dir(entry.file_name(), &skip_dirs))
            })
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if Language::from_path(path) == Language::Unknown {
                continue;
            }
            if let Ok(relative) = path.strip_prefix(&self.root) {
                files.push(relative.to_path_buf());
            }
        }

        files.sort_by_cached_key(|path| (priority(path), path.clone()));
        if files.len() > self.max_files {
            debug!(
                found = files.len(),
                kept = self.max_files,
                "Capping collected files"
            );
            files.truncate(self.max_files);
        }

        Ok(files)
    }

    /// Walk and read every selected file.
    ///
    /// Unreadable or non-UTF-8 files are logged and left out.
    pub fn collect(&self) -> Result<Vec<SourceFile>> {
        if !self.root.is_dir() {
            return Err(Error::file_system("not a directory", &self.root));
        }

        let files = self
            .walk()?
            .into_iter()
            .filter_map(|relative| self.read_source_file(&relative))
            .collect();
        Ok(files)
    }

    fn read_source_file(&self, relative: &Path) -> Option<SourceFile> {
        let absolute = self.root.join(relative);
        let path = display_path(relative);

        let size_bytes = match std::fs::metadata(&absolute) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                warn!("Failed to stat {}: {}", absolute.display(), e);
                return None;
            }
        };

        if self.max_file_bytes > 0 && size_bytes > self.max_file_bytes {
            return Some(SourceFile {
                path,
                content: String::new(),
                size_bytes,
            });
        }

        match std::fs::read_to_string(&absolute) {
            Ok(content) => Some(SourceFile {
                path,
                content,
                size_bytes,
            }),
            Err(e) => {
                warn!("Failed to read {}: {}", absolute.display(), e);
                None
            }
        }
    }
}

fn is_skipped_dir(name: &std::ffi::OsStr, skip_dirs: &[String]) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || skip_dirs.iter().any(|skip| *skip == name)
}

/// 0: JS/TS under an application directory, 1: other JS/TS, 2: the rest
fn priority(path: &Path) -> u8 {
    if !Language::from_path(path).is_analyzable() {
        return 2;
    }

    let mut components = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned());
    let first = components.next().unwrap_or_default();
    let top = if first == "src" {
        components.next().unwrap_or_default()
    } else {
        first
    };

    if PRIORITY_DIRS.contains(&top.as_str()) {
        0
    } else {
        1
    }
}

/// Forward-slash relative path, the form every record carries
fn display_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Collect source files under `root` using the walker settings.
pub fn collect_source_files(
    root: &Path,
    config: &WalkerConfig,
    max_file_bytes: u64,
) -> Result<Vec<SourceFile>> {
    FileWalker::from_config(root.to_path_buf(), config)
        .with_max_file_bytes(max_file_bytes)
        .collect()
}
