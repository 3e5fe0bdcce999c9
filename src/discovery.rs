use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Suffixes recognized as genome feature tables
const FEATURE_SUFFIXES: [&str; 2] = [".features.tab", ".features.tab.gz"];

/// Finds genome feature tables inside a directory
pub struct FileDiscovery {
    recursive: bool,
}

impl FileDiscovery {
    pub fn new(recursive: bool) -> Self {
        Self { recursive }
    }

    /// List feature tables under `dir`, sorted by path
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        if self.recursive {
            for entry in WalkDir::new(dir).follow_links(true) {
                let entry = entry
                    .with_context(|| format!("Failed to walk directory: {}", dir.display()))?;
                let path = entry.path();
                if path.is_file() && is_feature_table(path) {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            let entries = fs::read_dir(dir)
                .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

            for entry in entries {
                let entry = entry.with_context(|| {
                    format!("Failed to read directory entry in: {}", dir.display())
                })?;
                let path = entry.path();

                if path.is_file() && is_feature_table(&path) {
                    files.push(path);
                }
            }
        }

        files.sort();
        Ok(files)
    }
}

/// True when the file name ends in `.features.tab` (optionally gzipped)
pub fn is_feature_table(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .map_or(false, |name| {
            FEATURE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
        })
}
