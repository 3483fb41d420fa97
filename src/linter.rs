//! @ai:module:intent Validate annotation files and directory trees
//! @ai:module:layer application
//! @ai:module:public_api check_file, lint_directory, FileReport, LintResult
//! @ai:module:depends_on validator, config, dialect, error
//! @ai:module:stateless true

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::validator::validate_dialect;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// @ai:intent Findings for a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub dialect: Dialect,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// @ai:intent Result of checking a directory tree
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LintResult {
    pub files_checked: usize,
    pub files_skipped: usize,
    pub invalid_files: usize,
    pub diagnostics: usize,
    pub reports: Vec<FileReport>,
}

impl LintResult {
    /// @ai:intent Check if every checked file is valid
    pub fn passed(&self) -> bool {
        self.invalid_files == 0
    }

    /// @ai:intent Record a file report and update counts
    fn add(&mut self, report: FileReport) {
        self.files_checked += 1;
        if !report.is_valid() {
            self.invalid_files += 1;
            self.diagnostics += report.diagnostics.len();
        }
        self.reports.push(report);
    }
}

/// @ai:intent Validate a single annotation file
/// @ai:pre path exists and its dialect can be resolved
/// @ai:effects fs:read
pub fn check_file(path: &Path, config: &Config) -> Result<FileReport> {
    let dialect = config
        .dialect_for(path)?
        .ok_or_else(|| Error::UndetectedDialect(path.to_path_buf()))?;

    let content = read(path)?;
    Ok(check_content(path, dialect, &content))
}

/// @ai:intent Validate every annotation file below a directory
/// @ai:post unreadable files become a line-0 diagnostic instead of aborting the walk
/// @ai:edge_cases forced dialect applies only to files selected by extension
/// @ai:effects fs:read
pub fn lint_directory(path: &Path, config: &Config) -> Result<LintResult> {
    let mut result = LintResult::default();

    let walker = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !config.is_excluded(&e.file_name().to_string_lossy())
        });

    for entry in walker
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let file_path = entry.path();
        if !config.is_annotation_file(file_path) {
            continue;
        }

        let Some(dialect) = config.dialect_for(file_path)? else {
            continue;
        };

        let content = match read(file_path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %file_path.display(), error = %e, "unreadable annotation file");
                result.add(FileReport {
                    path: file_path.to_path_buf(),
                    dialect,
                    diagnostics: vec![Diagnostic {
                        line: 0,
                        message: format!("failed to read file: {}", e),
                    }],
                });
                continue;
            }
        };

        if config.skip_empty && content.trim().is_empty() {
            debug!(path = %file_path.display(), "skipping empty file");
            result.files_skipped += 1;
            continue;
        }

        result.add(check_content(file_path, dialect, &content));
    }

    info!(
        checked = result.files_checked,
        skipped = result.files_skipped,
        invalid = result.invalid_files,
        "lint finished"
    );

    Ok(result)
}

fn check_content(path: &Path, dialect: Dialect, content: &str) -> FileReport {
    let diagnostics = validate_dialect(content, dialect);
    debug!(path = %path.display(), %dialect, diagnostics = diagnostics.len(), "checked file");

    FileReport {
        path: path.to_path_buf(),
        dialect,
        diagnostics,
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CONFIG_FILE;
    use std::fs;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_check_valid_file() {
        let mut file = NamedTempFile::with_suffix(".rb").unwrap();
        write!(file, "{}", Dialect::BeginEnd.template()).unwrap();

        let report = check_file(file.path(), &Config::default()).unwrap();

        assert_eq!(report.dialect, Dialect::BeginEnd);
        assert!(report.is_valid());
    }

    #[test]
    fn test_check_invalid_file() {
        let mut file = NamedTempFile::with_suffix(".js").unwrap();
        writeln!(
            file,
            r#"/**
 * @api {{get}} users Get users
 * @apiName
 */"#
        )
        .unwrap();

        let report = check_file(file.path(), &Config::default()).unwrap();
        let lines: Vec<_> = report.diagnostics.iter().map(|d| d.line).collect();

        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn test_check_undetected_dialect() {
        let file = NamedTempFile::with_suffix(".txt").unwrap();
        assert!(matches!(
            check_file(file.path(), &Config::default()),
            Err(Error::UndetectedDialect(_))
        ));
    }

    #[test]
    fn test_lint_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("api.js"), Dialect::CStyle.template()).unwrap();
        fs::write(dir.path().join("api.py"), "").unwrap();
        fs::write(dir.path().join("api.pl"), "#**\n# @apiName Broken\n#*\n").unwrap();
        fs::write(dir.path().join("README.md"), "# docs").unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/dep.js"), "module.exports = 1;").unwrap();

        let result = lint_directory(dir.path(), &Config::default()).unwrap();

        assert_eq!(result.files_checked, 2);
        assert_eq!(result.files_skipped, 1);
        assert_eq!(result.invalid_files, 1);
        assert_eq!(result.diagnostics, 1);
        assert!(!result.passed());

        let broken = result.reports.iter().find(|r| !r.is_valid()).unwrap();
        assert!(broken.path.ends_with("api.pl"));
        assert_eq!(broken.diagnostics[0].line, 2);
    }

    #[test]
    fn test_lint_directory_checks_empty_when_configured() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("api.py"), "").unwrap();

        let config = Config {
            skip_empty: false,
            ..Default::default()
        };
        let result = lint_directory(dir.path(), &config).unwrap();

        assert_eq!(result.files_checked, 1);
        assert_eq!(result.reports[0].diagnostics.len(), 3);
    }

    #[test]
    fn test_lint_directory_forced_dialect_keeps_extension_selection() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("api.rb"), Dialect::BeginEnd.template()).unwrap();
        fs::write(dir.path().join("README.md"), "# docs").unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "dialect = \"ruby\"\n").unwrap();

        let config = Config::load(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        let result = lint_directory(dir.path(), &config).unwrap();

        assert_eq!(result.files_checked, 1);
        assert_eq!(result.invalid_files, 0);
        assert!(result.passed());
        assert!(result.reports[0].path.ends_with("api.rb"));
        assert_eq!(result.reports[0].dialect, Dialect::BeginEnd);
    }

    #[test]
    fn test_lint_directory_forced_dialect_overrides_detected_one() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("api.js"), Dialect::BeginEnd.template()).unwrap();
        fs::write(dir.path().join("notes.txt"), "plain text").unwrap();

        let config = Config {
            dialect: Some("ruby".to_string()),
            ..Default::default()
        };
        let result = lint_directory(dir.path(), &config).unwrap();

        assert_eq!(result.files_checked, 1);
        assert!(result.passed());
        assert_eq!(result.reports[0].dialect, Dialect::BeginEnd);
    }
}
