//! Corpus discovery: recursive, sorted file listing by extension.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};

/// Every regular file under `root` whose name ends in `.extension`.
///
/// Hidden files and directories are included. The result is sorted so that
/// reports are reproducible across platforms. Entries that cannot be read are
/// skipped with a status line.
pub fn find_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let extension = extension.trim().trim_start_matches('.');
    if extension.is_empty() {
        return Err(Error::validation_invalid_argument(
            "extension",
            "Extension filter must not be empty",
            None,
            None,
        ));
    }

    if !root.is_dir() {
        return Err(Error::validation_invalid_argument(
            "path",
            format!("{} is not a directory", root.display()),
            Some(root.display().to_string()),
            None,
        ));
    }

    let pattern = format!(
        "{}/**/*.{}",
        Pattern::escape(&root.to_string_lossy()),
        Pattern::escape(extension)
    );
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let entries = glob::glob_with(&pattern, options).map_err(|e| {
        Error::validation_invalid_argument("path", e.to_string(), Some(pattern.clone()), None)
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => {
                log_status!("walk", "Skipping {}: {}", e.path().display(), e.error());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// `path` relative to `root`, for reports.
pub fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn finds_nested_and_hidden_files_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "index.html");
        touch(dir.path(), "about/team.html");
        touch(dir.path(), ".cache/page.html");
        touch(dir.path(), "css/site.css");

        let files = find_files(dir.path(), "html").unwrap();
        let rel: Vec<String> = files.iter().map(|f| relative(dir.path(), f)).collect();

        assert_eq!(rel, vec![".cache/page.html", "about/team.html", "index.html"]);
    }

    #[test]
    fn leading_dot_in_extension_is_optional() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "css/site.css");

        assert_eq!(find_files(dir.path(), ".css").unwrap().len(), 1);
        assert_eq!(find_files(dir.path(), "css").unwrap().len(), 1);
    }

    #[test]
    fn directories_matching_the_extension_are_ignored() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("odd.html")).unwrap();
        touch(dir.path(), "odd.html/inner.html");

        let files = find_files(dir.path(), "html").unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("odd.html/inner.html"));
    }

    #[test]
    fn similar_extensions_do_not_match() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "page.htmlx");
        touch(dir.path(), "page.html.tmp");

        assert!(find_files(dir.path(), "html").unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_a_validation_error() {
        let err = find_files(Path::new("/nonexistent/site"), "html").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn empty_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(find_files(dir.path(), ".").is_err());
    }

    #[test]
    fn relative_strips_root() {
        let root = Path::new("/site");
        assert_eq!(relative(root, Path::new("/site/css/a.css")), "css/a.css");
        assert_eq!(relative(root, Path::new("/other/a.css")), "/other/a.css");
    }
}
