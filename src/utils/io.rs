//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Read a file as UTF-8 text.
///
/// I/O failures map to `Error::internal_io`; content that is not valid UTF-8
/// maps to `Error::rewrite_encoding` so callers can skip it instead of failing.
pub fn read_text(path: &Path, operation: &str) -> Result<String> {
    let bytes =
        fs::read(path).map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))?;

    String::from_utf8(bytes)
        .map_err(|e| Error::rewrite_encoding(path.display().to_string(), e.utf8_error().to_string()))
}

/// Write content to file atomically (write to .tmp, then rename).
///
/// Readers always see either the old content or the new content, never a
/// partial write. Symlinks are written through to the file they point at, an
/// existing file keeps its permission bits, and a read-only file is an error.
pub fn write_file_atomic(path: &Path, content: &str, operation: &str) -> Result<()> {
    let step_err = |e: io::Error, step: &str| {
        Error::internal_io(e.to_string(), Some(format!("{} ({})", operation, step)))
    };

    let target = match fs::canonicalize(path) {
        Ok(real) => real,
        Err(e) if e.kind() == io::ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(step_err(e, "resolve")),
    };

    let permissions = match fs::metadata(&target) {
        Ok(meta) if meta.permissions().readonly() => {
            return Err(Error::internal_io(
                format!("{} is read-only", path.display()),
                Some(operation.to_string()),
            ));
        }
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(step_err(e, "metadata")),
    };

    let invalid_path = || {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    };
    let parent = target.parent().ok_or_else(invalid_path)?;
    let filename = target.file_name().ok_or_else(invalid_path)?;

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content).map_err(|e| step_err(e, "write temp"))?;

    if let Some(permissions) = permissions {
        if let Err(e) = fs::set_permissions(&tmp_path, permissions) {
            let _ = fs::remove_file(&tmp_path);
            return Err(step_err(e, "permissions"));
        }
    }

    if let Err(e) = fs::rename(&tmp_path, &target) {
        let _ = fs::remove_file(&tmp_path);
        return Err(step_err(e, "rename"));
    }

    Ok(())
}

/// Move a file, creating the destination's parent directories first.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    let operation = format!("rename {} → {}", from.display(), to.display());

    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::internal_io(e.to_string(), Some(operation.clone())))?;
    }

    fs::rename(from, to).map_err(|e| Error::internal_io(e.to_string(), Some(operation)))
}
