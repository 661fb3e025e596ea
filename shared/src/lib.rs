mod error;

pub use error::*;

use std::path::{Path, PathBuf};

/// Canonicalizes a path, stripping the `\\?\` verbatim prefix Windows adds.
pub fn canonicalize_with_strip<P: AsRef<Path>>(path: P) -> InlayResult<PathBuf> {
    let canonical = fs_err::canonicalize(path.as_ref())?;

    #[cfg(windows)]
    {
        let display = canonical.to_string_lossy();
        if let Some(stripped) = display.strip_prefix(r"\\?\") {
            return Ok(PathBuf::from(stripped));
        }
    }

    Ok(canonical)
}
