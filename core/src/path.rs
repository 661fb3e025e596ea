use std::path::{Path, PathBuf};
use sugar_path::SugarPath;

const LOADER_DELIMITER: char = '!';
const QUERY_DELIMITER: char = '?';

/// Strips the loader chain and query from a template reference.
///
/// `raw-loader!html-loader!./src/index.html?minimize` yields `./src/index.html`.
/// Returns `None` when nothing is left to resolve.
pub fn strip_template_reference(reference: &str) -> Option<&str> {
    let tail = reference
        .rsplit_once(LOADER_DELIMITER)
        .map_or(reference, |(_, tail)| tail);
    let path = tail.split(QUERY_DELIMITER).next().unwrap_or_default();

    if path.is_empty() { None } else { Some(path) }
}

/// Resolves a template reference to the absolute raw path used to key tracked markers.
///
/// Joining is lexical: `.` and `..` are collapsed, symlinks are left alone.
pub fn resolve_template_path<P: AsRef<Path>>(reference: &str, base_dir: P) -> Option<PathBuf> {
    let raw = strip_template_reference(reference)?;
    Some(base_dir.as_ref().join(raw).normalize())
}

/// Resolves a marker's script URL.
///
/// URLs starting with `.` are relative to the template's directory, everything else is
/// relative to `context_dir`.
pub fn resolve_script_path(url: &str, template_path: &Path, context_dir: &Path) -> PathBuf {
    if url.starts_with('.') {
        let template_dir = template_path.parent().unwrap_or(template_path);
        template_dir.join(url).normalize()
    } else {
        context_dir.join(url).normalize()
    }
}
