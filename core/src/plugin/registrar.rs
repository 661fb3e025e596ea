use super::{InlineAsset, InlinePlugin, RawAsset};
use crate::host::{EntryDefiner, EntryImport, EntrySet};
use crate::path::{resolve_script_path, resolve_template_path};
use crate::scanner::{Marker, MarkerKind, ScanOptions, scan_with};
use inlay_shared::{InlayError, InlayResult};
use log::debug;
use md5::{Digest, Md5};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const INLINE_CHUNK_PREFIX: &str = "inner-";

/// Name of the build unit registered for the `index`-th inline marker of `template`.
pub fn chunk_name(template: &Path, index: usize) -> String {
    let mut hasher = Md5::new();
    hasher.update(template.to_string_lossy().as_bytes());
    format!("{INLINE_CHUNK_PREFIX}{:x}-{index}", hasher.finalize())
}

impl InlinePlugin {
    /// Scans every distinct template and registers one entry per `?__inline` marker.
    ///
    /// Returns the number of entries added.
    ///
    /// # Errors
    ///
    /// Fails if the host entries are not named, a template cannot be read, or a marker
    /// points at a file that does not exist.
    pub fn define_entries<H: EntryDefiner + ?Sized>(&mut self, host: &mut H) -> InlayResult<usize> {
        let context = host.context().to_path_buf();
        let script_context = self.config.context.clone().unwrap_or_else(|| context.clone());

        let entries = match host.entries_mut() {
            EntrySet::Named(entries) => entries,
            other => return Err(InlayError::InvalidEntryShape(other.shape().to_string())),
        };

        let options = ScanOptions {
            skip_commented: self.config.skip_commented,
        };
        let mut registered = 0;
        let mut seen = HashSet::new();

        for reference in &self.templates {
            let template = resolve_template_path(reference, &context)
                .ok_or_else(|| InlayError::UnresolvedTemplate(reference.clone()))?;
            // several pages may share one template
            if !seen.insert(template.clone()) {
                continue;
            }
            let content = fs_err::read_to_string(&template)?;

            for marker in scan_with(&content, MarkerKind::Inline, options) {
                let script_path = existing_script(&marker, &template, &script_context)?;
                let chunk = chunk_name(&template, marker.index);

                debug!("registering {} for {}", chunk, script_path.display());

                entries.insert(
                    chunk.clone(),
                    EntryImport::Descriptor {
                        import: vec![script_path.to_string_lossy().into_owned()],
                    },
                );
                self.inline_assets
                    .entry(template.clone())
                    .or_default()
                    .push(InlineAsset {
                        chunk,
                        url: marker.url,
                        raw_script: marker.matched,
                    });
                registered += 1;
            }

            for marker in scan_with(&content, MarkerKind::InlineRaw, options) {
                let script_path = existing_script(&marker, &template, &script_context)?;

                self.raw_assets
                    .entry(template.clone())
                    .or_default()
                    .push(RawAsset {
                        script_path,
                        url: marker.url,
                        raw_script: marker.matched,
                    });
            }
        }

        Ok(registered)
    }
}

fn existing_script(marker: &Marker, template: &Path, context: &Path) -> InlayResult<PathBuf> {
    let path = resolve_script_path(&marker.url, template, context);

    if !path.exists() {
        return Err(InlayError::UnresolvedScript {
            path,
            tag: marker.matched.clone(),
            template: template.to_path_buf(),
        });
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_name_is_stable() {
        let template = Path::new("/project/src/index.html");

        assert_eq!(chunk_name(template, 0), chunk_name(template, 0));
        assert_ne!(chunk_name(template, 0), chunk_name(template, 1));
        assert_ne!(
            chunk_name(template, 0),
            chunk_name(Path::new("/project/src/about.html"), 0)
        );
    }

    #[test]
    fn chunk_name_is_md5_of_template_path() {
        assert_eq!(
            chunk_name(Path::new("abc"), 3),
            "inner-900150983cd24fb0d6963f7d28e17f72-3"
        );
    }
}
