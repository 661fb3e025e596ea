use inlay_core::InlineOptions;
use inlay_core::host::{EntrySet, HtmlPage};
use inlay_shared::{InlayError, InlayResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The `inlay.json` build manifest.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildManifest {
    /// Entries handed to rolldown. Must be a named map for inlining to work.
    pub entry: EntrySet,
    #[serde(default)]
    pub pages: Vec<HtmlPage>,
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub public_path: Option<String>,
    #[serde(default)]
    pub inline: InlineOptions,
}

impl BuildManifest {
    pub fn load<P: AsRef<Path>>(path: P) -> InlayResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(InlayError::FileNotFound(path.display().to_string()));
        }

        let content = fs_err::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_multi_page_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inlay.json");
        fs_err::write(
            &path,
            r#"{
                "entry": { "home": "./src/pages/home/index.js", "about": "./src/pages/about/index.js" },
                "pages": [
                    { "template": "src/pages/home/index.html", "filename": "home.html", "chunks": ["home"] },
                    { "template": "src/pages/about/index.html", "filename": "about.html", "chunks": ["about"] }
                ],
                "outDir": "dist",
                "inline": { "isRemainBundle": true }
            }"#,
        )
        .unwrap();

        let manifest = BuildManifest::load(&path).unwrap();

        assert!(matches!(manifest.entry, EntrySet::Named(ref entries) if entries.len() == 2));
        assert_eq!(manifest.pages.len(), 2);
        assert_eq!(manifest.pages[1].filename, "about.html");
        assert_eq!(manifest.out_dir, Some(PathBuf::from("dist")));
        assert!(manifest.inline.is_remain_bundle);
        assert!(manifest.public_path.is_none());
    }

    #[test]
    fn minimal_manifest_uses_defaults() {
        let manifest: BuildManifest =
            serde_json::from_str(r#"{ "entry": { "index": "./index.js" }, "pages": [{ "template": "index.html" }] }"#)
                .unwrap();

        assert_eq!(manifest.pages[0].filename, "index.html");
        assert!(manifest.pages[0].chunks.is_none());
        assert!(!manifest.inline.is_remain_bundle);
        assert!(manifest.inline.template.is_none());
    }

    #[test]
    fn missing_manifest_is_reported_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inlay.json");

        let err = BuildManifest::load(&path).unwrap_err();

        assert!(matches!(err, InlayError::FileNotFound(_)));
        assert_eq!(err.to_string(), format!("File not found: {}", path.display()));
    }
}
