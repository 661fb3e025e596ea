//! Minimal companion page renderer: the template as written, plus `<script>` tags for the
//! page's chunks.

mod inject;

pub use inject::*;

use crate::host::{AssetEmitter, HtmlPage, ProducedChunk};
use crate::path::resolve_template_path;
use crate::plugin::INLINE_CHUNK_PREFIX;
use inlay_shared::{InlayError, InlayResult};
use std::path::Path;

pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>App</title>
</head>
<body>
</body>
</html>
"#;

/// Renders `page`: reads its template relative to `context` and injects scripts for its chunks.
///
/// Without an explicit chunk list every produced chunk is referenced, except the ones
/// registered for inlining.
pub fn render_page<O: AssetEmitter + ?Sized>(
    page: &HtmlPage,
    context: &Path,
    chunks: &[ProducedChunk],
    output: &O,
    public_path: &str,
) -> InlayResult<String> {
    let html = match &page.template {
        Some(reference) => {
            let template = resolve_template_path(reference, context)
                .ok_or_else(|| InlayError::UnresolvedTemplate(reference.clone()))?;
            fs_err::read_to_string(template)?
        }
        None => DEFAULT_TEMPLATE.to_string(),
    };

    let names: Vec<&str> = match &page.chunks {
        Some(names) => names.iter().map(String::as_str).collect(),
        None => chunks
            .iter()
            .map(|chunk| chunk.name.as_str())
            .filter(|name| !name.starts_with(INLINE_CHUNK_PREFIX))
            .collect(),
    };

    let files = names
        .into_iter()
        .filter_map(|name| output.chunk_files(name))
        .flatten()
        .map(String::as_str);

    Ok(inject_script_tags(&html, &script_tags(files, public_path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Compilation;

    fn compilation() -> Compilation {
        let mut compilation = Compilation::new();
        compilation.add_chunk_file("home", "home.js".into(), "home()".into());
        compilation.add_chunk_file("about", "about.js".into(), "about()".into());
        compilation.add_chunk_file("inner-abc-0", "inner-abc-0.js".into(), "inner()".into());
        compilation
    }

    #[test]
    fn default_page_references_all_but_inline_chunks() {
        let output = compilation();
        let html =
            render_page(&HtmlPage::default(), Path::new("/"), output.chunks(), &output, "")
                .unwrap();

        assert!(html.contains(r#"<script type="module" src="home.js"></script>"#));
        assert!(html.contains(r#"<script type="module" src="about.js"></script>"#));
        assert!(!html.contains("inner-abc-0.js"));
    }

    #[test]
    fn template_page_references_listed_chunks() {
        let dir = tempfile::tempdir().unwrap();
        fs_err::write(dir.path().join("home.html"), "<body><h1>Home</h1></body>").unwrap();

        let output = compilation();
        let page = HtmlPage::new("html-loader!home.html", "home.html").with_chunks(["home"]);
        let html = render_page(&page, dir.path(), output.chunks(), &output, "/").unwrap();

        assert_eq!(
            html,
            r#"<body><h1>Home</h1><script type="module" src="/home.js"></script></body>"#
        );
    }
}
