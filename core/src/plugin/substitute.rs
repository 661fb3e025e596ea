use super::InlinePlugin;
use crate::host::AssetEmitter;
use crate::path::resolve_template_path;
use inlay_shared::InlayResult;
use log::{debug, warn};
use std::path::Path;

/// Outcome of inlining one rendered page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Substitution {
    pub inlined: usize,
    /// Inline markers whose chunk produced no file. The tag is left in place.
    pub skipped: usize,
}

impl InlinePlugin {
    /// Replaces the tracked markers of `template` in `html` with their content.
    ///
    /// `template` is the page's template reference as the companion knows it; it is
    /// resolved against `context` the same way it was when entries were defined.
    pub fn substitute<O: AssetEmitter + ?Sized>(
        &self,
        template: &str,
        context: &Path,
        html: &mut String,
        output: &O,
    ) -> InlayResult<Substitution> {
        let mut result = Substitution::default();
        let Some(template) = resolve_template_path(template, context) else {
            return Ok(result);
        };

        for asset in self.inline_assets.get(&template).into_iter().flatten() {
            let content = output
                .bundle_for_chunk(&asset.chunk)
                .and_then(|bundle| output.asset_source(bundle));

            let Some(content) = content else {
                warn!(
                    "chunk {} for '{}' produced no output, leaving the tag in {}",
                    asset.chunk,
                    asset.url,
                    template.display()
                );
                result.skipped += 1;
                continue;
            };

            if self.replace(html, &asset.raw_script, content, &asset.url) {
                result.inlined += 1;
            }
        }

        for asset in self.raw_assets.get(&template).into_iter().flatten() {
            let content = fs_err::read_to_string(&asset.script_path)?;

            if self.replace(html, &asset.raw_script, &content, &asset.url) {
                result.inlined += 1;
            }
        }

        if result.inlined > 0 {
            debug!("inlined {} script(s) into {}", result.inlined, template.display());
        }

        Ok(result)
    }

    /// Replaces the first occurrence of `raw_script` literally.
    fn replace(&self, html: &mut String, raw_script: &str, content: &str, url: &str) -> bool {
        let Some(start) = html.find(raw_script) else {
            return false;
        };

        let wrapped = self.config.wrap(content, url);
        html.replace_range(start..start + raw_script.len(), &wrapped);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InlineConfig;
    use crate::host::{Compilation, HtmlCompanion, HtmlPage};
    use crate::plugin::InlineAsset;
    use std::path::PathBuf;

    struct Pages(Vec<HtmlPage>);

    impl HtmlCompanion for Pages {
        fn pages(&self) -> &[HtmlPage] {
            &self.0
        }
    }

    fn plugin_with(config: InlineConfig, assets: Vec<InlineAsset>) -> InlinePlugin {
        let pages = Pages(vec![HtmlPage::new("index.html", "index.html")]);
        let mut plugin = InlinePlugin::new(Some(&pages), config).unwrap();
        plugin
            .inline_assets
            .insert(PathBuf::from("/site/index.html"), assets);
        plugin
    }

    fn asset(chunk: &str, tag: &str) -> InlineAsset {
        InlineAsset {
            chunk: chunk.to_string(),
            url: "./a.js".to_string(),
            raw_script: tag.to_string(),
        }
    }

    #[test]
    fn replacement_is_literal() {
        let tag = r#"<script src="./a.js?__inline"></script>"#;
        let plugin = plugin_with(InlineConfig::new(), vec![asset("inner-a-0", tag)]);

        let mut output = Compilation::new();
        output.add_chunk_file("inner-a-0", "inner-a-0.js".into(), "s.replace(/x/, '$&$1$$')".into());

        let mut html = format!("<body>{tag}</body>");
        let result = plugin
            .substitute("index.html", Path::new("/site"), &mut html, &output)
            .unwrap();

        assert_eq!(result, Substitution { inlined: 1, skipped: 0 });
        assert_eq!(html, "<body><script>s.replace(/x/, '$&$1$$')</script></body>");
    }

    #[test]
    fn missing_chunk_output_leaves_tag() {
        let tag = r#"<script src="./a.js?__inline"></script>"#;
        let plugin = plugin_with(InlineConfig::new(), vec![asset("inner-a-0", tag)]);

        let mut html = tag.to_string();
        let result = plugin
            .substitute("index.html", Path::new("/site"), &mut html, &Compilation::new())
            .unwrap();

        assert_eq!(result, Substitution { inlined: 0, skipped: 1 });
        assert_eq!(html, tag);
    }

    #[test]
    fn duplicate_tags_are_each_replaced_once() {
        let tag = r#"<script src="./a.js?__inline"></script>"#;
        let plugin = plugin_with(
            InlineConfig::new(),
            vec![asset("inner-a-0", tag), asset("inner-a-1", tag)],
        );

        let mut output = Compilation::new();
        output.add_chunk_file("inner-a-0", "inner-a-0.js".into(), "first()".into());
        output.add_chunk_file("inner-a-1", "inner-a-1.js".into(), "second()".into());

        let mut html = format!("{tag}\n{tag}");
        plugin
            .substitute("index.html", Path::new("/site"), &mut html, &output)
            .unwrap();

        assert_eq!(html, "<script>first()</script>\n<script>second()</script>");
    }

    #[test]
    fn unknown_template_is_untouched() {
        let plugin = plugin_with(InlineConfig::new(), Vec::new());
        let mut html = "<p>hi</p>".to_string();

        let result = plugin
            .substitute("other.html", Path::new("/site"), &mut html, &Compilation::new())
            .unwrap();

        assert_eq!(result, Substitution::default());
        assert_eq!(html, "<p>hi</p>");
    }
}
