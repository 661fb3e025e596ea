use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Wraps inlined content in markup. Receives the content and the marker's URL.
pub type ScriptTag = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Configuration for the inline plugin.
#[derive(Clone)]
pub struct InlineConfig {
    /// Base directory for root-relative marker URLs. Defaults to the host context.
    pub context: Option<PathBuf>,
    /// Keep the standalone bundles of inlined chunks in the output.
    pub remain_bundle: bool,
    /// Custom wrapper for inlined content. Defaults to a bare `<script>` tag.
    pub script_tag: Option<ScriptTag>,
    /// Templates to scan. Empty means every companion page's template.
    pub templates: Vec<String>,
    /// Ignore markers inside unterminated HTML comments.
    pub skip_commented: bool,
}

impl InlineConfig {
    /// Creates a new `InlineConfig` with default values:
    /// no context override, bundles pruned, default script tag, templates discovered.
    pub fn new() -> Self {
        Self {
            context: None,
            remain_bundle: false,
            script_tag: None,
            templates: Vec::new(),
            skip_commented: true,
        }
    }

    #[must_use]
    #[inline(always)]
    pub fn with_context(mut self, context: PathBuf) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use]
    #[inline(always)]
    pub fn with_remain_bundle(mut self, remain_bundle: bool) -> Self {
        self.remain_bundle = remain_bundle;
        self
    }

    #[must_use]
    pub fn with_script_tag<F>(mut self, script_tag: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.script_tag = Some(Arc::new(script_tag));
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.templates.push(template.into());
        self
    }

    #[must_use]
    pub fn with_templates<I, S>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.templates = templates.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    #[inline(always)]
    pub fn with_skip_commented(mut self, skip_commented: bool) -> Self {
        self.skip_commented = skip_commented;
        self
    }

    /// Wraps `content` with the configured script tag.
    pub fn wrap(&self, content: &str, url: &str) -> String {
        match &self.script_tag {
            Some(script_tag) => script_tag(content, url),
            None => format!("<script>{content}</script>"),
        }
    }
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InlineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineConfig")
            .field("context", &self.context)
            .field("remain_bundle", &self.remain_bundle)
            .field("script_tag", &self.script_tag.as_ref().map(|_| "<fn>"))
            .field("templates", &self.templates)
            .field("skip_commented", &self.skip_commented)
            .finish()
    }
}

/// `template` accepts either a single reference or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(one) => vec![one],
            OneOrMany::Many(many) => many,
        }
    }
}

/// Serialized form of [`InlineConfig`], as written in a build manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineOptions {
    pub context: Option<PathBuf>,
    pub is_remain_bundle: bool,
    pub template: Option<OneOrMany>,
    pub skip_commented: Option<bool>,
}

impl From<InlineOptions> for InlineConfig {
    fn from(options: InlineOptions) -> Self {
        let mut config = InlineConfig::new().with_remain_bundle(options.is_remain_bundle);

        if let Some(context) = options.context {
            config = config.with_context(context);
        }
        if let Some(template) = options.template {
            config = config.with_templates(template.into_vec());
        }
        if let Some(skip_commented) = options.skip_commented {
            config = config.with_skip_commented(skip_commented);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = InlineConfig::new();

        assert!(config.context.is_none());
        assert!(!config.remain_bundle);
        assert!(config.templates.is_empty());
        assert!(config.skip_commented);
        assert_eq!(config.wrap("a();", "./a.js"), "<script>a();</script>");
    }

    #[test]
    fn default_matches_new() {
        let config = InlineConfig::default();

        assert!(config.skip_commented);
        assert!(!config.remain_bundle);
        assert!(config.context.is_none());
        assert!(config.script_tag.is_none());
        assert!(config.templates.is_empty());
    }

    #[test]
    fn custom_script_tag_receives_content_and_url() {
        let config = InlineConfig::new()
            .with_script_tag(|content, url| format!("<script data-src=\"{url}\">{content}</script>"));

        assert_eq!(
            config.wrap("a();", "./a.js"),
            "<script data-src=\"./a.js\">a();</script>"
        );
    }

    #[test]
    fn options_accept_single_template() {
        let options: InlineOptions = serde_json::from_str(
            r#"{ "context": "/site", "isRemainBundle": true, "template": "index.html" }"#,
        )
        .unwrap();
        let config = InlineConfig::from(options);

        assert_eq!(config.context, Some(PathBuf::from("/site")));
        assert!(config.remain_bundle);
        assert_eq!(config.templates, vec!["index.html".to_string()]);
        assert!(config.skip_commented);
    }

    #[test]
    fn options_accept_template_list() {
        let options: InlineOptions =
            serde_json::from_str(r#"{ "template": ["a.html", "b.html"], "skipCommented": false }"#)
                .unwrap();
        let config = InlineConfig::from(options);

        assert_eq!(config.templates.len(), 2);
        assert!(!config.skip_commented);
        assert!(!config.remain_bundle);
    }
}
