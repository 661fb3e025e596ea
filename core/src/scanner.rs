use regex::Regex;
use std::sync::LazyLock;

static INLINE_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<script[^>]*?\ssrc="([^"]*?)\?__inline"[^>]*>.*?</script>"#)
        .expect("inline script pattern is valid")
});

static INLINE_RAW_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<script[^>]*?\ssrc="([^"]*?)\?__inline_raw"[^>]*>.*?</script>"#)
        .expect("inline raw script pattern is valid")
});

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// `?__inline`: the script is compiled by the host and its output inlined.
    Inline,
    /// `?__inline_raw`: the source file is inlined verbatim.
    InlineRaw,
}

impl MarkerKind {
    fn pattern(self) -> &'static Regex {
        match self {
            MarkerKind::Inline => &INLINE_SCRIPT,
            MarkerKind::InlineRaw => &INLINE_RAW_SCRIPT,
        }
    }
}

/// One inline-script tag found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// The exact tag text, replaced verbatim later.
    pub matched: String,
    /// The `src` value without the marker query.
    pub url: String,
    /// Occurrence index among accepted markers of the same kind.
    pub index: usize,
    pub kind: MarkerKind,
}

#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    /// Ignore markers sitting inside an unterminated `<!--` comment.
    pub skip_commented: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            skip_commented: true,
        }
    }
}

pub fn scan(content: &str, kind: MarkerKind) -> Vec<Marker> {
    scan_with(content, kind, ScanOptions::default())
}

/// Finds every non-overlapping marker of `kind` in document order.
pub fn scan_with(content: &str, kind: MarkerKind, options: ScanOptions) -> Vec<Marker> {
    let mut markers = Vec::new();

    for captures in kind.pattern().captures_iter(content) {
        let (Some(whole), Some(url)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        if options.skip_commented && is_commented(content, whole.start()) {
            log::debug!("skipping commented marker {:?}", whole.as_str());
            continue;
        }

        markers.push(Marker {
            matched: whole.as_str().to_string(),
            url: url.as_str().to_string(),
            index: markers.len(),
            kind,
        });
    }

    markers
}

fn is_commented(content: &str, position: usize) -> bool {
    let before = &content[..position];

    match before.rfind(COMMENT_OPEN) {
        Some(open) => !before[open + COMMENT_OPEN.len()..].contains(COMMENT_CLOSE),
        None => false,
    }
}
