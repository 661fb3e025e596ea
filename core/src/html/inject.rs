/// Inserts `tags` before `</body>`, else before `</head>`, else at the end.
pub fn inject_script_tags(html: &str, tags: &str) -> String {
    if tags.is_empty() {
        return html.to_string();
    }

    let position = html.rfind("</body>").or_else(|| html.find("</head>"));

    if let Some(pos) = position {
        let mut result = String::with_capacity(html.len() + tags.len());
        result.push_str(&html[..pos]);
        result.push_str(tags);
        result.push_str(&html[pos..]);
        result
    } else {
        format!("{}{}", html, tags)
    }
}

/// `<script type="module">` tags for `files`, JavaScript only. Page chunks are ESM.
pub fn script_tags<'a, I>(files: I, public_path: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    files
        .into_iter()
        .filter(|file| file.ends_with(".js") || file.ends_with(".mjs"))
        .map(|file| format!("<script type=\"module\" src=\"{public_path}{file}\"></script>"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_body_then_head() {
        assert_eq!(
            inject_script_tags("<head></head><body><p/></body>", "<x/>"),
            "<head></head><body><p/><x/></body>"
        );
        assert_eq!(
            inject_script_tags("<head><title/></head>", "<x/>"),
            "<head><title/><x/></head>"
        );
        assert_eq!(inject_script_tags("<p/>", "<x/>"), "<p/><x/>");
        assert_eq!(inject_script_tags("<p/>", ""), "<p/>");
    }

    #[test]
    fn only_scripts_get_tags() {
        assert_eq!(
            script_tags(["main.js", "main.css"], "/"),
            "<script type=\"module\" src=\"/main.js\"></script>"
        );
    }
}
