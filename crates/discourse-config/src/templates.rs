//! Configuration templates for `discourse init`.
//!
//! Templates are stored as valid TOML. The local template keeps its `[corpus]`
//! section active so a fresh project only needs documents in `./documents`;
//! every other setting is written commented out at its default.

/// Default local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Section headers left uncommented in the local template.
const LOCAL_ACTIVE_SECTIONS: &[&str] = &["[corpus]"];

/// Returns the local configuration template with only `[corpus]` active.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE, LOCAL_ACTIVE_SECTIONS)
}

/// Returns the global configuration template, fully commented out.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE, &[])
}

/// Comments out every setting outside the `active` sections.
///
/// Existing comments and blank lines pass through unchanged.
fn comment_template(template: &str, active: &[&str]) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    let mut in_active = false;

    for line in template.lines() {
        if line.starts_with('[') {
            in_active = active.contains(&line.trim());
        }
        if !in_active && !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    #[test]
    fn local_template_parses_as_valid_toml() {
        let result = parse_config(LOCAL_TEMPLATE);
        assert!(result.is_ok(), "local template failed to parse: {result:?}");
        let framing = result.unwrap().framing.unwrap();
        assert_eq!(framing.categories.unwrap().len(), 2);
    }

    #[test]
    fn global_template_parses_as_valid_toml() {
        let result = parse_config(GLOBAL_TEMPLATE);
        assert!(
            result.is_ok(),
            "global template failed to parse: {result:?}"
        );
    }

    #[test]
    fn local_template_keeps_only_corpus_active() {
        let config = parse_config(&local_template()).unwrap();
        let corpus = config.corpus.unwrap();
        assert_eq!(corpus.path.as_deref(), Some("./documents"));
        assert!(config.topics.is_none());
        assert!(config.framing.is_none());
    }

    #[test]
    fn global_template_is_fully_commented() {
        let config = parse_config(&global_template()).unwrap();
        assert!(config.stopwords.is_none());
        assert!(config.topics.is_none());
    }

    #[test]
    fn comment_template_preserves_comments_and_blank_lines() {
        let input = "# heading\n[corpus]\npath = \"x\"\n\n[topics]\ncount = 3\n";
        let result = comment_template(input, &["[corpus]"]);
        assert_eq!(
            result,
            "# heading\n[corpus]\npath = \"x\"\n\n# [topics]\n# count = 3\n"
        );
    }
}
