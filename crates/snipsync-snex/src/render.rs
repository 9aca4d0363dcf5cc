//! Rendering of extracted snippets into insertable text.

const INDENT: [char; 2] = [' ', '\t'];

/// Values available to `{placeholder}`s of a template.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TemplateVars<'a> {
    pub lang: &'a str,
    pub origin: &'a str,
    pub name: &'a str,
    pub path: &'a str,
    pub content: &'a str,
}

impl TemplateVars<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        match key {
            "lang" => Some(self.lang),
            "origin" => Some(self.origin),
            "name" => Some(self.name),
            "path" => Some(self.path),
            "content" => Some(self.content),
            _ => None,
        }
    }
}

/// Join body lines, removing their common indentation (spaces and tabs).
///
/// Whitespace-only lines do not count towards the common indentation and
/// come out empty. Every line is terminated by `\n`.
pub(crate) fn dedent(lines: &[&str]) -> String {
    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches(INDENT).len())
        .min()
        .unwrap_or(0);

    let mut out = String::new();
    for line in lines {
        if !line.trim().is_empty() {
            out.push_str(line[indent..].trim_end());
        }
        out.push('\n');
    }
    out
}

/// Expand `template` in a single pass. Unknown placeholders are kept as
/// written and substituted values are never expanded again.
pub(crate) fn expand(template: &str, vars: &TemplateVars<'_>) -> String {
    let mut out = String::with_capacity(template.len() + vars.content.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}').and_then(|close| Some((close, vars.get(&after[..close])?))) {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
