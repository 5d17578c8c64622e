/// Sanity checks on a rendered skill definition.
///
/// Flags leftover template markers and documents longer than `max_lines`.
pub fn check_rendered(content: &str, max_lines: usize) -> Vec<String> {
    let mut findings = Vec::new();

    if content.contains("{{") || content.contains("{%") {
        findings.push("Template contains unresolved placeholders".to_string());
    }

    let line_count = content.split('\n').count();
    if line_count > max_lines {
        findings.push(format!(
            "SKILL.md is {line_count} lines (recommended: under {max_lines}). \
             Consider using progressive disclosure to split content into reference files."
        ));
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_document() {
        assert!(check_rendered("# Skill\n\nBody\n", 500).is_empty());
    }

    #[test]
    fn leftover_markers() {
        let findings = check_rendered("# {{ name }}", 500);
        assert_eq!(findings, vec!["Template contains unresolved placeholders".to_string()]);
        assert_eq!(check_rendered("{% endfor %}", 500).len(), 1);
    }

    #[test]
    fn too_long() {
        let doc = "line\n".repeat(10);
        let findings = check_rendered(&doc, 10);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].starts_with("SKILL.md is 11 lines"));
        assert!(check_rendered(&doc, 11).is_empty());
    }
}
