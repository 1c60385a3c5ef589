//! Section descriptions parsed from generated text.
//!
//! The section-generation step returns free text containing zero or more
//! occurrences of `Section <N>: "<phrase>"`. The label is case-sensitive and
//! the quoted phrase may span multiple lines. Sections are taken in textual
//! order of appearance and keyed by that position, not by the label number.

use regex::Regex;

/// A proposed highlight phrase to be located inside the transcript.
///
/// Sections are ephemeral: recomputed from the raw generated text on every
/// attempt, never persisted on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Position of occurrence in the generated text (0-indexed)
    pub ordinal: usize,
    /// The quoted phrase
    pub text: String,
}

impl Section {
    /// Whitespace tokens of the phrase, as fed to the matcher.
    pub fn tokens(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }
}

/// Parse section descriptions out of generated free text.
///
/// Returns sections in textual order; an ordinal is the occurrence position,
/// so output files stay stable even when the generator misnumbers labels.
pub fn parse_sections(content: &str) -> Vec<Section> {
    let pattern = Regex::new(r#"(?s)Section \d+: "(.*?)""#).unwrap();
    pattern
        .captures_iter(content)
        .enumerate()
        .map(|(ordinal, captures)| Section {
            ordinal,
            text: captures[1].to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_section() {
        let sections = parse_sections(r#"Section 1: "hello world""#);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].ordinal, 0);
        assert_eq!(sections[0].text, "hello world");
    }

    #[test]
    fn test_parse_sections_in_textual_order() {
        let content = r#"
Some preamble from the generator.

Section 2: "second phrase"
A rationale the generator added.
Section 1: "first phrase"
"#;
        let sections = parse_sections(content);
        assert_eq!(sections.len(), 2);
        // Ordinals follow appearance, not the label numbers.
        assert_eq!(sections[0].text, "second phrase");
        assert_eq!(sections[0].ordinal, 0);
        assert_eq!(sections[1].text, "first phrase");
        assert_eq!(sections[1].ordinal, 1);
    }

    #[test]
    fn test_parse_multiline_phrase() {
        let content = "Section 1: \"a phrase\nthat spans lines\"";
        let sections = parse_sections(content);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].text, "a phrase\nthat spans lines");
        assert_eq!(sections[0].tokens(), vec!["a", "phrase", "that", "spans", "lines"]);
    }

    #[test]
    fn test_label_is_case_sensitive() {
        assert!(parse_sections(r#"section 1: "lowercase label""#).is_empty());
        assert!(parse_sections(r#"SECTION 1: "shouting label""#).is_empty());
    }

    #[test]
    fn test_no_sections() {
        assert!(parse_sections("no sections here").is_empty());
        assert!(parse_sections("").is_empty());
    }

    #[test]
    fn test_tokens() {
        let section = Section {
            ordinal: 0,
            text: "  hello   world ".to_string(),
        };
        assert_eq!(section.tokens(), vec!["hello", "world"]);
    }
}
