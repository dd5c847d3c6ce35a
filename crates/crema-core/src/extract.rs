//! Field extraction from gated analysis text.
//!
//! Runs only after both gates pass. Every field degrades to its
//! documented default on a missed match; nothing in this module can
//! fail or panic on arbitrary input.

use tracing::debug;

use crate::template::{
    BULLET_MARKERS, CLASSIFICATION_RE, CONFIDENCE_RE, DEFAULT_CLASSIFICATION, DEFAULT_TECHNICAL,
    MILK_TEXTURE_RE, PATTERN_DEFINITION_RE, POURING_TECHNIQUE_RE, SUMMARY_RE, TIPS_SECTION_RE,
};

/// Raw typed fields pulled from the analysis text, pre-classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Classification label as written by the service; normalization
    /// to a [`crate::Pattern`] happens in the classifier.
    pub classification: String,
    /// Confidence percent, already clamped to 0-100.
    pub confidence: u8,
    pub milk_texture: String,
    pub pouring_technique: String,
    pub pattern_definition: String,
    /// Tips in source order; empty when the section is absent.
    pub tips: Vec<String>,
    /// Summary section text; empty when absent.
    pub summary: String,
}

/// Extract all tracked fields, substituting defaults for anything the
/// text does not provide.
pub fn extract_fields(raw: &str) -> ExtractedFields {
    ExtractedFields {
        classification: first_capture(&CLASSIFICATION_RE, raw)
            .unwrap_or_else(|| {
                debug!("classification line missing, defaulting to {DEFAULT_CLASSIFICATION}");
                DEFAULT_CLASSIFICATION.to_string()
            }),
        confidence: extract_confidence(raw),
        milk_texture: technical_field(&MILK_TEXTURE_RE, raw, "milk texture"),
        pouring_technique: technical_field(&POURING_TECHNIQUE_RE, raw, "pouring technique"),
        pattern_definition: technical_field(&PATTERN_DEFINITION_RE, raw, "pattern definition"),
        tips: extract_tips(raw),
        summary: extract_summary(raw),
    }
}

fn first_capture(re: &regex::Regex, raw: &str) -> Option<String> {
    re.captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn technical_field(re: &regex::Regex, raw: &str, name: &str) -> String {
    first_capture(re, raw).unwrap_or_else(|| {
        debug!("{name} line missing, defaulting to {DEFAULT_TECHNICAL:?}");
        DEFAULT_TECHNICAL.to_string()
    })
}

/// Confidence percent. Unparseable or absent → 0; above 100 → 100.
fn extract_confidence(raw: &str) -> u8 {
    CONFIDENCE_RE
        .captures(raw)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map(|v| v.min(100) as u8)
        .unwrap_or(0)
}

/// Tips between the tips header and the technical-details header.
///
/// Only bullet lines count; the marker and surrounding whitespace are
/// stripped, order is preserved, empties are dropped.
fn extract_tips(raw: &str) -> Vec<String> {
    let Some(section) = TIPS_SECTION_RE.captures(raw).and_then(|c| c.get(1)) else {
        return Vec::new();
    };
    section
        .as_str()
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            let rest = trimmed.strip_prefix(&BULLET_MARKERS[..])?;
            let tip = rest.trim();
            (!tip.is_empty()).then(|| tip.to_string())
        })
        .collect()
}

/// Summary section, flattened to a single line of prose.
fn extract_summary(raw: &str) -> String {
    let Some(section) = SUMMARY_RE.captures(raw).and_then(|c| c.get(1)) else {
        return String::new();
    };
    let parts: Vec<&str> = section
        .as_str()
        .lines()
        .map(|line| line.trim().trim_start_matches(&BULLET_MARKERS[..]).trim())
        .filter(|line| !line.is_empty())
        .collect();
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_TEXT: &str = "\
1. Image Verification:
- Is it a valid coffee image? Yes
2. Latte Art Check:
- Is it latte art? Yes
3. Visual Feature Extraction:
- Strong contrast, slightly asymmetric leaves.
4. Strict Classification:
- Final classification: Rosetta
5. Confidence Scoring:
- Confidence score: 80%
6. Specific Improvement Tips:
- Pour closer to the surface for sharper leaves.
- Slow the wiggle at the end of the pour.
7. Technical Details:
- Milk texture: Silky microfoam with minor bubbles
- Pouring technique: Steady hand, late wiggle
- Pattern definition: Leaves distinct but edges soft
8. Summary:
- A confident rosetta with room to tighten the finish.
";

    #[test]
    fn test_full_template_extracts_every_field() {
        let fields = extract_fields(FULL_TEXT);
        assert_eq!(fields.classification, "Rosetta");
        assert_eq!(fields.confidence, 80);
        assert_eq!(fields.milk_texture, "Silky microfoam with minor bubbles");
        assert_eq!(fields.pouring_technique, "Steady hand, late wiggle");
        assert_eq!(fields.pattern_definition, "Leaves distinct but edges soft");
        assert_eq!(
            fields.tips,
            vec![
                "Pour closer to the surface for sharper leaves.",
                "Slow the wiggle at the end of the pour.",
            ]
        );
        assert_eq!(
            fields.summary,
            "A confident rosetta with room to tighten the finish."
        );
    }

    #[test]
    fn test_missing_lines_use_defaults() {
        let fields = extract_fields("Is it a valid coffee image? Yes\nIs it latte art? Yes\n");
        assert_eq!(fields.classification, "Uncertain");
        assert_eq!(fields.confidence, 0);
        assert_eq!(fields.milk_texture, "Not specified");
        assert_eq!(fields.pouring_technique, "Not specified");
        assert_eq!(fields.pattern_definition, "Not specified");
        assert!(fields.tips.is_empty());
        assert!(fields.summary.is_empty());
    }

    #[test]
    fn test_confidence_unparseable_is_zero() {
        let fields = extract_fields("Confidence score: high%\n");
        assert_eq!(fields.confidence, 0);
    }

    #[test]
    fn test_confidence_over_100_clamps() {
        let fields = extract_fields("Confidence score: 150%\n");
        assert_eq!(fields.confidence, 100);
    }

    #[test]
    fn test_first_match_wins() {
        let text = "Confidence score: 70%\nConfidence score: 30%\n";
        assert_eq!(extract_fields(text).confidence, 70);
    }

    #[test]
    fn test_tips_keep_only_bullet_lines_in_order() {
        let text = "\
Specific Improvement Tips:
Here is what to work on next:
- First tip
* Second tip
\u{2022} Third tip
-
Technical Details:
- Milk texture: fine
";
        let fields = extract_fields(text);
        assert_eq!(fields.tips, vec!["First tip", "Second tip", "Third tip"]);
    }

    #[test]
    fn test_tips_section_without_terminator_is_empty() {
        // The section is only valid when bounded by the next header.
        let fields = extract_fields("Specific Improvement Tips:\n- Dangling tip\n");
        assert!(fields.tips.is_empty());
    }
}
