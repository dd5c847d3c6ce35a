//! Template contract for the upstream analysis text.
//!
//! The vision service is prompted to answer in a fixed eight-section
//! template (see [`crate::prompt`]). This module is the parsing side
//! of that contract: one pattern per tracked labeled line, the two
//! affirmative gate markers, and the section headers that bound the
//! tips list. Nothing here is configurable at runtime; the contract
//! and the prompt must move together.
//!
//! Every labeled-line pattern matches `Label: value` case-insensitively,
//! tolerating leading whitespace and an optional bullet marker, and
//! captures the first occurrence only.

use once_cell::sync::Lazy;
use regex::Regex;

/// Affirmative marker for the coffee-image gate.
/// Matched by case-insensitive containment; absence means the gate fails.
pub const COFFEE_GATE_MARKER: &str = "is it a valid coffee image? yes";

/// Affirmative marker for the latte-art gate.
pub const LATTE_ART_GATE_MARKER: &str = "is it latte art? yes";

/// Default for the three technical-detail strings when the line is missing.
pub const DEFAULT_TECHNICAL: &str = "Not specified";

/// Technical-detail placeholder on gate-failure records.
pub const NOT_APPLICABLE: &str = "N/A";

/// Classification fallback when the label line is missing or unrecognized.
pub const DEFAULT_CLASSIFICATION: &str = "Uncertain";

/// Feedback on records that failed the coffee-image gate.
pub const NOT_COFFEE_FEEDBACK: &str =
    "This image does not appear to be a top-down view of coffee.";

/// Feedback on records that passed the coffee gate but failed the latte-art gate.
pub const NOT_LATTE_ART_FEEDBACK: &str = "This image does not appear to be latte art.";

pub static CLASSIFICATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?:[-*]\s*)?Final classification:\s*(.+)$").unwrap()
});

pub static CONFIDENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?:[-*]\s*)?Confidence score:\s*\(?(\d{1,3})\s*%").unwrap()
});

pub static MILK_TEXTURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*(?:[-*]\s*)?Milk texture:\s*(.+)$").unwrap());

pub static POURING_TECHNIQUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*(?:[-*]\s*)?Pouring technique:\s*(.+)$").unwrap());

pub static PATTERN_DEFINITION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*(?:[-*]\s*)?Pattern definition:\s*(.+)$").unwrap());

/// Everything between the tips header and the technical-details header.
pub static TIPS_SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)Specific Improvement Tips:(.*?)(?:\d+\.\s*)?Technical Details:").unwrap()
});

/// Everything after the summary header, to end of text.
pub static SUMMARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)(?:\d+\.\s*)?Summary:\s*(.*)\z").unwrap());

/// Bullet markers accepted at the start of a tip line.
pub const BULLET_MARKERS: [char; 3] = ['-', '*', '\u{2022}'];
