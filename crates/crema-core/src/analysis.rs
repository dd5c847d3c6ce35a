//! Result assembly: the `AnalysisResult` record and the pipeline
//! entry point [`parse_analysis`].

use serde::{Deserialize, Serialize};

use crate::error::CremaError;
use crate::extract::extract_fields;
use crate::gate::check_gates;
use crate::pattern::Pattern;
use crate::score::compute_scores;
use crate::template::{NOT_APPLICABLE, NOT_COFFEE_FEEDBACK, NOT_LATTE_ART_FEEDBACK};

/// The three technical-detail strings from the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalDetails {
    pub milk_texture: String,
    pub pouring_technique: String,
    pub pattern_definition: String,
}

impl TechnicalDetails {
    fn not_applicable() -> Self {
        Self {
            milk_texture: NOT_APPLICABLE.to_string(),
            pouring_technique: NOT_APPLICABLE.to_string(),
            pattern_definition: NOT_APPLICABLE.to_string(),
        }
    }
}

/// Fully-defaulted record of one analysis. Immutable once assembled.
///
/// Invariants:
/// - a failed coffee gate zeroes everything and sets `pattern` to
///   `No Art`;
/// - a failed latte-art gate produces the same zeroed numerics with
///   distinct feedback;
/// - on a positive record `pattern_complexity` and `execution_score`
///   are in 1-5 and `rating` is a pure function of
///   (confidence, complexity, execution score).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_coffee_image: bool,
    pub is_latte_art: bool,
    pub pattern: Pattern,
    /// Service-reported confidence, 0-100.
    pub confidence: u8,
    /// 0 on gate failure, otherwise 1-5.
    pub pattern_complexity: u8,
    /// 0 on gate failure, otherwise 1-5.
    pub execution_score: u8,
    /// Overall 0-5 rating; never independently set.
    pub rating: f32,
    pub feedback: String,
    pub technical_details: TechnicalDetails,
    /// Source-ordered improvement tips; may be empty.
    pub improvement_tips: Vec<String>,
    /// Original service text, kept for audit. Never re-parsed.
    pub raw_text: String,
}

impl AnalysisResult {
    /// Negative record for text that failed a gate. All numeric
    /// fields zeroed, pattern forced to `No Art`.
    fn negative(is_coffee_image: bool, feedback: &str, raw_text: &str) -> Self {
        Self {
            is_coffee_image,
            is_latte_art: false,
            pattern: Pattern::NoArt,
            confidence: 0,
            pattern_complexity: 0,
            execution_score: 0,
            rating: 0.0,
            feedback: feedback.to_string(),
            technical_details: TechnicalDetails::not_applicable(),
            improvement_tips: Vec::new(),
            raw_text: raw_text.to_string(),
        }
    }
}

/// Parse a service response into an [`AnalysisResult`].
///
/// Pure: same text in, same record out. The only error is
/// [`CremaError::EmptyResponse`] for empty or whitespace-only input;
/// every other malformation degrades through gates or field defaults.
pub fn parse_analysis(raw_text: &str) -> Result<AnalysisResult, CremaError> {
    if raw_text.trim().is_empty() {
        return Err(CremaError::EmptyResponse);
    }

    let gates = check_gates(raw_text);
    if !gates.is_coffee_image {
        return Ok(AnalysisResult::negative(false, NOT_COFFEE_FEEDBACK, raw_text));
    }
    if !gates.is_latte_art {
        return Ok(AnalysisResult::negative(true, NOT_LATTE_ART_FEEDBACK, raw_text));
    }

    let fields = extract_fields(raw_text);
    let pattern = Pattern::from_label(&fields.classification);
    let complexity = pattern.complexity();
    let scores = compute_scores(complexity, fields.confidence);

    Ok(AnalysisResult {
        is_coffee_image: true,
        is_latte_art: true,
        pattern,
        confidence: fields.confidence,
        pattern_complexity: complexity,
        execution_score: scores.execution_score,
        rating: scores.rating,
        feedback: fields.summary,
        technical_details: TechnicalDetails {
            milk_texture: fields.milk_texture,
            pouring_technique: fields.pouring_technique,
            pattern_definition: fields.pattern_definition,
        },
        improvement_tips: fields.tips,
        raw_text: raw_text.to_string(),
    })
}
