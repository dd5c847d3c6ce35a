//! Gate validation: decides whether the text describes a top-down
//! coffee photo and whether that photo shows a poured pattern.
//!
//! Policy is fail-closed: a gate is true only when its exact
//! affirmative marker appears (case-insensitive). There is no
//! inference from other evidence, so malformed or ambiguous service
//! output can never produce a confident positive score.

use serde::{Deserialize, Serialize};

use crate::template::{COFFEE_GATE_MARKER, LATTE_ART_GATE_MARKER};

/// Outcome of the two gates, checked before any extraction runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateOutcome {
    pub is_coffee_image: bool,
    pub is_latte_art: bool,
}

impl GateOutcome {
    /// Both gates affirmative: scoring may proceed.
    pub fn passed(&self) -> bool {
        self.is_coffee_image && self.is_latte_art
    }
}

/// Check both gate markers by case-insensitive containment.
///
/// A failed coffee gate forces the latte-art gate false; a pattern
/// cannot exist on an image that is not coffee.
pub fn check_gates(raw: &str) -> GateOutcome {
    let lowered = raw.to_lowercase();
    let is_coffee_image = lowered.contains(COFFEE_GATE_MARKER);
    let is_latte_art = is_coffee_image && lowered.contains(LATTE_ART_GATE_MARKER);
    GateOutcome { is_coffee_image, is_latte_art }
}
