//! Core library for crema: turns the free-text report of a vision
//! service into a validated, scored latte-art record.
//!
//! The pipeline is strictly linear and pure:
//! raw text → gates → extraction → classification → scoring → record.
//! The only I/O in this crate lives in [`history`], the local attempt
//! store; everything else is a function of its arguments.

pub mod analysis;
pub mod error;
pub mod extract;
pub mod gate;
pub mod history;
pub mod pattern;
pub mod prompt;
pub mod score;
pub mod template;

pub use analysis::{parse_analysis, AnalysisResult, TechnicalDetails};
pub use error::CremaError;
pub use gate::{check_gates, GateOutcome};
pub use history::{Attempt, History, HistorySummary};
pub use pattern::Pattern;
pub use prompt::ANALYSIS_PROMPT;
pub use score::{compute_scores, Scores};

/// History file location relative to the user data directory.
pub const HISTORY_FILE: &str = "crema/history.json";
