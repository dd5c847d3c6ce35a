//! Local attempt history: a JSON ledger of scored pours.
//!
//! The pipeline never writes here on its own; callers decide whether
//! an [`AnalysisResult`] becomes an [`Attempt`]. Entries keep a
//! user-editable pattern override so a mislabeled pour can be fixed
//! without touching the parsed record.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::analysis::{AnalysisResult, TechnicalDetails};
use crate::error::CremaError;
use crate::pattern::Pattern;
use crate::HISTORY_FILE;

/// One stored pour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Pattern as parsed from the service text.
    pub pattern: Pattern,
    /// User correction; wins over `pattern` when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_override: Option<Pattern>,
    pub confidence: u8,
    pub pattern_complexity: u8,
    pub execution_score: u8,
    pub rating: f32,
    pub feedback: String,
    pub technical_details: TechnicalDetails,
    pub improvement_tips: Vec<String>,
    /// Where the analyzed photo lives, when the caller kept it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

impl Attempt {
    /// Build an attempt from a parsed result, timestamped now.
    pub fn from_result(result: &AnalysisResult, image_path: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            pattern: result.pattern,
            pattern_override: None,
            confidence: result.confidence,
            pattern_complexity: result.pattern_complexity,
            execution_score: result.execution_score,
            rating: result.rating,
            feedback: result.feedback.clone(),
            technical_details: result.technical_details.clone(),
            improvement_tips: result.improvement_tips.clone(),
            image_path,
        }
    }

    /// The pattern to display: the user's override when set, otherwise
    /// the parsed one.
    pub fn effective_pattern(&self) -> Pattern {
        self.pattern_override.unwrap_or(self.pattern)
    }
}

/// Aggregate view over the history, for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistorySummary {
    pub attempts: usize,
    pub best_rating: f32,
    pub average_rating: f32,
    /// (pattern, count) sorted by count descending.
    pub pattern_counts: Vec<(Pattern, usize)>,
}

/// Attempt ledger, persisted as pretty JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    pub attempts: Vec<Attempt>,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        let now = Utc::now();
        Self { attempts: Vec::new(), created: now, last_modified: now }
    }

    /// Default store location under the user data directory.
    pub fn default_path() -> Result<PathBuf, CremaError> {
        dirs::data_dir()
            .map(|dir| dir.join(HISTORY_FILE))
            .ok_or_else(|| CremaError::History("no user data directory".to_string()))
    }

    /// Load from `path`, or start empty when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, CremaError> {
        if !path.exists() {
            debug!(path = %path.display(), "no history file, starting empty");
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        let history: History = serde_json::from_str(&content)?;
        Ok(history)
    }

    pub fn save(&self, path: &Path) -> Result<(), CremaError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        debug!(path = %path.display(), attempts = self.attempts.len(), "history saved");
        Ok(())
    }

    /// Newest first, matching how the history is shown.
    pub fn add(&mut self, attempt: Attempt) {
        self.attempts.insert(0, attempt);
        self.last_modified = Utc::now();
    }

    /// Set the user pattern override on an attempt.
    pub fn relabel(&mut self, id: Uuid, pattern: Pattern) -> Result<(), CremaError> {
        let attempt = self
            .attempts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CremaError::History(format!("no attempt with id {id}")))?;
        attempt.pattern_override = Some(pattern);
        self.last_modified = Utc::now();
        Ok(())
    }

    pub fn summary(&self) -> HistorySummary {
        let mut summary = HistorySummary { attempts: self.attempts.len(), ..Default::default() };
        if self.attempts.is_empty() {
            return summary;
        }

        let mut counts: Vec<(Pattern, usize)> = Vec::new();
        let mut total = 0.0f32;
        for attempt in &self.attempts {
            total += attempt.rating;
            if attempt.rating > summary.best_rating {
                summary.best_rating = attempt.rating;
            }
            let pattern = attempt.effective_pattern();
            match counts.iter_mut().find(|(p, _)| *p == pattern) {
                Some((_, n)) => *n += 1,
                None => counts.push((pattern, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        summary.average_rating = total / self.attempts.len() as f32;
        summary.pattern_counts = counts;
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::parse_analysis;

    fn make_result(pattern_line: &str, confidence: u8) -> AnalysisResult {
        let text = format!(
            "Is it a valid coffee image? Yes\nIs it latte art? Yes\nFinal classification: {pattern_line}\nConfidence score: {confidence}%\n"
        );
        parse_analysis(&text).unwrap()
    }

    #[test]
    fn test_add_puts_newest_first() {
        let mut history = History::new();
        history.add(Attempt::from_result(&make_result("Heart", 50), None));
        history.add(Attempt::from_result(&make_result("Swan", 90), None));
        assert_eq!(history.attempts[0].pattern, Pattern::Swan);
        assert_eq!(history.attempts[1].pattern, Pattern::Heart);
    }

    #[test]
    fn test_relabel_sets_override() {
        let mut history = History::new();
        let attempt = Attempt::from_result(&make_result("Phoenix", 40), None);
        let id = attempt.id;
        assert_eq!(attempt.pattern, Pattern::Uncertain);
        history.add(attempt);

        history.relabel(id, Pattern::Tulip).unwrap();
        assert_eq!(history.attempts[0].effective_pattern(), Pattern::Tulip);
        // The parsed pattern is untouched.
        assert_eq!(history.attempts[0].pattern, Pattern::Uncertain);
    }

    #[test]
    fn test_relabel_unknown_id_errors() {
        let mut history = History::new();
        let err = history.relabel(Uuid::new_v4(), Pattern::Heart).unwrap_err();
        assert!(matches!(err, CremaError::History(_)));
    }

    #[test]
    fn test_summary_counts_effective_patterns() {
        let mut history = History::new();
        history.add(Attempt::from_result(&make_result("Heart", 80), None));
        history.add(Attempt::from_result(&make_result("Heart", 40), None));
        let mut swan = Attempt::from_result(&make_result("Uncertain", 90), None);
        swan.pattern_override = Some(Pattern::Swan);
        history.add(swan);

        let summary = history.summary();
        assert_eq!(summary.attempts, 3);
        assert_eq!(summary.pattern_counts[0], (Pattern::Heart, 2));
        assert!(summary.pattern_counts.contains(&(Pattern::Swan, 1)));
        assert!(summary.best_rating >= summary.average_rating);
    }

    #[test]
    fn test_summary_empty_history() {
        let summary = History::new().summary();
        assert_eq!(summary.attempts, 0);
        assert_eq!(summary.best_rating, 0.0);
        assert_eq!(summary.average_rating, 0.0);
        assert!(summary.pattern_counts.is_empty());
    }
}
