//! Round-trip tests for the attempt history store.

use crema_core::{parse_analysis, Attempt, History, Pattern};

fn sample_attempt(pattern: &str, confidence: u8) -> Attempt {
    let text = format!(
        "Is it a valid coffee image? Yes\nIs it latte art? Yes\nFinal classification: {pattern}\nConfidence score: {confidence}%\n"
    );
    Attempt::from_result(&parse_analysis(&text).unwrap(), None)
}

#[test]
fn load_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let history = History::load(&path).unwrap();
    assert!(history.attempts.is_empty());
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/crema/history.json");

    let mut history = History::new();
    history.add(sample_attempt("Rosetta", 80));
    history.add(sample_attempt("Heart", 45));
    history.save(&path).unwrap();

    let loaded = History::load(&path).unwrap();
    assert_eq!(loaded.attempts, history.attempts);
    assert_eq!(loaded.attempts[0].pattern, Pattern::Heart);
}

#[test]
fn override_survives_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");

    let mut history = History::new();
    let attempt = sample_attempt("Blob", 70);
    let id = attempt.id;
    history.add(attempt);
    history.relabel(id, Pattern::Tulip).unwrap();
    history.save(&path).unwrap();

    let loaded = History::load(&path).unwrap();
    assert_eq!(loaded.attempts[0].pattern, Pattern::Uncertain);
    assert_eq!(loaded.attempts[0].effective_pattern(), Pattern::Tulip);
}

#[test]
fn corrupt_history_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(History::load(&path).is_err());
}
