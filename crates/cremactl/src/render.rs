//! Terminal rendering for analysis results and history.

use owo_colors::OwoColorize;

use crema_core::{AnalysisResult, Attempt, HistorySummary, Scores};

/// Five-slot star strip for a 0-5 score.
fn stars(value: f32) -> String {
    let filled = value.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn print_result(result: &AnalysisResult) {
    if !result.is_coffee_image || !result.is_latte_art {
        println!("{}", result.feedback.yellow().bold());
        return;
    }

    println!("{}  {}", "Pattern:".bold(), result.pattern.to_string().cyan());
    println!("{}  {} ({}%)", "Rating:".bold(), stars(result.rating), result.confidence);
    println!(
        "{}  complexity {}/5, execution {}/5",
        "Scores:".bold(),
        result.pattern_complexity,
        result.execution_score
    );

    println!("{}", "Technical details:".bold());
    println!("  milk texture:       {}", result.technical_details.milk_texture);
    println!("  pouring technique:  {}", result.technical_details.pouring_technique);
    println!("  pattern definition: {}", result.technical_details.pattern_definition);

    if !result.improvement_tips.is_empty() {
        println!("{}", "Improvement tips:".bold());
        for tip in &result.improvement_tips {
            println!("  {} {}", "•".green(), tip);
        }
    }

    if !result.feedback.is_empty() {
        println!("{}", result.feedback.italic());
    }
}

pub fn print_scores(scores: &Scores) {
    println!("execution score: {}/5", scores.execution_score);
    println!("rating:          {} {}", scores.rating, stars(scores.rating));
}

pub fn print_attempt(attempt: &Attempt) {
    println!(
        "{}  {}  {}  {}",
        attempt.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
        attempt.effective_pattern().to_string().cyan(),
        stars(attempt.rating),
        attempt.id.to_string().dimmed()
    );
    if attempt.pattern_override.is_some() {
        println!("         relabeled from {}", attempt.pattern);
    }
}

pub fn print_summary(summary: &HistorySummary) {
    if summary.attempts == 0 {
        println!("{}", "No attempts recorded yet.".dimmed());
        return;
    }
    println!(
        "{} attempts, best {}, average {:.1}",
        summary.attempts, stars(summary.best_rating), summary.average_rating
    );
    for (pattern, count) in &summary.pattern_counts {
        println!("  {pattern}: {count}");
    }
}
