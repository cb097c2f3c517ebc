//! Display functions for command results

use super::formatters::{code_names, create_progress_bar, feedback_pegs};
use crate::commands::{AnalysisResult, BenchmarkResult};
use crate::core::Geometry;
use crate::session::{Outcome, SessionReport};
use colored::Colorize;

/// Print the rounds of a finished session
pub fn print_session_report(report: &SessionReport, geometry: Geometry, verbose: bool) {
    let slots = geometry.slots();

    println!("\n{}", "─".repeat(60).cyan());
    println!(" {} ({geometry})", "Mastermind session".bright_cyan().bold());
    println!("{}", "─".repeat(60).cyan());

    for step in &report.history {
        println!(
            "\nRound {}: {} {}",
            step.round,
            step.guess.to_string().bright_yellow(),
            feedback_pegs(step.feedback, slots)
        );

        if verbose {
            println!("  Colors:     {}", code_names(&step.guess));
            println!(
                "  Candidates: {} → {}",
                step.candidates_before, step.candidates_after
            );
        }
    }

    println!();
    print_outcome(report);
}

/// Print the terminal outcome of a session, errors to stderr
pub fn print_outcome(report: &SessionReport) {
    match report.outcome {
        Outcome::Won => println!(
            "{}",
            format!("✅ Solved in {} rounds", report.rounds).green().bold()
        ),
        Outcome::Cancelled => eprintln!("{}", "Cancelled".yellow()),
        outcome => {
            let detail = report
                .error
                .as_ref()
                .map_or_else(String::new, |e| format!(": {e}"));
            let message = format!(
                "❌ {} after {} rounds{detail}",
                capitalize(&outcome.to_string()),
                report.rounds
            );
            eprintln!("{}", message.red().bold());
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Print the result of guess analysis
pub fn print_analysis_result(result: &AnalysisResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "GUESS ANALYSIS:".bright_cyan().bold(),
        result.guess.to_string().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 Against {} possible secrets:", result.total_candidates);
    println!("   Distinct feedbacks: {}", result.distinct_feedbacks());
    println!(
        "   Worst case:         {} candidates remain",
        result.max_remaining.to_string().bright_yellow()
    );
    println!(
        "   Expected:           {:.1} candidates remain",
        result.expected_remaining
    );

    println!("\n📈 {}", "Partition:".bright_cyan().bold());
    let slots = result.guess.len();
    for &(feedback, count) in &result.partition {
        let bar = create_progress_bar(count as f64, result.max_remaining as f64, 30);
        println!(
            "   {} {} {count:6}",
            feedback_pegs(feedback, slots),
            bar.green()
        );
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Strategy:         {}", result.strategy);
    println!("   Games played:     {}", result.total_games);
    println!("   Games won:        {}", result.won);
    println!(
        "   Average rounds:   {}",
        format!("{:.2}", result.average_rounds)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Best case:        {}",
        format!("{}", result.min_rounds).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_rounds).yellow()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    let failures: Vec<_> = result
        .outcomes
        .iter()
        .filter(|(outcome, _)| !outcome.is_win())
        .collect();
    if !failures.is_empty() {
        println!("\n⚠️  {}", "Unfinished games:".bright_red().bold());
        for (outcome, count) in failures {
            println!("   {outcome}: {count}");
        }
    }

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for (&rounds, &count) in &result.distribution {
        let pct = (count as f64 / result.won.max(1) as f64) * 100.0;
        let bar_width = (pct / 2.5) as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░"
                .repeat(40_usize.saturating_sub(bar_width))
                .bright_black()
        );
        println!("   {rounds:2}: {bar} {count:4} ({pct:5.1}%)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("game lost"), "Game lost");
        assert_eq!(capitalize(""), "");
    }
}
