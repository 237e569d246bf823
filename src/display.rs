use crate::models::ScoredProblem;
use crate::pipeline::RankReport;
use crate::scoring::ScoreBreakdown;

const TITLE_WIDTH: usize = 38;

pub fn print_summary(report: &RankReport) {
    println!("\n{}", "=".repeat(60));
    println!("  DIFFRANK - Problems by True Difficulty");
    println!("{}\n", "=".repeat(60));

    println!("Source: {}", report.source.display_name());
    println!("Raw entries: {}", report.raw_count);
    println!(
        "Kept: {} | Skipped: {}",
        report.problems.len(),
        report.skipped.total()
    );
    for (reason, count) in report.skipped.iter() {
        println!("  {:<20} {}", reason, count);
    }
    println!(
        "Max ID: {}, Max Submissions: {}, Max Accepted: {}",
        report.stats.max_id,
        thousands(report.stats.max_submitted),
        thousands(report.stats.max_accepted)
    );
}

pub fn print_table(problems: &[ScoredProblem], top_n: usize) {
    println!("\n--- Top {} Hardest Problems (Calculated Score) ---", top_n);
    println!("{}", header());
    println!("{}", "-".repeat(100));
    for scored in problems.iter().take(top_n) {
        println!("{}", format_row(scored));
    }
}

pub fn header() -> String {
    format!(
        "{:<5} | {:<40} | {:<6} | {:<5} | {:<7} | {:<7} | {:<8}",
        "ID", "Title", "LDiff", "Acc%", "Subs(k)", "Acs(k)", "Score"
    )
}

pub fn format_row(scored: &ScoredProblem) -> String {
    let p = &scored.problem;
    let title: String = p.title.chars().take(TITLE_WIDTH).collect();
    let acc = format!("{:.1}", p.acceptance_rate * 100.0);
    let subs = format!("{:.1}", p.total_submitted as f64 / 1000.0);
    let acs = format!("{:.1}", p.total_accepted as f64 / 1000.0);

    format!(
        "{:<5} | {:<40} | {:<6} | {:<5} | {:<7} | {:<7} | {:<8.2}",
        p.id,
        title,
        p.difficulty.display_name(),
        acc,
        subs,
        acs,
        scored.score
    )
}

pub fn print_breakdown(scored: &ScoredProblem, rank: usize, total: usize, parts: &ScoreBreakdown) {
    let p = &scored.problem;
    println!("\n{} ({})", p.title, p.url);
    println!("Rank {} of {}", rank, total);
    println!("{}", "-".repeat(40));
    println!("  {:<22} {:>9.2}", format!("Base ({})", p.difficulty.display_name()), parts.base);
    println!("  {:<22} {:>9.2}", "Acceptance rate", parts.acceptance);
    println!("  {:<22} {:>9.2}", "Low solve count", parts.low_solve);
    println!("  {:<22} {:>9.2}", "Popularity", parts.popularity);
    println!("  {:<22} {:>9.2}", "Newness", parts.newness);
    println!("{}", "-".repeat(40));
    println!("  {:<22} {:>9.2}", "Score", scored.score);
}

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, Problem};

    #[test]
    fn test_format_row() {
        let scored = ScoredProblem {
            problem: Problem::new(
                4,
                "Median of Two Sorted Arrays".into(),
                "median-of-two-sorted-arrays".into(),
                Difficulty::Hard,
                2_345_600,
                5_000_000,
            ),
            score: 570.3,
        };

        let row = format_row(&scored);
        let cols: Vec<&str> = row.split(" | ").collect();
        assert_eq!(cols.len(), 7);
        assert_eq!(cols[0], "4    ");
        assert_eq!(cols[1].len(), 40);
        assert_eq!(cols[2], "Hard  ");
        assert_eq!(cols[3], "46.9 ");
        assert_eq!(cols[4], "5000.0 ");
        assert_eq!(cols[5], "2345.6 ");
        assert_eq!(cols[6], "570.30  ");
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let scored = ScoredProblem {
            problem: Problem::new(1, "x".repeat(60), "x".into(), Difficulty::Easy, 0, 0),
            score: 1.0,
        };
        let row = format_row(&scored);
        let title = row.split(" | ").nth(1).unwrap();
        assert_eq!(title.trim_end(), "x".repeat(38));
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(18_000_000), "18,000,000");
    }
}
