use crate::display;
use crate::scoring::{breakdown, ScoringWeights};

pub fn explain(slug: &str, refresh: bool) {
    let user_config = super::load_valid_config();
    let weights = ScoringWeights::default();
    let report = super::run_pipeline(&user_config, weights, refresh);

    let Some(index) = report.position(slug) else {
        eprintln!(
            "No ranked problem with slug '{}'. It may be paid-only or malformed.",
            slug
        );
        std::process::exit(1);
    };

    let scored = &report.problems[index];
    let parts = breakdown(&scored.problem, &report.stats, &weights);
    display::print_breakdown(scored, index + 1, report.problems.len(), &parts);
}
