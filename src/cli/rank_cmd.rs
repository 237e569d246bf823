use crate::display;
use crate::export;
use crate::scoring::ScoringWeights;

use super::RankArgs;

pub fn rank(args: RankArgs) {
    let user_config = super::load_valid_config();
    let top_n = args.top.unwrap_or(user_config.top_n);

    let report = super::run_pipeline(&user_config, ScoringWeights::default(), args.refresh);
    display::print_summary(&report);

    if report.is_empty() {
        println!("\nNo processable problems found.");
        return;
    }

    display::print_table(&report.problems, top_n);

    if !args.no_export {
        let path = args.output.unwrap_or(user_config.output_csv);
        println!(
            "\nExporting {} sorted problems to {}...",
            report.problems.len(),
            path.display()
        );
        match export::write_csv(&path, &report.problems) {
            Ok(()) => println!("Successfully exported to {}", path.display()),
            Err(e) => eprintln!("{}", e),
        }
    }

    println!("\nDone.");
}
