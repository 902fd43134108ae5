//! PageReport - charts and observations for page-replacement experiments
//!
//! Runs the whole catalog by default; `--part first|second` restricts the
//! run to one half of it.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Invalid arguments or any pipeline failure (e.g. a missing input table)

use pagereport::app;
use pagereport::cli::Args;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    std::process::exit(app::run_with_args(args));
}
