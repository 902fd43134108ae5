//! Second Chance charts (plots 4-5) and sweep statistics. Takes no arguments.

use pagereport::{app, Selection};

fn main() {
    std::process::exit(app::run_fixed(Selection::second_half()));
}
