//! FIFO vs Optimal charts (plots 1-3). Takes no arguments.

use pagereport::{app, Selection};

fn main() {
    std::process::exit(app::run_fixed(Selection::first_half()));
}
