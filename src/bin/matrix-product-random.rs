//! Blocked kernel over seeded random matrices; timing only.

use matrix_product::{bench::Variant, cli};

fn main() {
    std::process::exit(cli::main(Variant::RANDOM));
}
