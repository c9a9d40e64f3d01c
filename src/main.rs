//! Blocked kernel over the deterministic fixture; reports the checksum.

use matrix_product::{bench::Variant, cli};

fn main() {
    std::process::exit(cli::main(Variant::BLOCKED));
}
