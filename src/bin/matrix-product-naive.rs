//! One task per output row, no column blocking; reports the checksum.

use matrix_product::{bench::Variant, cli};

fn main() {
    std::process::exit(cli::main(Variant::NAIVE));
}
