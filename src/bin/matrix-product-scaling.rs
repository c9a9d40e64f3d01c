//! Strong or weak scaling study over worker counts `1..=max_workers`.

use matrix_product::cli;

fn main() {
    std::process::exit(cli::scaling_main());
}
