//! Tiled, Rayon-parallel dense matrix-product microbenchmark.
//!
//! A (M x K, row-major) and B (K x N, column-major) are multiplied into
//! C (M x N, row-major) with the multiplicative update
//! `C(i,j) *= beta + alpha * sum_k A(i,k) * B(k,j)`, one parallel task per
//! row-block of C.
//!
//! ```
//! use matrix_product::{checksum, matrix_product, ColMajor, Matrix, RowMajor, Tiling};
//!
//! let a = Matrix::<RowMajor>::from_fn(3, 2, |i, j| (i + j) as f64);
//! let b = Matrix::<ColMajor>::from_fn(2, 4, |i, j| (i * j) as f64);
//! let mut c = Matrix::<RowMajor>::from_fn(3, 4, |_, _| 1.0);
//!
//! matrix_product(0.5, &a, &b, 1.0, &mut c, Tiling::default());
//! assert_eq!(c.get(2, 3), 1.0 * (1.0 + 0.5 * (2.0 * 0.0 + 3.0 * 3.0)));
//! println!("{}", checksum(&c));
//! ```

pub mod bench;
pub mod checksum;
pub mod cli;
pub mod error;
pub mod init;
pub mod matmul;
pub mod matrix;
pub mod scaling;

/// Rows and columns per tile in the blocked kernel.
pub const BLOCK_SIZE: usize = 10;

pub use checksum::checksum;
pub use init::{pattern_value, InitRule};
pub use matmul::{matrix_product, Tiling};
pub use matrix::{ColMajor, Layout, Matrix, RowMajor};
