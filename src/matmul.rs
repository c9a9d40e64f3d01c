use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};
use std::cmp::min;

use crate::{
    matrix::{Layout, Matrix, RowMajor},
    BLOCK_SIZE,
};

/// How the output matrix is cut into tiles and parallel tasks.
///
/// Both strategies visit every `(i, j)` exactly once and accumulate over `k`
/// in the same order, so they produce bit-identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tiling {
    /// `block_size x block_size` tiles; one task per row-block of
    /// `block_size` rows, sweeping all column-blocks of that row-block.
    Blocked { block_size: usize },
    /// One task per output row, sweeping all columns with no column blocking.
    Naive,
}

impl Default for Tiling {
    fn default() -> Self {
        Tiling::Blocked {
            block_size: BLOCK_SIZE,
        }
    }
}

impl Tiling {
    /// Rows of C owned by one parallel task.
    pub fn row_block(&self) -> usize {
        match *self {
            Tiling::Blocked { block_size } => block_size,
            Tiling::Naive => 1,
        }
    }

    /// Width of one column-block for an output with `n` columns.
    pub fn col_block(&self, n: usize) -> usize {
        match *self {
            Tiling::Blocked { block_size } => block_size,
            Tiling::Naive => n,
        }
    }

    /// Number of parallel tasks issued for an output with `m` rows.
    pub fn task_count(&self, m: usize) -> usize {
        m.div_ceil(self.row_block())
    }
}

/// Updates `C` in place with `C(i,j) = C(i,j) * (beta + alpha * sum_k A(i,k) * B(k,j))`.
///
/// This is a multiplicative blend, not `C = alpha*A*B + beta*C`; the prior
/// value of `C` scales the new contribution.
///
/// Parallelism strategy:
/// - `C` is row-major, so each row-block of `C` is one contiguous slice.
///   `par_chunks_mut` hands every task exclusive ownership of its rows; no
///   two tasks can touch the same cell.
/// - Inside a task the loops run column-block, row, column, then `k`.
///   The dot product is accumulated in increasing `k` with separate multiply
///   and add, which fixes the rounding of every cell independently of the
///   tiling and of the worker count.
/// - `A` and `B` are shared read-only and may use either layout.
///
/// # Panics
///
/// Panics if `A.rows != C.rows`, `B.cols != C.cols`, `A.cols != B.rows`, or
/// if the tiling has a zero block size.
pub fn matrix_product<LA: Layout, LB: Layout>(
    alpha: f64,
    a: &Matrix<LA>,
    b: &Matrix<LB>,
    beta: f64,
    c: &mut Matrix<RowMajor>,
    tiling: Tiling,
) {
    assert_eq!(
        a.rows(),
        c.rows(),
        "A has {} rows but C has {}",
        a.rows(),
        c.rows()
    );
    assert_eq!(
        b.cols(),
        c.cols(),
        "B has {} columns but C has {}",
        b.cols(),
        c.cols()
    );
    assert_eq!(
        a.cols(),
        b.rows(),
        "A has {} columns but B has {} rows",
        a.cols(),
        b.rows()
    );

    let (m, n, k) = (c.rows(), c.cols(), a.cols());
    let row_block = tiling.row_block();
    let col_block = tiling.col_block(n);
    assert!(
        row_block > 0 && col_block > 0,
        "block size must be positive (tiling: {:?})",
        tiling
    );
    let blocks_j = n.div_ceil(col_block);

    log::debug!(
        "matrix_product {}x{}x{}: {:?}, {} tasks of {} rows, {} column blocks",
        m,
        n,
        k,
        tiling,
        tiling.task_count(m),
        row_block,
        blocks_j
    );

    c.as_mut_slice()
        .par_chunks_mut(min(row_block, m) * n)
        .enumerate()
        .for_each(|(bi, c_block)| {
            let i0 = bi * row_block;

            for bj in 0..blocks_j {
                let j0 = bj * col_block;
                let j_lim = min(n, j0 + col_block);

                for (di, c_row) in c_block.chunks_mut(n).enumerate() {
                    let i = i0 + di;

                    for j in j0..j_lim {
                        let mut acc = 0.0;
                        for p in 0..k {
                            acc += a.get(i, p) * b.get(p, j);
                        }
                        c_row[j] *= beta + alpha * acc;
                    }
                }
            }
        });
}
