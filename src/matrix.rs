//! Fixed-shape dense `f64` matrices with a compile-time storage layout.
//!
//! The layout is a type parameter so that element access compiles down to a
//! single multiply-add on the index, with no runtime branch on the layout.
//! Storage is split into *lanes*: the contiguous runs of the backing buffer
//! (a row for [`RowMajor`], a column for [`ColMajor`]). Parallel fills hand
//! one lane to each task so that writes never overlap.

use std::marker::PhantomData;

use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Mapping from a 2D index to a position in flat storage.
pub trait Layout: Send + Sync + 'static {
    /// Short name used in log output.
    const NAME: &'static str;

    /// Flat offset of element `(i, j)` in a `rows x cols` matrix.
    fn offset(i: usize, j: usize, rows: usize, cols: usize) -> usize;

    /// Number of elements in one contiguous lane.
    fn lane_len(rows: usize, cols: usize) -> usize;

    /// `(i, j)` of the element at `pos` inside lane number `lane`.
    fn coords(lane: usize, pos: usize) -> (usize, usize);
}

/// Consecutive elements along a row are contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowMajor;

/// Consecutive elements along a column are contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColMajor;

impl Layout for RowMajor {
    const NAME: &'static str = "row-major";

    #[inline(always)]
    fn offset(i: usize, j: usize, _rows: usize, cols: usize) -> usize {
        i * cols + j
    }

    #[inline(always)]
    fn lane_len(_rows: usize, cols: usize) -> usize {
        cols
    }

    #[inline(always)]
    fn coords(lane: usize, pos: usize) -> (usize, usize) {
        (lane, pos)
    }
}

impl Layout for ColMajor {
    const NAME: &'static str = "column-major";

    #[inline(always)]
    fn offset(i: usize, j: usize, rows: usize, _cols: usize) -> usize {
        (j * rows) + i
    }

    #[inline(always)]
    fn lane_len(rows: usize, _cols: usize) -> usize {
        rows
    }

    #[inline(always)]
    fn coords(lane: usize, pos: usize) -> (usize, usize) {
        (pos, lane)
    }
}

/// A dense `rows x cols` matrix of `f64` stored with layout `L`.
///
/// Extents are fixed at construction. Indexing outside `[0, rows) x [0, cols)`
/// is a caller bug and panics.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<L: Layout> {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
    _layout: PhantomData<L>,
}

impl<L: Layout> Matrix<L> {
    /// Allocates a zero-filled `rows x cols` matrix.
    ///
    /// # Panics
    ///
    /// Panics if either extent is zero or if `rows * cols` overflows `usize`.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "matrix extents must be positive (got {}x{})",
            rows,
            cols
        );
        let len = rows
            .checked_mul(cols)
            .unwrap_or_else(|| panic!("matrix of {}x{} elements overflows usize", rows, cols));

        log::debug!("allocating {}x{} {} matrix", rows, cols, L::NAME);

        Matrix {
            rows,
            cols,
            data: vec![0.0; len],
            _layout: PhantomData,
        }
    }

    /// Builds a matrix whose element `(i, j)` is `f(i, j)`.
    pub fn from_fn<F>(rows: usize, cols: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        let mut matrix = Self::new(rows, cols);
        matrix.par_fill(f);
        matrix
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Extent along `dim`: `0` is rows, `1` is columns.
    ///
    /// # Panics
    ///
    /// Panics if `dim > 1`; matrices are always rank 2.
    pub fn extent(&self, dim: usize) -> usize {
        match dim {
            0 => self.rows,
            1 => self.cols,
            _ => panic!("matrix has rank 2, extent({}) is out of range", dim),
        }
    }

    #[inline(always)]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            i,
            j,
            self.rows,
            self.cols
        );
        L::offset(i, j, self.rows, self.cols)
    }

    /// Reads element `(i, j)`.
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.index(i, j)]
    }

    /// Writes element `(i, j)`.
    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.index(i, j);
        self.data[idx] = value;
    }

    /// Backing storage in layout order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Overwrites every element with `f(i, j)`, one parallel task per lane.
    ///
    /// Returns once every lane has been written.
    pub fn par_fill<F>(&mut self, f: F)
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        let lane_len = L::lane_len(self.rows, self.cols);

        self.data
            .par_chunks_mut(lane_len)
            .enumerate()
            .for_each(|(lane, chunk)| {
                for (pos, x) in chunk.iter_mut().enumerate() {
                    let (i, j) = L::coords(lane, pos);
                    *x = f(i, j);
                }
            });
    }
}
