use crate::matrix::{Layout, Matrix};

/// Sum of all elements of `matrix`, accumulated sequentially in row-major
/// `(i, j)` order regardless of the storage layout.
pub fn checksum<L: Layout>(matrix: &Matrix<L>) -> f64 {
    let mut cs = 0.0;

    for i in 0..matrix.extent(0) {
        for j in 0..matrix.extent(1) {
            cs += matrix.get(i, j);
        }
    }

    cs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::pattern_value;
    use crate::matrix::{ColMajor, RowMajor};

    #[test]
    fn test_checksum_small() {
        let m = Matrix::<RowMajor>::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
        assert_eq!(checksum(&m), 15.0);
    }

    #[test]
    fn test_checksum_pattern_4x4() {
        // -2 -1  0  1
        // -1 -1  0  1
        //  0  0  0  1
        //  1  1  1  1
        let m = Matrix::<RowMajor>::from_fn(4, 4, pattern_value);
        assert_eq!(checksum(&m), 2.0);
    }

    #[test]
    fn test_checksum_same_order_for_both_layouts() {
        // Values chosen so that summation order changes the rounding.
        let f = |i: usize, j: usize| 1.0 / ((i * 31 + j * 17 + 1) as f64);
        let r = Matrix::<RowMajor>::from_fn(19, 23, f);
        let c = Matrix::<ColMajor>::from_fn(19, 23, f);

        assert_eq!(checksum(&r).to_bits(), checksum(&c).to_bits());
    }
}
