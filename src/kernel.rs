// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Direct 2D DFT kernels
//!
//! The coefficient at `(k, l)` is
//!
//! ```text
//! F[k][l] = 1/N^2 * sum_i sum_j f[i][j] * exp(-2*pi*sqrt(-1)*(k*i/N + l*j/N))
//! ```
//!
//! evaluated by direct summation. The summation order (rows ascending, then
//! columns ascending within a row) is fixed so every participant produces
//! bit-identical coefficients regardless of how rows are partitioned.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::error::DftResult;
use crate::matrix::{FrequencyMatrix, Matrix};
use crate::partition::Band;

/// Contribution of input element `(i, j)` to output coefficient `(k, l)`
#[inline]
pub fn element_transform(matrix: &Matrix, k: usize, l: usize, i: usize, j: usize) -> Complex64 {
    let n = matrix.size() as f64;
    let arg = (k * i) as f64 / n + (l * j) as f64 / n;
    let exponent = Complex64::new(0.0, -2.0 * PI * arg).exp();
    exponent * matrix.get(i, j)
}

/// Sum of [`element_transform`] over every column of input row `i`
pub fn row_reduce(matrix: &Matrix, k: usize, l: usize, i: usize) -> Complex64 {
    let mut row = Complex64::new(0.0, 0.0);
    for j in 0..matrix.size() {
        row += element_transform(matrix, k, l, i, j);
    }
    row
}

/// Normalized DFT coefficient at `(k, l)`
pub fn dft_coefficient(matrix: &Matrix, k: usize, l: usize) -> Complex64 {
    let mut element = Complex64::new(0.0, 0.0);
    for i in 0..matrix.size() {
        element += row_reduce(matrix, k, l, i);
    }
    let n = matrix.size() as f64;
    element / (n * n)
}

/// Evaluate every coefficient of the rows in `band` into `out`
///
/// Rows outside the band are left untouched. An empty band is a no-op.
///
/// # Panics
///
/// Panics if `band` reaches past the last row of `matrix` or if `out` is
/// smaller than `matrix`. Bands from [`crate::partition`] and checked
/// [`crate::net::wire::BandHeader`]s always fit.
pub fn compute_band(matrix: &Matrix, band: &Band, out: &mut FrequencyMatrix) {
    for k in band.rows() {
        for l in 0..matrix.size() {
            out.set(k, l, dft_coefficient(matrix, k, l));
        }
    }
}

/// Evaluate only the rows in `band`, returned contiguously
pub fn compute_band_rows(matrix: &Matrix, band: &Band) -> DftResult<Vec<Complex64>> {
    let mut out = FrequencyMatrix::zeros(matrix.size());
    compute_band(matrix, band, &mut out);
    Ok(out.band(band.offset, band.count)?.to_vec())
}

/// Full transform on a single participant, no distribution involved
pub fn dft(matrix: &Matrix) -> FrequencyMatrix {
    let mut out = FrequencyMatrix::zeros(matrix.size());
    compute_band(matrix, &Band::new(0, 0, matrix.size()), &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_element_transform_phase() {
        let m = Matrix::filled(4, 2.0).unwrap();
        // theta = 2*pi*(1*1/4 + 0) = pi/2 -> 2 * e^{-i*pi/2} = -2i
        let value = element_transform(&m, 1, 0, 1, 3);
        assert_abs_diff_eq!(value.re, 0.0, epsilon = EPS);
        assert_abs_diff_eq!(value.im, -2.0, epsilon = EPS);

        let dc = element_transform(&m, 0, 0, 3, 3);
        assert_eq!(dc, Complex64::new(2.0, 0.0));
    }

    #[test]
    fn test_row_reduce_sums_columns() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let row = row_reduce(&m, 0, 0, 1);
        assert_eq!(row, Complex64::new(7.0, 0.0));

        // l = 1 alternates the sign across columns
        let row = row_reduce(&m, 0, 1, 1);
        assert_abs_diff_eq!(row.re, -1.0, epsilon = EPS);
        assert_abs_diff_eq!(row.im, 0.0, epsilon = EPS);
    }

    #[test]
    fn test_dft_of_two_by_two() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let f = dft(&m);
        let expected = [[2.5, -0.5], [-1.0, 0.0]];
        for k in 0..2 {
            for l in 0..2 {
                assert_abs_diff_eq!(f.get(k, l).re, expected[k][l], epsilon = EPS);
                assert_abs_diff_eq!(f.get(k, l).im, 0.0, epsilon = EPS);
            }
        }
    }

    #[test]
    fn test_compute_band_leaves_other_rows() {
        let m = Matrix::filled(3, 1.0).unwrap();
        let mut out = FrequencyMatrix::zeros(3);
        compute_band(&m, &Band::new(1, 1, 2), &mut out);
        assert_eq!(out.row(0), &[Complex64::new(0.0, 0.0); 3]);
        assert_eq!(out.get(1, 0), dft_coefficient(&m, 1, 0));

        let rows = compute_band_rows(&m, &Band::new(1, 1, 2)).unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], out.get(1, 0));

        let empty = compute_band_rows(&m, &Band::new(1, 3, 0)).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_compute_band_outside_matrix_panics() {
        let m = Matrix::filled(2, 1.0).unwrap();
        let mut out = FrequencyMatrix::zeros(2);
        compute_band(&m, &Band::new(0, 1, 2), &mut out);
    }
}
