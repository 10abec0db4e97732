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

//! Square matrices in the spatial and frequency domains
//!
//! Both types store their elements row-major in a single `Vec` and are never
//! shared between participants: a band crosses a participant boundary only as
//! a copy.

use num_complex::Complex64;

use crate::error::{DftError, DftResult};

/// Number of elements in a `size` x `size` matrix
///
/// Fails with `SizeExceeded` when the count does not fit a `usize`.
pub fn element_count(size: usize, capacity: usize) -> DftResult<usize> {
    size.checked_mul(size).ok_or(DftError::SizeExceeded { size, capacity })
}

/// Square real-valued input matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    size: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a matrix from row-major data
    ///
    /// `data` must hold exactly `size * size` values and `size` must be at
    /// least 1.
    pub fn new(size: usize, data: Vec<f64>) -> DftResult<Self> {
        if size == 0 {
            return Err(DftError::malformed("matrix size must be at least 1"));
        }
        let expected = size
            .checked_mul(size)
            .ok_or_else(|| DftError::malformed(format!("matrix size {} overflows", size)))?;
        if data.len() != expected {
            return Err(DftError::malformed(format!(
                "expected {} values for a {}x{} matrix, got {}",
                expected,
                size,
                size,
                data.len()
            )));
        }
        Ok(Self { size, data })
    }

    /// Create a matrix filled with a single value
    pub fn filled(size: usize, value: f64) -> DftResult<Self> {
        Self::new(size, vec![value; size.saturating_mul(size)])
    }

    /// Create a matrix from nested rows, mostly useful in tests
    pub fn from_rows(rows: &[Vec<f64>]) -> DftResult<Self> {
        let size = rows.len();
        if let Some(bad) = rows.iter().position(|row| row.len() != size) {
            return Err(DftError::malformed(format!(
                "row {} has {} values, expected {}",
                bad,
                rows[bad].len(),
                size
            )));
        }
        Self::new(size, rows.concat())
    }

    /// Fail with `SizeExceeded` when the side length is beyond `capacity`
    pub fn check_capacity(&self, capacity: usize) -> DftResult<()> {
        if self.size > capacity {
            return Err(DftError::SizeExceeded {
                size: self.size,
                capacity,
            });
        }
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.size..(i + 1) * self.size]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Square complex-valued output matrix
///
/// Allocated at full size on every participant. Only the rows of the
/// participant's own band are ever written, except on the coordinator which
/// ends up holding every band.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyMatrix {
    size: usize,
    data: Vec<Complex64>,
}

impl FrequencyMatrix {
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![Complex64::new(0.0, 0.0); size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, k: usize, l: usize) -> Complex64 {
        self.data[k * self.size + l]
    }

    #[inline]
    pub fn set(&mut self, k: usize, l: usize, value: Complex64) {
        self.data[k * self.size + l] = value;
    }

    pub fn row(&self, k: usize) -> &[Complex64] {
        &self.data[k * self.size..(k + 1) * self.size]
    }

    /// Iterate over the rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[Complex64]> {
        // chunks() panics on a zero chunk size
        self.data.chunks(self.size.max(1))
    }

    /// Contiguous view of rows `[offset, offset + count)`
    pub fn band(&self, offset: usize, count: usize) -> DftResult<&[Complex64]> {
        let range = self.band_range(offset, count)?;
        Ok(&self.data[range])
    }

    /// Copy `values` into rows `[offset, offset + count)`
    pub fn write_band(&mut self, offset: usize, count: usize, values: &[Complex64]) -> DftResult<()> {
        let range = self.band_range(offset, count)?;
        if values.len() != range.len() {
            return Err(DftError::Invalid(format!(
                "band at offset {} with {} rows needs {} values, got {}",
                offset,
                count,
                range.len(),
                values.len()
            )));
        }
        self.data[range].copy_from_slice(values);
        Ok(())
    }

    /// Sum of every element, accumulated row-major
    pub fn sum(&self) -> Complex64 {
        self.data
            .iter()
            .fold(Complex64::new(0.0, 0.0), |acc, value| acc + *value)
    }

    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }

    fn band_range(&self, offset: usize, count: usize) -> DftResult<std::ops::Range<usize>> {
        match offset.checked_add(count) {
            Some(end) if end <= self.size => Ok(offset * self.size..end * self.size),
            _ => Err(DftError::Invalid(format!(
                "band [{}, {}+{}) is outside a matrix of {} rows",
                offset, offset, count, self.size
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_shape_checks() {
        assert!(Matrix::new(0, vec![]).is_err());
        assert!(Matrix::new(2, vec![1.0, 2.0, 3.0]).is_err());
        assert!(Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_err());

        let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.size(), 2);
        assert_eq!(m.get(1, 0), 3.0);
        assert_eq!(m.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn test_element_count_overflow() {
        assert_eq!(element_count(3, 512).unwrap(), 9);
        let size = 1usize << (usize::BITS / 2);
        assert!(matches!(
            element_count(size, usize::MAX),
            Err(DftError::SizeExceeded { capacity: usize::MAX, .. })
        ));
    }

    #[test]
    fn test_capacity() {
        let m = Matrix::filled(4, 1.0).unwrap();
        assert!(m.check_capacity(4).is_ok());
        match m.check_capacity(3) {
            Err(DftError::SizeExceeded { size, capacity }) => {
                assert_eq!((size, capacity), (4, 3));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_band_write() {
        let mut f = FrequencyMatrix::zeros(3);
        let values = vec![Complex64::new(1.0, -1.0); 6];
        f.write_band(1, 2, &values).unwrap();

        assert_eq!(f.get(0, 2), Complex64::new(0.0, 0.0));
        assert_eq!(f.get(2, 2), Complex64::new(1.0, -1.0));
        assert_eq!(f.band(1, 2).unwrap().len(), 6);
        assert_eq!(f.sum(), Complex64::new(6.0, -6.0));

        assert!(f.write_band(2, 2, &values).is_err());
        assert!(f.write_band(0, 1, &values).is_err());
        // empty band at the end is well formed
        assert!(f.write_band(3, 0, &[]).is_ok());
    }
}
