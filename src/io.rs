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

//! I/O operations for reading matrices and writing spectra
//!
//! Input is whitespace-delimited text: the side length `N`, then `N * N`
//! real values in row-major order. Anything after the last value is ignored.

use std::io::{Read, Write};

use crate::error::{DftError, DftResult};
use crate::matrix::{element_count, FrequencyMatrix, Matrix};

/// Read a matrix, rejecting side lengths beyond `capacity`
///
/// The side length is checked before any value is parsed, so an oversized
/// header fails with `SizeExceeded` without allocating. Values are collected
/// as they are read, so a truncated stream fails with `MalformedInput` no
/// matter how large the announced size is.
pub fn read_matrix<R: Read>(mut reader: R, capacity: usize) -> DftResult<Matrix> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_matrix(&text, capacity)
}

/// Parse a matrix from text already in memory
pub fn parse_matrix(text: &str, capacity: usize) -> DftResult<Matrix> {
    let mut tokens = text.split_whitespace();

    let header = tokens
        .next()
        .ok_or_else(|| DftError::malformed("missing matrix size"))?;
    let size: i64 = header
        .parse()
        .map_err(|_| DftError::malformed(format!("matrix size '{}' is not an integer", header)))?;
    if size <= 0 {
        return Err(DftError::malformed(format!(
            "matrix size must be positive, got {}",
            size
        )));
    }
    let size = usize::try_from(size).map_err(|_| DftError::SizeExceeded {
        size: usize::MAX,
        capacity,
    })?;
    if size > capacity {
        return Err(DftError::SizeExceeded { size, capacity });
    }

    let expected = element_count(size, capacity)?;
    let mut data = Vec::new();
    for index in 0..expected {
        let token = tokens.next().ok_or_else(|| {
            DftError::malformed(format!(
                "input ended after {} of {} values",
                index, expected
            ))
        })?;
        let value: f64 = token.parse().map_err(|_| {
            DftError::malformed(format!(
                "value '{}' at row {}, column {} is not a number",
                token,
                index / size,
                index % size
            ))
        })?;
        data.push(value);
    }

    Matrix::new(size, data)
}

/// Write every coefficient as `(real, imag) `, one matrix row per line,
/// followed by the sum of all coefficients
pub fn write_frequency_matrix<W: Write>(mut writer: W, spectrum: &FrequencyMatrix) -> DftResult<()> {
    for row in spectrum.rows() {
        for value in row {
            write!(writer, "({:.6}, {:.6}) ", value.re, value.im)?;
        }
        writeln!(writer)?;
    }
    let sum = spectrum.sum();
    writeln!(writer, "Sum : ({:.6}, {:.6})", sum.re, sum.im)?;
    writer.flush()?;
    Ok(())
}
