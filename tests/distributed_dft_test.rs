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

//! End-to-end transform tests over the in-process runtime

use approx::assert_abs_diff_eq;
use num_complex::Complex64;

use distdft::config::DftConfig;
use distdft::io::{parse_matrix, write_frequency_matrix};
use distdft::kernel::{dft, dft_coefficient};
use distdft::{run_local, Matrix};

const EPS: f64 = 1e-12;

fn sample_matrix(size: usize) -> Matrix {
    let data = (0..size * size)
        .map(|i| ((i * 7 + 3) % 11) as f64 - 4.5)
        .collect();
    Matrix::new(size, data).unwrap()
}

fn config(participants: usize) -> DftConfig {
    DftConfig::default().with_participants(participants)
}

#[test]
fn test_zero_matrix_has_zero_spectrum() {
    let matrix = Matrix::filled(5, 0.0).unwrap();
    let spectrum = run_local(&matrix, &config(3)).unwrap();
    for value in spectrum.as_slice() {
        assert_eq!(value.re, 0.0);
        assert_eq!(value.im, 0.0);
    }
}

#[test]
fn test_constant_matrix_has_only_dc_term() {
    let c = 2.5;
    let matrix = Matrix::filled(6, c).unwrap();
    let spectrum = run_local(&matrix, &config(4)).unwrap();

    for k in 0..6 {
        for l in 0..6 {
            let expected = if k == 0 && l == 0 { c } else { 0.0 };
            let value = spectrum.get(k, l);
            assert_abs_diff_eq!(value.re, expected, epsilon = EPS);
            assert_abs_diff_eq!(value.im, 0.0, epsilon = EPS);
        }
    }
}

#[test]
fn test_single_participant_equals_direct_kernel() {
    let matrix = sample_matrix(7);
    let spectrum = run_local(&matrix, &config(1)).unwrap();
    for k in 0..7 {
        for l in 0..7 {
            // bit-identical, not merely close
            assert_eq!(spectrum.get(k, l), dft_coefficient(&matrix, k, l));
        }
    }
}

#[test]
fn test_result_is_partition_invariant() {
    let matrix = sample_matrix(9);
    let reference = dft(&matrix);
    for participants in [2, 3, 4, 5, 9, 12] {
        let spectrum = run_local(&matrix, &config(participants)).unwrap();
        assert_eq!(spectrum, reference, "participants = {}", participants);
    }
}

#[test]
fn test_repeated_runs_are_deterministic() {
    let matrix = sample_matrix(8);
    let first = run_local(&matrix, &config(3)).unwrap();
    for _ in 0..3 {
        assert_eq!(run_local(&matrix, &config(3)).unwrap(), first);
    }
}

#[test]
fn test_two_by_two_ones() {
    let matrix = parse_matrix("2\n1 1\n1 1\n", 512).unwrap();
    let spectrum = run_local(&matrix, &config(1)).unwrap();

    let expected = [[1.0, 0.0], [0.0, 0.0]];
    for k in 0..2 {
        for l in 0..2 {
            assert_abs_diff_eq!(spectrum.get(k, l).re, expected[k][l], epsilon = EPS);
            assert_abs_diff_eq!(spectrum.get(k, l).im, 0.0, epsilon = EPS);
        }
    }

    let sum = spectrum.sum();
    assert_abs_diff_eq!(sum.re, 1.0, epsilon = EPS);
    assert_abs_diff_eq!(sum.im, 0.0, epsilon = EPS);

    let mut out = Vec::new();
    write_frequency_matrix(&mut out, &spectrum).unwrap();
    let text = String::from_utf8(out).unwrap();
    // the imaginary part may print as -0.000000, the same as C's %lf
    let sum_line = text.lines().last().unwrap();
    let parts: Vec<f64> = sum_line
        .trim_start_matches("Sum : (")
        .trim_end_matches(')')
        .split(", ")
        .map(|part| part.parse().unwrap())
        .collect();
    assert!(sum_line.starts_with("Sum : (1.000000, "), "{}", sum_line);
    assert_eq!(parts.len(), 2);
    assert_abs_diff_eq!(parts[0], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(parts[1], 0.0, epsilon = 1e-6);
}

#[test]
fn test_more_participants_than_rows() {
    let matrix = sample_matrix(3);
    let spectrum = run_local(&matrix, &config(6)).unwrap();
    assert_eq!(spectrum, dft(&matrix));
}

#[test]
fn test_single_frequency_input() {
    // f[i][j] = cos(2*pi*j/N) puts half the energy at (0, 1) and half at (0, N-1)
    let size = 4;
    let data = (0..size * size)
        .map(|idx| (2.0 * std::f64::consts::PI * (idx % size) as f64 / size as f64).cos())
        .collect();
    let matrix = Matrix::new(size, data).unwrap();
    let spectrum = run_local(&matrix, &config(2)).unwrap();

    for k in 0..size {
        for l in 0..size {
            let expected = if k == 0 && (l == 1 || l == size - 1) { 0.5 } else { 0.0 };
            let value: Complex64 = spectrum.get(k, l);
            assert_abs_diff_eq!(value.re, expected, epsilon = EPS);
            assert_abs_diff_eq!(value.im, 0.0, epsilon = EPS);
        }
    }
}
