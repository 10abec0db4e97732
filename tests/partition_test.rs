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

//! Row partitioning tests

use distdft::error::DftError;
use distdft::partition::{band_for_rank, partition_rows, Band};

#[test]
fn test_bands_cover_all_rows_exactly() {
    for size in 1..=40 {
        for participants in 1..=12 {
            let bands = partition_rows(size, participants).unwrap();
            assert_eq!(bands.len(), participants);
            assert_eq!(bands[0].offset, 0);

            for pair in bands.windows(2) {
                assert_eq!(
                    pair[1].offset,
                    pair[0].end(),
                    "gap or overlap for N={} P={}",
                    size,
                    participants
                );
            }
            assert_eq!(bands.last().unwrap().end(), size);

            let total: usize = bands.iter().map(|b| b.count).sum();
            assert_eq!(total, size);
        }
    }
}

#[test]
fn test_band_sizes_are_balanced_except_last() {
    for size in 1..=40 {
        for participants in 1..=12 {
            let bands = partition_rows(size, participants).unwrap();
            let base = size / participants;
            let remainder = size % participants;

            for band in &bands[..participants - 1] {
                assert_eq!(band.count, base);
            }
            assert_eq!(bands[participants - 1].count, base + remainder);
        }
    }
}

#[test]
fn test_band_for_rank_agrees_with_partition() {
    let bands = partition_rows(10, 4).unwrap();
    for (rank, band) in bands.iter().enumerate() {
        assert_eq!(band.rank, rank);
        assert_eq!(band_for_rank(10, 4, rank).unwrap(), *band);
    }
    assert_eq!(bands[3], Band::new(3, 6, 4));
}

#[test]
fn test_four_rows_two_participants() {
    let bands = partition_rows(4, 2).unwrap();
    assert_eq!(bands, vec![Band::new(0, 0, 2), Band::new(1, 2, 2)]);
}

#[test]
fn test_zero_participants_is_invalid() {
    match partition_rows(4, 0) {
        Err(DftError::InvalidPartition(_)) => {}
        other => panic!("expected InvalidPartition, got {:?}", other),
    }
}
