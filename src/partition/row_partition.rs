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

//! Static row-band partitioning
//!
//! Every band holds `N / P` rows except the last one, which also takes the
//! `N % P` leftover rows. The split depends only on `N` and `P`, so every
//! participant can recompute any other participant's band.

use std::ops::Range;

use crate::error::{DftError, DftResult};

/// Contiguous range of output rows owned by one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub rank: usize,
    pub offset: usize,
    pub count: usize,
}

impl Band {
    pub fn new(rank: usize, offset: usize, count: usize) -> Self {
        Self { rank, offset, count }
    }

    /// One past the last row of the band
    pub fn end(&self) -> usize {
        self.offset + self.count
    }

    pub fn rows(&self) -> Range<usize> {
        self.offset..self.end()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Split `size` rows across `participants` ranks
///
/// Returns one band per rank, indexed by rank.
///
/// # Example
/// ```
/// use distdft::partition::partition_rows;
///
/// let bands = partition_rows(10, 3).unwrap();
/// let counts: Vec<usize> = bands.iter().map(|b| b.count).collect();
/// assert_eq!(counts, vec![3, 3, 4]);
/// ```
pub fn partition_rows(size: usize, participants: usize) -> DftResult<Vec<Band>> {
    check_participants(participants)?;
    (0..participants)
        .map(|rank| band_for_rank(size, participants, rank))
        .collect()
}

/// Band owned by `rank` when `size` rows are split across `participants`
pub fn band_for_rank(size: usize, participants: usize, rank: usize) -> DftResult<Band> {
    check_participants(participants)?;
    if rank >= participants {
        return Err(DftError::InvalidPartition(format!(
            "rank {} is outside a world of {} participants",
            rank, participants
        )));
    }

    let base = size / participants;
    let remainder = size % participants;
    let count = if rank == participants - 1 {
        base + remainder
    } else {
        base
    };

    Ok(Band::new(rank, rank * base, count))
}

fn check_participants(participants: usize) -> DftResult<()> {
    if participants == 0 {
        return Err(DftError::InvalidPartition(
            "participant count must be > 0".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_participant_owns_everything() {
        let bands = partition_rows(7, 1).unwrap();
        assert_eq!(bands, vec![Band::new(0, 0, 7)]);
    }

    #[test]
    fn test_last_rank_absorbs_remainder() {
        let bands = partition_rows(4, 3).unwrap();
        assert_eq!(
            bands,
            vec![Band::new(0, 0, 1), Band::new(1, 1, 1), Band::new(2, 2, 2)]
        );
    }

    #[test]
    fn test_fewer_rows_than_participants() {
        let bands = partition_rows(2, 4).unwrap();
        assert_eq!(bands[0], Band::new(0, 0, 0));
        assert!(bands[1].is_empty());
        assert!(bands[2].is_empty());
        assert_eq!(bands[3], Band::new(3, 0, 2));
    }

    #[test]
    fn test_invalid_partition() {
        assert!(matches!(
            partition_rows(4, 0),
            Err(DftError::InvalidPartition(_))
        ));
        assert!(matches!(
            partition_rows(0, 0),
            Err(DftError::InvalidPartition(_))
        ));
        assert!(band_for_rank(4, 2, 2).is_err());
    }
}
