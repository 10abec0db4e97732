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

//! Message encoding for band exchange
//!
//! A dispatch is exactly two messages from the coordinator to one worker:
//! a [`BandHeader`] carrying `(count, offset, size)` and then the payload of
//! real input values. A reply is one message of complex output values. All
//! messages are bincode-encoded.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{DftError, DftResult};
use crate::net::Communicator;
use crate::partition::Band;

/// Band metadata sent ahead of every payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandHeader {
    /// Number of output rows the receiver owns
    pub count: u64,
    /// First output row the receiver owns
    pub offset: u64,
    /// Matrix side length
    pub size: u64,
}

impl BandHeader {
    pub fn new(band: &Band, size: usize) -> Self {
        Self {
            count: band.count as u64,
            offset: band.offset as u64,
            size: size as u64,
        }
    }

    /// Matrix side length, checked against `capacity`
    pub fn checked_size(&self, capacity: usize) -> DftResult<usize> {
        let size = usize::try_from(self.size)
            .map_err(|_| DftError::communication(format!("header size {} overflows", self.size)))?;
        if size == 0 {
            return Err(DftError::communication("header announces an empty matrix"));
        }
        if size > capacity {
            return Err(DftError::SizeExceeded { size, capacity });
        }
        Ok(size)
    }

    /// Band described by this header for `rank`, checked against the size
    pub fn band(&self, rank: usize) -> DftResult<Band> {
        let within = self
            .offset
            .checked_add(self.count)
            .map_or(false, |end| end <= self.size);
        if !within {
            return Err(DftError::communication(format!(
                "band [{}, {}+{}) does not fit a matrix of {} rows",
                self.offset, self.offset, self.count, self.size
            )));
        }
        Ok(Band::new(rank, self.offset as usize, self.count as usize))
    }
}

/// Encode a value with bincode
pub fn encode<T: Serialize + ?Sized>(value: &T) -> DftResult<Vec<u8>> {
    bincode::serialize(value)
        .map_err(|e| DftError::Serialization(format!("Failed to encode message: {}", e)))
}

/// Decode a received message
///
/// Undecodable bytes came from a misbehaving peer, so they are reported as a
/// communication failure.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> DftResult<T> {
    bincode::deserialize(bytes)
        .map_err(|e| DftError::communication(format!("Failed to decode message: {}", e)))
}

pub fn send_header(comm: &dyn Communicator, header: &BandHeader, dest: usize) -> DftResult<()> {
    comm.send(&encode(header)?, dest)
}

pub fn recv_header(comm: &dyn Communicator, source: usize) -> DftResult<BandHeader> {
    let mut buffer = Vec::new();
    comm.recv(&mut buffer, source)?;
    decode(&buffer)
}

/// Send a contiguous block of values as one message
pub fn send_values<T: Serialize>(comm: &dyn Communicator, values: &[T], dest: usize) -> DftResult<()> {
    comm.send(&encode(values)?, dest)
}

/// Receive one block of values, which must hold exactly `expected` entries
pub fn recv_values<T: DeserializeOwned>(
    comm: &dyn Communicator,
    source: usize,
    expected: usize,
) -> DftResult<Vec<T>> {
    let mut buffer = Vec::new();
    comm.recv(&mut buffer, source)?;
    let values: Vec<T> = decode(&buffer)?;
    if values.len() != expected {
        return Err(DftError::communication(format!(
            "rank {} sent {} values, expected {}",
            source,
            values.len(),
            expected
        )));
    }
    Ok(values)
}
