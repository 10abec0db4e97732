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

//! Communicator trait
//!
//! Blocking point-to-point byte transport between a fixed set of ranks.
//! Implementations must deliver messages between any one (sender, receiver)
//! pair in the order they were sent; the DFT protocol carries no tags and
//! relies on that ordering alone.

use crate::error::DftResult;

use super::CommType;

/// Main interface for distributed operations
pub trait Communicator {
    fn get_rank(&self) -> usize;
    fn get_world_size(&self) -> usize;
    fn get_comm_type(&self) -> CommType;
    fn is_finalized(&self) -> bool;

    fn finalize(&mut self) -> DftResult<()>;
    fn barrier(&self) -> DftResult<()>;

    /// Send data to a specific rank
    ///
    /// Blocks until the transport has taken the message. There is no timeout.
    ///
    /// # Arguments
    /// * `data` - The data to send
    /// * `dest` - The destination rank
    fn send(&self, data: &[u8], dest: usize) -> DftResult<()>;

    /// Receive the next message from a specific rank
    ///
    /// Blocks until a message from `source` arrives, replacing the contents
    /// of `buffer` with it.
    ///
    /// # Arguments
    /// * `buffer` - Buffer to store received data
    /// * `source` - The source rank
    fn recv(&self, buffer: &mut Vec<u8>, source: usize) -> DftResult<()>;
}
