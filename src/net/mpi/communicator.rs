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

//! MPI Communicator implementation
//!
//! Built on rsmpi 0.8. Sends and receives go through the world communicator
//! with the default tag; MPI's non-overtaking rule provides the per-pair
//! ordering the band protocol depends on.

use mpi::environment::Universe;
use mpi::traits::*;

use crate::error::{DftError, DftResult};
use crate::net::{CommType, Communicator as DftCommunicator};

/// MPI Communicator
///
/// Holds the `Universe` so MPI stays initialized for the lifetime of the
/// communicator. Dropping the universe finalizes MPI.
pub struct MpiCommunicator {
    rank: usize,
    world_size: usize,
    universe: Option<Universe>,
}

impl MpiCommunicator {
    /// Initialize MPI and query rank and world size
    pub fn make() -> DftResult<Self> {
        let universe = mpi::initialize().ok_or_else(|| {
            DftError::communication(
                "Failed to initialize MPI (already initialized or MPI library not found)",
            )
        })?;

        let world = universe.world();
        let rank = world.rank();
        let world_size = world.size();

        if rank < 0 || world_size <= 0 || rank >= world_size {
            return Err(DftError::communication(format!(
                "Malformed rank: {} or world size: {}",
                rank, world_size
            )));
        }

        Ok(Self {
            rank: rank as usize,
            world_size: world_size as usize,
            universe: Some(universe),
        })
    }

    fn universe(&self) -> DftResult<&Universe> {
        self.universe
            .as_ref()
            .ok_or_else(|| DftError::communication("MPI not initialized"))
    }

    fn check_peer(&self, peer: usize) -> DftResult<i32> {
        if peer >= self.world_size || peer == self.rank {
            return Err(DftError::Invalid(format!(
                "rank {} cannot exchange messages with rank {} in a world of {}",
                self.rank, peer, self.world_size
            )));
        }
        Ok(peer as i32)
    }
}

impl DftCommunicator for MpiCommunicator {
    fn get_rank(&self) -> usize {
        self.rank
    }

    fn get_world_size(&self) -> usize {
        self.world_size
    }

    fn get_comm_type(&self) -> CommType {
        CommType::Mpi
    }

    fn is_finalized(&self) -> bool {
        self.universe.is_none()
    }

    fn finalize(&mut self) -> DftResult<()> {
        self.universe = None;
        Ok(())
    }

    fn barrier(&self) -> DftResult<()> {
        self.universe()?.world().barrier();
        Ok(())
    }

    fn send(&self, data: &[u8], dest: usize) -> DftResult<()> {
        let dest = self.check_peer(dest)?;
        let world = self.universe()?.world();
        world.process_at_rank(dest).send(data);
        Ok(())
    }

    fn recv(&self, buffer: &mut Vec<u8>, source: usize) -> DftResult<()> {
        let source = self.check_peer(source)?;
        let world = self.universe()?.world();
        let (msg, _status) = world.process_at_rank(source).receive_vec::<u8>();
        *buffer = msg;
        Ok(())
    }
}
