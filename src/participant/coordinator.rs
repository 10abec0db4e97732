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

//! Coordinator role (rank 0)
//!
//! Partitions the output rows, ships every worker its band header and the
//! input, computes band 0 locally, then collects the remaining bands in rank
//! order. Collection blocks on rank `r` before looking at rank `r + 1`, so a
//! slow low rank delays every later one even if they finished first.

use num_complex::Complex64;

use crate::ctx::DftContext;
use crate::error::{DftError, DftResult};
use crate::kernel::compute_band;
use crate::matrix::{FrequencyMatrix, Matrix};
use crate::net::wire::{self, BandHeader};
use crate::participant::{Participant, Role, COORDINATOR_RANK};
use crate::partition::{partition_rows, Band};
use crate::{dft_debug, dft_info};

/// Coordinator progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Idle,
    Partitioning,
    Dispatching,
    ComputingLocalBand,
    Collecting,
    Assembled,
    Done,
}

pub struct Coordinator<'a> {
    ctx: &'a DftContext,
    matrix: Matrix,
    state: CoordinatorState,
}

impl<'a> Coordinator<'a> {
    pub fn new(ctx: &'a DftContext, matrix: Matrix) -> DftResult<Self> {
        if ctx.get_rank() != COORDINATOR_RANK {
            return Err(DftError::Invalid(format!(
                "rank {} cannot coordinate",
                ctx.get_rank()
            )));
        }
        matrix.check_capacity(ctx.config().max_size)?;
        Ok(Self {
            ctx,
            matrix,
            state: CoordinatorState::Idle,
        })
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    fn transition(&mut self, next: CoordinatorState) {
        dft_debug!("coordinator: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn partition(&mut self) -> DftResult<Vec<Band>> {
        self.transition(CoordinatorState::Partitioning);
        let world_size = self.ctx.get_world_size();
        dft_info!("World size: {}", world_size);
        partition_rows(self.matrix.size(), world_size)
    }

    fn dispatch(&mut self, bands: &[Band]) -> DftResult<()> {
        self.transition(CoordinatorState::Dispatching);
        let comm = self.ctx.communicator();
        let size = self.matrix.size();

        for band in bands.iter().skip(1) {
            dft_debug!(
                "Sending rows [{}, {}) to rank {}",
                band.offset,
                band.end(),
                band.rank
            );
            wire::send_header(comm, &BandHeader::new(band, size), band.rank)?;
            wire::send_values(comm, self.matrix.as_slice(), band.rank)?;
        }
        Ok(())
    }

    fn compute_local(&mut self, band: &Band, out: &mut FrequencyMatrix) {
        self.transition(CoordinatorState::ComputingLocalBand);
        compute_band(&self.matrix, band, out);
    }

    fn collect(&mut self, bands: &[Band], out: &mut FrequencyMatrix) -> DftResult<()> {
        self.transition(CoordinatorState::Collecting);
        let comm = self.ctx.communicator();
        let size = self.matrix.size();

        for band in bands.iter().skip(1) {
            dft_debug!("Waiting for rank {}", band.rank);
            let rows: Vec<Complex64> = wire::recv_values(comm, band.rank, band.count * size)?;
            out.write_band(band.offset, band.count, &rows)?;
        }
        Ok(())
    }
}

impl Participant for Coordinator<'_> {
    fn role(&self) -> Role {
        Role::Coordinator
    }

    fn run(&mut self) -> DftResult<Option<FrequencyMatrix>> {
        let bands = self.partition()?;
        self.dispatch(&bands)?;

        let mut spectrum = FrequencyMatrix::zeros(self.matrix.size());
        self.compute_local(&bands[COORDINATOR_RANK], &mut spectrum);
        self.collect(&bands, &mut spectrum)?;

        self.transition(CoordinatorState::Assembled);
        dft_info!("Coordinator finished");
        self.transition(CoordinatorState::Done);
        Ok(Some(spectrum))
    }
}
