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

//! Worker role (every rank but 0)

use crate::ctx::DftContext;
use crate::error::DftResult;
use crate::kernel::compute_band;
use crate::matrix::{element_count, FrequencyMatrix, Matrix};
use crate::net::wire;
use crate::participant::{Participant, Role, COORDINATOR_RANK};
use crate::partition::Band;
use crate::{dft_debug, dft_info};

/// Worker progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    AwaitingBand,
    Computing,
    Sending,
    Done,
}

pub struct Worker<'a> {
    ctx: &'a DftContext,
    state: WorkerState,
}

impl<'a> Worker<'a> {
    pub fn new(ctx: &'a DftContext) -> Self {
        Self {
            ctx,
            state: WorkerState::Idle,
        }
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    fn transition(&mut self, next: WorkerState) {
        dft_debug!("worker {}: {:?} -> {:?}", self.ctx.get_rank(), self.state, next);
        self.state = next;
    }

    /// Header first, then the input payload, both from the coordinator
    fn await_band(&mut self) -> DftResult<(Band, Matrix)> {
        self.transition(WorkerState::AwaitingBand);
        let comm = self.ctx.communicator();

        let header = wire::recv_header(comm, COORDINATOR_RANK)?;
        let capacity = self.ctx.config().max_size;
        let size = header.checked_size(capacity)?;
        let band = header.band(self.ctx.get_rank())?;
        let expected = element_count(size, capacity)?;

        let values: Vec<f64> = wire::recv_values(comm, COORDINATOR_RANK, expected)?;
        let matrix = Matrix::new(size, values)?;
        Ok((band, matrix))
    }
}

impl Participant for Worker<'_> {
    fn role(&self) -> Role {
        Role::Worker
    }

    fn run(&mut self) -> DftResult<Option<FrequencyMatrix>> {
        let (band, matrix) = self.await_band()?;

        self.transition(WorkerState::Computing);
        let mut spectrum = FrequencyMatrix::zeros(matrix.size());
        compute_band(&matrix, &band, &mut spectrum);

        self.transition(WorkerState::Sending);
        let rows = spectrum.band(band.offset, band.count)?;
        wire::send_values(self.ctx.communicator(), rows, COORDINATOR_RANK)?;

        dft_info!("Worker {} finished rows [{}, {})", band.rank, band.offset, band.end());
        self.transition(WorkerState::Done);
        Ok(None)
    }
}
