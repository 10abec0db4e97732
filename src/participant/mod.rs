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

//! Participant roles
//!
//! Every participant runs the same program; its role is chosen once from its
//! rank. Rank 0 is the [`Coordinator`], every other rank is a [`Worker`].

pub mod coordinator;
pub mod worker;

pub use coordinator::{Coordinator, CoordinatorState};
pub use worker::{Worker, WorkerState};

use crate::ctx::DftContext;
use crate::error::{DftError, DftResult};
use crate::matrix::{FrequencyMatrix, Matrix};

/// Rank of the coordinating participant
pub const COORDINATOR_RANK: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Coordinator,
    Worker,
}

impl Role {
    pub fn for_rank(rank: usize) -> Self {
        if rank == COORDINATOR_RANK {
            Role::Coordinator
        } else {
            Role::Worker
        }
    }
}

/// One participant of a distributed transform
pub trait Participant {
    fn role(&self) -> Role;

    /// Drive the participant to completion
    ///
    /// Returns the assembled spectrum on the coordinator and `None` on
    /// workers.
    fn run(&mut self) -> DftResult<Option<FrequencyMatrix>>;
}

/// Select the participant for this context's rank
///
/// The coordinator needs the input matrix; workers receive theirs over the
/// wire and ignore `matrix`.
pub fn participant_for<'a>(
    ctx: &'a DftContext,
    matrix: Option<Matrix>,
) -> DftResult<Box<dyn Participant + 'a>> {
    match Role::for_rank(ctx.get_rank()) {
        Role::Coordinator => {
            let matrix = matrix.ok_or_else(|| {
                DftError::Invalid("the coordinator needs an input matrix".to_string())
            })?;
            Ok(Box::new(Coordinator::new(ctx, matrix)?))
        }
        Role::Worker => Ok(Box::new(Worker::new(ctx))),
    }
}
