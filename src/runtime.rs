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

//! Entry points that drive participants to completion

use std::thread;

use crate::config::DftConfig;
use crate::ctx::DftContext;
use crate::error::{DftError, DftResult};
use crate::matrix::{FrequencyMatrix, Matrix};
use crate::net::LocalCommunicator;
use crate::participant::participant_for;
use crate::{dft_debug, dft_warn};

/// Run this context's participant
///
/// `matrix` is required on rank 0 and ignored elsewhere. Returns the
/// assembled spectrum on rank 0 and `None` on every other rank.
pub fn run_with_context(
    ctx: &DftContext,
    matrix: Option<Matrix>,
) -> DftResult<Option<FrequencyMatrix>> {
    let mut participant = participant_for(ctx, matrix)?;
    dft_debug!("rank {} runs as {:?}", ctx.get_rank(), participant.role());
    participant.run()
}

/// Run a whole transform in this process, one thread per participant
///
/// Uses `config.participants` participants connected by
/// [`LocalCommunicator`]s.
pub fn run_local(matrix: &Matrix, config: &DftConfig) -> DftResult<FrequencyMatrix> {
    if config.participants == 0 {
        return Err(DftError::InvalidPartition(
            "participant count must be > 0".to_string(),
        ));
    }
    matrix.check_capacity(config.max_size)?;

    let mut mesh = LocalCommunicator::mesh(config.participants).into_iter();
    let root = mesh
        .next()
        .ok_or_else(|| DftError::Invalid("empty communicator mesh".to_string()))?;

    thread::scope(|scope| {
        let workers: Vec<_> = mesh
            .map(|comm| {
                let config = config.clone();
                scope.spawn(move || {
                    let ctx = DftContext::new(Box::new(comm), config);
                    run_with_context(&ctx, None).map(|_| ())
                })
            })
            .collect();

        // The coordinator context is dropped before joining so that workers
        // still blocked on it see their channels close.
        let result = {
            let ctx = DftContext::new(Box::new(root), config.clone());
            run_with_context(&ctx, Some(matrix.clone()))
        };

        let mut worker_error = None;
        for (index, handle) in workers.into_iter().enumerate() {
            let outcome = handle.join().unwrap_or_else(|_| {
                Err(DftError::communication(format!(
                    "worker {} panicked",
                    index + 1
                )))
            });
            if let Err(e) = outcome {
                dft_warn!("worker {} failed: {}", index + 1, e);
                worker_error.get_or_insert(e);
            }
        }

        let spectrum = result?
            .ok_or_else(|| DftError::Invalid("coordinator returned no spectrum".to_string()))?;
        match worker_error {
            Some(e) => Err(e),
            None => Ok(spectrum),
        }
    })
}
