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

//! Per-participant context

use crate::config::DftConfig;
use crate::error::DftResult;
use crate::net::{CommType, Communicator};

/// The entry point to DFT operations on one participant
///
/// Owns the participant's communicator and the run configuration. A context
/// never crosses a thread or process boundary.
pub struct DftContext {
    config: DftConfig,
    communicator: Box<dyn Communicator>,
}

impl DftContext {
    pub fn new(communicator: Box<dyn Communicator>, config: DftConfig) -> Self {
        Self {
            config,
            communicator,
        }
    }

    pub fn config(&self) -> &DftConfig {
        &self.config
    }

    pub fn communicator(&self) -> &dyn Communicator {
        self.communicator.as_ref()
    }

    /// Returns the local rank
    pub fn get_rank(&self) -> usize {
        self.communicator.get_rank()
    }

    /// Returns the world size
    pub fn get_world_size(&self) -> usize {
        self.communicator.get_world_size()
    }

    /// Rank 0 coordinates, everyone else works
    pub fn is_coordinator(&self) -> bool {
        self.get_rank() == 0
    }

    pub fn is_distributed(&self) -> bool {
        self.get_world_size() > 1
    }

    pub fn get_comm_type(&self) -> CommType {
        self.communicator.get_comm_type()
    }

    pub fn barrier(&self) -> DftResult<()> {
        if self.is_distributed() {
            self.communicator.barrier()?;
        }
        Ok(())
    }

    /// Completes and closes all communication under the context
    pub fn finalize(&mut self) -> DftResult<()> {
        self.communicator.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::LocalCommunicator;

    #[test]
    fn test_context_queries() {
        let mut mesh = LocalCommunicator::mesh(3);
        let comm = mesh.remove(1);
        let mut ctx = DftContext::new(Box::new(comm), DftConfig::default());

        assert_eq!(ctx.get_rank(), 1);
        assert_eq!(ctx.get_world_size(), 3);
        assert!(!ctx.is_coordinator());
        assert!(ctx.is_distributed());
        assert_eq!(ctx.get_comm_type(), CommType::Local);

        ctx.finalize().unwrap();
        assert!(ctx.communicator().is_finalized());
    }
}
