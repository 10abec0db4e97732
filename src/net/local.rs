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

//! In-process communicator
//!
//! Every ordered pair of ranks gets its own channel, which gives the same
//! per-pair FIFO guarantee MPI gives. Dropping or finalizing a communicator
//! closes its outgoing channels, so a peer blocked on it fails with a
//! communication error instead of hanging.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Barrier};

use crate::error::{DftError, DftResult};
use crate::net::{CommType, Communicator};

/// One rank's endpoint of an in-process mesh
#[derive(Debug)]
pub struct LocalCommunicator {
    rank: usize,
    world_size: usize,
    /// Outgoing channel per destination rank, `None` for self
    senders: Vec<Option<Sender<Vec<u8>>>>,
    /// Incoming channel per source rank, `None` for self
    receivers: Vec<Option<Receiver<Vec<u8>>>>,
    barrier: Arc<Barrier>,
    finalized: bool,
}

impl LocalCommunicator {
    /// Create a fully connected mesh of `world_size` communicators
    ///
    /// The returned vector is indexed by rank. Each communicator is meant to
    /// be moved onto its own thread.
    pub fn mesh(world_size: usize) -> Vec<LocalCommunicator> {
        let barrier = Arc::new(Barrier::new(world_size.max(1)));

        let mut senders: Vec<Vec<Option<Sender<Vec<u8>>>>> = (0..world_size)
            .map(|_| (0..world_size).map(|_| None).collect())
            .collect();
        let mut receivers: Vec<Vec<Option<Receiver<Vec<u8>>>>> = (0..world_size)
            .map(|_| (0..world_size).map(|_| None).collect())
            .collect();

        for src in 0..world_size {
            for dst in 0..world_size {
                if src == dst {
                    continue;
                }
                let (tx, rx) = mpsc::channel();
                senders[src][dst] = Some(tx);
                receivers[dst][src] = Some(rx);
            }
        }

        senders
            .into_iter()
            .zip(receivers)
            .enumerate()
            .map(|(rank, (senders, receivers))| LocalCommunicator {
                rank,
                world_size,
                senders,
                receivers,
                barrier: barrier.clone(),
                finalized: false,
            })
            .collect()
    }

    fn check_peer(&self, peer: usize) -> DftResult<()> {
        if peer >= self.world_size {
            return Err(DftError::Invalid(format!(
                "rank {} is outside a world of {} participants",
                peer, self.world_size
            )));
        }
        if peer == self.rank {
            return Err(DftError::Invalid(format!(
                "rank {} cannot message itself",
                peer
            )));
        }
        if self.finalized {
            return Err(DftError::communication(format!(
                "communicator of rank {} is finalized",
                self.rank
            )));
        }
        Ok(())
    }
}

impl Communicator for LocalCommunicator {
    fn get_rank(&self) -> usize {
        self.rank
    }

    fn get_world_size(&self) -> usize {
        self.world_size
    }

    fn get_comm_type(&self) -> CommType {
        CommType::Local
    }

    fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn finalize(&mut self) -> DftResult<()> {
        if !self.finalized {
            self.senders.iter_mut().for_each(|s| *s = None);
            self.receivers.iter_mut().for_each(|r| *r = None);
            self.finalized = true;
        }
        Ok(())
    }

    fn barrier(&self) -> DftResult<()> {
        if self.finalized {
            return Err(DftError::communication("barrier on a finalized communicator"));
        }
        self.barrier.wait();
        Ok(())
    }

    fn send(&self, data: &[u8], dest: usize) -> DftResult<()> {
        self.check_peer(dest)?;
        let sender = self.senders[dest]
            .as_ref()
            .ok_or_else(|| DftError::communication(format!("no channel to rank {}", dest)))?;
        sender.send(data.to_vec()).map_err(|_| {
            DftError::communication(format!(
                "rank {} closed its channel from rank {}",
                dest, self.rank
            ))
        })
    }

    fn recv(&self, buffer: &mut Vec<u8>, source: usize) -> DftResult<()> {
        self.check_peer(source)?;
        let receiver = self.receivers[source]
            .as_ref()
            .ok_or_else(|| DftError::communication(format!("no channel from rank {}", source)))?;
        *buffer = receiver.recv().map_err(|_| {
            DftError::communication(format!(
                "rank {} closed its channel to rank {}",
                source, self.rank
            ))
        })?;
        Ok(())
    }
}
