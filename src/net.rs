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

//! Networking and communication components
//!
//! The protocol code only talks to [`Communicator`]. Two transports exist:
//! [`local::LocalCommunicator`] runs every participant as a thread of one
//! process, and `mpi::MpiCommunicator` (feature `mpi`) runs one participant
//! per MPI process.

pub mod communicator;
pub mod local;
pub mod wire;

#[cfg(feature = "mpi")]
pub mod mpi;

pub use communicator::Communicator;
pub use local::LocalCommunicator;
pub use wire::BandHeader;

/// Communication type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommType {
    Local,
    #[cfg(feature = "mpi")]
    Mpi,
}
