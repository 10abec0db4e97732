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

//! distdft: distributed two-dimensional DFT over point-to-point messaging
//!
//! A coordinator splits the output rows of an `N x N` transform into one
//! contiguous band per participant, sends each worker its band header and the
//! input, computes its own band, and assembles the bands returned by the
//! workers. The transform itself is a direct summation evaluated identically
//! on every participant.

pub mod util;

pub mod config;
pub mod ctx;
pub mod error;
pub mod io;
pub mod kernel;
pub mod matrix;
pub mod net;
pub mod participant;
pub mod partition;
pub mod runtime;

// Re-export commonly used types
pub use crate::config::DftConfig;
pub use crate::ctx::DftContext;
pub use crate::error::{Code, DftError, DftResult};
pub use crate::matrix::{FrequencyMatrix, Matrix};
pub use crate::partition::Band;
pub use crate::runtime::{run_local, run_with_context};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
