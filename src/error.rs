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

//! Error handling for distributed DFT runs
//!
//! Every error here is fatal: nothing is retried and no partial result is
//! ever emitted once one of these has been raised.

use std::fmt;

/// Coarse error codes, one per failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    Invalid = 4,
    IoError = 5,
    CapacityError = 6,
    SerializationError = 11,
    MalformedInput = 20,
    CommunicationFailure = 21,
    InvalidPartition = 22,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Invalid => write!(f, "Invalid"),
            Code::IoError => write!(f, "IO error"),
            Code::CapacityError => write!(f, "Capacity error"),
            Code::SerializationError => write!(f, "Serialization error"),
            Code::MalformedInput => write!(f, "Malformed input"),
            Code::CommunicationFailure => write!(f, "Communication failure"),
            Code::InvalidPartition => write!(f, "Invalid partition"),
        }
    }
}

/// Main error type for DFT operations
#[derive(thiserror::Error, Debug)]
pub enum DftError {
    #[error("Matrix size {size} exceeds capacity {capacity}")]
    SizeExceeded { size: usize, capacity: usize },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Communication failure: {0}")]
    Communication(String),

    #[error("Invalid partition: {0}")]
    InvalidPartition(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid operation: {0}")]
    Invalid(String),
}

impl DftError {
    /// Get the error code
    pub fn code(&self) -> Code {
        match self {
            DftError::SizeExceeded { .. } => Code::CapacityError,
            DftError::MalformedInput(_) => Code::MalformedInput,
            DftError::Communication(_) => Code::CommunicationFailure,
            DftError::InvalidPartition(_) => Code::InvalidPartition,
            DftError::Serialization(_) => Code::SerializationError,
            DftError::Io(_) => Code::IoError,
            DftError::Invalid(_) => Code::Invalid,
        }
    }

    pub(crate) fn communication(message: impl Into<String>) -> Self {
        DftError::Communication(message.into())
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        DftError::MalformedInput(message.into())
    }
}

/// Type alias for Results using DftError
pub type DftResult<T> = Result<T, DftError>;
