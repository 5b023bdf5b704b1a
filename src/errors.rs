// ABOUTME: Application error type for the rally setup calculator shell
// ABOUTME: Error codes plus conversions from I/O, CSV, JSON and core setup errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

//! # Application Errors
//!
//! Library crates report [`SetupError`]; this module adds the failures of
//! the I/O shell and gives every error a stable code.

use std::error::Error as StdError;
use std::fmt;
use std::io;

use rally_core::SetupError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A selector or edit outside what is accepted
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// Malformed reference or persisted data
    #[serde(rename = "INVALID_FORMAT")]
    InvalidFormat,
    /// Car, stage or setup not present
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound,
    /// Invalid tables or environment configuration
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,
    /// File-system failure
    #[serde(rename = "STORAGE_ERROR")]
    StorageError,
    /// JSON or TSV (de)serialization failure
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError,
    /// Anything else
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Short user-facing description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input",
            Self::InvalidFormat => "Malformed data",
            Self::ResourceNotFound => "Not found",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::InternalError => "Internal error",
        }
    }

    /// Process exit code used by the command-line shell
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::InvalidInput => 2,
            Self::ResourceNotFound => 3,
            Self::InvalidFormat | Self::SerializationError => 4,
            Self::ConfigInvalid => 5,
            Self::StorageError => 6,
            Self::InternalError => 1,
        }
    }
}

/// Unified error type for the application shell
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Underlying error
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create an error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying error
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Something was not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, format!("{} not found", resource.into()))
    }

    /// Invalid user input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Invalid configuration
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// File-system failure on `path`
    pub fn storage(path: impl fmt::Display, error: io::Error) -> Self {
        Self::new(ErrorCode::StorageError, format!("{path}: {error}")).with_source(error)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<SetupError> for AppError {
    fn from(error: SetupError) -> Self {
        let code = match &error {
            SetupError::InvalidSelector { .. } => ErrorCode::InvalidInput,
            SetupError::Format { .. } => ErrorCode::InvalidFormat,
            SetupError::NotSupported { .. } => ErrorCode::ResourceNotFound,
            SetupError::InvalidRange { .. } | SetupError::InvalidConfig(_) => {
                ErrorCode::ConfigInvalid
            }
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::new(ErrorCode::StorageError, error.to_string()).with_source(error)
    }
}

impl From<csv::Error> for AppError {
    fn from(error: csv::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Conversion from `anyhow::Error`, used by the logging bootstrap
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(ErrorCode::InternalError, error.to_string())
    }
}
