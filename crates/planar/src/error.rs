//! Error types for Planar operations.
//!
//! This module provides the main error type [`PlanarError`] and the
//! [`TransactionFailure`] returned when a flatten session is rolled back.

use std::{fmt, io};

use thiserror::Error;

use crate::host::HostError;

/// The step of a flatten session at which the host failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStage {
    /// Opening the transaction.
    Begin,
    /// Walking and flattening the containers.
    Traverse,
    /// Committing the transaction.
    Commit,
}

impl fmt::Display for TransactionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin => write!(f, "begin"),
            Self::Traverse => write!(f, "traversal"),
            Self::Commit => write!(f, "commit"),
        }
    }
}

/// A flatten session that did not commit.
///
/// Whenever this is returned the host transaction has been aborted, so the
/// document holds exactly what it held before the session started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("flatten session failed during {stage}; no changes were kept: {cause}")]
pub struct TransactionFailure {
    stage: TransactionStage,
    #[source]
    cause: HostError,
}

impl TransactionFailure {
    pub fn new(stage: TransactionStage, cause: HostError) -> Self {
        Self { stage, cause }
    }

    /// The step that failed.
    pub fn stage(&self) -> TransactionStage {
        self.stage
    }

    /// The host error behind the failure.
    pub fn cause(&self) -> &HostError {
        &self.cause
    }
}

/// The main error type for Planar operations.
#[derive(Debug, Error)]
pub enum PlanarError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("{0}")]
    Transaction(#[from] TransactionFailure),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Drawing error: {0}")]
    Drawing(String),
}
