// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

pub type KeeperResult<T> = std::result::Result<T, KeeperError>;

#[derive(Error, Debug)]
pub enum KeeperError {
    /// No value is stored under the key. Often a legitimate negative answer.
    #[error("`{key}` not found")]
    NotFound { key: String },

    /// An input does not satisfy the canonical encoding, e.g. an invalid identifier.
    #[error("encode {what} fail: {cause:#}")]
    Encoding {
        what: String,
        cause: anyhow::Error,
    },

    /// Stored bytes do not match the expected schema.
    #[error("decode {what} fail: {cause:#}")]
    Decoding {
        what: String,
        cause: anyhow::Error,
    },

    /// The underlying store failed.
    #[error("store fail: {0:#}")]
    Store(anyhow::Error),

    /// Error returned by the VM, unchanged.
    #[error(transparent)]
    VmExecution(anyhow::Error),
}

impl KeeperError {
    pub fn not_found(key: impl ToString) -> Self {
        KeeperError::NotFound {
            key: key.to_string(),
        }
    }

    pub fn encoding(what: impl ToString, cause: anyhow::Error) -> Self {
        KeeperError::Encoding {
            what: what.to_string(),
            cause,
        }
    }

    pub fn decoding(what: impl ToString, cause: anyhow::Error) -> Self {
        KeeperError::Decoding {
            what: what.to_string(),
            cause,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, KeeperError::NotFound { .. })
    }

    pub fn is_decoding(&self) -> bool {
        matches!(self, KeeperError::Decoding { .. })
    }

    pub fn is_encoding(&self) -> bool {
        matches!(self, KeeperError::Encoding { .. })
    }

    pub fn is_vm_execution(&self) -> bool {
        matches!(self, KeeperError::VmExecution(_))
    }
}
