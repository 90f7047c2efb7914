// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for documents and operations

use thiserror::Error;

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by documents, operations and the registry
#[derive(Error, Debug)]
pub enum Error {
    /// Entity or schema level failure
    #[error(transparent)]
    Model(#[from] ifc_edit_model::Error),

    /// No operation registered under this name
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Keyword arguments did not match the operation's parameters
    #[error("Invalid arguments for {operation}: {message}")]
    InvalidArguments { operation: String, message: String },
}

impl Error {
    /// The underlying model error, if any
    pub fn as_model(&self) -> Option<&ifc_edit_model::Error> {
        match self {
            Error::Model(e) => Some(e),
            _ => None,
        }
    }
}
