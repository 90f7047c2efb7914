// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for entity authoring

use crate::{EntityId, SchemaVersion};
use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while creating or editing entities
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Entity not found
    #[error("Entity {0} not found")]
    EntityNotFound(EntityId),

    /// The entity type has no declaration in the document's schema
    #[error("Entity type {ifc_type} is not supported in {schema}")]
    UnsupportedEntity {
        ifc_type: String,
        schema: SchemaVersion,
    },

    /// Attribute name not declared for the entity type
    #[error("{ifc_type} has no attribute named {attribute}")]
    UnknownAttribute { ifc_type: String, attribute: String },

    /// Missing required attribute
    #[error("Missing required attribute {attribute} on {ifc_type}")]
    MissingAttribute { ifc_type: String, attribute: String },

    /// Value or entity does not have the expected type
    #[error("Type mismatch for {attribute}: expected {expected}, got {actual}")]
    TypeMismatch {
        attribute: String,
        expected: String,
        actual: String,
    },

    /// Enumeration value outside the declared members
    #[error("Invalid value {value} for enumeration attribute {attribute}")]
    InvalidEnumValue { attribute: String, value: String },

    /// NaN or infinite real value
    #[error("Only finite values are allowed for {attribute}")]
    NonFiniteValue { attribute: String },

    /// Rejected operation argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unsupported IFC schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a type mismatch error
    pub fn type_mismatch(
        attribute: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Error::TypeMismatch {
            attribute: attribute.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid enumeration value error
    pub fn invalid_enum(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Error::InvalidEnumValue {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
