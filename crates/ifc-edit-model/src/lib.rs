// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Edit Model - Shared types for authoring IFC data
//!
//! This crate provides the core abstractions used when building IFC
//! (Industry Foundation Classes) content in memory. It is independent of any
//! particular document store: the authoring API in `ifc-edit-api` builds on
//! the types defined here.
//!
//! # Architecture
//!
//! - [`Entity`] / [`AttributeValue`] - entity instances and their values
//! - [`IfcType`] - known entity types with case-insensitive lookup
//! - [`SchemaVersion`] / [`EntityDecl`] - per-schema attribute declarations
//! - [`EntityResolver`] - entity lookup and reference resolution
//! - [`step`] - STEP notation rendering for single instances
//!
//! # Example
//!
//! ```
//! use ifc_edit_model::{entity_decl, IfcType, SchemaVersion};
//!
//! let decl = entity_decl(SchemaVersion::Ifc4, &IfcType::IfcMonetaryUnit).unwrap();
//! assert_eq!(decl.attribute_index("Currency"), Some(0));
//! ```

pub mod error;
pub mod resolver;
pub mod schema;
pub mod step;
pub mod types;

// Re-export all public types
pub use error::*;
pub use resolver::*;
pub use schema::*;
pub use types::*;
