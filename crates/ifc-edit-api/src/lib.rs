// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Edit API - Authoring operations on in-memory IFC documents
//!
//! Builds on `ifc-edit-model` with a mutable [`Document`] and a set of named
//! operations that create and edit entities in it.
//!
//! # Overview
//!
//! - [`Document`] - entity store for one schema version
//! - [`unit`] - unit operations (`unit.add_monetary_unit`, ...)
//! - [`registry`] - dispatch of operations by name with JSON arguments
//!
//! # Example
//!
//! ```
//! use ifc_edit_api::{unit, Document};
//! use ifc_edit_model::SchemaVersion;
//!
//! let mut doc = Document::new(SchemaVersion::Ifc4);
//! let usd = unit::add_monetary_unit(&mut doc, "USD").unwrap();
//! unit::assign_unit(&mut doc, &[usd]).unwrap();
//! assert_eq!(doc.len(), 2);
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod registry;
pub mod unit;

pub use config::DocumentOptions;
pub use document::{Document, EntityView};
pub use error::{Error, Result};
pub use registry::{run, Operation, OperationRegistry, Outcome};
