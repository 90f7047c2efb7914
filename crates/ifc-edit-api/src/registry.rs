// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named operation dispatch
//!
//! Operations are plain functions with typed arguments. The registry maps a
//! dotted name such as `unit.add_monetary_unit` to a handler that decodes
//! JSON keyword arguments into the operation's argument struct and runs it.
//!
//! # Example
//!
//! ```
//! use ifc_edit_api::{registry, Document};
//! use ifc_edit_model::SchemaVersion;
//! use serde_json::json;
//!
//! let mut doc = Document::new(SchemaVersion::Ifc4);
//! let unit = registry::run(&mut doc, "unit.add_monetary_unit", json!({"currency": "USD"}))
//!     .unwrap()
//!     .as_entity()
//!     .unwrap();
//! assert_eq!(doc.entity(unit).unwrap().text("Currency"), Some("USD"));
//! ```

use crate::document::Document;
use crate::error::{Error, Result};
use crate::unit;
use ifc_edit_model::EntityId;
use log::{debug, warn};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// A named document operation with typed arguments
pub trait Operation {
    /// Dotted operation name, e.g. `unit.add_monetary_unit`
    const NAME: &'static str;

    /// Keyword arguments
    type Args: DeserializeOwned;

    /// Value returned on success
    type Output: Into<Outcome>;

    /// Run the operation against a document
    fn run(doc: &mut Document, args: Self::Args) -> Result<Self::Output>;
}

/// Type-erased result of a registry call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A single created or affected entity
    Entity(EntityId),
    /// Several entities
    Entities(Vec<EntityId>),
    /// Nothing to report
    Nothing,
}

impl Outcome {
    /// The single entity, if this outcome holds one
    pub fn as_entity(&self) -> Option<EntityId> {
        match self {
            Outcome::Entity(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<EntityId> for Outcome {
    fn from(id: EntityId) -> Self {
        Outcome::Entity(id)
    }
}

impl From<Vec<EntityId>> for Outcome {
    fn from(ids: Vec<EntityId>) -> Self {
        Outcome::Entities(ids)
    }
}

impl From<()> for Outcome {
    fn from(_: ()) -> Self {
        Outcome::Nothing
    }
}

type Handler = Box<dyn Fn(&mut Document, Value) -> Result<Outcome> + Send + Sync>;

/// Maps operation names to handlers
pub struct OperationRegistry {
    handlers: FxHashMap<&'static str, Handler>,
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("operations", &self.names())
            .finish()
    }
}

impl OperationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Create a registry holding every built-in operation
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        unit::register(&mut registry);
        registry
    }

    /// Register an operation under its name, replacing any previous handler
    pub fn register<O>(&mut self) -> &mut Self
    where
        O: Operation + 'static,
    {
        let handler: Handler = Box::new(|doc: &mut Document, args: Value| {
            let args: O::Args =
                serde_json::from_value(args).map_err(|e| Error::InvalidArguments {
                    operation: O::NAME.to_string(),
                    message: e.to_string(),
                })?;
            O::run(doc, args).map(Into::into)
        });
        if self.handlers.insert(O::NAME, handler).is_some() {
            debug!("Replaced handler for {}", O::NAME);
        }
        self
    }

    /// Check whether an operation is registered
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered operation names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Run an operation by name with JSON keyword arguments
    pub fn run(&self, doc: &mut Document, name: &str, args: Value) -> Result<Outcome> {
        let Some(handler) = self.handlers.get(name) else {
            warn!("Unknown operation {}", name);
            return Err(Error::UnknownOperation(name.to_string()));
        };
        debug!("Running {} on {} document", name, doc.schema());
        handler(doc, args)
    }
}

static DEFAULT_REGISTRY: Lazy<OperationRegistry> = Lazy::new(OperationRegistry::with_defaults);

/// Registry with every built-in operation
pub fn default_registry() -> &'static OperationRegistry {
    &DEFAULT_REGISTRY
}

/// Run a built-in operation by name
pub fn run(doc: &mut Document, name: &str, args: Value) -> Result<Outcome> {
    DEFAULT_REGISTRY.run(doc, name, args)
}
