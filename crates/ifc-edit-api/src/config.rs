// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Document configuration

use serde::{Deserialize, Serialize};

/// Options controlling how a [`Document`](crate::Document) stores entities
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    /// Validate values against the schema declarations
    ///
    /// When disabled only structural checks remain (attribute names,
    /// required attributes, finite reals).
    pub strict: bool,
    /// Id assigned to the first created entity
    pub first_id: u32,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            strict: true,
            first_id: 1,
        }
    }
}

impl DocumentOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether values are validated against the schema
    pub fn with_strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Set the id of the first created entity (0 is bumped to 1)
    pub fn with_first_id(mut self, first_id: u32) -> Self {
        self.first_id = first_id.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DocumentOptions::default();
        assert!(options.strict);
        assert_eq!(options.first_id, 1);
    }

    #[test]
    fn test_builder() {
        let options = DocumentOptions::new().with_strict(false).with_first_id(0);
        assert!(!options.strict);
        assert_eq!(options.first_id, 1);
    }

    #[test]
    fn test_partial_json_config() {
        let options: DocumentOptions = serde_json::from_str(r#"{"first_id": 100}"#).unwrap();
        assert!(options.strict);
        assert_eq!(options.first_id, 100);
    }
}
