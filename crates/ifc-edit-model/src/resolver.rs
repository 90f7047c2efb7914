// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity resolution trait for looking up and resolving IFC entities

use crate::{AttributeValue, Entity, EntityId, IfcType};

/// Entity lookup and reference resolution
///
/// This trait provides the core functionality for accessing IFC entities
/// and resolving entity references. Implementations should provide O(1)
/// or O(log n) lookup by entity ID.
///
/// # Example
///
/// ```ignore
/// use ifc_edit_model::{EntityResolver, EntityId};
///
/// fn list_units(resolver: &dyn EntityResolver, assignment: EntityId) {
///     if let Some(entity) = resolver.get(assignment) {
///         for unit in resolver.resolve_ref_list(&entity.attributes[0]) {
///             println!("{}", unit);
///         }
///     }
/// }
/// ```
pub trait EntityResolver {
    /// Get entity by ID
    fn get(&self, id: EntityId) -> Option<&Entity>;

    /// Resolve an entity reference from an attribute value
    ///
    /// If the attribute value is an EntityRef, this looks up and returns
    /// the referenced entity.
    fn resolve_ref(&self, attr: &AttributeValue) -> Option<&Entity> {
        match attr {
            AttributeValue::EntityRef(id) => self.get(*id),
            _ => None,
        }
    }

    /// Resolve a list of entity references
    ///
    /// Returns an empty vector if the attribute is not a list; references
    /// that do not resolve are skipped.
    fn resolve_ref_list(&self, attr: &AttributeValue) -> Vec<&Entity> {
        match attr {
            AttributeValue::List(items) => items
                .iter()
                .filter_map(|item| self.resolve_ref(item))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Get all entities of a specific type (exact type, no subtypes)
    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<&Entity>;

    /// Find entities by type name (case-insensitive)
    fn find_by_type_name(&self, type_name: &str) -> Vec<&Entity> {
        self.entities_by_type(&IfcType::parse(type_name))
    }

    /// Count entities of a specific type
    fn count_by_type(&self, ifc_type: &IfcType) -> usize {
        self.entities_by_type(ifc_type).len()
    }

    /// All entity IDs in ascending order
    fn all_ids(&self) -> Vec<EntityId>;
}
