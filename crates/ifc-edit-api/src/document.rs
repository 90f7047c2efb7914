// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory IFC document

use crate::config::DocumentOptions;
use ifc_edit_model::{
    entity_decl, is_enum_token, AttributeDecl, AttributeKind, AttributeValue, Entity, EntityDecl,
    EntityId, EntityResolver, Error, IfcType, Result, SchemaVersion,
};
use log::debug;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Mutable collection of schema-typed entities
///
/// The document owns every entity created in it. Entity ids are assigned in
/// increasing order and never reused within a document.
#[derive(Debug)]
pub struct Document {
    /// Schema the entities conform to
    schema: SchemaVersion,
    /// Storage and validation options
    options: DocumentOptions,
    /// Entities by id, iterated in id order
    entities: BTreeMap<EntityId, Entity>,
    /// Type -> entity IDs index
    type_index: FxHashMap<IfcType, Vec<EntityId>>,
    /// Id for the next created entity; `None` once the id space is used up
    next_id: Option<u32>,
}

/// An entity paired with its schema declaration
#[derive(Clone, Copy, Debug)]
pub struct EntityView<'a> {
    entity: &'a Entity,
    decl: &'static EntityDecl,
}

impl<'a> EntityView<'a> {
    /// Entity ID
    pub fn id(&self) -> EntityId {
        self.entity.id
    }

    /// Entity type
    pub fn ifc_type(&self) -> &'a IfcType {
        &self.entity.ifc_type
    }

    /// Check whether the entity is of type `name` or one of its subtypes
    pub fn is_a(&self, name: &str) -> bool {
        self.entity.is_a(name)
    }

    /// Attribute value by name (case-insensitive)
    pub fn attribute(&self, name: &str) -> Option<&'a AttributeValue> {
        self.decl
            .attribute_index(name)
            .and_then(|i| self.entity.get(i))
    }

    /// Text content of a label or enumeration attribute
    pub fn text(&self, name: &str) -> Option<&'a str> {
        self.attribute(name).and_then(|v| v.as_text())
    }

    /// The underlying entity
    pub fn entity(&self) -> &'a Entity {
        self.entity
    }
}

impl Document {
    /// Create an empty document for the given schema
    pub fn new(schema: SchemaVersion) -> Self {
        Self::with_options(schema, DocumentOptions::default())
    }

    /// Create an empty document with explicit options
    pub fn with_options(schema: SchemaVersion, options: DocumentOptions) -> Self {
        let next_id = Some(options.first_id.max(1));
        Self {
            schema,
            options,
            entities: BTreeMap::new(),
            type_index: FxHashMap::default(),
            next_id,
        }
    }

    /// Schema of this document
    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    /// Options this document was created with
    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the document has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over entities in id order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Get entity by ID
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Get entity by ID together with its declaration
    pub fn entity(&self, id: EntityId) -> Option<EntityView<'_>> {
        let entity = self.entities.get(&id)?;
        let decl = entity_decl(self.schema, &entity.ifc_type)?;
        Some(EntityView { entity, decl })
    }

    /// Entities of exactly this type, in id order
    pub fn by_type(&self, ifc_type: &IfcType) -> Vec<&Entity> {
        self.type_index
            .get(ifc_type)
            .map(|ids| ids.iter().filter_map(|id| self.entities.get(id)).collect())
            .unwrap_or_default()
    }

    /// Attribute value by name
    pub fn attribute(&self, id: EntityId, name: &str) -> Option<&AttributeValue> {
        self.entity(id).and_then(|view| view.attribute(name))
    }

    /// Entities holding a reference to `id`, in id order
    pub fn inverse(&self, id: EntityId) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|e| e.attributes.iter().any(|v| references(v, id)))
            .map(|e| e.id)
            .collect()
    }

    /// Declaration of a type in this document's schema
    pub fn declaration(&self, ifc_type: &IfcType) -> Result<&'static EntityDecl> {
        entity_decl(self.schema, ifc_type).ok_or_else(|| Error::UnsupportedEntity {
            ifc_type: ifc_type.name().to_string(),
            schema: self.schema,
        })
    }

    /// Convert text into the value an attribute of `ifc_type` expects
    ///
    /// Labels keep the text verbatim; enumerations are upper-cased and, in
    /// strict mode, checked against the declared members. Lenient mode still
    /// requires a well-formed enumeration literal.
    pub fn text_value(&self, ifc_type: &IfcType, name: &str, text: &str) -> Result<AttributeValue> {
        let decl = self.declaration(ifc_type)?;
        let attr = attribute_decl(decl, name)?;
        match attr.kind {
            AttributeKind::Enumeration(_) if !self.options.strict => {
                let upper = text.trim().to_ascii_uppercase();
                if is_enum_token(&upper) {
                    Ok(AttributeValue::Enum(upper))
                } else {
                    Err(Error::invalid_enum(attr.name, text))
                }
            }
            kind => kind.coerce_text(attr.name, text),
        }
    }

    /// Create an entity from named attribute values
    ///
    /// Unset derived attributes become `*`, unset optional ones `$`. Every
    /// value is validated before anything is inserted, so on error the
    /// document is unchanged.
    pub fn create_entity(
        &mut self,
        ifc_type: IfcType,
        values: Vec<(&str, AttributeValue)>,
    ) -> Result<EntityId> {
        let decl = self.declaration(&ifc_type)?;

        let mut slots: Vec<Option<AttributeValue>> = vec![None; decl.attributes.len()];
        for (name, value) in values {
            let index = decl
                .attribute_index(name)
                .ok_or_else(|| Error::UnknownAttribute {
                    ifc_type: decl.name.to_string(),
                    attribute: name.to_string(),
                })?;
            slots[index] = Some(value);
        }

        let attributes = decl
            .attributes
            .iter()
            .zip(slots)
            .map(|(attr, slot)| {
                let value = match slot {
                    Some(value) => value,
                    None if attr.kind == AttributeKind::Derived => AttributeValue::Derived,
                    None if attr.optional => AttributeValue::Null,
                    None => {
                        return Err(Error::MissingAttribute {
                            ifc_type: decl.name.to_string(),
                            attribute: attr.name.to_string(),
                        })
                    }
                };
                self.validate(attr, &value)?;
                Ok(value)
            })
            .collect::<Result<Vec<_>>>()?;

        let raw = self
            .next_id
            .ok_or_else(|| Error::other("entity id space exhausted"))?;
        let id = EntityId(raw);
        self.next_id = raw.checked_add(1);

        let entity = Entity {
            id,
            ifc_type: ifc_type.clone(),
            attributes,
        };
        debug!("Created {}", entity);

        self.type_index.entry(ifc_type).or_default().push(id);
        self.entities.insert(id, entity);
        Ok(id)
    }

    /// Replace an attribute value by name
    pub fn set_attribute(&mut self, id: EntityId, name: &str, value: AttributeValue) -> Result<()> {
        let ifc_type = self
            .entities
            .get(&id)
            .map(|e| e.ifc_type.clone())
            .ok_or(Error::EntityNotFound(id))?;
        let decl = self.declaration(&ifc_type)?;
        let index = decl
            .attribute_index(name)
            .ok_or_else(|| Error::UnknownAttribute {
                ifc_type: decl.name.to_string(),
                attribute: name.to_string(),
            })?;
        self.validate(&decl.attributes[index], &value)?;

        if let Some(entity) = self.entities.get_mut(&id) {
            debug!("Set {}.{} = {}", id, decl.attributes[index].name, value);
            entity.attributes[index] = value;
        }
        Ok(())
    }

    /// Replace a label or enumeration attribute from text
    pub fn set_text(&mut self, id: EntityId, name: &str, text: &str) -> Result<()> {
        let ifc_type = self
            .entities
            .get(&id)
            .map(|e| e.ifc_type.clone())
            .ok_or(Error::EntityNotFound(id))?;
        let value = self.text_value(&ifc_type, name, text)?;
        self.set_attribute(id, name, value)
    }

    /// Remove an entity and return it
    ///
    /// References held by other entities are left in place; callers that
    /// need them gone clean them up first (see [`Document::inverse`]).
    pub fn remove_entity(&mut self, id: EntityId) -> Result<Entity> {
        let entity = self.entities.remove(&id).ok_or(Error::EntityNotFound(id))?;
        if let Some(ids) = self.type_index.get_mut(&entity.ifc_type) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                self.type_index.remove(&entity.ifc_type);
            }
        }
        debug!("Removed {}", entity);
        Ok(entity)
    }

    fn validate(&self, attr: &AttributeDecl, value: &AttributeValue) -> Result<()> {
        if !self.options.strict {
            // Shape only: derived stays derived, required stays set, enumeration
            // literals stay writable, reals stay finite.
            return match (attr.kind, value) {
                (AttributeKind::Derived, AttributeValue::Derived) => Ok(()),
                (AttributeKind::Derived, other) => Err(Error::type_mismatch(
                    attr.name,
                    "derived",
                    other.kind_name(),
                )),
                (_, AttributeValue::Null) if !attr.optional => Err(Error::type_mismatch(
                    attr.name,
                    attr.kind.describe(),
                    "null",
                )),
                (_, AttributeValue::Enum(e)) if !is_enum_token(e) => {
                    Err(Error::invalid_enum(attr.name, e.clone()))
                }
                (_, other) => finite(attr.name, other),
            };
        }

        attr.kind.check(attr.name, attr.optional, value)?;

        let mut refs = Vec::new();
        collect_refs(value, &mut refs);
        match refs.into_iter().find(|r| !self.entities.contains_key(r)) {
            Some(missing) => Err(Error::EntityNotFound(missing)),
            None => Ok(()),
        }
    }
}

fn attribute_decl(decl: &'static EntityDecl, name: &str) -> Result<&'static AttributeDecl> {
    decl.attribute(name).ok_or_else(|| Error::UnknownAttribute {
        ifc_type: decl.name.to_string(),
        attribute: name.to_string(),
    })
}

fn finite(attribute: &str, value: &AttributeValue) -> Result<()> {
    match value {
        AttributeValue::Float(f) if !f.is_finite() => Err(Error::NonFiniteValue {
            attribute: attribute.to_string(),
        }),
        AttributeValue::List(items) | AttributeValue::TypedValue(_, items) => {
            items.iter().try_for_each(|item| finite(attribute, item))
        }
        _ => Ok(()),
    }
}

fn collect_refs(value: &AttributeValue, out: &mut Vec<EntityId>) {
    match value {
        AttributeValue::EntityRef(id) => out.push(*id),
        AttributeValue::List(items) | AttributeValue::TypedValue(_, items) => {
            items.iter().for_each(|item| collect_refs(item, out))
        }
        _ => {}
    }
}

fn references(value: &AttributeValue, target: EntityId) -> bool {
    match value {
        AttributeValue::EntityRef(id) => *id == target,
        AttributeValue::List(items) | AttributeValue::TypedValue(_, items) => {
            items.iter().any(|item| references(item, target))
        }
        _ => false,
    }
}

impl EntityResolver for Document {
    fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<&Entity> {
        self.by_type(ifc_type)
    }

    fn count_by_type(&self, ifc_type: &IfcType) -> usize {
        self.type_index.get(ifc_type).map(|v| v.len()).unwrap_or(0)
    }

    fn all_ids(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }
}
