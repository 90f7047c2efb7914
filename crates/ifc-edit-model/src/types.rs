// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for IFC data representation
//!
//! This module defines the fundamental types used throughout the authoring API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe entity identifier
///
/// Wraps the raw IFC entity ID (e.g., #123 becomes EntityId(123))
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Default,
)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0 as u64
    }
}

/// Declares the known entity types together with their upper-case STEP
/// spelling. The variant identifier doubles as the schema spelling.
macro_rules! ifc_types {
    ($($variant:ident => $upper:literal),* $(,)?) => {
        /// IFC entity type enumeration
        ///
        /// Covers the entity types the authoring API works with. Unknown types
        /// are captured with their original string representation.
        #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub enum IfcType {
            $($variant,)*
            /// Unknown type - stores the original type name string
            Unknown(String),
        }

        impl IfcType {
            /// Parse a type name string into an IfcType (case-insensitive)
            pub fn parse(s: &str) -> Self {
                match s.to_ascii_uppercase().as_str() {
                    $($upper => IfcType::$variant,)*
                    _ => IfcType::Unknown(s.to_string()),
                }
            }

            /// Type name in schema spelling, e.g. `IfcMonetaryUnit`
            pub fn name(&self) -> &str {
                match self {
                    $(IfcType::$variant => stringify!($variant),)*
                    IfcType::Unknown(s) => s,
                }
            }

            /// Type name as written in STEP instances, e.g. `IFCMONETARYUNIT`
            pub fn step_name(&self) -> String {
                match self {
                    $(IfcType::$variant => $upper.to_string(),)*
                    IfcType::Unknown(s) => s.to_ascii_uppercase(),
                }
            }
        }
    };
}

ifc_types! {
    // Project context
    IfcProject => "IFCPROJECT",

    // Unit resource
    IfcUnitAssignment => "IFCUNITASSIGNMENT",
    IfcNamedUnit => "IFCNAMEDUNIT",
    IfcSIUnit => "IFCSIUNIT",
    IfcConversionBasedUnit => "IFCCONVERSIONBASEDUNIT",
    IfcConversionBasedUnitWithOffset => "IFCCONVERSIONBASEDUNITWITHOFFSET",
    IfcContextDependentUnit => "IFCCONTEXTDEPENDENTUNIT",
    IfcDerivedUnit => "IFCDERIVEDUNIT",
    IfcDerivedUnitElement => "IFCDERIVEDUNITELEMENT",
    IfcDimensionalExponents => "IFCDIMENSIONALEXPONENTS",
    IfcMonetaryUnit => "IFCMONETARYUNIT",
    IfcMeasureWithUnit => "IFCMEASUREWITHUNIT",
}

impl FromStr for IfcType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl IfcType {
    /// Direct supertype, when it is a known type
    pub fn supertype(&self) -> Option<IfcType> {
        match self {
            IfcType::IfcSIUnit
            | IfcType::IfcConversionBasedUnit
            | IfcType::IfcContextDependentUnit => Some(IfcType::IfcNamedUnit),
            IfcType::IfcConversionBasedUnitWithOffset => Some(IfcType::IfcConversionBasedUnit),
            _ => None,
        }
    }

    /// Check whether this type is `name` or one of its subtypes
    pub fn is_a(&self, name: &str) -> bool {
        if self.name().eq_ignore_ascii_case(name) {
            return true;
        }
        let mut current = self.supertype();
        while let Some(ty) = current {
            if ty.name().eq_ignore_ascii_case(name) {
                return true;
            }
            current = ty.supertype();
        }
        false
    }

    /// Check if this type can be listed in an IfcUnitAssignment
    pub fn is_unit(&self) -> bool {
        self.is_a("IfcNamedUnit")
            || matches!(self, IfcType::IfcMonetaryUnit | IfcType::IfcDerivedUnit)
    }
}

impl Default for IfcType {
    fn default() -> Self {
        IfcType::Unknown(String::new())
    }
}

impl fmt::Display for IfcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Attribute value
///
/// Represents any value that can appear in an IFC entity's attribute list.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AttributeValue {
    /// Null value ($)
    #[default]
    Null,
    /// Derived value (*)
    Derived,
    /// Entity reference (#123)
    EntityRef(EntityId),
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Enumeration value (.VALUE.)
    Enum(String),
    /// List of values
    List(Vec<AttributeValue>),
    /// Typed value like IFCLABEL('text')
    TypedValue(String, Vec<AttributeValue>),
}

impl AttributeValue {
    /// Try to get as entity reference
    pub fn as_entity_ref(&self) -> Option<EntityId> {
        match self {
            AttributeValue::EntityRef(id) => Some(*id),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_string(),
            _ => None,
        }
    }

    /// Text content of a string or enumeration value
    ///
    /// Attributes such as `IfcMonetaryUnit.Currency` are labels in one schema
    /// and enumerations in another; this reads both the same way.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Enum(s) => Some(s),
            _ => self.as_string(),
        }
    }

    /// Try to get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_float(),
            _ => None,
        }
    }

    /// Try to get as integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            AttributeValue::Enum(s) => match s.to_uppercase().as_str() {
                "TRUE" | "T" => Some(true),
                "FALSE" | "F" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Try to get as enum string
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            AttributeValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as list
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Check if this is a derived value
    pub fn is_derived(&self) -> bool {
        matches!(self, AttributeValue::Derived)
    }

    /// Short name of the value variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttributeValue::Null => "null",
            AttributeValue::Derived => "derived",
            AttributeValue::EntityRef(_) => "entity reference",
            AttributeValue::Bool(_) => "boolean",
            AttributeValue::Integer(_) => "integer",
            AttributeValue::Float(_) => "real",
            AttributeValue::String(_) => "string",
            AttributeValue::Enum(_) => "enumeration",
            AttributeValue::List(_) => "list",
            AttributeValue::TypedValue(_, _) => "typed value",
        }
    }
}

impl From<EntityId> for AttributeValue {
    fn from(id: EntityId) -> Self {
        AttributeValue::EntityRef(id)
    }
}

impl From<Vec<EntityId>> for AttributeValue {
    fn from(ids: Vec<EntityId>) -> Self {
        AttributeValue::List(ids.into_iter().map(AttributeValue::EntityRef).collect())
    }
}

/// IFC entity instance
///
/// An entity with its ID, type, and attribute values in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Entity ID
    pub id: EntityId,
    /// Entity type
    pub ifc_type: IfcType,
    /// Attribute values in order
    pub attributes: Vec<AttributeValue>,
}

impl Entity {
    /// Check whether the entity is of type `name` or one of its subtypes
    pub fn is_a(&self, name: &str) -> bool {
        self.ifc_type.is_a(name)
    }

    /// Get attribute at index
    pub fn get(&self, index: usize) -> Option<&AttributeValue> {
        self.attributes.get(index)
    }

    /// Get entity reference at index
    pub fn get_ref(&self, index: usize) -> Option<EntityId> {
        self.get(index).and_then(|v| v.as_entity_ref())
    }

    /// Get string at index
    pub fn get_string(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|v| v.as_string())
    }

    /// Get float at index
    pub fn get_float(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(|v| v.as_float())
    }

    /// Get integer at index
    pub fn get_integer(&self, index: usize) -> Option<i64> {
        self.get(index).and_then(|v| v.as_integer())
    }

    /// Get list at index
    pub fn get_list(&self, index: usize) -> Option<&[AttributeValue]> {
        self.get(index).and_then(|v| v.as_list())
    }

    /// Get boolean at index
    pub fn get_bool(&self, index: usize) -> Option<bool> {
        self.get(index).and_then(|v| v.as_bool())
    }

    /// Get enum string at index
    pub fn get_enum(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|v| v.as_enum())
    }

    /// Get list of entity references at index
    pub fn get_refs(&self, index: usize) -> Option<Vec<EntityId>> {
        self.get_list(index)
            .map(|list| list.iter().filter_map(|v| v.as_entity_ref()).collect())
    }
}
