// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schema versions and attribute declarations for the unit resource
//!
//! Only the entities the authoring operations create are declared. The
//! declarations differ per schema where the schemas differ, most notably
//! `IfcMonetaryUnit.Currency`, an `IfcLabel` in IFC4 and an
//! `IfcCurrencyEnum` in IFC2X3.

use crate::{AttributeValue, Error, IfcType, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported IFC schema revisions
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SchemaVersion {
    #[serde(rename = "IFC2X3")]
    Ifc2x3,
    #[serde(rename = "IFC4")]
    Ifc4,
}

impl SchemaVersion {
    /// All supported schema versions, oldest first
    pub const ALL: [SchemaVersion; 2] = [SchemaVersion::Ifc2x3, SchemaVersion::Ifc4];

    /// Schema identifier as written in FILE_SCHEMA
    pub fn identifier(&self) -> &'static str {
        match self {
            SchemaVersion::Ifc2x3 => "IFC2X3",
            SchemaVersion::Ifc4 => "IFC4",
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for SchemaVersion {
    type Err = Error;

    /// Accepts `IFC2X3`, `IFC4` and addendum/corrigendum suffixes such as
    /// `IFC2X3_TC1` or `IFC4_ADD2`
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let base = upper.split('_').next().unwrap_or_default();
        match base {
            "IFC2X3" => Ok(SchemaVersion::Ifc2x3),
            "IFC4" => Ok(SchemaVersion::Ifc4),
            _ => Err(Error::UnsupportedSchema(s.to_string())),
        }
    }
}

/// Kind of value an attribute accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    /// Free text (IfcLabel)
    Label,
    /// One of the listed enumeration members
    Enumeration(&'static [&'static str]),
    /// Reference to another entity
    Entity,
    /// Non-empty set of entity references
    EntitySet,
    /// Derived in the schema; always written as `*`
    Derived,
}

impl AttributeKind {
    /// Human readable description used in error messages
    pub fn describe(&self) -> &'static str {
        match self {
            AttributeKind::Label => "label",
            AttributeKind::Enumeration(_) => "enumeration",
            AttributeKind::Entity => "entity reference",
            AttributeKind::EntitySet => "set of entity references",
            AttributeKind::Derived => "derived",
        }
    }

    /// Convert text into a value of this kind
    pub fn coerce_text(&self, attribute: &str, text: &str) -> Result<AttributeValue> {
        match self {
            AttributeKind::Label => Ok(AttributeValue::String(text.to_string())),
            AttributeKind::Enumeration(members) => {
                let upper = text.trim().to_ascii_uppercase();
                if members.contains(&upper.as_str()) {
                    Ok(AttributeValue::Enum(upper))
                } else {
                    Err(Error::invalid_enum(attribute, text))
                }
            }
            other => Err(Error::type_mismatch(attribute, other.describe(), "text")),
        }
    }

    /// Validate a value against this kind
    ///
    /// `optional` allows `$`. Real values must be finite wherever they occur.
    pub fn check(&self, attribute: &str, optional: bool, value: &AttributeValue) -> Result<()> {
        check_finite(attribute, value)?;

        match (self, value) {
            (AttributeKind::Derived, AttributeValue::Derived) => Ok(()),
            (AttributeKind::Derived, other) => Err(Error::type_mismatch(
                attribute,
                "derived",
                other.kind_name(),
            )),
            (_, AttributeValue::Null) if optional => Ok(()),
            (_, AttributeValue::Null) => Err(Error::type_mismatch(
                attribute,
                self.describe(),
                "null",
            )),
            (AttributeKind::Label, AttributeValue::String(_)) => Ok(()),
            (AttributeKind::Enumeration(members), AttributeValue::Enum(e)) => {
                if members.contains(&e.as_str()) {
                    Ok(())
                } else {
                    Err(Error::invalid_enum(attribute, e.clone()))
                }
            }
            (AttributeKind::Entity, AttributeValue::EntityRef(_)) => Ok(()),
            (AttributeKind::EntitySet, AttributeValue::List(items)) => {
                if items.is_empty() {
                    return Err(Error::invalid_argument(format!(
                        "{} requires at least one entity",
                        attribute
                    )));
                }
                match items.iter().find(|v| v.as_entity_ref().is_none()) {
                    Some(bad) => Err(Error::type_mismatch(
                        attribute,
                        "entity reference",
                        bad.kind_name(),
                    )),
                    None => Ok(()),
                }
            }
            (kind, other) => Err(Error::type_mismatch(
                attribute,
                kind.describe(),
                other.kind_name(),
            )),
        }
    }
}

/// Check that `text` can be written as a STEP enumeration literal
///
/// Upper-case letters, digits and `_`, starting with a letter.
pub fn is_enum_token(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn check_finite(attribute: &str, value: &AttributeValue) -> Result<()> {
    match value {
        AttributeValue::Float(f) if !f.is_finite() => Err(Error::NonFiniteValue {
            attribute: attribute.to_string(),
        }),
        AttributeValue::List(items) | AttributeValue::TypedValue(_, items) => items
            .iter()
            .try_for_each(|item| check_finite(attribute, item)),
        _ => Ok(()),
    }
}

/// Declared attribute of an entity type
#[derive(Clone, Copy, Debug)]
pub struct AttributeDecl {
    /// Attribute name in schema spelling
    pub name: &'static str,
    /// Accepted values
    pub kind: AttributeKind,
    /// Whether `$` is allowed
    pub optional: bool,
}

/// Declared entity type
#[derive(Debug)]
pub struct EntityDecl {
    /// Entity type name in schema spelling
    pub name: &'static str,
    /// Attributes in positional order
    pub attributes: &'static [AttributeDecl],
}

impl EntityDecl {
    /// Position of the named attribute (case-insensitive)
    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Declaration of the named attribute (case-insensitive)
    pub fn attribute(&self, name: &str) -> Option<&'static AttributeDecl> {
        self.attribute_index(name).map(|i| &self.attributes[i])
    }
}

/// Look up the declaration of an entity type in a schema
pub fn entity_decl(schema: SchemaVersion, ifc_type: &IfcType) -> Option<&'static EntityDecl> {
    match (schema, ifc_type) {
        (SchemaVersion::Ifc2x3, IfcType::IfcMonetaryUnit) => Some(&MONETARY_UNIT_IFC2X3),
        (SchemaVersion::Ifc4, IfcType::IfcMonetaryUnit) => Some(&MONETARY_UNIT_IFC4),
        (_, IfcType::IfcSIUnit) => Some(&SI_UNIT),
        (_, IfcType::IfcUnitAssignment) => Some(&UNIT_ASSIGNMENT),
        _ => None,
    }
}

// ============================================================================
// Declarations
// ============================================================================

static MONETARY_UNIT_IFC4: EntityDecl = EntityDecl {
    name: "IfcMonetaryUnit",
    attributes: &[AttributeDecl {
        name: "Currency",
        kind: AttributeKind::Label,
        optional: false,
    }],
};

static MONETARY_UNIT_IFC2X3: EntityDecl = EntityDecl {
    name: "IfcMonetaryUnit",
    attributes: &[AttributeDecl {
        name: "Currency",
        kind: AttributeKind::Enumeration(IFC2X3_CURRENCY_ENUM),
        optional: false,
    }],
};

static SI_UNIT: EntityDecl = EntityDecl {
    name: "IfcSIUnit",
    attributes: &[
        AttributeDecl {
            name: "Dimensions",
            kind: AttributeKind::Derived,
            optional: false,
        },
        AttributeDecl {
            name: "UnitType",
            kind: AttributeKind::Enumeration(UNIT_ENUM),
            optional: false,
        },
        AttributeDecl {
            name: "Prefix",
            kind: AttributeKind::Enumeration(SI_PREFIX),
            optional: true,
        },
        AttributeDecl {
            name: "Name",
            kind: AttributeKind::Enumeration(SI_UNIT_NAME),
            optional: false,
        },
    ],
};

static UNIT_ASSIGNMENT: EntityDecl = EntityDecl {
    name: "IfcUnitAssignment",
    attributes: &[AttributeDecl {
        name: "Units",
        kind: AttributeKind::EntitySet,
        optional: false,
    }],
};

/// IfcCurrencyEnum (IFC2X3)
pub const IFC2X3_CURRENCY_ENUM: &[&str] = &[
    "AED", "AES", "ATS", "AUD", "BBD", "BEG", "BGL", "BHD", "BMD", "BND", "BRL", "BSD", "BWP",
    "BZD", "CAD", "CBD", "CHF", "CLP", "CNY", "CYS", "CZK", "DDP", "DEM", "DKK", "EGL", "EST",
    "EUR", "FAK", "FIM", "FJD", "FKP", "FRF", "GBP", "GIP", "GMD", "GRX", "HKD", "HUF", "ICK",
    "IDR", "ILS", "INR", "IRP", "ITL", "JMD", "JOD", "JPY", "KES", "KRW", "KWD", "KYD", "LKR",
    "LUF", "MTL", "MUR", "MXN", "MYR", "NLG", "NOK", "NZD", "OMR", "PGK", "PHP", "PKR", "PLN",
    "PTN", "QAR", "RUR", "SAR", "SCR", "SEK", "SGD", "SKP", "THB", "TRL", "TTD", "TWD", "USD",
    "VEB", "VND", "XEU", "ZAR", "ZWD",
];

/// IfcUnitEnum
pub const UNIT_ENUM: &[&str] = &[
    "ABSORBEDDOSEUNIT",
    "AMOUNTOFSUBSTANCEUNIT",
    "AREAUNIT",
    "DOSEEQUIVALENTUNIT",
    "ELECTRICCAPACITANCEUNIT",
    "ELECTRICCHARGEUNIT",
    "ELECTRICCONDUCTANCEUNIT",
    "ELECTRICCURRENTUNIT",
    "ELECTRICRESISTANCEUNIT",
    "ELECTRICVOLTAGEUNIT",
    "ENERGYUNIT",
    "FORCEUNIT",
    "FREQUENCYUNIT",
    "ILLUMINANCEUNIT",
    "INDUCTANCEUNIT",
    "LENGTHUNIT",
    "LUMINOUSFLUXUNIT",
    "LUMINOUSINTENSITYUNIT",
    "MAGNETICFLUXDENSITYUNIT",
    "MAGNETICFLUXUNIT",
    "MASSUNIT",
    "PLANEANGLEUNIT",
    "POWERUNIT",
    "PRESSUREUNIT",
    "RADIOACTIVITYUNIT",
    "SOLIDANGLEUNIT",
    "THERMODYNAMICTEMPERATUREUNIT",
    "TIMEUNIT",
    "VOLUMEUNIT",
    "USERDEFINED",
];

/// IfcSIPrefix
pub const SI_PREFIX: &[&str] = &[
    "EXA", "PETA", "TERA", "GIGA", "MEGA", "KILO", "HECTO", "DECA", "DECI", "CENTI", "MILLI",
    "MICRO", "NANO", "PICO", "FEMTO", "ATTO",
];

/// IfcSIUnitName
pub const SI_UNIT_NAME: &[&str] = &[
    "AMPERE",
    "BECQUEREL",
    "CANDELA",
    "COULOMB",
    "CUBIC_METRE",
    "DEGREE_CELSIUS",
    "FARAD",
    "GRAM",
    "GRAY",
    "HENRY",
    "HERTZ",
    "JOULE",
    "KELVIN",
    "LUMEN",
    "LUX",
    "METRE",
    "MOLE",
    "NEWTON",
    "OHM",
    "PASCAL",
    "RADIAN",
    "SECOND",
    "SIEMENS",
    "SIEVERT",
    "SQUARE_METRE",
    "STERADIAN",
    "TESLA",
    "VOLT",
    "WATT",
    "WEBER",
];

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("IFC2X3", SchemaVersion::Ifc2x3)]
    #[test_case("ifc4", SchemaVersion::Ifc4)]
    #[test_case("IFC2X3_TC1", SchemaVersion::Ifc2x3)]
    #[test_case("IFC4_ADD2", SchemaVersion::Ifc4)]
    fn test_schema_from_str(input: &str, expected: SchemaVersion) {
        assert_eq!(input.parse::<SchemaVersion>().unwrap(), expected);
    }

    #[test]
    fn test_unsupported_schema() {
        let err = "IFC4X3".parse::<SchemaVersion>().unwrap_err();
        assert_eq!(err, Error::UnsupportedSchema("IFC4X3".to_string()));
    }

    #[test]
    fn test_schema_serde_uses_identifier() {
        let json = serde_json::to_string(&SchemaVersion::Ifc2x3).unwrap();
        assert_eq!(json, "\"IFC2X3\"");
    }

    #[test]
    fn test_currency_kind_differs_per_schema() {
        let ifc4 = entity_decl(SchemaVersion::Ifc4, &IfcType::IfcMonetaryUnit).unwrap();
        let ifc2x3 = entity_decl(SchemaVersion::Ifc2x3, &IfcType::IfcMonetaryUnit).unwrap();
        assert_eq!(ifc4.attribute("currency").unwrap().kind, AttributeKind::Label);
        assert!(matches!(
            ifc2x3.attribute("Currency").unwrap().kind,
            AttributeKind::Enumeration(_)
        ));
    }

    #[test]
    fn test_undeclared_entity() {
        assert!(entity_decl(SchemaVersion::Ifc4, &IfcType::IfcProject).is_none());
    }

    #[test]
    fn test_coerce_enumeration() {
        let kind = AttributeKind::Enumeration(IFC2X3_CURRENCY_ENUM);
        assert_eq!(
            kind.coerce_text("Currency", "usd").unwrap(),
            AttributeValue::Enum("USD".into())
        );
        assert!(matches!(
            kind.coerce_text("Currency", "XYZ"),
            Err(Error::InvalidEnumValue { .. })
        ));
    }

    #[test]
    fn test_coerce_label_is_verbatim() {
        let value = AttributeKind::Label.coerce_text("Currency", "usd").unwrap();
        assert_eq!(value, AttributeValue::String("usd".into()));
    }

    #[test_case("USD", true ; "plain")]
    #[test_case("SQUARE_METRE", true ; "underscore")]
    #[test_case("X2", true ; "trailing digit")]
    #[test_case("US D", false ; "space")]
    #[test_case("$", false ; "dollar")]
    #[test_case("A.B", false ; "dot")]
    #[test_case("2X", false ; "leading digit")]
    #[test_case("usd", false ; "lower case")]
    #[test_case("", false ; "empty")]
    fn test_is_enum_token(text: &str, expected: bool) {
        assert_eq!(is_enum_token(text), expected);
    }

    #[test]
    fn test_check_null_and_optional() {
        let kind = AttributeKind::Enumeration(SI_PREFIX);
        assert!(kind.check("Prefix", true, &AttributeValue::Null).is_ok());
        assert!(kind.check("Prefix", false, &AttributeValue::Null).is_err());
    }

    #[test]
    fn test_check_entity_set() {
        let kind = AttributeKind::EntitySet;
        assert!(kind
            .check("Units", false, &AttributeValue::List(vec![]))
            .is_err());
        assert!(kind
            .check(
                "Units",
                false,
                &AttributeValue::List(vec![AttributeValue::Integer(1)])
            )
            .is_err());
        assert!(kind
            .check(
                "Units",
                false,
                &AttributeValue::List(vec![AttributeValue::EntityRef(crate::EntityId(1))])
            )
            .is_ok());
    }

    #[test]
    fn test_check_rejects_non_finite() {
        let value = AttributeValue::TypedValue(
            "IfcReal".into(),
            vec![AttributeValue::Float(f64::NAN)],
        );
        assert!(matches!(
            AttributeKind::Label.check("Value", false, &value),
            Err(Error::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn test_check_derived() {
        assert!(AttributeKind::Derived
            .check("Dimensions", false, &AttributeValue::Derived)
            .is_ok());
        assert!(AttributeKind::Derived
            .check("Dimensions", false, &AttributeValue::Null)
            .is_err());
    }
}
