// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Length unit scale

use ifc_edit_model::{AttributeValue, Entity, EntityResolver, IfcType};

const PREFIX_FACTORS: [(&str, f64); 16] = [
    ("EXA", 1e18),
    ("PETA", 1e15),
    ("TERA", 1e12),
    ("GIGA", 1e9),
    ("MEGA", 1e6),
    ("KILO", 1e3),
    ("HECTO", 1e2),
    ("DECA", 1e1),
    ("DECI", 1e-1),
    ("CENTI", 1e-2),
    ("MILLI", 1e-3),
    ("MICRO", 1e-6),
    ("NANO", 1e-9),
    ("PICO", 1e-12),
    ("FEMTO", 1e-15),
    ("ATTO", 1e-18),
];

/// Factor of an `IfcSIPrefix` member; unknown prefixes count as 1.0
pub fn prefix_scale(prefix: &str) -> f64 {
    PREFIX_FACTORS
        .iter()
        .find(|(name, _)| *name == prefix)
        .map_or(1.0, |(_, factor)| *factor)
}

/// Scale to metres of the assigned length unit
///
/// Looks through the unit assignment for an SI length unit. Returns 1.0 if
/// no length unit is assigned.
pub fn length_unit_scale(resolver: &dyn EntityResolver) -> f64 {
    let assignments = resolver.entities_by_type(&IfcType::IfcUnitAssignment);
    let Some(units) = assignments.first().and_then(|a| a.get(0)) else {
        return 1.0;
    };

    resolver
        .resolve_ref_list(units)
        .into_iter()
        .find_map(si_length_scale)
        .unwrap_or(1.0)
}

/// IFCSIUNIT(*, UnitType, Prefix, Name)
fn si_length_scale(unit: &Entity) -> Option<f64> {
    if unit.ifc_type != IfcType::IfcSIUnit || unit.get_enum(1)? != "LENGTHUNIT" {
        return None;
    }
    if unit.get_enum(3)? != "METRE" {
        return None;
    }
    match unit.get(2) {
        Some(AttributeValue::Enum(prefix)) => Some(prefix_scale(prefix)),
        _ => Some(1.0),
    }
}

/// Metres per length unit, for the SI length units a document can hold
pub mod scales {
    pub const METRE: f64 = 1.0;
    pub const DECIMETRE: f64 = 0.1;
    pub const CENTIMETRE: f64 = 0.01;
    pub const MILLIMETRE: f64 = 0.001;
    pub const KILOMETRE: f64 = 1000.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::unit::{add_monetary_unit, add_si_unit, assign_unit, unassign_unit};
    use ifc_edit_model::{SchemaVersion, SI_PREFIX};
    use test_case::test_case;

    #[test]
    fn test_every_declared_prefix_has_a_factor() {
        let names: Vec<_> = PREFIX_FACTORS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, SI_PREFIX);
    }

    #[test_case("MILLI", scales::MILLIMETRE)]
    #[test_case("CENTI", scales::CENTIMETRE)]
    #[test_case("DECI", scales::DECIMETRE)]
    #[test_case("KILO", scales::KILOMETRE)]
    #[test_case("BOGUS", scales::METRE)]
    fn test_prefix_scale(prefix: &str, expected: f64) {
        assert!((prefix_scale(prefix) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_no_assignment_is_metre() {
        let doc = Document::new(SchemaVersion::Ifc4);
        assert_eq!(length_unit_scale(&doc), 1.0);
    }

    #[test_case(SchemaVersion::Ifc2x3 ; "ifc2x3")]
    #[test_case(SchemaVersion::Ifc4 ; "ifc4")]
    fn test_assigned_millimetre(schema: SchemaVersion) {
        let mut doc = Document::new(schema);
        let usd = add_monetary_unit(&mut doc, "USD").unwrap();
        let area = add_si_unit(&mut doc, "AREAUNIT", None).unwrap();
        let mm = add_si_unit(&mut doc, "LENGTHUNIT", Some("MILLI")).unwrap();
        assign_unit(&mut doc, &[usd, area, mm]).unwrap();

        assert!((length_unit_scale(&doc) - scales::MILLIMETRE).abs() < 1e-12);

        unassign_unit(&mut doc, &[mm]).unwrap();
        assert_eq!(length_unit_scale(&doc), 1.0);
    }

    #[test]
    fn test_unassigned_length_unit_is_ignored() {
        let mut doc = Document::new(SchemaVersion::Ifc4);
        add_si_unit(&mut doc, "LENGTHUNIT", Some("KILO")).unwrap();
        assert_eq!(length_unit_scale(&doc), 1.0);
    }
}
