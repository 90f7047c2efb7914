// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit assignment
//!
//! A document keeps at most one `IfcUnitAssignment`. It is created by the
//! first [`assign_unit`] and removed again once [`unassign_unit`] empties it.

use crate::document::Document;
use crate::error::Result;
use crate::registry::Operation;
use ifc_edit_model::{EntityId, Error, IfcType};
use log::debug;
use serde::Deserialize;

/// The document's unit assignment, if any
pub(crate) fn unit_assignment(doc: &Document) -> Option<EntityId> {
    doc.by_type(&IfcType::IfcUnitAssignment)
        .first()
        .map(|e| e.id)
}

/// Units listed by an assignment
pub(crate) fn assigned_units(doc: &Document, assignment: EntityId) -> Vec<EntityId> {
    doc.get(assignment)
        .and_then(|e| e.get_refs(0))
        .unwrap_or_default()
}

/// Add units to the document's unit assignment and return the assignment
///
/// Units already assigned are skipped. Every id must name a unit entity.
pub fn assign_unit(doc: &mut Document, units: &[EntityId]) -> Result<EntityId> {
    if units.is_empty() {
        return Err(Error::invalid_argument("at least one unit is required").into());
    }
    for &unit in units {
        let entity = doc.get(unit).ok_or(Error::EntityNotFound(unit))?;
        if !entity.ifc_type.is_unit() {
            return Err(Error::type_mismatch("units", "unit", entity.ifc_type.name()).into());
        }
    }

    let existing = unit_assignment(doc);
    let mut listed = existing
        .map(|assignment| assigned_units(doc, assignment))
        .unwrap_or_default();
    let before = listed.len();
    for &unit in units {
        if !listed.contains(&unit) {
            listed.push(unit);
        }
    }

    match existing {
        Some(assignment) if listed.len() == before => Ok(assignment),
        Some(assignment) => {
            doc.set_attribute(assignment, "Units", listed.into())?;
            Ok(assignment)
        }
        None => {
            let assignment =
                doc.create_entity(IfcType::IfcUnitAssignment, vec![("Units", listed.into())])?;
            Ok(assignment)
        }
    }
}

/// Remove units from the document's unit assignment
///
/// Units that are not assigned are ignored. An assignment left empty is
/// removed.
pub fn unassign_unit(doc: &mut Document, units: &[EntityId]) -> Result<()> {
    let Some(assignment) = unit_assignment(doc) else {
        debug!("No unit assignment to remove {:?} from", units);
        return Ok(());
    };

    let mut listed = assigned_units(doc, assignment);
    let before = listed.len();
    listed.retain(|unit| !units.contains(unit));

    if listed.is_empty() {
        doc.remove_entity(assignment)?;
    } else if listed.len() != before {
        doc.set_attribute(assignment, "Units", listed.into())?;
    }
    Ok(())
}

/// Unassign a unit and remove it from the document
pub fn remove_unit(doc: &mut Document, unit: EntityId) -> Result<()> {
    let entity = doc.get(unit).ok_or(Error::EntityNotFound(unit))?;
    if !entity.ifc_type.is_unit() {
        return Err(Error::type_mismatch("unit", "unit", entity.ifc_type.name()).into());
    }
    unassign_unit(doc, &[unit])?;
    doc.remove_entity(unit)?;
    Ok(())
}

/// `unit.assign_unit`
#[derive(Debug)]
pub struct AssignUnit;

/// Arguments of `unit.assign_unit` and `unit.unassign_unit`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignUnitArgs {
    pub units: Vec<EntityId>,
}

impl Operation for AssignUnit {
    const NAME: &'static str = "unit.assign_unit";
    type Args = AssignUnitArgs;
    type Output = EntityId;

    fn run(doc: &mut Document, args: Self::Args) -> Result<EntityId> {
        assign_unit(doc, &args.units)
    }
}

/// `unit.unassign_unit`
#[derive(Debug)]
pub struct UnassignUnit;

impl Operation for UnassignUnit {
    const NAME: &'static str = "unit.unassign_unit";
    type Args = AssignUnitArgs;
    type Output = ();

    fn run(doc: &mut Document, args: Self::Args) -> Result<()> {
        unassign_unit(doc, &args.units)
    }
}

/// `unit.remove_unit`
#[derive(Debug)]
pub struct RemoveUnit;

/// Arguments of `unit.remove_unit`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoveUnitArgs {
    pub unit: EntityId,
}

impl Operation for RemoveUnit {
    const NAME: &'static str = "unit.remove_unit";
    type Args = RemoveUnitArgs;
    type Output = ();

    fn run(doc: &mut Document, args: Self::Args) -> Result<()> {
        remove_unit(doc, args.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{add_monetary_unit, add_si_unit};
    use ifc_edit_model::{step, EntityResolver, SchemaVersion};
    use test_case::test_case;

    #[test_case(SchemaVersion::Ifc2x3 ; "ifc2x3")]
    #[test_case(SchemaVersion::Ifc4 ; "ifc4")]
    fn test_assign_creates_single_assignment(schema: SchemaVersion) {
        let mut doc = Document::new(schema);
        let usd = add_monetary_unit(&mut doc, "USD").unwrap();
        let metre = add_si_unit(&mut doc, "LENGTHUNIT", None).unwrap();

        let first = assign_unit(&mut doc, &[usd]).unwrap();
        let second = assign_unit(&mut doc, &[metre, usd]).unwrap();

        assert_eq!(first, second);
        assert_eq!(doc.count_by_type(&IfcType::IfcUnitAssignment), 1);
        assert_eq!(assigned_units(&doc, first), vec![usd, metre]);
        assert_eq!(
            step::instance_line(doc.get(first).unwrap()),
            "#3=IFCUNITASSIGNMENT((#1,#2));"
        );
    }

    #[test]
    fn test_assign_rejects_empty_list() {
        let mut doc = Document::new(SchemaVersion::Ifc4);
        let err = assign_unit(&mut doc, &[]).unwrap_err();
        assert!(matches!(err.as_model(), Some(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_assign_rejects_non_units() {
        let mut doc = Document::new(SchemaVersion::Ifc4);
        let usd = add_monetary_unit(&mut doc, "USD").unwrap();
        let assignment = assign_unit(&mut doc, &[usd]).unwrap();

        let err = assign_unit(&mut doc, &[assignment]).unwrap_err();
        assert!(matches!(err.as_model(), Some(Error::TypeMismatch { .. })));

        let err = assign_unit(&mut doc, &[EntityId(77)]).unwrap_err();
        assert_eq!(err.as_model(), Some(&Error::EntityNotFound(EntityId(77))));
        assert_eq!(assigned_units(&doc, assignment), vec![usd]);
    }

    #[test]
    fn test_unassign_keeps_remaining_units() {
        let mut doc = Document::new(SchemaVersion::Ifc4);
        let usd = add_monetary_unit(&mut doc, "USD").unwrap();
        let metre = add_si_unit(&mut doc, "LENGTHUNIT", None).unwrap();
        let assignment = assign_unit(&mut doc, &[usd, metre]).unwrap();

        unassign_unit(&mut doc, &[usd]).unwrap();
        assert_eq!(assigned_units(&doc, assignment), vec![metre]);
        assert!(doc.get(usd).is_some());
    }

    #[test]
    fn test_unassign_last_unit_removes_assignment() {
        let mut doc = Document::new(SchemaVersion::Ifc4);
        let usd = add_monetary_unit(&mut doc, "USD").unwrap();
        assign_unit(&mut doc, &[usd]).unwrap();

        unassign_unit(&mut doc, &[usd]).unwrap();
        assert_eq!(unit_assignment(&doc), None);
        assert_eq!(doc.len(), 1);

        // Nothing left to unassign from
        unassign_unit(&mut doc, &[usd]).unwrap();
    }

    #[test]
    fn test_remove_unit() {
        let mut doc = Document::new(SchemaVersion::Ifc4);
        let usd = add_monetary_unit(&mut doc, "USD").unwrap();
        let metre = add_si_unit(&mut doc, "LENGTHUNIT", None).unwrap();
        let assignment = assign_unit(&mut doc, &[usd, metre]).unwrap();

        remove_unit(&mut doc, usd).unwrap();
        assert!(doc.get(usd).is_none());
        assert!(doc.inverse(metre).contains(&assignment));
        assert_eq!(assigned_units(&doc, assignment), vec![metre]);

        let err = remove_unit(&mut doc, assignment).unwrap_err();
        assert!(matches!(err.as_model(), Some(Error::TypeMismatch { .. })));
    }
}
