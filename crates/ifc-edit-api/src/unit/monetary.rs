// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Monetary units

use crate::document::Document;
use crate::error::Result;
use crate::registry::Operation;
use ifc_edit_model::{EntityId, Error, IfcType};
use serde::Deserialize;

/// Add an `IfcMonetaryUnit` for a currency code and return its id
///
/// IFC4 stores the code verbatim as a label. IFC2X3 stores it as an
/// `IfcCurrencyEnum` member, so the code must be one of its values.
///
/// ```
/// use ifc_edit_api::{unit, Document};
/// use ifc_edit_model::SchemaVersion;
///
/// let mut doc = Document::new(SchemaVersion::Ifc2x3);
/// let id = unit::add_monetary_unit(&mut doc, "USD").unwrap();
/// let unit = doc.entity(id).unwrap();
/// assert!(unit.is_a("IfcMonetaryUnit"));
/// assert_eq!(unit.text("Currency"), Some("USD"));
/// ```
pub fn add_monetary_unit(doc: &mut Document, currency: &str) -> Result<EntityId> {
    check_currency(currency)?;
    let value = doc.text_value(&IfcType::IfcMonetaryUnit, "Currency", currency)?;
    let id = doc.create_entity(IfcType::IfcMonetaryUnit, vec![("Currency", value)])?;
    Ok(id)
}

/// Change the currency of an existing monetary unit
pub fn edit_monetary_unit(doc: &mut Document, unit: EntityId, currency: &str) -> Result<()> {
    let entity = doc.get(unit).ok_or(Error::EntityNotFound(unit))?;
    if entity.ifc_type != IfcType::IfcMonetaryUnit {
        return Err(Error::type_mismatch("unit", "IfcMonetaryUnit", entity.ifc_type.name()).into());
    }
    check_currency(currency)?;
    doc.set_text(unit, "Currency", currency)?;
    Ok(())
}

fn check_currency(currency: &str) -> Result<()> {
    if currency.trim().is_empty() {
        return Err(Error::invalid_argument("currency must not be empty").into());
    }
    Ok(())
}

/// `unit.add_monetary_unit`
#[derive(Debug)]
pub struct AddMonetaryUnit;

/// Arguments of `unit.add_monetary_unit`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddMonetaryUnitArgs {
    pub currency: String,
}

impl Operation for AddMonetaryUnit {
    const NAME: &'static str = "unit.add_monetary_unit";
    type Args = AddMonetaryUnitArgs;
    type Output = EntityId;

    fn run(doc: &mut Document, args: Self::Args) -> Result<EntityId> {
        add_monetary_unit(doc, &args.currency)
    }
}

/// `unit.edit_monetary_unit`
#[derive(Debug)]
pub struct EditMonetaryUnit;

/// Arguments of `unit.edit_monetary_unit`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditMonetaryUnitArgs {
    pub unit: EntityId,
    pub currency: String,
}

impl Operation for EditMonetaryUnit {
    const NAME: &'static str = "unit.edit_monetary_unit";
    type Args = EditMonetaryUnitArgs;
    type Output = ();

    fn run(doc: &mut Document, args: Self::Args) -> Result<()> {
        edit_monetary_unit(doc, args.unit, &args.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DocumentOptions;
    use crate::error::Error as ApiError;
    use ifc_edit_model::{step, AttributeValue, SchemaVersion};
    use test_case::test_case;

    fn model_error(err: ApiError) -> Error {
        match err {
            ApiError::Model(e) => e,
            other => panic!("expected model error, got {other:?}"),
        }
    }

    #[test_case(SchemaVersion::Ifc2x3 ; "ifc2x3")]
    #[test_case(SchemaVersion::Ifc4 ; "ifc4")]
    fn test_add_monetary_unit(schema: SchemaVersion) {
        let mut doc = Document::new(schema);
        let id = add_monetary_unit(&mut doc, "USD").unwrap();

        let unit = doc.entity(id).unwrap();
        assert!(unit.is_a("IfcMonetaryUnit"));
        assert_eq!(unit.ifc_type().name(), "IfcMonetaryUnit");
        assert_eq!(unit.text("Currency"), Some("USD"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_storage_differs_per_schema() {
        let mut ifc4 = Document::new(SchemaVersion::Ifc4);
        let id = add_monetary_unit(&mut ifc4, "USD").unwrap();
        assert_eq!(
            ifc4.attribute(id, "Currency"),
            Some(&AttributeValue::String("USD".into()))
        );
        assert_eq!(
            step::instance_line(ifc4.get(id).unwrap()),
            "#1=IFCMONETARYUNIT('USD');"
        );

        let mut ifc2x3 = Document::new(SchemaVersion::Ifc2x3);
        let id = add_monetary_unit(&mut ifc2x3, "USD").unwrap();
        assert_eq!(
            step::instance_line(ifc2x3.get(id).unwrap()),
            "#1=IFCMONETARYUNIT(.USD.);"
        );
    }

    #[test_case(SchemaVersion::Ifc2x3 ; "ifc2x3")]
    #[test_case(SchemaVersion::Ifc4 ; "ifc4")]
    fn test_repeated_calls_create_separate_units(schema: SchemaVersion) {
        let mut doc = Document::new(schema);
        let first = add_monetary_unit(&mut doc, "USD").unwrap();
        let second = add_monetary_unit(&mut doc, "USD").unwrap();
        let third = add_monetary_unit(&mut doc, "EUR").unwrap();

        assert_ne!(first, second);
        assert_eq!(doc.by_type(&IfcType::IfcMonetaryUnit).len(), 3);
        assert_eq!(doc.entity(third).unwrap().text("Currency"), Some("EUR"));
    }

    #[test_case(SchemaVersion::Ifc2x3 ; "ifc2x3")]
    #[test_case(SchemaVersion::Ifc4 ; "ifc4")]
    fn test_empty_currency_rejected(schema: SchemaVersion) {
        let mut doc = Document::new(schema);
        let err = model_error(add_monetary_unit(&mut doc, "  ").unwrap_err());
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_ifc4_accepts_any_code() {
        let mut doc = Document::new(SchemaVersion::Ifc4);
        let id = add_monetary_unit(&mut doc, "XBT").unwrap();
        assert_eq!(doc.entity(id).unwrap().text("Currency"), Some("XBT"));
    }

    #[test]
    fn test_ifc2x3_rejects_codes_outside_enum() {
        let mut doc = Document::new(SchemaVersion::Ifc2x3);
        let err = model_error(add_monetary_unit(&mut doc, "XBT").unwrap_err());
        assert_eq!(err, Error::invalid_enum("Currency", "XBT"));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_ifc2x3_lenient_mode_accepts_any_code() {
        let options = DocumentOptions::new().with_strict(false);
        let mut doc = Document::with_options(SchemaVersion::Ifc2x3, options);
        let id = add_monetary_unit(&mut doc, "XBT").unwrap();
        assert_eq!(doc.entity(id).unwrap().text("Currency"), Some("XBT"));
    }

    #[test_case("US D" ; "space")]
    #[test_case("$" ; "symbol")]
    #[test_case("a.b" ; "dot")]
    fn test_ifc2x3_lenient_mode_rejects_unwritable_codes(currency: &str) {
        let options = DocumentOptions::new().with_strict(false);
        let mut doc = Document::with_options(SchemaVersion::Ifc2x3, options);
        let err = model_error(add_monetary_unit(&mut doc, currency).unwrap_err());
        assert_eq!(err, Error::invalid_enum("Currency", currency));
        assert!(doc.is_empty());
    }

    #[test_case(SchemaVersion::Ifc2x3 ; "ifc2x3")]
    #[test_case(SchemaVersion::Ifc4 ; "ifc4")]
    fn test_edit_monetary_unit(schema: SchemaVersion) {
        let mut doc = Document::new(schema);
        let id = add_monetary_unit(&mut doc, "USD").unwrap();
        edit_monetary_unit(&mut doc, id, "EUR").unwrap();
        assert_eq!(doc.entity(id).unwrap().text("Currency"), Some("EUR"));
    }

    #[test]
    fn test_edit_requires_monetary_unit() {
        let mut doc = Document::new(SchemaVersion::Ifc4);
        let metre = crate::unit::add_si_unit(&mut doc, "LENGTHUNIT", None).unwrap();
        let err = model_error(edit_monetary_unit(&mut doc, metre, "EUR").unwrap_err());
        assert!(matches!(err, Error::TypeMismatch { .. }));

        let err = model_error(edit_monetary_unit(&mut doc, EntityId(99), "EUR").unwrap_err());
        assert_eq!(err, Error::EntityNotFound(EntityId(99)));
    }
}
