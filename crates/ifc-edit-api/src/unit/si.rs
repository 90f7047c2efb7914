// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SI units

use crate::document::Document;
use crate::error::Result;
use crate::registry::Operation;
use ifc_edit_model::{AttributeValue, EntityId, Error, IfcType};
use serde::Deserialize;

/// Base SI unit name for an `IfcUnitEnum` member
///
/// Returns `None` for `USERDEFINED` and unknown unit types.
pub fn si_unit_name(unit_type: &str) -> Option<&'static str> {
    let name = match unit_type {
        "ABSORBEDDOSEUNIT" => "GRAY",
        "AMOUNTOFSUBSTANCEUNIT" => "MOLE",
        "AREAUNIT" => "SQUARE_METRE",
        "DOSEEQUIVALENTUNIT" => "SIEVERT",
        "ELECTRICCAPACITANCEUNIT" => "FARAD",
        "ELECTRICCHARGEUNIT" => "COULOMB",
        "ELECTRICCONDUCTANCEUNIT" => "SIEMENS",
        "ELECTRICCURRENTUNIT" => "AMPERE",
        "ELECTRICRESISTANCEUNIT" => "OHM",
        "ELECTRICVOLTAGEUNIT" => "VOLT",
        "ENERGYUNIT" => "JOULE",
        "FORCEUNIT" => "NEWTON",
        "FREQUENCYUNIT" => "HERTZ",
        "ILLUMINANCEUNIT" => "LUX",
        "INDUCTANCEUNIT" => "HENRY",
        "LENGTHUNIT" => "METRE",
        "LUMINOUSFLUXUNIT" => "LUMEN",
        "LUMINOUSINTENSITYUNIT" => "CANDELA",
        "MAGNETICFLUXDENSITYUNIT" => "TESLA",
        "MAGNETICFLUXUNIT" => "WEBER",
        // IfcSIUnitName has GRAM, not KILOGRAM; kilograms use the KILO prefix
        "MASSUNIT" => "GRAM",
        "PLANEANGLEUNIT" => "RADIAN",
        "POWERUNIT" => "WATT",
        "PRESSUREUNIT" => "PASCAL",
        "RADIOACTIVITYUNIT" => "BECQUEREL",
        "SOLIDANGLEUNIT" => "STERADIAN",
        "THERMODYNAMICTEMPERATUREUNIT" => "KELVIN",
        "TIMEUNIT" => "SECOND",
        "VOLUMEUNIT" => "CUBIC_METRE",
        _ => return None,
    };
    Some(name)
}

/// Add an `IfcSIUnit` of the given unit type, optionally prefixed
///
/// `Name` follows from the unit type, so `("LENGTHUNIT", Some("MILLI"))`
/// creates a millimetre.
pub fn add_si_unit(doc: &mut Document, unit_type: &str, prefix: Option<&str>) -> Result<EntityId> {
    let unit_type = unit_type.trim().to_ascii_uppercase();
    let name = si_unit_name(&unit_type).ok_or_else(|| Error::invalid_enum("UnitType", &unit_type))?;

    let prefix = match prefix {
        Some(prefix) => doc.text_value(&IfcType::IfcSIUnit, "Prefix", prefix)?,
        None => AttributeValue::Null,
    };

    let id = doc.create_entity(
        IfcType::IfcSIUnit,
        vec![
            ("UnitType", AttributeValue::Enum(unit_type)),
            ("Prefix", prefix),
            ("Name", AttributeValue::Enum(name.to_string())),
        ],
    )?;
    Ok(id)
}

/// `unit.add_si_unit`
#[derive(Debug)]
pub struct AddSiUnit;

/// Arguments of `unit.add_si_unit`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddSiUnitArgs {
    pub unit_type: String,
    #[serde(default)]
    pub prefix: Option<String>,
}

impl Operation for AddSiUnit {
    const NAME: &'static str = "unit.add_si_unit";
    type Args = AddSiUnitArgs;
    type Output = EntityId;

    fn run(doc: &mut Document, args: Self::Args) -> Result<EntityId> {
        add_si_unit(doc, &args.unit_type, args.prefix.as_deref())
    }
}
