// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit operations (`unit.*`)
//!
//! | Operation | Function |
//! |---|---|
//! | `unit.add_monetary_unit` | [`add_monetary_unit`] |
//! | `unit.edit_monetary_unit` | [`edit_monetary_unit`] |
//! | `unit.add_si_unit` | [`add_si_unit`] |
//! | `unit.assign_unit` | [`assign_unit`] |
//! | `unit.unassign_unit` | [`unassign_unit`] |
//! | `unit.remove_unit` | [`remove_unit`] |

mod assignment;
mod monetary;
mod scale;
mod si;

pub use assignment::{
    assign_unit, remove_unit, unassign_unit, AssignUnit, AssignUnitArgs, RemoveUnit,
    RemoveUnitArgs, UnassignUnit,
};
pub use monetary::{
    add_monetary_unit, edit_monetary_unit, AddMonetaryUnit, AddMonetaryUnitArgs,
    EditMonetaryUnit, EditMonetaryUnitArgs,
};
pub use scale::{length_unit_scale, prefix_scale, scales};
pub use si::{add_si_unit, si_unit_name, AddSiUnit, AddSiUnitArgs};

use crate::registry::OperationRegistry;

/// Register every unit operation
pub fn register(registry: &mut OperationRegistry) {
    registry
        .register::<AddMonetaryUnit>()
        .register::<EditMonetaryUnit>()
        .register::<AddSiUnit>()
        .register::<AssignUnit>()
        .register::<UnassignUnit>()
        .register::<RemoveUnit>();
}
