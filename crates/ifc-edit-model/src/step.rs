// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! STEP notation for single values and entity instances
//!
//! Renders attribute values the way they appear inside an ISO 10303-21
//! DATA section. Only individual instances are rendered; there is no file
//! reader or writer here.

use crate::{AttributeValue, Entity};
use std::fmt::{self, Write};

/// Format a REAL so that it always matches the STEP grammar
///
/// `REAL = [ SIGN ] DIGIT { DIGIT } "." { DIGIT } [ "E" [ SIGN ] DIGIT { DIGIT } ]`
pub fn format_real(value: f64) -> String {
    // Debug output is the shortest round-trip form and switches to
    // exponent notation for very large or small magnitudes.
    let repr = format!("{:?}", value);
    let (mantissa, exponent) = match repr.find(['e', 'E']) {
        Some(pos) => (&repr[..pos], Some(&repr[pos + 1..])),
        None => (repr.as_str(), None),
    };

    let mut out = String::with_capacity(repr.len() + 2);
    out.push_str(mantissa);
    if !mantissa.contains('.') {
        out.push('.');
    }
    if let Some(exp) = exponent {
        out.push('E');
        out.push_str(exp);
    }
    out
}

/// Encode a string literal, including the surrounding quotes
///
/// Quotes and backslashes are doubled, printable ASCII passes through and
/// everything else uses the `\X2\` (UTF-16) or `\X4\` (UTF-32) directives.
pub fn encode_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');

    let mut wide: Vec<u32> = Vec::new();
    for ch in value.chars() {
        if (' '..='~').contains(&ch) {
            flush_wide(&mut out, &mut wide);
            match ch {
                '\'' => out.push_str("''"),
                '\\' => out.push_str("\\\\"),
                _ => out.push(ch),
            }
        } else {
            wide.push(ch as u32);
        }
    }
    flush_wide(&mut out, &mut wide);

    out.push('\'');
    out
}

/// Write a run of non-ASCII code points as a single encoding directive
fn flush_wide(out: &mut String, wide: &mut Vec<u32>) {
    if wide.is_empty() {
        return;
    }

    if wide.iter().all(|&c| c <= 0xFFFF) {
        out.push_str("\\X2\\");
        for c in wide.iter() {
            let _ = write!(out, "{:04X}", c);
        }
    } else {
        out.push_str("\\X4\\");
        for c in wide.iter() {
            let _ = write!(out, "{:08X}", c);
        }
    }
    out.push_str("\\X0\\");
    wide.clear();
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[AttributeValue]) -> fmt::Result {
    f.write_char('(')?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write!(f, "{}", item)?;
    }
    f.write_char(')')
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => f.write_char('$'),
            AttributeValue::Derived => f.write_char('*'),
            AttributeValue::EntityRef(id) => write!(f, "{}", id),
            AttributeValue::Bool(b) => f.write_str(if *b { ".T." } else { ".F." }),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Float(v) => f.write_str(&format_real(*v)),
            AttributeValue::String(s) => f.write_str(&encode_string(s)),
            AttributeValue::Enum(e) => write!(f, ".{}.", e),
            AttributeValue::List(items) => write_list(f, items),
            AttributeValue::TypedValue(name, args) => {
                f.write_str(&name.to_ascii_uppercase())?;
                write_list(f, args)
            }
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.id, self.ifc_type.name())?;
        write_list(f, &self.attributes)?;
        f.write_char(';')
    }
}

/// Render an entity as a DATA section line, e.g. `#1=IFCMONETARYUNIT('USD');`
pub fn instance_line(entity: &Entity) -> String {
    let mut line = format!("{}={}", entity.id, entity.ifc_type.step_name());
    line.push('(');
    for (i, value) in entity.attributes.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        let _ = write!(line, "{}", value);
    }
    line.push_str(");");
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityId, IfcType};

    #[test]
    fn test_format_real_adds_point() {
        assert_eq!(format_real(1.0), "1.0");
        assert_eq!(format_real(0.001), "0.001");
        assert_eq!(format_real(-2.5), "-2.5");
    }

    #[test]
    fn test_format_real_exponent() {
        assert_eq!(format_real(1e-7), "1.E-7");
        assert_eq!(format_real(1.5e20), "1.5E20");
    }

    #[test]
    fn test_encode_plain_and_escaped() {
        assert_eq!(encode_string("USD"), "'USD'");
        assert_eq!(encode_string("it's"), "'it''s'");
        assert_eq!(encode_string("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn test_encode_non_ascii() {
        assert_eq!(encode_string("€"), "'\\X2\\20AC\\X0\\'");
        assert_eq!(encode_string("1 €!"), "'1 \\X2\\20AC\\X0\\!'");
        assert_eq!(encode_string("😀"), "'\\X4\\0001F600\\X0\\'");
    }

    #[test]
    fn test_value_notation() {
        assert_eq!(AttributeValue::Null.to_string(), "$");
        assert_eq!(AttributeValue::Derived.to_string(), "*");
        assert_eq!(AttributeValue::EntityRef(EntityId(12)).to_string(), "#12");
        assert_eq!(AttributeValue::Bool(true).to_string(), ".T.");
        assert_eq!(AttributeValue::Enum("USD".into()).to_string(), ".USD.");
        assert_eq!(
            AttributeValue::List(vec![
                AttributeValue::EntityRef(EntityId(1)),
                AttributeValue::EntityRef(EntityId(2)),
            ])
            .to_string(),
            "(#1,#2)"
        );
        assert_eq!(
            AttributeValue::TypedValue("IfcLabel".into(), vec![AttributeValue::String("x".into())])
                .to_string(),
            "IFCLABEL('x')"
        );
    }

    #[test]
    fn test_instance_rendering() {
        let entity = Entity {
            id: EntityId(1),
            ifc_type: IfcType::IfcMonetaryUnit,
            attributes: vec![AttributeValue::String("USD".into())],
        };
        assert_eq!(entity.to_string(), "#1=IfcMonetaryUnit('USD');");
        assert_eq!(instance_line(&entity), "#1=IFCMONETARYUNIT('USD');");
    }
}
