//! Attribute-application text.
//!
//! Rendering is a pure function of a descriptor and a [`RenderOptions`]; it
//! never fails because every value reaching it was validated on construction.

use std::fmt::Write as FmtWrite;

use crate::descriptor::AttributeDescriptor;
use crate::sequence::Sequence;
use crate::value::{ArgumentValue, ElementKind, Scalar};

/// How type names (the attribute, enum types, `typeof` targets) are qualified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Qualification {
    /// `Namespace.Name`, exactly as declared.
    #[default]
    Namespace,
    /// `global::Namespace.Name`, immune to namespace shadowing in the
    /// generated file.
    Global,
}

/// Rendering configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Qualification applied to type names.
    pub qualification: Qualification,
}

impl RenderOptions {
    /// Options that prefix every type name with `global::`.
    #[must_use]
    pub fn global() -> Self {
        Self {
            qualification: Qualification::Global,
        }
    }

    fn write_type_name(&self, out: &mut String, name: &str) {
        if self.qualification == Qualification::Global {
            out.push_str("global::");
        }
        out.push_str(name);
    }
}

/// Where a scalar literal appears.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Directly as an argument: the literal alone must carry its type.
    Argument,
    /// Inside `new T[] {..}`: the array type fixes the element type.
    Element,
}

/// Writes the full `[Namespace.Name(...)]` text for `attribute`.
pub(crate) fn write_attribute(
    out: &mut String,
    attribute: &AttributeDescriptor,
    options: &RenderOptions,
) {
    out.push('[');
    options.write_type_name(out, &attribute.full_name());
    if attribute.has_arguments() {
        out.push('(');
        let mut first = true;
        for value in attribute.positional_arguments() {
            if !first {
                out.push_str(", ");
            }
            first = false;
            write_argument(out, value, options);
        }
        for (name, value) in attribute.named_arguments() {
            if !first {
                out.push_str(", ");
            }
            first = false;
            out.push_str(name.as_str());
            out.push_str(" = ");
            write_argument(out, value, options);
        }
        out.push(')');
    }
    out.push(']');
}

/// Renders a single argument value as a C# constant expression.
///
/// ```
/// use featuregen_descriptor::{render_argument, ArgumentValue, RenderOptions, Sequence};
///
/// let value = ArgumentValue::from(Sequence::of([1u8, 2]).unwrap());
/// assert_eq!(render_argument(&value, &RenderOptions::default()), "new byte[] {1, 2}");
/// ```
#[must_use]
pub fn render_argument(value: &ArgumentValue, options: &RenderOptions) -> String {
    let mut out = String::new();
    write_argument(&mut out, value, options);
    out
}

fn write_argument(out: &mut String, value: &ArgumentValue, options: &RenderOptions) {
    match value {
        ArgumentValue::Scalar(scalar) => write_scalar(out, scalar, Position::Argument, options),
        ArgumentValue::Sequence(sequence) => write_sequence(out, sequence, options),
    }
}

fn write_sequence(out: &mut String, sequence: &Sequence, options: &RenderOptions) {
    out.push_str("new ");
    write_element_type(out, sequence.element(), options);
    out.push_str("[] {");
    for (i, item) in sequence.items().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_scalar(out, item, Position::Element, options);
    }
    out.push('}');
}

fn write_element_type(out: &mut String, kind: &ElementKind, options: &RenderOptions) {
    match kind {
        ElementKind::Enum(name) => options.write_type_name(out, name.as_str()),
        ElementKind::Type => options.write_type_name(out, "System.Type"),
        primitive => out.push_str(primitive.keyword().unwrap_or("object")),
    }
}

fn write_scalar(out: &mut String, scalar: &Scalar, position: Position, options: &RenderOptions) {
    let bare = position == Position::Element;
    // Integer literals without a suffix are `int`; narrower widths need a cast
    // and wider ones a suffix unless an array type already fixes them.
    let _ = match scalar {
        Scalar::Bool(v) => write!(out, "{v}"),
        Scalar::Char(unit) => {
            write_char_literal(out, *unit);
            Ok(())
        }
        Scalar::SByte(v) if bare => write!(out, "{v}"),
        Scalar::SByte(v) => write!(out, "(sbyte){v}"),
        Scalar::Byte(v) if bare => write!(out, "{v}"),
        Scalar::Byte(v) => write!(out, "(byte){v}"),
        Scalar::Int16(v) if bare => write!(out, "{v}"),
        Scalar::Int16(v) => write!(out, "(short){v}"),
        Scalar::UInt16(v) if bare => write!(out, "{v}"),
        Scalar::UInt16(v) => write!(out, "(ushort){v}"),
        Scalar::Int32(v) => write!(out, "{v}"),
        Scalar::UInt32(v) if bare => write!(out, "{v}"),
        Scalar::UInt32(v) => write!(out, "{v}u"),
        Scalar::Int64(v) if bare => write!(out, "{v}"),
        Scalar::Int64(v) => write!(out, "{v}L"),
        Scalar::UInt64(v) if bare => write!(out, "{v}"),
        Scalar::UInt64(v) => write!(out, "{v}UL"),
        Scalar::Single(v) => write_float(out, f64::from(*v), &format!("{v:?}"), "float", "f"),
        Scalar::Double(v) => write_float(out, *v, &format!("{v:?}"), "double", ""),
        Scalar::String(s) => {
            write_string_literal(out, s);
            Ok(())
        }
        Scalar::Enum(value) => {
            options.write_type_name(out, value.enum_type().as_str());
            write!(out, ".{}", value.member())
        }
        Scalar::Type(ty) => {
            out.push_str("typeof(");
            if ty.is_keyword() {
                out.push_str(ty.as_str());
            } else {
                options.write_type_name(out, ty.as_str());
            }
            out.push(')');
            Ok(())
        }
    };
}

/// Writes a float using Rust's shortest round-trip form, which always
/// contains a `.` or an exponent and is therefore a C# real literal.
fn write_float(
    out: &mut String,
    value: f64,
    shortest: &str,
    keyword: &str,
    suffix: &str,
) -> std::fmt::Result {
    if value.is_nan() {
        write!(out, "{keyword}.NaN")
    } else if value == f64::INFINITY {
        write!(out, "{keyword}.PositiveInfinity")
    } else if value == f64::NEG_INFINITY {
        write!(out, "{keyword}.NegativeInfinity")
    } else {
        write!(out, "{shortest}{suffix}")
    }
}

/// Returns the simple escape for a code unit, if C# has one.
fn simple_escape(unit: u16) -> Option<&'static str> {
    Some(match unit {
        0x00 => "\\0",
        0x07 => "\\a",
        0x08 => "\\b",
        0x09 => "\\t",
        0x0A => "\\n",
        0x0B => "\\v",
        0x0C => "\\f",
        0x0D => "\\r",
        0x5C => "\\\\",
        _ => return None,
    })
}

/// Control characters, line separators and lone surrogates are written as
/// `\uXXXX`; C# treats the separators as line breaks inside literals.
fn needs_unicode_escape(c: Option<char>) -> bool {
    match c {
        Some(c) => c.is_control() || c == '\u{2028}' || c == '\u{2029}',
        None => true,
    }
}

fn write_char_literal(out: &mut String, unit: u16) {
    out.push('\'');
    let decoded = char::from_u32(u32::from(unit));
    if unit == u16::from(b'\'') {
        out.push_str("\\'");
    } else if let Some(escape) = simple_escape(unit) {
        out.push_str(escape);
    } else if needs_unicode_escape(decoded) {
        let _ = write!(out, "\\u{unit:04X}");
    } else if let Some(c) = decoded {
        out.push(c);
    }
    out.push('\'');
}

fn write_string_literal(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        let code = u32::from(c);
        let escape = u16::try_from(code).ok().and_then(simple_escape);
        if c == '"' {
            out.push_str("\\\"");
        } else if let Some(escape) = escape {
            out.push_str(escape);
        } else if needs_unicode_escape(Some(c)) {
            let _ = write!(out, "\\u{code:04X}");
        } else {
            out.push(c);
        }
    }
    out.push('"');
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::value::{EnumValue, TypeRef};

    fn standalone(value: impl Into<ArgumentValue>) -> String {
        render_argument(&value.into(), &RenderOptions::default())
    }

    #[test]
    fn integer_widths() {
        assert_eq!(standalone(100i32), "100");
        assert_eq!(standalone(i32::MIN), "-2147483648");
        assert_eq!(standalone(100u32), "100u");
        assert_eq!(standalone(1000i64), "1000L");
        assert_eq!(standalone(1000u64), "1000UL");
        assert_eq!(standalone(100u8), "(byte)100");
        assert_eq!(standalone(-100i8), "(sbyte)-100");
        assert_eq!(standalone(100i16), "(short)100");
        assert_eq!(standalone(100u16), "(ushort)100");
    }

    #[test]
    fn array_elements_drop_suffixes() {
        let longs = Sequence::of([1i64, -2]).unwrap();
        assert_eq!(standalone(longs), "new long[] {1, -2}");
        let floats = Sequence::of([1.5f32, 2.0]).unwrap();
        assert_eq!(standalone(floats), "new float[] {1.5f, 2.0f}");
    }

    #[test]
    fn floats() {
        assert_eq!(standalone(100.01f64), "100.01");
        assert_eq!(standalone(100.01f32), "100.01f");
        assert_eq!(standalone(1.0f64), "1.0");
        assert_eq!(standalone(1e300f64), "1e300");
        assert_eq!(standalone(f64::NAN), "double.NaN");
        assert_eq!(standalone(f32::NEG_INFINITY), "float.NegativeInfinity");
    }

    #[test]
    fn chars_and_strings_are_escaped() {
        assert_eq!(standalone(ArgumentValue::try_from('m').unwrap()), "'m'");
        assert_eq!(standalone(ArgumentValue::try_from('\'').unwrap()), "'\\''");
        assert_eq!(standalone(ArgumentValue::try_from('"').unwrap()), "'\"'");
        assert_eq!(standalone(Scalar::Char(0xD800)), "'\\uD800'");
        assert_eq!(standalone(Scalar::Char(0x1B)), "'\\u001B'");
        assert_eq!(
            standalone("say \"hi\"\\\n\tbye"),
            "\"say \\\"hi\\\"\\\\\\n\\tbye\""
        );
        assert_eq!(standalone("line\u{2028}sep"), "\"line\\u2028sep\"");
        assert_eq!(standalone("it's ünïcødé 😀"), "\"it's ünïcødé 😀\"");
    }

    #[test]
    fn enums_and_types() {
        let targets = EnumValue::new("System.AttributeTargets", "Assembly").unwrap();
        assert_eq!(standalone(targets), "System.AttributeTargets.Assembly");
        assert_eq!(standalone(TypeRef::of::<String>()), "typeof(string)");
        assert_eq!(
            standalone(TypeRef::new("Reqnroll.Tests.Steps").unwrap()),
            "typeof(Reqnroll.Tests.Steps)"
        );
        let types = Sequence::empty_of(ElementKind::Type);
        assert_eq!(standalone(types), "new System.Type[] {}");
    }

    #[test]
    fn global_qualification_skips_keywords() {
        let options = RenderOptions::global();
        let keys = Sequence::of_enum("System.ConsoleKey", ["Add"]).unwrap();
        assert_eq!(
            render_argument(&keys.into(), &options),
            "new global::System.ConsoleKey[] {global::System.ConsoleKey.Add}"
        );
        assert_eq!(
            render_argument(&TypeRef::of::<i32>().into(), &options),
            "typeof(int)"
        );
        assert_eq!(
            render_argument(&TypeRef::new("System.Uri").unwrap().into(), &options),
            "typeof(global::System.Uri)"
        );
    }
}
