//! Attribute-application text for representative descriptors.

#![allow(clippy::unwrap_used)]

use featuregen_descriptor::{
    render_argument, ArgumentValue, AttributeDescriptor, EnumValue, RenderOptions, Scalar,
    Sequence, TypeRef,
};
use proptest::prelude::*;

fn foo() -> AttributeDescriptor {
    AttributeDescriptor::new("Foo", "Bar").unwrap()
}

#[test]
fn string_representation_examples() {
    let examples = [
        (foo(), "[Bar.Foo]"),
        (
            foo().with_positional_arguments(["Fizz"]).unwrap(),
            "[Bar.Foo(\"Fizz\")]",
        ),
        (
            foo().with_positional_arguments(["Fizz", "Buzz"]).unwrap(),
            "[Bar.Foo(\"Fizz\", \"Buzz\")]",
        ),
        (
            foo().with_positional_arguments([1, 2]).unwrap(),
            "[Bar.Foo(1, 2)]",
        ),
        (
            foo()
                .with_positional_arguments([Sequence::empty::<String>()])
                .unwrap(),
            "[Bar.Foo(new string[] {})]",
        ),
        (
            foo()
                .with_positional_arguments([Sequence::of(["potato", "pancakes"]).unwrap()])
                .unwrap(),
            "[Bar.Foo(new string[] {\"potato\", \"pancakes\"})]",
        ),
    ];

    for (attribute, expected) in examples {
        assert_eq!(attribute.render(), expected);
        assert_eq!(attribute.to_string(), expected);
    }
}

#[test]
fn rendering_is_idempotent() {
    let attribute = foo()
        .with_positional_arguments([ArgumentValue::from("a"), ArgumentValue::from(2.5)])
        .unwrap()
        .with_named_arguments([("Tags", Sequence::of(["x", "y"]).unwrap())])
        .unwrap();
    let first = attribute.render();
    assert_eq!(first, attribute.render());
    assert_eq!(first, "[Bar.Foo(\"a\", 2.5, Tags = new string[] {\"x\", \"y\"})]");
}

#[test]
fn named_only_arguments_open_parentheses() {
    let attribute = foo().with_named_arguments([("Order", 3)]).unwrap();
    assert_eq!(attribute.render(), "[Bar.Foo(Order = 3)]");
}

#[test]
fn positional_arguments_precede_named_ones() {
    let attribute = foo()
        .with_named_arguments([("Reason", "flaky")])
        .unwrap()
        .with_positional_arguments([TypeRef::new("Reqnroll.Steps").unwrap()])
        .unwrap();
    assert_eq!(
        attribute.render(),
        "[Bar.Foo(typeof(Reqnroll.Steps), Reason = \"flaky\")]"
    );
}

#[test]
fn enum_arguments_are_qualified() {
    let attribute = foo()
        .with_positional_arguments([EnumValue::new("System.AttributeTargets", "Assembly").unwrap()])
        .unwrap()
        .with_named_arguments([(
            "Keys",
            Sequence::of_enum("System.ConsoleKey", ["Add", "Subtract"]).unwrap(),
        )])
        .unwrap();
    assert_eq!(
        attribute.render(),
        "[Bar.Foo(System.AttributeTargets.Assembly, \
         Keys = new System.ConsoleKey[] {System.ConsoleKey.Add, System.ConsoleKey.Subtract})]"
    );
    assert_eq!(
        attribute.render_with(&RenderOptions::global()),
        "[global::Bar.Foo(global::System.AttributeTargets.Assembly, \
         Keys = new global::System.ConsoleKey[] \
         {global::System.ConsoleKey.Add, global::System.ConsoleKey.Subtract})]"
    );
}

#[test]
fn every_scalar_kind_renders_as_a_literal() {
    let cases: Vec<(ArgumentValue, &str)> = vec![
        (true.into(), "true"),
        (100u8.into(), "(byte)100"),
        (ArgumentValue::try_from('m').unwrap(), "'m'"),
        (100.01f64.into(), "100.01"),
        (100.01f32.into(), "100.01f"),
        (100i32.into(), "100"),
        (1000i64.into(), "1000L"),
        (100i8.into(), "(sbyte)100"),
        (100i16.into(), "(short)100"),
        ("muffins".into(), "\"muffins\""),
        (100u32.into(), "100u"),
        (1000u64.into(), "1000UL"),
        (100u16.into(), "(ushort)100"),
        (TypeRef::of::<String>().into(), "typeof(string)"),
        (Scalar::Char(0).into(), "'\\0'"),
    ];
    for (value, literal) in cases {
        let attribute = foo().with_positional_arguments([value]).unwrap();
        assert_eq!(attribute.render(), format!("[Bar.Foo({literal})]"));
    }
}

#[test]
fn sequences_of_every_primitive_kind() {
    let cases: Vec<(Sequence, &str)> = vec![
        (Sequence::of([true, false]).unwrap(), "new bool[] {true, false}"),
        (Sequence::of([100u8, 100]).unwrap(), "new byte[] {100, 100}"),
        (Sequence::of(['m', 'n']).unwrap(), "new char[] {'m', 'n'}"),
        (Sequence::of([100.01f64]).unwrap(), "new double[] {100.01}"),
        (Sequence::of([100.01f32]).unwrap(), "new float[] {100.01f}"),
        (Sequence::of([-1i8]).unwrap(), "new sbyte[] {-1}"),
        (Sequence::of([1000u64]).unwrap(), "new ulong[] {1000}"),
        (Sequence::empty::<u16>(), "new ushort[] {}"),
    ];
    for (sequence, literal) in cases {
        let attribute = foo().with_positional_arguments([sequence]).unwrap();
        assert_eq!(attribute.render(), format!("[Bar.Foo({literal})]"));
    }
}

/// Reads a standalone numeric literal back into the scalar it denotes,
/// using only the C# cast prefix and suffix to pick the type.
fn read_numeric_literal(text: &str) -> Scalar {
    let (cast, rest) = match text.strip_prefix('(') {
        Some(rest) => {
            let (cast, digits) = rest.split_once(')').unwrap();
            (Some(cast), digits)
        }
        None => (None, text),
    };
    match cast {
        Some("sbyte") => return Scalar::SByte(rest.parse().unwrap()),
        Some("byte") => return Scalar::Byte(rest.parse().unwrap()),
        Some("short") => return Scalar::Int16(rest.parse().unwrap()),
        Some("ushort") => return Scalar::UInt16(rest.parse().unwrap()),
        Some(other) => panic!("unexpected cast ({other}) in {text}"),
        None => {}
    }
    if let Some(digits) = rest.strip_suffix("UL") {
        Scalar::UInt64(digits.parse().unwrap())
    } else if let Some(digits) = rest.strip_suffix('L') {
        Scalar::Int64(digits.parse().unwrap())
    } else if let Some(digits) = rest.strip_suffix('u') {
        Scalar::UInt32(digits.parse().unwrap())
    } else if let Some(digits) = rest.strip_suffix('f') {
        Scalar::Single(digits.parse().unwrap())
    } else if rest.contains(['.', 'e', 'E']) {
        Scalar::Double(rest.parse().unwrap())
    } else {
        Scalar::Int32(rest.parse().unwrap())
    }
}

fn numeric_strategy() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<i8>().prop_map(Scalar::from),
        any::<u8>().prop_map(Scalar::from),
        any::<i16>().prop_map(Scalar::from),
        any::<u16>().prop_map(Scalar::from),
        any::<i32>().prop_map(Scalar::from),
        any::<u32>().prop_map(Scalar::from),
        any::<i64>().prop_map(Scalar::from),
        any::<u64>().prop_map(Scalar::from),
        any::<f32>()
            .prop_filter("finite", |v| v.is_finite())
            .prop_map(Scalar::from),
        any::<f64>()
            .prop_filter("finite", |v| v.is_finite())
            .prop_map(Scalar::from),
    ]
}

proptest! {
    /// A standalone numeric literal carries enough to recover value and type.
    #[test]
    fn prop_numeric_literals_read_back(value in numeric_strategy()) {
        let text = render_argument(&value.clone().into(), &RenderOptions::default());
        prop_assert_eq!(read_numeric_literal(&text), value);
    }

    /// Array elements are bare; the array type recovers their width.
    #[test]
    fn prop_long_array_elements_read_back(items in prop::collection::vec(any::<i64>(), 0..6)) {
        let sequence = Sequence::of(items.clone()).unwrap();
        let text = render_argument(&sequence.into(), &RenderOptions::default());
        let body = text
            .strip_prefix("new long[] {")
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap();
        let parsed: Vec<i64> = if body.is_empty() {
            Vec::new()
        } else {
            body.split(", ").map(|item| item.parse().unwrap()).collect()
        };
        prop_assert_eq!(parsed, items);
    }
}
