//! Attribute descriptors for C# source generators.
//!
//! An [`AttributeDescriptor`] models one attribute usage: the attribute type
//! (name and namespace), its positional arguments, and its named arguments.
//! Generators build descriptors programmatically, compare them by value, and
//! render them as attribute-application text to embed in generated source.
//!
//! # Entry Point
//!
//! ```
//! use featuregen_descriptor::{AttributeDescriptor, EnumValue, Sequence};
//!
//! let attribute = AttributeDescriptor::new("Foo", "Bar")?
//!     .with_positional_arguments(["Fizz", "Buzz"])?;
//! assert_eq!(attribute.render(), r#"[Bar.Foo("Fizz", "Buzz")]"#);
//!
//! let usage = AttributeDescriptor::new("AttributeUsage", "System")?
//!     .with_positional_arguments([EnumValue::new("System.AttributeTargets", "Method")?])?
//!     .with_named_arguments([("AllowMultiple", true)])?;
//! assert_eq!(
//!     usage.render(),
//!     "[System.AttributeUsage(System.AttributeTargets.Method, AllowMultiple = true)]"
//! );
//!
//! let empty = AttributeDescriptor::new("Foo", "Bar")?
//!     .with_positional_arguments([Sequence::empty::<String>()])?;
//! assert_eq!(empty.render(), "[Bar.Foo(new string[] {})]");
//! # Ok::<(), featuregen_descriptor::ArgumentError>(())
//! ```
//!
//! # Argument values
//!
//! Arguments are restricted to the shapes C# accepts in attributes; see
//! [`ArgumentValue`]. Invalid input is rejected with an [`ArgumentError`]
//! when a value or descriptor is built, so rendering never fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod descriptor;
pub mod error;
pub mod identifier;
pub mod render;
pub mod sequence;
pub mod value;

pub use descriptor::AttributeDescriptor;
pub use error::{ArgumentError, NameRole};
pub use identifier::{Identifier, QualifiedName};
pub use render::{render_argument, Qualification, RenderOptions};
pub use sequence::Sequence;
pub use value::{ArgumentValue, ElementKind, EnumValue, Scalar, ScalarType, TypeRef};
