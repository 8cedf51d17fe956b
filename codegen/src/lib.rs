//! featuregen C# emitter.
//!
//! Writes attribute blocks built from `featuregen_descriptor` descriptors
//! into generated C# source files.
//!
//! ```
//! use featuregen_codegen::{AttributeList, CSharpFile};
//! use featuregen_descriptor::AttributeDescriptor;
//!
//! let mut attributes = AttributeList::new();
//! attributes.push(
//!     AttributeDescriptor::new("GeneratedCode", "System.CodeDom.Compiler")?
//!         .with_positional_arguments(["featuregen", "0.1.0"])?,
//! );
//!
//! let mut f = CSharpFile::new("Feature bindings.");
//! f.open_block("namespace Bar");
//! f.attributes(&attributes);
//! f.open_block("public partial class FooFeature");
//! f.close_block();
//! f.close_block();
//! assert!(f
//!     .finish()
//!     .contains("    [global::System.CodeDom.Compiler.GeneratedCode(\"featuregen\", \"0.1.0\")]\n"));
//! # Ok::<(), featuregen_descriptor::ArgumentError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod attributes;
pub mod emit;

pub use attributes::AttributeList;
pub use emit::{write_file, CSharpFile};

use featuregen_descriptor::RenderOptions;

/// Emitter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// One level of indentation.
    pub indent: String,
    /// How attribute text is rendered.
    pub render: RenderOptions,
}

impl Default for EmitOptions {
    /// Four-space indentation and `global::`-qualified type names.
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            render: RenderOptions::global(),
        }
    }
}
