//! C# source emission helpers.

use std::fmt::Write as FmtWrite;
use std::path::Path;

use anyhow::{Context, Result};
use featuregen_descriptor::AttributeDescriptor;

use crate::attributes::AttributeList;
use crate::EmitOptions;

/// Line-oriented builder for one generated C# file.
///
/// Every line written through [`CSharpFile::line`] is prefixed with the
/// current indentation; `buf` stays public for callers that need `write!`.
pub struct CSharpFile {
    /// Accumulated source text.
    pub buf: String,
    depth: usize,
    options: EmitOptions,
}

impl CSharpFile {
    /// Starts a file with the standard auto-generated banner and `header`
    /// as a comment block.
    #[must_use]
    pub fn new(header: &str) -> Self {
        Self::with_options(header, EmitOptions::default())
    }

    /// Like [`CSharpFile::new`], with explicit emit options.
    #[must_use]
    pub fn with_options(header: &str, options: EmitOptions) -> Self {
        let mut f = Self {
            buf: String::with_capacity(4096),
            depth: 0,
            options,
        };
        f.line("// <auto-generated>");
        for line in header.lines() {
            if line.is_empty() {
                f.line("//");
            } else {
                let _ = writeln!(f.buf, "// {line}");
            }
        }
        f.line("// </auto-generated>");
        f.blank();
        f.line("#nullable enable");
        f.blank();
        f
    }

    /// The options this file renders with.
    #[must_use]
    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Writes `text` at the current indentation.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buf.push_str(&self.options.indent);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Increases the indentation by one level.
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decreases the indentation by one level; a no-op at the top level.
    pub fn dedent(&mut self) {
        if self.depth == 0 {
            tracing::warn!("dedent at top level ignored");
        }
        self.depth = self.depth.saturating_sub(1);
    }

    /// Writes `header`, an opening brace, and indents.
    pub fn open_block(&mut self, header: &str) {
        self.line(header);
        self.line("{");
        self.indent();
    }

    /// Dedents and writes a closing brace.
    pub fn close_block(&mut self) {
        self.dedent();
        self.line("}");
    }

    /// Writes `text` as an XML `<summary>` doc comment.
    pub fn xml_doc_summary(&mut self, text: &str) {
        self.line("/// <summary>");
        for line in text.lines() {
            let escaped = escape_xml(line.trim_end());
            if escaped.is_empty() {
                self.line("///");
            } else {
                self.line(&format!("/// {escaped}"));
            }
        }
        self.line("/// </summary>");
    }

    /// Writes one attribute application on its own line.
    pub fn attribute(&mut self, attribute: &AttributeDescriptor) {
        let text = attribute.render_with(&self.options.render);
        self.line(&text);
    }

    /// Writes every attribute in `list`, in insertion order.
    pub fn attributes(&mut self, list: &AttributeList) {
        for text in list.render_lines(&self.options.render) {
            self.line(&text);
        }
    }

    /// Returns the finished source text.
    #[must_use]
    pub fn finish(self) -> String {
        if self.depth > 0 {
            tracing::warn!(depth = self.depth, "finished C# file with unclosed blocks");
        }
        self.buf
    }
}

/// Escapes `&`, `<` and `>` for XML doc comments.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Writes `content` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the file cannot be
/// written.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote generated file");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use featuregen_descriptor::RenderOptions;

    #[test]
    fn banner_wraps_header_lines() {
        let f = CSharpFile::new("Generated step bindings.\n\nDo not edit.");
        assert_eq!(
            f.finish(),
            "// <auto-generated>\n\
             // Generated step bindings.\n\
             //\n\
             // Do not edit.\n\
             // </auto-generated>\n\
             \n\
             #nullable enable\n\
             \n"
        );
    }

    #[test]
    fn blocks_indent_their_contents() {
        let mut f = CSharpFile::new("x");
        let start = f.buf.len();
        f.open_block("namespace Bar");
        f.open_block("public class Foo");
        f.line("public int X;");
        f.close_block();
        f.close_block();
        let body = &f.buf[start..];
        assert_eq!(
            body,
            "namespace Bar\n{\n    public class Foo\n    {\n        public int X;\n    }\n}\n"
        );
    }

    #[test]
    fn dedent_stops_at_top_level() {
        let mut f = CSharpFile::new("x");
        f.dedent();
        let start = f.buf.len();
        f.line("a");
        assert_eq!(&f.buf[start..], "a\n");
    }

    #[test]
    fn doc_summary_escapes_markup() {
        let mut f = CSharpFile::new("x");
        let start = f.buf.len();
        f.xml_doc_summary("Returns List<T> & more.");
        assert_eq!(
            &f.buf[start..],
            "/// <summary>\n/// Returns List&lt;T&gt; &amp; more.\n/// </summary>\n"
        );
    }

    #[test]
    fn attributes_follow_render_options() {
        let attribute = AttributeDescriptor::new("Foo", "Bar")
            .unwrap()
            .with_positional_arguments(["Fizz"])
            .unwrap();
        let options = EmitOptions {
            indent: "\t".to_string(),
            render: RenderOptions::global(),
        };
        let mut f = CSharpFile::with_options("x", options.clone());
        assert_eq!(f.options(), &options);
        f.indent();
        let start = f.buf.len();
        f.attribute(&attribute);
        assert_eq!(&f.buf[start..], "\t[global::Bar.Foo(\"Fizz\")]\n");
    }
}
