//! XML rendering for the element tree.
//!
//! Rendering rules:
//! - The document starts with a standalone UTF-8 declaration.
//! - Attribute values and text are escaped (`&`, `<`, `>` always, quotes inside attributes).
//! - An element without children is written as `<name/>`.
//! - An element holding only text is written on one line.
//! - Anything else gets one child per line, indented by four spaces per level
//!   when indentation is enabled.

use std::io::Write;

use crate::err::{IdmefError, Result};
use crate::model::xml::{XmlElement, XmlNode};

const INDENT_WIDTH: usize = 4;
const DECLARATION: &[u8] = b"<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>";

/// Render a document rooted at `root`.
pub(crate) fn render_document<W: Write>(
    root: &XmlElement,
    indent: bool,
    writer: &mut W,
) -> Result<()> {
    let mut emitter = XmlEmitter::new(writer, indent);
    emitter.write_bytes(DECLARATION)?;
    emitter.write_newline()?;
    emitter.render_element(root, 0)?;
    Ok(())
}

struct XmlEmitter<'w, W: Write> {
    writer: &'w mut W,
    indent: bool,
}

impl<'w, W: Write> XmlEmitter<'w, W> {
    fn new(writer: &'w mut W, indent: bool) -> Self {
        XmlEmitter { writer, indent }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer
            .write_all(bytes)
            .map_err(|source| IdmefError::Io {
                action: "writing XML output",
                source,
            })
    }

    fn write_indent(&mut self, level: usize) -> Result<()> {
        if !self.indent {
            return Ok(());
        }
        for _ in 0..level {
            self.write_bytes(b" ")?;
        }
        Ok(())
    }

    fn write_newline(&mut self) -> Result<()> {
        if self.indent {
            self.write_bytes(b"\n")?;
        }
        Ok(())
    }

    fn render_element(&mut self, element: &XmlElement, indent: usize) -> Result<()> {
        self.write_indent(indent)?;
        self.write_bytes(b"<")?;
        self.write_bytes(element.name.as_bytes())?;

        for attr in &element.attributes {
            self.write_bytes(b" ")?;
            self.write_bytes(attr.name.as_bytes())?;
            self.write_bytes(b"=\"")?;
            self.write_escaped_str(&attr.value, true)?;
            self.write_bytes(b"\"")?;
        }

        if element.children.is_empty() {
            self.write_bytes(b"/>")?;
            self.write_newline()?;
            return Ok(());
        }

        self.write_bytes(b">")?;

        if !element.has_element_children() {
            for node in &element.children {
                if let XmlNode::Text(text) = node {
                    self.write_escaped_str(text, false)?;
                }
            }
            self.write_close_tag(&element.name)?;
            self.write_newline()?;
            return Ok(());
        }

        self.write_newline()?;

        for node in &element.children {
            match node {
                XmlNode::Element(child) => {
                    self.render_element(child, indent + INDENT_WIDTH)?;
                }
                XmlNode::Text(text) => {
                    // Mixed content; whitespace-only runs are layout and are dropped.
                    if text.trim().is_empty() {
                        continue;
                    }
                    self.write_indent(indent + INDENT_WIDTH)?;
                    self.write_escaped_str(text.trim(), false)?;
                    self.write_newline()?;
                }
            }
        }

        self.write_indent(indent)?;
        self.write_close_tag(&element.name)?;
        self.write_newline()?;
        Ok(())
    }

    fn write_close_tag(&mut self, name: &str) -> Result<()> {
        self.write_bytes(b"</")?;
        self.write_bytes(name.as_bytes())?;
        self.write_bytes(b">")
    }

    fn write_escaped_str(&mut self, text: &str, in_attribute: bool) -> Result<()> {
        let mut start = 0;
        for (idx, ch) in text.char_indices() {
            let replacement: &[u8] = match ch {
                '&' => b"&amp;",
                '<' => b"&lt;",
                '>' => b"&gt;",
                '"' if in_attribute => b"&quot;",
                '\'' if in_attribute => b"&apos;",
                '\n' if in_attribute => b"&#10;",
                '\t' if in_attribute => b"&#9;",
                '\r' => b"&#13;",
                _ => continue,
            };
            self.write_bytes(&text.as_bytes()[start..idx])?;
            self.write_bytes(replacement)?;
            start = idx + ch.len_utf8();
        }
        self.write_bytes(&text.as_bytes()[start..])
    }
}
