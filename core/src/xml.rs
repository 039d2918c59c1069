//! Minimal indented XML tag writer.
//!
//! This is not a general XML serializer: callers write one tag (or one text
//! block) per call and the writer keeps track of the nesting depth so the
//! output is indented four spaces per level. Values are written verbatim.

use std::io::{self, Write};

pub const INDENT_SPACES: usize = 4;

/// Shape of a single write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlTagType {
    /// Text only, indented one level deeper than the current tag.
    NoTag,
    /// `<tag attr>` and nest one level deeper.
    BeginOnly,
    /// Leave one level and write `</tag>`.
    EndOnly,
    /// `<tag attr>value</tag>` on one line.
    Short,
    /// `<tag attr>`, the value on its own indented lines, then `</tag>`.
    Long,
    /// `<tag attr/>`.
    Empty,
}

fn push_indent(buf: &mut String, level: usize) {
    buf.extend(std::iter::repeat(' ').take(level * INDENT_SPACES));
}

/// Render one write at `indent_level` without a trailing newline.
pub fn tags_to_string(
    tag: &str,
    tag_type: XmlTagType,
    attribute: Option<&str>,
    value: Option<&str>,
    indent_level: usize,
) -> String {
    let mut buf = String::new();
    push_indent(&mut buf, indent_level);

    if tag_type != XmlTagType::NoTag {
        buf.push('<');
        if tag_type == XmlTagType::EndOnly {
            buf.push('/');
        }
        buf.push_str(tag);
        if let Some(attr) = attribute.filter(|a| !a.is_empty()) {
            buf.push(' ');
            buf.push_str(attr);
        }
        if tag_type == XmlTagType::Empty {
            buf.push('/');
        }
        buf.push('>');
    }

    match tag_type {
        XmlTagType::Empty | XmlTagType::BeginOnly | XmlTagType::EndOnly => return buf,
        XmlTagType::Long => buf.push('\n'),
        XmlTagType::NoTag | XmlTagType::Short => {}
    }

    if let Some(value) = value {
        if matches!(tag_type, XmlTagType::Long | XmlTagType::NoTag) {
            push_indent(&mut buf, indent_level + 1);
            for ch in value.chars() {
                buf.push(ch);
                if ch == '\n' {
                    push_indent(&mut buf, indent_level + 1);
                }
            }
            buf.push('\n');
            if tag_type == XmlTagType::Long {
                push_indent(&mut buf, indent_level);
            }
        } else {
            buf.push_str(value);
        }
    }

    if matches!(tag_type, XmlTagType::Long | XmlTagType::Short) {
        buf.push_str("</");
        buf.push_str(tag);
        buf.push('>');
    }
    buf
}

/// Line-oriented XML writer that tracks nesting depth.
pub struct XmlWriter<W: Write> {
    out: W,
    indent_level: usize,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, indent_level: 0 }
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Write one tag (or text block) followed by a newline.
    pub fn write_tags(
        &mut self,
        tag: &str,
        tag_type: XmlTagType,
        attribute: Option<&str>,
        value: Option<&str>,
    ) -> io::Result<()> {
        if tag_type == XmlTagType::EndOnly {
            self.indent_level = self.indent_level.saturating_sub(1);
        }
        let line = tags_to_string(tag, tag_type, attribute, value, self.indent_level);
        tracing::info!("xml_tags_write:{}", line);
        writeln!(self.out, "{}", line)?;
        if tag_type == XmlTagType::BeginOnly {
            self.indent_level += 1;
        }
        Ok(())
    }

    pub fn begin(&mut self, tag: &str) -> io::Result<()> {
        self.write_tags(tag, XmlTagType::BeginOnly, None, None)
    }

    pub fn end(&mut self, tag: &str) -> io::Result<()> {
        self.write_tags(tag, XmlTagType::EndOnly, None, None)
    }

    pub fn short(&mut self, tag: &str, value: &str) -> io::Result<()> {
        self.write_tags(tag, XmlTagType::Short, None, Some(value))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
