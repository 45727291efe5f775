//! Buffered XML writer with minimal allocations

use crate::error::Result;
use std::borrow::Cow;
use std::io::Write;

/// Default number of buffered bytes before pushing to the underlying writer
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Fast XML writer that batches small writes into one buffer
pub struct XmlWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,
    threshold: usize,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_threshold(writer, DEFAULT_BUFFER_SIZE)
    }

    /// Create a writer that flushes once `threshold` bytes are buffered
    pub fn with_threshold(writer: W, threshold: usize) -> Self {
        let threshold = threshold.max(256);
        XmlWriter {
            writer,
            buffer: Vec::with_capacity(threshold + 512),
            threshold,
        }
    }

    /// Write raw bytes directly
    #[inline]
    pub fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(data);
        if self.buffer.len() > self.threshold {
            self.drain()?;
        }
        Ok(())
    }

    /// Write string data
    #[inline]
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_raw(s.as_bytes())
    }

    /// Write XML element start tag, left open for attributes
    #[inline]
    pub fn start_element(&mut self, name: &str) -> Result<()> {
        self.write_raw(b"<")?;
        self.write_str(name)
    }

    /// Write XML element end tag
    #[inline]
    pub fn end_element(&mut self, name: &str) -> Result<()> {
        self.write_raw(b"</")?;
        self.write_str(name)?;
        self.write_raw(b">")
    }

    /// Write self-closing element without attributes
    #[inline]
    pub fn empty_element(&mut self, name: &str) -> Result<()> {
        self.write_raw(b"<")?;
        self.write_str(name)?;
        self.write_raw(b"/>")
    }

    /// Write attribute, escaping the value
    #[inline]
    pub fn attribute(&mut self, name: &str, value: &str) -> Result<()> {
        self.write_raw(b" ")?;
        self.write_str(name)?;
        self.write_raw(b"=\"")?;
        let escaped = escape_attribute(value);
        self.write_str(&escaped)?;
        self.write_raw(b"\"")
    }

    /// Write attribute with integer value
    #[inline]
    pub fn attribute_int<I: itoa::Integer>(&mut self, name: &str, value: I) -> Result<()> {
        let mut num_buffer = itoa::Buffer::new();
        self.write_raw(b" ")?;
        self.write_str(name)?;
        self.write_raw(b"=\"")?;
        self.write_str(num_buffer.format(value))?;
        self.write_raw(b"\"")
    }

    /// Close start tag
    #[inline]
    pub fn close_start_tag(&mut self) -> Result<()> {
        self.write_raw(b">")
    }

    /// Close start tag as an empty element
    #[inline]
    pub fn close_empty(&mut self) -> Result<()> {
        self.write_raw(b"/>")
    }

    /// Write text content with XML escaping
    #[inline]
    pub fn write_escaped(&mut self, text: &str) -> Result<()> {
        let escaped = escape_text(text);
        self.write_str(&escaped)
    }

    /// `<name>text</name>` with escaped text
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start_element(name)?;
        self.close_start_tag()?;
        self.write_escaped(text)?;
        self.end_element(name)
    }

    fn drain(&mut self) -> Result<()> {
        if !self.buffer.is_empty() {
            self.writer.write_all(&self.buffer)?;
            self.buffer.clear();
        }
        Ok(())
    }

    /// Flush buffer to underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.drain()?;
        self.writer.flush()?;
        Ok(())
    }

    /// Underlying writer. Call [`flush`](Self::flush) first, or buffered
    /// bytes will land after anything written through it.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Flush and give back the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}

/// Escape an attribute value (`&`, `<`, `>`, `"`, `'`)
pub fn escape_attribute(s: &str) -> Cow<'_, str> {
    escape(s, true)
}

/// Escape text content (`&`, `<`, `>`)
pub fn escape_text(s: &str) -> Cow<'_, str> {
    escape(s, false)
}

fn escape(s: &str, attribute: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| match c {
        '&' | '<' | '>' => true,
        '"' | '\'' => attribute,
        _ => false,
    };
    if !s.chars().any(needs_escape) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\'' if attribute => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_writer() {
        let mut output = Vec::new();
        let mut writer = XmlWriter::new(&mut output);

        writer.start_element("root").unwrap();
        writer.attribute("attr", "value").unwrap();
        writer.attribute_int("n", 42usize).unwrap();
        writer.close_start_tag().unwrap();
        writer.write_str("content").unwrap();
        writer.end_element("root").unwrap();
        writer.flush().unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "<root attr=\"value\" n=\"42\">content</root>"
        );
    }

    #[test]
    fn test_xml_escaping() {
        let mut output = Vec::new();
        let mut writer = XmlWriter::new(&mut output);

        writer.write_escaped("<test>&\"value\"</test>").unwrap();
        writer.flush().unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "&lt;test&gt;&amp;\"value\"&lt;/test&gt;"
        );
        assert_eq!(escape_attribute("a\"b'c"), "a&quot;b&apos;c");
        assert!(matches!(escape_text("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_small_threshold_flushes_in_chunks() {
        let mut output = Vec::new();
        {
            let mut writer = XmlWriter::with_threshold(&mut output, 0);
            for _ in 0..100 {
                writer.empty_element("table:table-cell").unwrap();
            }
            writer.flush().unwrap();
        }
        assert_eq!(output.len(), 100 * "<table:table-cell/>".len());
    }
}
