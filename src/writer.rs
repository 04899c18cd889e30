use std::{fmt::Write, ops::Deref};

use crate::error::Result;

pub(crate) trait FormatWriter {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()>;
}

pub(crate) struct FormatContext<'a, W: Write> {
    pub(crate) writer: &'a mut W,
}

impl<'a, W: Write> FormatContext<'a, W> {
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }

    pub(crate) fn write_ident(&mut self, part: &str) -> Result<()> {
        self.write_quoted('"', part)
    }

    pub(crate) fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_quoted('\'', value)
    }

    /// Write `value` between `quote`, doubling any `quote` inside it.
    fn write_quoted(&mut self, quote: char, value: &str) -> Result<()> {
        self.writer.write_char(quote)?;

        let mut last = 0;
        for (index, char) in value.char_indices() {
            if char == quote {
                // include the quote itself, then write it once more
                let end = index + char.len_utf8();
                self.writer.write_str(&value[last..end])?;
                self.writer.write_char(quote)?;
                last = end;
            }
        }

        // write trailing slice
        if last < value.len() {
            self.writer.write_str(&value[last..])?;
        }

        self.writer.write_char(quote)?;
        Ok(())
    }

    /// Write `items` separated by `", "`.
    pub(crate) fn write_list<T: FormatWriter>(&mut self, items: &[T]) -> Result<()> {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.writer.write_str(", ")?;
            }
            item.format_writer(self)?;
        }
        Ok(())
    }
}

impl<D> FormatWriter for D
where
    D: Deref,
    D::Target: FormatWriter,
{
    fn format_writer<W: Write>(&self, ctx: &mut FormatContext<'_, W>) -> Result<()> {
        self.deref().format_writer(ctx)
    }
}
