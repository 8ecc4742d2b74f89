//! Terminal surface: One line per list item, written through crossterm.
//!
//! The whole frame is queued into a pre-allocated buffer and flushed in a
//! single write to avoid flicker.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::Surface;
use crate::actor::ComponentId;
use crate::error::ListError;
use crate::markup::Node;

/// Configuration for the terminal surface.
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// First row of the list area.
    pub top: u16,
    /// Width in columns; longer lines are truncated.
    pub width: u16,
    /// Height in rows; the newest rows beyond it are not shown.
    pub height: u16,
    /// Color used for render faults.
    pub fault_fg: Color,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            top: 0,
            width: 80,
            height: 24,
            fault_fg: Color::Red,
        }
    }
}

/// A surface that prints list items as terminal lines.
///
/// Each child of the painted root is one line; its text content is shown.
pub struct TerminalSurface<W: Write + Send> {
    out: W,
    config: TerminalConfig,
    /// Pre-allocated frame buffer.
    frame: Vec<u8>,
}

impl<W: Write + Send> TerminalSurface<W> {
    /// Create a surface writing to `out`.
    pub fn new(out: W, config: TerminalConfig) -> Self {
        Self {
            out,
            config,
            frame: Vec::with_capacity(4096),
        }
    }

    /// Get the underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the surface and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_frame(&mut self) -> io::Result<()> {
        if !self.frame.is_empty() {
            self.out.write_all(&self.frame)?;
            self.out.flush()?;
        }
        self.frame.clear();
        Ok(())
    }

    /// First row and number of rows that fit on an addressable screen.
    fn area(&self) -> (u16, u16) {
        // Cursor rows are 1-based on the wire, so the last one is unusable
        let top = self.config.top.min(u16::MAX - 1);
        (top, self.config.height.min(u16::MAX - top))
    }

    fn clear_area(&mut self) -> io::Result<()> {
        let (top, _) = self.area();
        queue!(self.frame, MoveTo(0, top), Clear(ClearType::FromCursorDown))
    }
}

/// Truncate `text` to at most `width` display columns on a grapheme boundary.
pub(crate) fn truncate_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (offset, grapheme) in text.grapheme_indices(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if used + w > width {
            return &text[..offset];
        }
        used += w;
    }
    text
}

impl<W: Write + Send> Surface for TerminalSurface<W> {
    fn paint(&mut self, _id: ComponentId, tree: &Node) -> io::Result<()> {
        self.frame.clear();
        self.clear_area()?;

        let width = usize::from(self.config.width);
        let (top, height) = self.area();
        let rows = tree.children().iter().take(usize::from(height));
        for (row, item) in (0u16..).zip(rows) {
            let text = item.text_content();
            // Items are single lines; anything after a newline is dropped
            let line = text.lines().next().unwrap_or_default();
            queue!(
                self.frame,
                MoveTo(0, top.saturating_add(row)),
                Print(truncate_to_width(line, width))
            )?;
        }

        self.flush_frame()
    }

    fn fault(&mut self, _id: ComponentId, error: &ListError) -> io::Result<()> {
        self.frame.clear();
        self.clear_area()?;
        let message = format!("render failed: {error}");
        queue!(
            self.frame,
            SetForegroundColor(self.config.fault_fg),
            Print(truncate_to_width(&message, usize::from(self.config.width))),
            ResetColor
        )?;
        self.flush_frame()
    }

    fn remove(&mut self, _id: ComponentId) -> io::Result<()> {
        self.frame.clear();
        self.clear_area()?;
        self.flush_frame()
    }
}
