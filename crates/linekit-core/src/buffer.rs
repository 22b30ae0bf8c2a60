//! Line buffer and cursor model.
//!
//! [`LineBuffer`] owns the edited lines, the logical cursor and the display the
//! lines are shown on. Every operation keeps the terminal cursor in step with
//! the logical one. Out-of-range moves never fail: they are ignored (vertical
//! moves, `move_right`) or clamped (`move_left`), and callers rely on that for
//! boundary safety.

use log::{debug, trace};

use crate::config::{EditorConfig, RenderWidthPolicy};
use crate::display::DisplaySink;
use crate::error::EditorResult;

/// Logical edit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cursor {
    /// Index of the line being edited
    pub row: usize,
    /// Index in the line where the next character is inserted
    pub col: usize,
}

impl Cursor {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Plain copy of the buffer state, detached from any display.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferSnapshot {
    pub lines: Vec<String>,
    pub cursor: Cursor,
    pub max_rendered_width: usize,
}

/// Multi-line text buffer bound to a display.
///
/// Lines hold printable ASCII only, so byte offsets and columns coincide.
pub struct LineBuffer {
    /// Never empty
    lines: Vec<String>,
    cursor: Cursor,
    /// Erase width used before repainting a row
    max_rendered_width: usize,
    width_policy: RenderWidthPolicy,
    display: Box<dyn DisplaySink>,
}

impl std::fmt::Debug for LineBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineBuffer")
            .field("lines", &self.lines)
            .field("cursor", &self.cursor)
            .field("max_rendered_width", &self.max_rendered_width)
            .field("width_policy", &self.width_policy)
            .finish_non_exhaustive()
    }
}

fn is_printable(ch: char) -> bool {
    matches!(ch, ' '..='~')
}

impl LineBuffer {
    /// Create an empty buffer (one empty line, cursor at 0,0).
    ///
    /// # Examples
    ///
    /// ```
    /// use linekit_core::buffer::{Cursor, LineBuffer};
    /// use linekit_core::display::RecordingDisplay;
    ///
    /// let buffer = LineBuffer::new(Box::new(RecordingDisplay::new()));
    /// assert_eq!(buffer.lines(), [""]);
    /// assert_eq!(buffer.cursor(), Cursor::new(0, 0));
    /// ```
    pub fn new(display: Box<dyn DisplaySink>) -> Self {
        Self::with_config(display, &EditorConfig::default())
    }

    pub fn with_config(display: Box<dyn DisplaySink>, config: &EditorConfig) -> Self {
        LineBuffer {
            lines: vec![String::new()],
            cursor: Cursor::default(),
            max_rendered_width: config.initial_render_width.max(1),
            width_policy: config.render_width_policy,
            display,
        }
    }

    /// Rebuild a buffer from a snapshot.
    ///
    /// Characters outside printable ASCII are dropped, an empty line list
    /// becomes `[""]` and the cursor is clamped into range.
    pub fn from_snapshot(
        snapshot: BufferSnapshot,
        display: Box<dyn DisplaySink>,
        config: &EditorConfig,
    ) -> Self {
        let mut lines: Vec<String> = snapshot
            .lines
            .into_iter()
            .map(|line| line.chars().filter(|&ch| is_printable(ch)).collect())
            .collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        let row = snapshot.cursor.row.min(lines.len() - 1);
        let col = snapshot.cursor.col.min(lines[row].len());

        LineBuffer {
            lines,
            cursor: Cursor::new(row, col),
            max_rendered_width: snapshot.max_rendered_width.max(1),
            width_policy: config.render_width_policy,
            display,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of the line under the cursor.
    pub fn current_line(&self) -> &str {
        &self.lines[self.cursor.row]
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn max_rendered_width(&self) -> usize {
        self.max_rendered_width
    }

    /// All lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            lines: self.lines.clone(),
            cursor: self.cursor,
            max_rendered_width: self.max_rendered_width,
        }
    }

    /// The display this buffer paints on, for embedding code that wants to
    /// draw around the editor.
    pub fn display_mut(&mut self) -> &mut dyn DisplaySink {
        self.display.as_mut()
    }

    fn current_len(&self) -> usize {
        self.lines[self.cursor.row].len()
    }

    fn clamp_col(&mut self) {
        let len = self.current_len();
        if self.cursor.col > len {
            self.cursor.col = len;
        }
    }

    /// Move up `amt` lines. Ignored if that would leave the buffer.
    pub fn move_up(&mut self, amt: usize) -> EditorResult<()> {
        let Some(target) = self.cursor.row.checked_sub(amt) else {
            trace!("move_up({amt}) ignored at row {}", self.cursor.row);
            return Ok(());
        };
        self.cursor.row = target;
        self.clamp_col();
        self.display.move_up(amt)?;
        Ok(())
    }

    /// Move down `amt` lines. Ignored if that would leave the buffer.
    pub fn move_down(&mut self, amt: usize) -> EditorResult<()> {
        let target = self.cursor.row.saturating_add(amt);
        if target >= self.lines.len() {
            trace!("move_down({amt}) ignored at row {}", self.cursor.row);
            return Ok(());
        }
        self.cursor.row = target;
        self.clamp_col();
        self.display.move_down(amt)?;
        Ok(())
    }

    /// Move right `amt` columns, or not at all if that passes the line end.
    pub fn move_right(&mut self, amt: usize) -> EditorResult<()> {
        let target = self.cursor.col.saturating_add(amt);
        if target > self.current_len() {
            trace!("move_right({amt}) ignored at col {}", self.cursor.col);
            return Ok(());
        }
        self.display.move_right(amt)?;
        self.cursor.col = target;
        Ok(())
    }

    /// Move left `amt` columns, stopping at column 0.
    ///
    /// Unlike [`move_right`](Self::move_right) an overlong move is clamped,
    /// not rejected.
    pub fn move_left(&mut self, amt: usize) -> EditorResult<()> {
        if amt >= self.cursor.col {
            let col = self.cursor.col;
            self.cursor.col = 0;
            self.display.move_left(col)?;
        } else {
            self.cursor.col -= amt;
            self.display.move_left(amt)?;
        }
        Ok(())
    }

    /// Insert `ch` at the cursor and advance the cursor by one.
    ///
    /// Characters outside printable ASCII are ignored. The display is not
    /// touched; the caller repaints the row.
    pub fn insert_printable(&mut self, ch: char) {
        if !is_printable(ch) {
            trace!("insert_printable ignored non-printable {:?}", ch);
            return;
        }
        let Cursor { row, col } = self.cursor;
        self.lines[row].insert(col, ch);
        self.cursor.col += 1;
    }

    /// Remove the character before the cursor. No-op at column 0; lines are
    /// never merged.
    pub fn delete_backward(&mut self) {
        let Cursor { row, col } = self.cursor;
        if col == 0 {
            return;
        }
        self.lines[row].remove(col - 1);
        self.cursor.col -= 1;
    }

    /// Break the current line at the cursor. The tail becomes a new line below
    /// and the cursor moves to its start.
    ///
    /// The finished head is repainted, the cursor drops one row and every line
    /// below the new one is redrawn shifted down, after which the terminal
    /// cursor returns to the new row.
    pub fn split_line_at_cursor(&mut self) -> EditorResult<()> {
        let Cursor { row, col } = self.cursor;
        let tail = self.lines[row].split_off(col);
        self.lines.insert(row + 1, tail);
        self.cursor = Cursor::new(row + 1, 0);
        debug!("split line {row} at col {col}, {} lines", self.lines.len());

        let width = self.max_rendered_width;
        self.display.erase_line(width)?;
        self.display.write_text(&self.lines[row])?;
        self.display.move_left(width)?;
        self.display.write_text("\n")?;
        self.redraw_below_cursor()
    }

    fn redraw_below_cursor(&mut self) -> EditorResult<()> {
        let width = self.max_rendered_width;
        let row = self.cursor.row;
        for line in &self.lines[row + 1..] {
            self.display.write_text("\n")?;
            self.display.erase_line(width)?;
            self.display.write_text(line)?;
        }
        self.display.move_up(self.lines.len() - 1 - row)?;
        Ok(())
    }

    /// Redraw the row under the cursor and put the terminal cursor back at
    /// the logical column.
    ///
    /// Called after every input event, so this is also where the erase width
    /// advances.
    pub fn repaint_current_line(&mut self) -> EditorResult<()> {
        self.max_rendered_width = match self.width_policy {
            RenderWidthPolicy::Monotonic => self.max_rendered_width + 1,
            RenderWidthPolicy::TrackLine => self.max_rendered_width.max(self.current_len() + 1),
        };

        let width = self.max_rendered_width;
        self.display.erase_line(width)?;
        self.display.write_text(&self.lines[self.cursor.row])?;
        self.display.move_left(width)?;
        self.display.move_right(self.cursor.col)?;
        Ok(())
    }

    pub fn flush(&mut self) -> EditorResult<()> {
        self.display.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayOp, RecordingDisplay};

    fn buffer() -> (LineBuffer, RecordingDisplay) {
        let display = RecordingDisplay::new();
        (LineBuffer::new(Box::new(display.clone())), display)
    }

    fn buffer_with(lines: &[&str], cursor: Cursor) -> (LineBuffer, RecordingDisplay) {
        let display = RecordingDisplay::new();
        let snapshot = BufferSnapshot {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            cursor,
            max_rendered_width: 1,
        };
        let buffer =
            LineBuffer::from_snapshot(snapshot, Box::new(display.clone()), &EditorConfig::default());
        (buffer, display)
    }

    fn type_str(buffer: &mut LineBuffer, text: &str) {
        for ch in text.chars() {
            buffer.insert_printable(ch);
        }
    }

    #[test]
    fn test_new_buffer() {
        let (buffer, display) = buffer();
        assert_eq!(buffer.lines(), [""]);
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.cursor(), Cursor::new(0, 0));
        assert_eq!(buffer.max_rendered_width(), 1);
        assert_eq!(buffer.current_line(), "");
        assert!(display.ops().is_empty());
    }

    #[test]
    fn test_insert_printable() {
        let (mut buffer, _) = buffer();
        type_str(&mut buffer, "hllo");
        buffer.move_left(3).unwrap();
        buffer.insert_printable('e');
        assert_eq!(buffer.current_line(), "hello");
        assert_eq!(buffer.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_insert_rejects_non_printable() {
        let (mut buffer, _) = buffer();
        buffer.insert_printable('\n');
        buffer.insert_printable('\u{7f}');
        buffer.insert_printable('é');
        assert_eq!(buffer.current_line(), "");
        assert_eq!(buffer.cursor().col, 0);
    }

    #[test]
    fn test_delete_backward() {
        let (mut buffer, _) = buffer();
        type_str(&mut buffer, "abc");
        buffer.move_left(1).unwrap();
        buffer.delete_backward();
        assert_eq!(buffer.current_line(), "ac");
        assert_eq!(buffer.cursor().col, 1);
    }

    #[test]
    fn test_delete_backward_at_column_zero_is_noop() {
        let (mut buffer, _) = buffer_with(&["ab", "cd"], Cursor::new(1, 0));
        buffer.delete_backward();
        assert_eq!(buffer.lines(), ["ab", "cd"]);
        assert_eq!(buffer.cursor(), Cursor::new(1, 0));
    }

    #[test]
    fn test_insert_then_delete_round_trip() {
        let (mut buffer, _) = buffer_with(&["hello"], Cursor::new(0, 2));
        let before = buffer.snapshot();
        buffer.insert_printable('x');
        buffer.delete_backward();
        assert_eq!(buffer.current_line(), before.lines[0]);
        assert_eq!(buffer.cursor(), before.cursor);
    }

    #[test]
    fn test_move_right_rejects_overflow() {
        let (mut buffer, display) = buffer_with(&["abc"], Cursor::new(0, 1));
        buffer.move_right(3).unwrap();
        assert_eq!(buffer.cursor().col, 1);
        assert!(display.ops().is_empty());

        buffer.move_right(2).unwrap();
        assert_eq!(buffer.cursor().col, 3);
        assert_eq!(display.ops(), vec![DisplayOp::Right(2)]);
    }

    #[test]
    fn test_move_left_clamps_to_zero() {
        let (mut buffer, display) = buffer_with(&["hello"], Cursor::new(0, 5));
        buffer.move_left(10).unwrap();
        assert_eq!(buffer.cursor().col, 0);
        assert_eq!(display.ops(), vec![DisplayOp::Left(5)]);
    }

    #[test]
    fn test_move_left_exact_distance_clamps() {
        let (mut buffer, display) = buffer_with(&["hello"], Cursor::new(0, 3));
        buffer.move_left(3).unwrap();
        assert_eq!(buffer.cursor().col, 0);
        assert_eq!(display.ops(), vec![DisplayOp::Left(3)]);

        // already at column 0: nothing to draw
        buffer.move_left(1).unwrap();
        assert_eq!(buffer.cursor().col, 0);
        assert_eq!(display.ops(), vec![DisplayOp::Left(3)]);
    }

    #[test]
    fn test_move_left_partial() {
        let (mut buffer, display) = buffer_with(&["hello"], Cursor::new(0, 4));
        buffer.move_left(1).unwrap();
        assert_eq!(buffer.cursor().col, 3);
        assert_eq!(display.ops(), vec![DisplayOp::Left(1)]);
    }

    #[test]
    fn test_vertical_moves_reject_out_of_range() {
        let (mut buffer, display) = buffer_with(&["a", "b", "c"], Cursor::new(1, 0));
        buffer.move_up(2).unwrap();
        assert_eq!(buffer.cursor().row, 1);
        buffer.move_down(2).unwrap();
        assert_eq!(buffer.cursor().row, 1);
        assert!(display.ops().is_empty());

        buffer.move_down(1).unwrap();
        assert_eq!(buffer.cursor().row, 2);
        buffer.move_up(2).unwrap();
        assert_eq!(buffer.cursor().row, 0);
        assert_eq!(display.ops(), vec![DisplayOp::Down(1), DisplayOp::Up(2)]);
    }

    #[test]
    fn test_vertical_move_clamps_column() {
        let (mut buffer, _) = buffer_with(&["ab", "hello"], Cursor::new(1, 5));
        buffer.move_up(1).unwrap();
        assert_eq!(buffer.cursor(), Cursor::new(0, 2));

        // column is not restored when moving back down
        buffer.move_down(1).unwrap();
        assert_eq!(buffer.cursor(), Cursor::new(1, 2));
    }

    #[test]
    fn test_split_line_at_cursor() {
        let (mut buffer, _) = buffer_with(&["hello world"], Cursor::new(0, 5));
        buffer.split_line_at_cursor().unwrap();
        assert_eq!(buffer.lines(), ["hello", " world"]);
        assert_eq!(buffer.cursor(), Cursor::new(1, 0));
    }

    #[test]
    fn test_split_preserves_text_and_counts() {
        for col in 0..=6 {
            let (mut buffer, _) = buffer_with(&["x", "abcdef", "y"], Cursor::new(1, col));
            buffer.split_line_at_cursor().unwrap();
            assert_eq!(buffer.line_count(), 4);
            assert_eq!(buffer.cursor(), Cursor::new(2, 0));
            let rejoined = format!("{}{}", buffer.lines()[1], buffer.lines()[2]);
            assert_eq!(rejoined, "abcdef");
            assert_eq!(buffer.lines()[0], "x");
            assert_eq!(buffer.lines()[3], "y");
        }
    }

    #[test]
    fn test_split_display_sequence() {
        let (mut buffer, display) = buffer_with(&["abcd", "tail"], Cursor::new(0, 2));
        buffer.split_line_at_cursor().unwrap();
        assert_eq!(buffer.lines(), ["ab", "cd", "tail"]);
        assert_eq!(
            display.ops(),
            vec![
                DisplayOp::Left(1),
                DisplayOp::ClearToEndOfLine,
                DisplayOp::Text("ab".to_string()),
                DisplayOp::Left(1),
                DisplayOp::Text("\n".to_string()),
                // lines below the new row shift down by one
                DisplayOp::Text("\n".to_string()),
                DisplayOp::Left(1),
                DisplayOp::ClearToEndOfLine,
                DisplayOp::Text("tail".to_string()),
                DisplayOp::Up(1),
            ]
        );
    }

    #[test]
    fn test_split_on_last_line_has_nothing_below() {
        let (mut buffer, display) = buffer_with(&["ab"], Cursor::new(0, 2));
        buffer.split_line_at_cursor().unwrap();
        assert_eq!(buffer.lines(), ["ab", ""]);
        let ops = display.ops();
        assert_eq!(ops.last(), Some(&DisplayOp::Text("\n".to_string())));
        assert!(!ops.iter().any(|op| matches!(op, DisplayOp::Up(_))));
    }

    #[test]
    fn test_repaint_current_line() {
        let (mut buffer, display) = buffer_with(&["hello"], Cursor::new(0, 3));
        buffer.repaint_current_line().unwrap();
        assert_eq!(buffer.max_rendered_width(), 2);
        assert_eq!(
            display.ops(),
            vec![
                DisplayOp::Left(2),
                DisplayOp::ClearToEndOfLine,
                DisplayOp::Text("hello".to_string()),
                DisplayOp::Left(2),
                DisplayOp::Right(3),
            ]
        );
    }

    #[test]
    fn test_render_width_grows_monotonically() {
        let (mut buffer, _) = buffer();
        for expected in 2..12 {
            buffer.repaint_current_line().unwrap();
            assert_eq!(buffer.max_rendered_width(), expected);
        }
    }

    #[test]
    fn test_track_line_policy_bounds_render_width() {
        let display = RecordingDisplay::new();
        let config = EditorConfig::new().with_render_width_policy(RenderWidthPolicy::TrackLine);
        let mut buffer = LineBuffer::with_config(Box::new(display), &config);

        type_str(&mut buffer, "abc");
        for _ in 0..10 {
            buffer.repaint_current_line().unwrap();
        }
        assert_eq!(buffer.max_rendered_width(), 4);

        buffer.delete_backward();
        buffer.repaint_current_line().unwrap();
        // never shrinks, the old text still has to be erased
        assert_eq!(buffer.max_rendered_width(), 4);
    }

    #[test]
    fn test_horizontal_moves_keep_column_in_range() {
        let (mut buffer, _) = buffer_with(&["abcdefgh"], Cursor::new(0, 0));
        let mut seed: u32 = 7;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let amt = (seed >> 16) as usize % 12;
            if seed & 1 == 0 {
                buffer.move_left(amt).unwrap();
            } else {
                buffer.move_right(amt).unwrap();
            }
            assert!(buffer.cursor().col <= buffer.current_line().len());
        }
    }

    #[test]
    fn test_vertical_moves_keep_cursor_in_range() {
        let (mut buffer, _) = buffer_with(
            &["a", "", "abcdefg", "abc", "abcdefghijk"],
            Cursor::new(4, 11),
        );
        let mut seed: u32 = 42;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let amt = (seed >> 16) as usize % 6;
            match seed % 3 {
                0 => buffer.move_up(amt).unwrap(),
                1 => buffer.move_down(amt).unwrap(),
                _ => buffer.move_right(1).unwrap(),
            }
            let cursor = buffer.cursor();
            assert!(cursor.row < buffer.line_count());
            assert!(cursor.col <= buffer.lines()[cursor.row].len());
        }
    }

    #[test]
    fn test_from_snapshot_sanitizes() {
        let display = RecordingDisplay::new();
        let snapshot = BufferSnapshot {
            lines: vec![],
            cursor: Cursor::new(3, 9),
            max_rendered_width: 0,
        };
        let buffer =
            LineBuffer::from_snapshot(snapshot, Box::new(display.clone()), &EditorConfig::default());
        assert_eq!(buffer.lines(), [""]);
        assert_eq!(buffer.cursor(), Cursor::new(0, 0));
        assert_eq!(buffer.max_rendered_width(), 1);

        let snapshot = BufferSnapshot {
            lines: vec!["a\tb".to_string(), "héllo".to_string()],
            cursor: Cursor::new(1, 10),
            max_rendered_width: 7,
        };
        let buffer =
            LineBuffer::from_snapshot(snapshot, Box::new(display), &EditorConfig::default());
        assert_eq!(buffer.lines(), ["ab", "hllo"]);
        assert_eq!(buffer.cursor(), Cursor::new(1, 4));
        assert_eq!(buffer.max_rendered_width(), 7);
    }

    #[test]
    fn test_text_joins_lines() {
        let (buffer, _) = buffer_with(&["ab", "", "c"], Cursor::new(0, 0));
        assert_eq!(buffer.text(), "ab\n\nc");
        assert_eq!(buffer.line(1), Some(""));
        assert_eq!(buffer.line(3), None);
    }

    #[test]
    fn test_flush_reaches_display() {
        let (mut buffer, display) = buffer();
        buffer.flush().unwrap();
        assert_eq!(display.flush_count(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_snapshot_serialization() {
        let (mut buffer, _) = buffer();
        type_str(&mut buffer, "ab");
        let json = serde_json::to_string(&buffer.snapshot()).unwrap();
        let restored: BufferSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, buffer.snapshot());
    }
}
