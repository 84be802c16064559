//! Editor widget seam and the rope-backed headless implementation.

use crate::constants::DEFAULT_LANGUAGE;
use crate::error::UnknownLanguage;
use crate::language::canonical;
use ropey::Rope;

/// 1-based line/column pair, as shown in the status text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

impl CursorPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Capabilities the session needs from a text editing widget.
///
/// Implementations own rendering and input handling; the session only talks to the
/// widget through this surface.
pub trait EditorWidget {
    /// Full buffer contents.
    fn value(&self) -> String;

    /// Replace the whole buffer. Programmatic; ignores the read-only flag.
    fn set_value(&mut self, text: &str);

    fn is_read_only(&self) -> bool;

    fn set_read_only(&mut self, read_only: bool);

    /// Current highlighting language id.
    fn language(&self) -> String;

    /// Switch highlighting language.
    ///
    /// # Errors
    /// Returns [`UnknownLanguage`] and keeps the previous language when the widget
    /// does not support `language`.
    fn set_language(&mut self, language: &str) -> Result<(), UnknownLanguage>;

    fn cursor(&self) -> CursorPosition;

    /// Move the cursor, clamping to the buffer.
    ///
    /// # Returns
    /// The position actually applied.
    fn set_cursor(&mut self, position: CursorPosition) -> CursorPosition;
}

/// Headless editor buffer backed by a rope.
#[derive(Clone, Debug)]
pub struct BufferEditor {
    rope: Rope,
    read_only: bool,
    language: String,
    cursor_char: usize,
}

impl Default for BufferEditor {
    fn default() -> Self {
        Self::new("")
    }
}

impl BufferEditor {
    /// Create an editable buffer using the default language.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            read_only: false,
            language: DEFAULT_LANGUAGE.to_string(),
            cursor_char: 0,
        }
    }

    /// Insert text at the cursor as if typed by the user.
    ///
    /// # Returns
    /// `false` (and leaves the buffer untouched) when the buffer is read-only.
    pub fn insert(&mut self, text: &str) -> bool {
        if self.read_only {
            return false;
        }
        let at = self.cursor_char.min(self.rope.len_chars());
        self.rope.insert(at, text);
        self.cursor_char = at + text.chars().count();
        true
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    /// Character length of a 0-based line, excluding its line break.
    fn line_len_chars(&self, line: usize) -> usize {
        if line >= self.line_count() {
            return 0;
        }
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }
}

impl EditorWidget for BufferEditor {
    fn value(&self) -> String {
        self.rope.to_string()
    }

    fn set_value(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor_char = self.cursor_char.min(self.rope.len_chars());
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn language(&self) -> String {
        self.language.clone()
    }

    fn set_language(&mut self, language: &str) -> Result<(), UnknownLanguage> {
        match canonical::lookup(language) {
            Some(option) => {
                self.language = option.id.to_string();
                Ok(())
            }
            None => Err(UnknownLanguage(language.to_string())),
        }
    }

    fn cursor(&self) -> CursorPosition {
        let clamped = self.cursor_char.min(self.rope.len_chars());
        let line = self.rope.char_to_line(clamped);
        let column = clamped - self.rope.line_to_char(line);
        CursorPosition::new(line + 1, column + 1)
    }

    fn set_cursor(&mut self, position: CursorPosition) -> CursorPosition {
        let line = position.line.max(1).min(self.line_count()) - 1;
        let column = (position.column.max(1) - 1).min(self.line_len_chars(line));
        self.cursor_char = self.rope.line_to_char(line) + column;
        CursorPosition::new(line + 1, column + 1)
    }
}
