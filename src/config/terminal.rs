//! Terminal widget settings

use serde::Serialize;

use crate::color::Rgba;
use crate::constants::terminal::*;
use crate::font::FontDescription;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminalConfig {
    /// Local echo of typed characters
    pub echo: bool,
    /// Append a line feed to every received carriage return
    pub crlf_auto: bool,
    pub timestamp: bool,
    pub block_cursor: bool,
    pub show_cursor: bool,
    pub visual_bell: bool,
    /// Delay after each line when sending a file (0 - 500 ms)
    pub wait_delay: i32,
    /// Character to wait for before sending the next line; `0xFF` is reserved
    pub wait_char: Option<u8>,
    pub rows: u16,
    pub columns: u16,
    pub scrollback: u32,
    pub foreground: Rgba,
    pub background: Rgba,
    /// `None` when the stored descriptor was missing or unusable
    pub font: Option<FontDescription>,
    /// Last file used for raw logging
    pub raw_filename: Option<String>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            echo: false,
            crlf_auto: false,
            timestamp: false,
            block_cursor: true,
            show_cursor: true,
            visual_bell: true,
            wait_delay: DEFAULT_DELAY,
            wait_char: None,
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            scrollback: DEFAULT_SCROLLBACK,
            foreground: Rgba::DEFAULT_FOREGROUND,
            background: Rgba::DEFAULT_BACKGROUND,
            font: Some(FontDescription::default_font()),
            raw_filename: None,
        }
    }
}

impl TerminalConfig {
    /// On-disk form of the wait character: a signed byte, `-1` when unset
    pub fn wait_char_value(&self) -> i64 {
        match self.wait_char {
            Some(c) => i64::from(c as i8),
            None => WAIT_CHAR_UNSET,
        }
    }

    /// Inverse of [`wait_char_value`](Self::wait_char_value)
    ///
    /// Values outside the signed byte range are truncated like the C `char` cast.
    /// Anything that truncates to the unset marker (`-1`, `255`, ...) is `None`.
    pub fn wait_char_from_value(value: i64) -> Option<u8> {
        let byte = value as i8;
        if i64::from(byte) == WAIT_CHAR_UNSET {
            None
        } else {
            Some(byte as u8)
        }
    }
}
