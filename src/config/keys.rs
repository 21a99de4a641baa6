//! Key table of the resource file
//!
//! Every persisted field has exactly one variant here. Load and save both
//! walk [`ConfigKey::ALL`] and dispatch through exhaustive matches, so a key
//! added on one side without the other fails to compile.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Port,
    Baudrate,
    Bits,
    Stopbits,
    Parity,
    FlowControl,
    WaitDelay,
    WaitChar,
    Rs485RtsTimeBeforeTx,
    Rs485RtsTimeAfterTx,
    Macros,
    RawFilename,
    Echo,
    CrlfAuto,
    DisablePortLock,
    Font,
    Timestamp,
    BlockCursor,
    ShowCursor,
    Rows,
    Columns,
    Scrollback,
    VisualBell,
    ForegroundRed,
    ForegroundGreen,
    ForegroundBlue,
    ForegroundAlpha,
    BackgroundRed,
    BackgroundGreen,
    BackgroundBlue,
    BackgroundAlpha,
}

impl ConfigKey {
    /// All keys in on-disk order
    pub const ALL: [ConfigKey; 31] = [
        ConfigKey::Port,
        ConfigKey::Baudrate,
        ConfigKey::Bits,
        ConfigKey::Stopbits,
        ConfigKey::Parity,
        ConfigKey::FlowControl,
        ConfigKey::WaitDelay,
        ConfigKey::WaitChar,
        ConfigKey::Rs485RtsTimeBeforeTx,
        ConfigKey::Rs485RtsTimeAfterTx,
        ConfigKey::Macros,
        ConfigKey::RawFilename,
        ConfigKey::Echo,
        ConfigKey::CrlfAuto,
        ConfigKey::DisablePortLock,
        ConfigKey::Font,
        ConfigKey::Timestamp,
        ConfigKey::BlockCursor,
        ConfigKey::ShowCursor,
        ConfigKey::Rows,
        ConfigKey::Columns,
        ConfigKey::Scrollback,
        ConfigKey::VisualBell,
        ConfigKey::ForegroundRed,
        ConfigKey::ForegroundGreen,
        ConfigKey::ForegroundBlue,
        ConfigKey::ForegroundAlpha,
        ConfigKey::BackgroundRed,
        ConfigKey::BackgroundGreen,
        ConfigKey::BackgroundBlue,
        ConfigKey::BackgroundAlpha,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Port => "port",
            ConfigKey::Baudrate => "baudrate",
            ConfigKey::Bits => "bits",
            ConfigKey::Stopbits => "stopbits",
            ConfigKey::Parity => "parity",
            ConfigKey::FlowControl => "flow_control",
            ConfigKey::WaitDelay => "term_wait_delay",
            ConfigKey::WaitChar => "term_wait_char",
            ConfigKey::Rs485RtsTimeBeforeTx => "rs485_rts_time_before_tx",
            ConfigKey::Rs485RtsTimeAfterTx => "rs485_rts_time_after_tx",
            ConfigKey::Macros => "macros",
            ConfigKey::RawFilename => "term_raw_filename",
            ConfigKey::Echo => "term_echo",
            ConfigKey::CrlfAuto => "term_crlfauto",
            ConfigKey::DisablePortLock => "disable_port_lock",
            ConfigKey::Font => "term_font",
            ConfigKey::Timestamp => "term_show_timestamp",
            ConfigKey::BlockCursor => "term_block_cursor",
            ConfigKey::ShowCursor => "term_show_cursor",
            ConfigKey::Rows => "term_rows",
            ConfigKey::Columns => "term_columns",
            ConfigKey::Scrollback => "term_scrollback",
            ConfigKey::VisualBell => "term_visual_bell",
            ConfigKey::ForegroundRed => "term_foreground_red",
            ConfigKey::ForegroundGreen => "term_foreground_green",
            ConfigKey::ForegroundBlue => "term_foreground_blue",
            ConfigKey::ForegroundAlpha => "term_foreground_alpha",
            ConfigKey::BackgroundRed => "term_background_red",
            ConfigKey::BackgroundGreen => "term_background_green",
            ConfigKey::BackgroundBlue => "term_background_blue",
            ConfigKey::BackgroundAlpha => "term_background_alpha",
        }
    }

    /// Reverse lookup, used when reporting unknown keys
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
