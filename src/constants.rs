//! Application-wide constants
//!
//! Magic numbers and string literals used by the configuration engine,
//! kept in one place so load, save, validation and reporting agree.

/// Configuration file locations
pub mod paths {
    /// File name of the resource file, both at the legacy and current location
    pub const CONFIG_FILENAME: &str = ".gtktermrc";

    /// File name of the copy taken at every startup
    pub const BACKUP_FILENAME: &str = ".gtktermrc.v1";

    /// Section created on first run and loaded at startup
    pub const DEFAULT_SECTION: &str = "default";
}

/// Hard-coded serial port defaults
pub mod port {
    pub const DEFAULT_PORT: &str = "/dev/ttyS0";
    pub const DEFAULT_BAUDRATE: u32 = 9600;
    pub const DEFAULT_BITS: i32 = 8;
    pub const DEFAULT_STOPBITS: i32 = 1;

    /// RTS guard time around an RS485 transmission (ms)
    pub const DEFAULT_DELAY_RS485: u32 = 30;

    /// Baud rates every supported UART is expected to handle
    pub const STANDARD_BAUDRATES: [u32; 16] = [
        300, 600, 1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200, 230400, 460800, 576000,
        921600, 1_000_000, 2_000_000,
    ];
}

/// Hard-coded terminal defaults
pub mod terminal {
    /// End-of-line wait delay (ms)
    pub const DEFAULT_DELAY: i32 = 0;

    /// On-disk value of an unset wait character
    pub const WAIT_CHAR_UNSET: i64 = -1;

    pub const DEFAULT_FONT: &str = "Monospace 12";
    pub const DEFAULT_ROWS: u16 = 25;
    pub const DEFAULT_COLUMNS: u16 = 80;
    pub const DEFAULT_SCROLLBACK: u32 = 200;
}

/// Closed ranges enforced by the validator
pub mod validation {
    pub const MIN_BITS: i32 = 5;
    pub const MAX_BITS: i32 = 8;
    pub const MIN_DELAY: i32 = 0;
    pub const MAX_DELAY: i32 = 500;
}
