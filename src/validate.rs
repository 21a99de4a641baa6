//! Post-load repair of out-of-range settings

use std::fmt;
use tracing::{debug, warn};

use crate::config::Section;
use crate::constants::{port, terminal, validation::*};
use crate::font::FontDescription;

/// A field that was outside its allowed range or set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Not in the standard set; the value is kept
    UnusualBaudrate { baudrate: u32 },
    InvalidStopBits { found: i32, fallback: i32 },
    InvalidDataBits { found: i32, fallback: i32 },
    InvalidWaitDelay { found: i32, fallback: i32 },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::UnusualBaudrate { baudrate } => {
                write!(f, "Baudrate {baudrate} may not be supported by all hardware")
            }
            ValidationWarning::InvalidStopBits { found, fallback } => write!(
                f,
                "Invalid number of stop-bits: {found}, falling back to default number of stop-bits: {fallback}"
            ),
            ValidationWarning::InvalidDataBits { found, fallback } => write!(
                f,
                "Invalid number of bits: {found}, falling back to default number of bits: {fallback}"
            ),
            ValidationWarning::InvalidWaitDelay { found, fallback } => write!(
                f,
                "Invalid delay: {found} ms, falling back to default delay: {fallback} ms"
            ),
        }
    }
}

/// Everything the validator changed or complained about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn push(&mut self, warning: ValidationWarning) {
        warn!(%warning, "configuration value repaired");
        self.warnings.push(warning);
    }
}

impl Section {
    /// Enforce field invariants in place
    ///
    /// Never fails: bad values are replaced by defaults (except the baud
    /// rate, which is only reported) and listed in the returned report.
    pub fn validate(&mut self) -> ValidationReport {
        let mut report = ValidationReport::default();

        if !self.port.has_standard_baudrate() {
            report.push(ValidationWarning::UnusualBaudrate {
                baudrate: self.port.baudrate,
            });
        }

        if self.port.stop_bits != 1 && self.port.stop_bits != 2 {
            report.push(ValidationWarning::InvalidStopBits {
                found: self.port.stop_bits,
                fallback: port::DEFAULT_STOPBITS,
            });
            self.port.stop_bits = port::DEFAULT_STOPBITS;
        }

        if !(MIN_BITS..=MAX_BITS).contains(&self.port.data_bits) {
            report.push(ValidationWarning::InvalidDataBits {
                found: self.port.data_bits,
                fallback: port::DEFAULT_BITS,
            });
            self.port.data_bits = port::DEFAULT_BITS;
        }

        if !(MIN_DELAY..=MAX_DELAY).contains(&self.terminal.wait_delay) {
            report.push(ValidationWarning::InvalidWaitDelay {
                found: self.terminal.wait_delay,
                fallback: terminal::DEFAULT_DELAY,
            });
            self.terminal.wait_delay = terminal::DEFAULT_DELAY;
        }

        if self.terminal.font.is_none() {
            debug!(section = %self.name, "no usable font, using default");
            self.terminal.font = Some(FontDescription::default_font());
        }

        report
    }
}
