//! Terminal colors stored as four independent floating-point components

use serde::Serialize;

/// RGBA color, each component conventionally in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Rgba {
    /// Light grey text
    pub const DEFAULT_FOREGROUND: Rgba = Rgba::new(0.66, 0.66, 0.66, 1.0);

    /// Opaque black
    pub const DEFAULT_BACKGROUND: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self { red, green, blue, alpha }
    }

    /// True when every component lies in 0.0..=1.0
    pub fn is_normalized(&self) -> bool {
        [self.red, self.green, self.blue, self.alpha]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }
}
