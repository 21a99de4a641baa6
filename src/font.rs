//! Pango-style font descriptors ("Family [Style...] [Size]")

use serde::Serialize;
use std::fmt;

/// Style words recognised between the family list and the size
const STYLE_WORDS: &[&str] = &[
    "normal", "roman", "oblique", "italic", "small-caps", "thin", "ultra-light", "extra-light",
    "light", "semi-light", "book", "regular", "medium", "semi-bold", "demi-bold", "bold",
    "ultra-bold", "extra-bold", "heavy", "black", "ultra-condensed", "extra-condensed",
    "condensed", "semi-condensed", "semi-expanded", "expanded", "extra-expanded",
    "ultra-expanded", "monospace-style",
];

/// Font size, in points or absolute device pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FontSize {
    Points(f64),
    Pixels(f64),
}

/// A face/size descriptor as written in the `term_font` key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontDescription {
    pub family: String,
    pub styles: Vec<String>,
    pub size: Option<FontSize>,
}

impl FontDescription {
    /// Parse a descriptor string
    ///
    /// Returns `None` for blank input. Trailing tokens are peeled off from
    /// the right: an optional size (`12`, `10.5`, `14px`), then any known
    /// style words. A token ending in `,` closes the family list and stops
    /// the peeling. Whatever remains is the family list.
    pub fn parse(descriptor: &str) -> Option<Self> {
        let mut words: Vec<&str> = descriptor.split_whitespace().collect();

        let size = match words.last() {
            Some(last) if !last.ends_with(',') => parse_size(last),
            _ => None,
        };
        if size.is_some() {
            words.pop();
        }

        let mut styles = Vec::new();
        while words.len() > 1 {
            let Some(last) = words.last() else { break };
            if last.ends_with(',') || !is_style_word(last) {
                break;
            }
            styles.insert(0, (*last).to_string());
            words.pop();
        }

        let family = words.join(" ").trim_end_matches(',').trim().to_string();
        if family.is_empty() && styles.is_empty() && size.is_none() {
            return None;
        }

        Some(Self { family, styles, size })
    }

    pub fn default_font() -> Self {
        // DEFAULT_FONT is a fixed, well-formed literal
        Self::parse(crate::constants::terminal::DEFAULT_FONT).unwrap_or(Self {
            family: "Monospace".to_string(),
            styles: Vec::new(),
            size: Some(FontSize::Points(12.0)),
        })
    }
}

impl fmt::Display for FontDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if !self.family.is_empty() {
            // A family ending in a style word or number would be misread without the comma
            let ambiguous = self
                .family
                .split_whitespace()
                .last()
                .is_some_and(|w| is_style_word(w) || parse_size(w).is_some());
            if ambiguous {
                parts.push(format!("{},", self.family));
            } else {
                parts.push(self.family.clone());
            }
        }
        parts.extend(self.styles.iter().cloned());
        match self.size {
            Some(FontSize::Points(pt)) => parts.push(format!("{pt}")),
            Some(FontSize::Pixels(px)) => parts.push(format!("{px}px")),
            None => {}
        }
        write!(f, "{}", parts.join(" "))
    }
}

fn parse_size(word: &str) -> Option<FontSize> {
    if let Some(px) = word.strip_suffix("px") {
        return px.parse::<f64>().ok().filter(|v| *v > 0.0).map(FontSize::Pixels);
    }
    word.parse::<f64>().ok().filter(|v| *v > 0.0).map(FontSize::Points)
}

fn is_style_word(word: &str) -> bool {
    STYLE_WORDS.iter().any(|s| s.eq_ignore_ascii_case(word))
}
