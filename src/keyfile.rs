//! Line tokenizer and document model for the `[group]` / `key=value` format
//!
//! [`tokenize`] is the single definition of where a group starts and ends.
//! [`KeyFile::parse`] builds the structured document from its output, and the
//! raw section eraser cuts byte spans out of the file using the same tokens.

use std::ops::Range;
use thiserror::Error;

/// Classification of one physical line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment(&'a str),
    Group(&'a str),
    Entry { key: &'a str, value: &'a str },
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    /// Byte range in the source, including the line terminator
    pub span: Range<usize>,
    /// Line text without the terminator
    pub text: &'a str,
    pub kind: LineKind<'a>,
}

impl Line<'_> {
    /// A line that opens a new group, well-formed or not
    pub fn starts_group(&self) -> bool {
        self.text.trim_start().starts_with('[')
    }
}

/// Split `text` into classified lines covering every byte exactly once
pub fn tokenize(text: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut number = 0;

    while start < text.len() {
        number += 1;
        let end = text[start..]
            .find('\n')
            .map(|i| start + i + 1)
            .unwrap_or(text.len());
        let raw = &text[start..end];
        let body = raw.strip_suffix('\n').unwrap_or(raw);
        let body = body.strip_suffix('\r').unwrap_or(body);
        lines.push(Line {
            number,
            span: start..end,
            text: body,
            kind: classify(body),
        });
        start = end;
    }

    lines
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with('#') {
        return LineKind::Comment(line);
    }
    if let Some(rest) = trimmed.strip_prefix('[') {
        return match rest.trim_end().strip_suffix(']') {
            Some(name) if is_valid_group_name(name) => LineKind::Group(name),
            _ => LineKind::Malformed,
        };
    }
    match trimmed.split_once('=') {
        Some((key, value)) => LineKind::Entry {
            key: key.trim_end(),
            value: value.trim_start(),
        },
        None => LineKind::Malformed,
    }
}

/// Group names may not be empty, contain brackets or control characters
pub fn is_valid_group_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c == '[' || c == ']' || c.is_control())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: key/value pair before the first group")]
    EntryOutsideGroup { line: usize },
    #[error("line {line}: empty key name")]
    EmptyKey { line: usize },
    #[error("line {line}: expected a group header, a key/value pair or a comment")]
    Malformed { line: usize },
    #[error("line {line}: invalid UTF-8")]
    InvalidUtf8 { line: usize },
}

/// Decode raw file contents, locating the first invalid byte by line
pub fn decode_utf8(bytes: Vec<u8>) -> Result<String, ParseError> {
    String::from_utf8(bytes).map_err(|e| {
        let valid = e.utf8_error().valid_up_to();
        let line = e.as_bytes()[..valid].iter().filter(|&&b| b == b'\n').count() + 1;
        ParseError::InvalidUtf8 { line }
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value {value:?} is not a valid {expected}")]
pub struct ValueError {
    pub expected: &'static str,
    pub value: String,
}

impl ValueError {
    fn new(expected: &'static str, value: &str) -> Self {
        Self {
            expected,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Comment(String),
    Entry { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Group {
    name: String,
    items: Vec<Item>,
}

/// Parsed key file, groups and entries in file order
///
/// Values are kept in their escaped on-disk form. Comments are preserved;
/// blank lines are normalised by [`render`](KeyFile::render).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFile {
    preamble: Vec<String>,
    groups: Vec<Group>,
}

impl KeyFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut doc = Self::new();
        let mut current: Option<usize> = None;

        for line in tokenize(text) {
            match line.kind {
                LineKind::Blank => {}
                LineKind::Comment(comment) => match current {
                    Some(idx) => doc.groups[idx].items.push(Item::Comment(comment.to_string())),
                    None => doc.preamble.push(comment.to_string()),
                },
                LineKind::Group(name) => {
                    // Repeated headers continue the earlier group
                    let idx = match doc.group_index(name) {
                        Some(idx) => idx,
                        None => {
                            doc.groups.push(Group {
                                name: name.to_string(),
                                items: Vec::new(),
                            });
                            doc.groups.len() - 1
                        }
                    };
                    current = Some(idx);
                }
                LineKind::Entry { key, value } => {
                    let idx = current.ok_or(ParseError::EntryOutsideGroup { line: line.number })?;
                    if key.is_empty() {
                        return Err(ParseError::EmptyKey { line: line.number });
                    }
                    doc.groups[idx].set(key, value);
                }
                LineKind::Malformed => return Err(ParseError::Malformed { line: line.number }),
            }
        }

        Ok(doc)
    }

    fn group_index(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.group_index(name).is_some()
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Keys of a group in file order
    pub fn keys(&self, group: &str) -> Vec<&str> {
        self.group_index(group)
            .map(|idx| {
                self.groups[idx]
                    .items
                    .iter()
                    .filter_map(|item| match item {
                        Item::Entry { key, .. } => Some(key.as_str()),
                        Item::Comment(_) => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Escaped value as stored
    pub fn raw(&self, group: &str, key: &str) -> Option<&str> {
        let idx = self.group_index(group)?;
        self.groups[idx].items.iter().rev().find_map(|item| match item {
            Item::Entry { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Store an already escaped value, creating the group at the end if needed
    pub fn set_raw(&mut self, group: &str, key: &str, value: &str) {
        let idx = match self.group_index(group) {
            Some(idx) => idx,
            None => {
                self.groups.push(Group {
                    name: group.to_string(),
                    items: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        self.groups[idx].set(key, value);
    }

    pub fn get_string(&self, group: &str, key: &str) -> Option<String> {
        self.raw(group, key).map(unescape)
    }

    pub fn set_string(&mut self, group: &str, key: &str, value: &str) {
        self.set_raw(group, key, &escape(value, false));
    }

    pub fn get_integer(&self, group: &str, key: &str) -> Result<Option<i64>, ValueError> {
        self.raw(group, key)
            .map(|raw| raw.trim().parse::<i64>().map_err(|_| ValueError::new("integer", raw)))
            .transpose()
    }

    pub fn set_integer(&mut self, group: &str, key: &str, value: i64) {
        self.set_raw(group, key, &value.to_string());
    }

    pub fn get_boolean(&self, group: &str, key: &str) -> Result<Option<bool>, ValueError> {
        self.raw(group, key)
            .map(|raw| match raw.trim() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(ValueError::new("boolean", raw)),
            })
            .transpose()
    }

    pub fn set_boolean(&mut self, group: &str, key: &str, value: bool) {
        self.set_raw(group, key, if value { "true" } else { "false" });
    }

    pub fn get_double(&self, group: &str, key: &str) -> Result<Option<f64>, ValueError> {
        self.raw(group, key)
            .map(|raw| {
                raw.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ValueError::new("double", raw))
            })
            .transpose()
    }

    pub fn set_double(&mut self, group: &str, key: &str, value: f64) {
        self.set_raw(group, key, &value.to_string());
    }

    pub fn get_string_list(&self, group: &str, key: &str) -> Option<Vec<String>> {
        self.raw(group, key).map(split_list)
    }

    pub fn set_string_list(&mut self, group: &str, key: &str, values: &[String]) {
        let mut raw = String::new();
        for value in values {
            raw.push_str(&escape(value, true));
            raw.push(';');
        }
        self.set_raw(group, key, &raw);
    }

    /// Canonical text: `[group]`, then `key=value` lines, blank line between groups
    pub fn render(&self) -> String {
        let mut out = String::new();
        for comment in &self.preamble {
            out.push_str(comment);
            out.push('\n');
        }
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 || !self.preamble.is_empty() {
                out.push('\n');
            }
            out.push('[');
            out.push_str(&group.name);
            out.push_str("]\n");
            for item in &group.items {
                match item {
                    Item::Comment(comment) => out.push_str(comment),
                    Item::Entry { key, value } => {
                        out.push_str(key);
                        out.push('=');
                        out.push_str(value);
                    }
                }
                out.push('\n');
            }
        }
        out
    }
}

impl Group {
    fn set(&mut self, key: &str, value: &str) {
        let existing = self.items.iter_mut().find_map(|item| match item {
            Item::Entry { key: k, value } if k == key => Some(value),
            _ => None,
        });
        match existing {
            Some(slot) => *slot = value.to_string(),
            None => self.items.push(Item::Entry {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

fn escape(value: &str, escape_separator: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        match c {
            ' ' if i == 0 => out.push_str("\\s"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            ';' if escape_separator => out.push_str("\\;"),
            c => out.push(c),
        }
    }
    out
}

/// Decode escapes; unknown sequences are kept literally
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(';') => out.push(';'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Split a `;`-terminated list, honouring `\;` inside elements
fn split_list(raw: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push('\\');
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ';' => items.push(unescape(&std::mem::take(&mut current))),
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        items.push(unescape(&current));
    }
    items
}
