//! Keyboard macros and their flat string-list encoding
//!
//! On disk the table is one string list: `shortcut0;action0;shortcut1;action1;...`

use serde::Serialize;
use tracing::warn;

/// A shortcut bound to a literal outgoing byte sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Macro {
    pub shortcut: String,
    pub action: String,
}

impl Macro {
    pub fn new(shortcut: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            shortcut: shortcut.into(),
            action: action.into(),
        }
    }
}

/// Ordered macro list with unique shortcuts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MacroTable {
    macros: Vec<Macro>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Macro> {
        self.macros.iter()
    }

    #[cfg(test)]
    pub fn get(&self, shortcut: &str) -> Option<&Macro> {
        self.macros.iter().find(|m| m.shortcut == shortcut)
    }

    /// Append a macro, dropping any earlier macro bound to the same shortcut
    pub fn insert(&mut self, entry: Macro) {
        self.macros.retain(|m| m.shortcut != entry.shortcut);
        self.macros.push(entry);
    }

    /// Flatten into `[shortcut, action, shortcut, action, ...]`
    pub fn encode(&self) -> Vec<String> {
        let mut flat = Vec::with_capacity(self.macros.len() * 2);
        for m in &self.macros {
            flat.push(m.shortcut.clone());
            flat.push(m.action.clone());
        }
        flat
    }

    pub fn decode(flat: &[String]) -> Self {
        let mut table = Self::new();
        table.extend_from_flat(flat);
        table
    }

    /// Insert every `(shortcut, action)` pair of a flat list, in order
    ///
    /// An unpaired trailing entry is ignored.
    pub fn extend_from_flat(&mut self, flat: &[String]) {
        let mut pairs = flat.chunks_exact(2);
        for pair in pairs.by_ref() {
            self.insert(Macro::new(pair[0].clone(), pair[1].clone()));
        }
        if let [orphan] = pairs.remainder() {
            warn!(shortcut = %orphan, "macro list has an odd number of entries, ignoring trailing shortcut");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_encode_then_decode_keeps_order() {
        let mut table = MacroTable::new();
        table.insert(Macro::new("F1", "AT\r\n"));
        table.insert(Macro::new("F2", "AT+CSQ\r\n"));

        let flat = table.encode();
        assert_eq!(flat, strings(&["F1", "AT\r\n", "F2", "AT+CSQ\r\n"]));

        let decoded = MacroTable::decode(&flat);
        assert_eq!(decoded, table);
        let shortcuts: Vec<&str> = decoded.iter().map(|m| m.shortcut.as_str()).collect();
        assert_eq!(shortcuts, vec!["F1", "F2"]);
    }

    #[test]
    fn test_readding_shortcut_replaces_old_entry() {
        let mut table = MacroTable::decode(&strings(&["F1", "AT\r\n", "F2", "AT+CSQ\r\n"]));
        table.extend_from_flat(&strings(&["F1", "ATZ\r\n"]));

        assert_eq!(table.len(), 2);
        assert_eq!(table.encode(), strings(&["F2", "AT+CSQ\r\n", "F1", "ATZ\r\n"]));
        assert_eq!(table.get("F1").unwrap().action, "ATZ\r\n");
    }

    #[test]
    fn test_duplicate_shortcut_within_one_list() {
        let table = MacroTable::decode(&strings(&["F1", "first", "F1", "second"]));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("F1").unwrap().action, "second");
    }

    #[test]
    fn test_odd_length_ignores_trailing_entry() {
        let table = MacroTable::decode(&strings(&["F1", "AT\r\n", "F2"]));
        assert_eq!(table.len(), 1);
        assert!(table.get("F2").is_none());
    }

    #[test]
    fn test_empty_list() {
        let table = MacroTable::decode(&[]);
        assert!(table.is_empty());
        assert!(table.encode().is_empty());
    }
}
