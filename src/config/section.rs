//! A named profile and its mapping onto key-file entries

use serde::Serialize;
use tracing::warn;

use super::keys::ConfigKey;
use super::macros::MacroTable;
use super::port::{FlowControl, Parity, PortConfig};
use super::terminal::TerminalConfig;
use crate::font::FontDescription;
use crate::keyfile::KeyFile;

/// How a stored integer `0` is interpreted on load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroPolicy {
    /// A present key is used as written, including `0`
    #[default]
    Explicit,
    /// `0` is treated like a missing key and the default is kept
    TreatZeroAsAbsent,
}

/// One `[name]` group of the resource file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub name: String,
    pub port: PortConfig,
    pub terminal: TerminalConfig,
    pub macros: MacroTable,
}

impl Section {
    /// Section populated with the hard-coded defaults
    pub fn hard_default(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            port: PortConfig::default(),
            terminal: TerminalConfig::default(),
            macros: MacroTable::new(),
        }
    }

    /// Read the group `name` from `doc`, starting from hard defaults
    ///
    /// The caller is responsible for checking that the group exists.
    pub fn read_from(doc: &KeyFile, name: &str, policy: ZeroPolicy) -> Self {
        let reader = FieldReader { doc, group: name, policy };
        let mut section = Self::hard_default(name);
        for key in ConfigKey::ALL {
            section.read_key(&reader, key);
        }

        for (which, color) in [
            ("foreground", &section.terminal.foreground),
            ("background", &section.terminal.background),
        ] {
            if !color.is_normalized() {
                warn!(section = %name, color = which, ?color, "color component outside 0.0..=1.0");
            }
        }

        section
    }

    /// Write every key of the table into the group named after this section
    pub fn write_to(&self, doc: &mut KeyFile) {
        for key in ConfigKey::ALL {
            self.write_key(doc, key);
        }
    }

    fn read_key(&mut self, r: &FieldReader<'_>, key: ConfigKey) {
        let port = &mut self.port;
        let term = &mut self.terminal;
        match key {
            ConfigKey::Port => {
                if let Some(value) = r.string(key) {
                    port.port = value;
                }
            }
            ConfigKey::Baudrate => r.integer_into(key, &mut port.baudrate),
            ConfigKey::Bits => r.integer_into(key, &mut port.data_bits),
            ConfigKey::Stopbits => r.integer_into(key, &mut port.stop_bits),
            ConfigKey::Parity => {
                if let Some(value) = r.string(key) {
                    match Parity::from_key_value(&value) {
                        Some(parity) => port.parity = parity,
                        None => warn!(section = %r.group, %key, %value, "unknown parity, keeping default"),
                    }
                }
            }
            ConfigKey::FlowControl => {
                if let Some(value) = r.string(key) {
                    match FlowControl::from_key_value(&value) {
                        Some(fc) => port.flow_control = fc,
                        None => warn!(section = %r.group, %key, %value, "unknown flow control, keeping default"),
                    }
                }
            }
            ConfigKey::WaitDelay => r.integer_into(key, &mut term.wait_delay),
            ConfigKey::WaitChar => {
                if let Some(value) = r.integer(key) {
                    term.wait_char = TerminalConfig::wait_char_from_value(value);
                }
            }
            ConfigKey::Rs485RtsTimeBeforeTx => r.integer_into(key, &mut port.rs485_rts_time_before_tx),
            ConfigKey::Rs485RtsTimeAfterTx => r.integer_into(key, &mut port.rs485_rts_time_after_tx),
            ConfigKey::Macros => {
                if let Some(flat) = r.doc.get_string_list(r.group, key.as_str()) {
                    self.macros = MacroTable::decode(&flat);
                }
            }
            ConfigKey::RawFilename => {
                term.raw_filename = r.string(key).filter(|s| !s.is_empty());
            }
            ConfigKey::Echo => term.echo = r.boolean(key),
            ConfigKey::CrlfAuto => term.crlf_auto = r.boolean(key),
            ConfigKey::DisablePortLock => port.disable_port_lock = r.boolean(key),
            ConfigKey::Font => {
                term.font = r.string(key).and_then(|s| FontDescription::parse(&s));
            }
            ConfigKey::Timestamp => term.timestamp = r.boolean(key),
            ConfigKey::BlockCursor => term.block_cursor = r.boolean(key),
            ConfigKey::ShowCursor => term.show_cursor = r.boolean(key),
            ConfigKey::Rows => r.integer_into(key, &mut term.rows),
            ConfigKey::Columns => r.integer_into(key, &mut term.columns),
            ConfigKey::Scrollback => r.integer_into(key, &mut term.scrollback),
            ConfigKey::VisualBell => term.visual_bell = r.boolean(key),
            ConfigKey::ForegroundRed => r.double_into(key, &mut term.foreground.red),
            ConfigKey::ForegroundGreen => r.double_into(key, &mut term.foreground.green),
            ConfigKey::ForegroundBlue => r.double_into(key, &mut term.foreground.blue),
            ConfigKey::ForegroundAlpha => r.double_into(key, &mut term.foreground.alpha),
            ConfigKey::BackgroundRed => r.double_into(key, &mut term.background.red),
            ConfigKey::BackgroundGreen => r.double_into(key, &mut term.background.green),
            ConfigKey::BackgroundBlue => r.double_into(key, &mut term.background.blue),
            ConfigKey::BackgroundAlpha => r.double_into(key, &mut term.background.alpha),
        }
    }

    fn write_key(&self, doc: &mut KeyFile, key: ConfigKey) {
        let group = self.name.as_str();
        let name = key.as_str();
        let port = &self.port;
        let term = &self.terminal;
        match key {
            ConfigKey::Port => doc.set_string(group, name, &port.port),
            ConfigKey::Baudrate => doc.set_integer(group, name, i64::from(port.baudrate)),
            ConfigKey::Bits => doc.set_integer(group, name, i64::from(port.data_bits)),
            ConfigKey::Stopbits => doc.set_integer(group, name, i64::from(port.stop_bits)),
            ConfigKey::Parity => doc.set_string(group, name, port.parity.as_key_value()),
            ConfigKey::FlowControl => doc.set_string(group, name, port.flow_control.as_key_value()),
            ConfigKey::WaitDelay => doc.set_integer(group, name, i64::from(term.wait_delay)),
            ConfigKey::WaitChar => doc.set_integer(group, name, term.wait_char_value()),
            ConfigKey::Rs485RtsTimeBeforeTx => {
                doc.set_integer(group, name, i64::from(port.rs485_rts_time_before_tx))
            }
            ConfigKey::Rs485RtsTimeAfterTx => {
                doc.set_integer(group, name, i64::from(port.rs485_rts_time_after_tx))
            }
            ConfigKey::Macros => doc.set_string_list(group, name, &self.macros.encode()),
            ConfigKey::RawFilename => {
                doc.set_string(group, name, term.raw_filename.as_deref().unwrap_or(""))
            }
            ConfigKey::Echo => doc.set_boolean(group, name, term.echo),
            ConfigKey::CrlfAuto => doc.set_boolean(group, name, term.crlf_auto),
            ConfigKey::DisablePortLock => doc.set_boolean(group, name, port.disable_port_lock),
            ConfigKey::Font => {
                let font = term.font.clone().unwrap_or_else(FontDescription::default_font);
                doc.set_string(group, name, &font.to_string())
            }
            ConfigKey::Timestamp => doc.set_boolean(group, name, term.timestamp),
            ConfigKey::BlockCursor => doc.set_boolean(group, name, term.block_cursor),
            ConfigKey::ShowCursor => doc.set_boolean(group, name, term.show_cursor),
            ConfigKey::Rows => doc.set_integer(group, name, i64::from(term.rows)),
            ConfigKey::Columns => doc.set_integer(group, name, i64::from(term.columns)),
            ConfigKey::Scrollback => doc.set_integer(group, name, i64::from(term.scrollback)),
            ConfigKey::VisualBell => doc.set_boolean(group, name, term.visual_bell),
            ConfigKey::ForegroundRed => doc.set_double(group, name, term.foreground.red),
            ConfigKey::ForegroundGreen => doc.set_double(group, name, term.foreground.green),
            ConfigKey::ForegroundBlue => doc.set_double(group, name, term.foreground.blue),
            ConfigKey::ForegroundAlpha => doc.set_double(group, name, term.foreground.alpha),
            ConfigKey::BackgroundRed => doc.set_double(group, name, term.background.red),
            ConfigKey::BackgroundGreen => doc.set_double(group, name, term.background.green),
            ConfigKey::BackgroundBlue => doc.set_double(group, name, term.background.blue),
            ConfigKey::BackgroundAlpha => doc.set_double(group, name, term.background.alpha),
        }
    }
}

/// Typed, tolerant access to one group; bad values are logged and skipped
struct FieldReader<'a> {
    doc: &'a KeyFile,
    group: &'a str,
    policy: ZeroPolicy,
}

impl FieldReader<'_> {
    fn string(&self, key: ConfigKey) -> Option<String> {
        self.doc.get_string(self.group, key.as_str())
    }

    /// Present, parsable integer, with zero filtered out per policy
    fn integer(&self, key: ConfigKey) -> Option<i64> {
        match self.doc.get_integer(self.group, key.as_str()) {
            Ok(Some(0)) if self.policy == ZeroPolicy::TreatZeroAsAbsent => None,
            Ok(value) => value,
            Err(e) => {
                warn!(section = %self.group, %key, error = %e, "ignoring unparsable integer");
                None
            }
        }
    }

    fn integer_into<T: TryFrom<i64>>(&self, key: ConfigKey, target: &mut T) {
        if let Some(value) = self.integer(key) {
            match T::try_from(value) {
                Ok(v) => *target = v,
                Err(_) => warn!(section = %self.group, %key, value, "integer out of range, keeping default"),
            }
        }
    }

    /// Missing or unparsable booleans read as `false`
    fn boolean(&self, key: ConfigKey) -> bool {
        match self.doc.get_boolean(self.group, key.as_str()) {
            Ok(value) => value.unwrap_or(false),
            Err(e) => {
                warn!(section = %self.group, %key, error = %e, "ignoring unparsable boolean");
                false
            }
        }
    }

    fn double_into(&self, key: ConfigKey, target: &mut f64) {
        match self.doc.get_double(self.group, key.as_str()) {
            Ok(Some(value)) => *target = value,
            Ok(None) => {}
            Err(e) => warn!(section = %self.group, %key, error = %e, "ignoring unparsable double"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::config::macros::Macro;

    fn custom_section() -> Section {
        let mut section = Section::hard_default("lab");
        section.port.port = "/dev/ttyUSB1".to_string();
        section.port.baudrate = 115200;
        section.port.data_bits = 7;
        section.port.stop_bits = 2;
        section.port.parity = Parity::Even;
        section.port.flow_control = FlowControl::Rs485HalfDuplex;
        section.port.rs485_rts_time_before_tx = 5;
        section.port.rs485_rts_time_after_tx = 12;
        section.port.disable_port_lock = true;
        section.terminal.echo = true;
        section.terminal.crlf_auto = true;
        section.terminal.timestamp = true;
        section.terminal.block_cursor = false;
        section.terminal.wait_delay = 250;
        section.terminal.wait_char = Some(b'>');
        section.terminal.rows = 40;
        section.terminal.columns = 132;
        section.terminal.scrollback = 5000;
        section.terminal.foreground = Rgba::new(0.0, 1.0, 0.25, 1.0);
        section.terminal.background = Rgba::new(0.1, 0.1, 0.1, 0.9);
        section.terminal.font = FontDescription::parse("DejaVu Sans Mono, Bold 11");
        section.terminal.raw_filename = Some("/tmp/capture.bin".to_string());
        section.macros.insert(Macro::new("F1", "AT\r\n"));
        section.macros.insert(Macro::new("<Control>F2", "AT+CSQ;\r\n"));
        section
    }

    #[test]
    fn test_write_then_read_is_identical() {
        let section = custom_section();
        let mut doc = KeyFile::new();
        section.write_to(&mut doc);

        let text = doc.render();
        let reparsed = KeyFile::parse(&text).unwrap();
        let loaded = Section::read_from(&reparsed, "lab", ZeroPolicy::Explicit);
        assert_eq!(loaded, section);
    }

    #[test]
    fn test_every_key_is_written() {
        let mut doc = KeyFile::new();
        Section::hard_default("default").write_to(&mut doc);
        let keys = doc.keys("default");
        assert_eq!(keys.len(), ConfigKey::ALL.len());
        for key in ConfigKey::ALL {
            assert!(keys.contains(&key.as_str()), "missing {key}");
        }
    }

    #[test]
    fn test_missing_keys_keep_defaults_except_booleans() {
        let doc = KeyFile::parse("[bare]\n").unwrap();
        let section = Section::read_from(&doc, "bare", ZeroPolicy::Explicit);
        let defaults = Section::hard_default("bare");
        assert_eq!(section.port, defaults.port);
        assert_eq!(section.terminal.rows, defaults.terminal.rows);
        assert_eq!(section.terminal.foreground, defaults.terminal.foreground);
        // booleans default to false when absent
        assert!(!section.terminal.visual_bell);
        assert!(!section.terminal.show_cursor);
        // font absent until validation substitutes the default
        assert!(section.terminal.font.is_none());
    }

    #[test]
    fn test_zero_policy() {
        let doc = KeyFile::parse(
            "[z]\nbaudrate=0\nrs485_rts_time_before_tx=0\nterm_rows=0\nterm_wait_char=0\n",
        )
        .unwrap();

        let explicit = Section::read_from(&doc, "z", ZeroPolicy::Explicit);
        assert_eq!(explicit.port.baudrate, 0);
        assert_eq!(explicit.port.rs485_rts_time_before_tx, 0);
        assert_eq!(explicit.terminal.rows, 0);
        assert_eq!(explicit.terminal.wait_char, Some(0));

        let legacy = Section::read_from(&doc, "z", ZeroPolicy::TreatZeroAsAbsent);
        assert_eq!(legacy.port.baudrate, 9600);
        assert_eq!(legacy.port.rs485_rts_time_before_tx, 30);
        assert_eq!(legacy.terminal.rows, 25);
        assert_eq!(legacy.terminal.wait_char, None);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let doc = KeyFile::parse(
            "[bad]\nbaudrate=fast\nparity=mark\nflow_control=dtr\nterm_rows=70000\nterm_foreground_red=red\n",
        )
        .unwrap();
        let section = Section::read_from(&doc, "bad", ZeroPolicy::Explicit);
        assert_eq!(section.port.baudrate, 9600);
        assert_eq!(section.port.parity, Parity::None);
        assert_eq!(section.port.flow_control, FlowControl::None);
        assert_eq!(section.terminal.rows, 25);
        assert_eq!(section.terminal.foreground.red, 0.66);
    }

    #[test]
    fn test_case_insensitive_enums() {
        let doc = KeyFile::parse("[c]\nparity=ODD\nflow_control=Xon\n").unwrap();
        let section = Section::read_from(&doc, "c", ZeroPolicy::Explicit);
        assert_eq!(section.port.parity, Parity::Odd);
        assert_eq!(section.port.flow_control, FlowControl::XonXoff);
    }
}
