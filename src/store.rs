//! Load and save named sections of the resource file

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::config::{ConfigKey, Section, ZeroPolicy};
use crate::constants::paths::DEFAULT_SECTION;
use crate::eraser;
use crate::error::StoreError;
use crate::keyfile::{self, KeyFile};
use crate::validate::ValidationReport;

/// Result of [`SectionStore::ensure_default_section_exists`]
#[derive(Debug)]
pub enum DefaultOutcome {
    /// No file existed; one with a `[default]` section was written
    Created { path: PathBuf },
    /// `[default]` was loaded and validated
    Loaded { report: ValidationReport },
    /// Hard defaults are in use; the file on disk was not touched
    FellBack { error: StoreError },
}

/// Read the whole file; bytes that are not UTF-8 make it a parse failure
pub(crate) fn read_text(path: &Path) -> Result<String, StoreError> {
    let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
    keyfile::decode_utf8(bytes).map_err(|source| StoreError::parse(path, source))
}

/// The resource file at one resolved path
#[derive(Debug, Clone)]
pub struct SectionStore {
    path: PathBuf,
    zero_policy: ZeroPolicy,
}

impl SectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            zero_policy: ZeroPolicy::default(),
        }
    }

    pub fn with_zero_policy(mut self, policy: ZeroPolicy) -> Self {
        self.zero_policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<KeyFile, StoreError> {
        let text = read_text(&self.path)?;
        KeyFile::parse(&text).map_err(|source| StoreError::parse(&self.path, source))
    }

    /// Load `name`, starting from hard defaults; no validation
    pub fn load(&self, name: &str) -> Result<Section, StoreError> {
        let doc = self.read_document()?;
        if !doc.has_group(name) {
            warn!(path = %self.path.display(), section = %name, "Section not found in configuration file");
            return Err(StoreError::not_found(name));
        }

        for key in doc.keys(name) {
            if ConfigKey::from_key(key).is_none() {
                warn!(section = %name, key = %key, "Ignoring unknown key");
            }
        }

        let section = Section::read_from(&doc, name, self.zero_policy);
        info!(path = %self.path.display(), section = %name, macros = section.macros.len(), "Loaded section");
        Ok(section)
    }

    /// Load `name` and run the validator over it
    pub fn load_validated(&self, name: &str) -> Result<(Section, ValidationReport), StoreError> {
        let mut section = self.load(name)?;
        let report = section.validate();
        Ok((section, report))
    }

    /// Write `section` into its group and rewrite the whole file
    ///
    /// Other sections keep their keys and values. An existing file that
    /// cannot be parsed is left alone and reported as [`StoreError::Parse`].
    pub fn save(&self, section: &Section) -> Result<(), StoreError> {
        if !keyfile::is_valid_group_name(&section.name) {
            return Err(StoreError::InvalidSectionName {
                name: section.name.clone(),
            });
        }

        let mut doc = match self.read_document() {
            Ok(doc) => doc,
            Err(e) if e.is_missing_file() => KeyFile::new(),
            Err(e) => return Err(e),
        };

        section.write_to(&mut doc);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        fs::write(&self.path, doc.render()).map_err(|e| StoreError::io(&self.path, e))?;

        info!(path = %self.path.display(), section = %section.name, "Saved section");
        Ok(())
    }

    /// Section names in file order
    pub fn section_names(&self) -> Result<Vec<String>, StoreError> {
        let doc = self.read_document()?;
        Ok(doc.group_names().into_iter().map(str::to_string).collect())
    }

    /// Cut `name` out of the file, leaving every other byte in place
    pub fn remove(&self, name: &str) -> Result<(), StoreError> {
        eraser::erase(&self.path, name)
    }

    /// Make sure there is something to run with at startup
    ///
    /// A missing file is not an error: it is created with a `[default]`
    /// section built from hard defaults. If the file exists but `[default]`
    /// cannot be loaded, hard defaults are returned and the file is left as is.
    pub fn ensure_default_section_exists(&self) -> (Section, DefaultOutcome) {
        if !self.path.exists() {
            let section = Section::hard_default(DEFAULT_SECTION);
            return match self.save(&section) {
                Ok(()) => {
                    info!(
                        path = %self.path.display(),
                        "Configuration file with [{}] configuration has been created",
                        DEFAULT_SECTION
                    );
                    let outcome = DefaultOutcome::Created {
                        path: self.path.clone(),
                    };
                    (section, outcome)
                }
                Err(e) => {
                    error!(path = %self.path.display(), error = %e, "Failed to create configuration file");
                    (section, DefaultOutcome::FellBack { error: e })
                }
            };
        }

        match self.load_validated(DEFAULT_SECTION) {
            Ok((section, report)) => (section, DefaultOutcome::Loaded { report }),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Falling back to hard-coded defaults");
                (Section::hard_default(DEFAULT_SECTION), DefaultOutcome::FellBack { error: e })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FlowControl, Macro, Parity, TerminalConfig};
    use crate::validate::ValidationWarning;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SectionStore {
        SectionStore::new(dir.path().join("config").join(".gtktermrc"))
    }

    fn lab_section() -> Section {
        let mut section = Section::hard_default("lab");
        section.port.port = "/dev/ttyUSB3".to_string();
        section.port.baudrate = 57600;
        section.port.parity = Parity::Odd;
        section.port.flow_control = FlowControl::RtsCts;
        section.port.rs485_rts_time_before_tx = 0;
        section.terminal.wait_delay = 20;
        section.macros.insert(Macro::new("F1", "AT\r\n"));
        section.macros.insert(Macro::new("F2", "AT+CSQ\r\n"));
        section
    }

    #[test]
    fn test_first_run_creates_default_section() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let (section, outcome) = store.ensure_default_section_exists();

        assert!(matches!(outcome, DefaultOutcome::Created { ref path } if path == store.path()));
        assert!(store.path().exists());
        assert_eq!(section, Section::hard_default("default"));
        assert_eq!(store.section_names().unwrap(), vec!["default"]);
        assert_eq!(store.load("default").unwrap(), Section::hard_default("default"));
    }

    #[test]
    fn test_existing_default_is_loaded() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut custom = Section::hard_default("default");
        custom.port.baudrate = 115200;
        store.save(&custom).unwrap();

        let (section, outcome) = store.ensure_default_section_exists();
        assert!(matches!(outcome, DefaultOutcome::Loaded { ref report } if report.is_clean()));
        assert_eq!(section.port.baudrate, 115200);
    }

    #[test]
    fn test_missing_default_falls_back_without_touching_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&lab_section()).unwrap();
        let before = fs::read(store.path()).unwrap();

        let (section, outcome) = store.ensure_default_section_exists();
        assert!(matches!(outcome, DefaultOutcome::FellBack { error: StoreError::NotFound { .. } }));
        assert_eq!(section, Section::hard_default("default"));
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let section = lab_section();

        store.save(&section).unwrap();
        let (loaded, report) = store.load_validated("lab").unwrap();

        assert!(report.is_clean());
        assert_eq!(loaded, section);
    }

    #[test]
    fn test_zero_as_absent_roundtrip_loses_zero() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).with_zero_policy(ZeroPolicy::TreatZeroAsAbsent);
        let section = lab_section();

        store.save(&section).unwrap();
        let loaded = store.load("lab").unwrap();

        // The only difference is the legitimately zero guard time
        assert_eq!(loaded.port.rs485_rts_time_before_tx, 30);
        let mut expected = section;
        expected.port.rs485_rts_time_before_tx = 30;
        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_save_leaves_other_sections_alone() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&Section::hard_default("default")).unwrap();
        store.save(&lab_section()).unwrap();

        let mut changed = Section::hard_default("default");
        changed.terminal.echo = true;
        store.save(&changed).unwrap();

        assert_eq!(store.section_names().unwrap(), vec!["default", "lab"]);
        assert_eq!(store.load("lab").unwrap(), lab_section());
        assert!(store.load("default").unwrap().terminal.echo);
    }

    #[test]
    fn test_load_missing_section_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&Section::hard_default("default")).unwrap();

        let err = store.load("profileB").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { ref section } if section == "profileB"));
    }

    #[test]
    fn test_load_corrupt_file_is_parse_failure() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "this is not a key file\n").unwrap();

        assert!(matches!(store.load("default"), Err(StoreError::Parse { .. })));
        // save refuses to clobber what it cannot read
        assert!(matches!(
            store.save(&Section::hard_default("default")),
            Err(StoreError::Parse { .. })
        ));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "this is not a key file\n");
    }

    #[test]
    fn test_unusual_baudrate_survives_load_and_validate() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut section = Section::hard_default("odd");
        section.port.baudrate = 250_000;
        store.save(&section).unwrap();

        let (loaded, report) = store.load_validated("odd").unwrap();
        assert_eq!(loaded.port.baudrate, 250_000);
        assert_eq!(
            report.warnings(),
            &[ValidationWarning::UnusualBaudrate { baudrate: 250_000 }]
        );
    }

    #[test]
    fn test_invalid_values_on_disk_are_repaired() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "[default]\nbits=9\nstopbits=3\nterm_wait_delay=-5\nterm_font=\n",
        )
        .unwrap();

        let (loaded, report) = store.load_validated("default").unwrap();
        assert_eq!(loaded.port.data_bits, 8);
        assert_eq!(loaded.port.stop_bits, 1);
        assert_eq!(loaded.terminal.wait_delay, 0);
        assert!(loaded.terminal.font.is_some());
        assert_eq!(report.warnings().len(), 3);
    }

    #[test]
    fn test_save_rejects_bad_section_name() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let section = Section::hard_default("bad]name");
        assert!(matches!(
            store.save(&section),
            Err(StoreError::InvalidSectionName { .. })
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_remove_section() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&Section::hard_default("default")).unwrap();
        store.save(&lab_section()).unwrap();

        store.remove("lab").unwrap();
        assert_eq!(store.section_names().unwrap(), vec!["default"]);
        assert!(matches!(store.remove("lab"), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_wait_char_0xff_roundtrips_as_unset() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut section = Section::hard_default("w");
        section.terminal.wait_char = TerminalConfig::wait_char_from_value(255);
        store.save(&section).unwrap();

        assert_eq!(section.terminal.wait_char, None);
        assert_eq!(store.load("w").unwrap(), section);

        section.terminal.wait_char = Some(0xFE);
        store.save(&section).unwrap();
        assert_eq!(store.load("w").unwrap().terminal.wait_char, Some(0xFE));
    }

    #[test]
    fn test_remove_repeated_section_is_gone() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "[a]\nport=/dev/ttyS1\n\n[b]\nbits=7\n\n[a]\nbaudrate=115200\n",
        )
        .unwrap();
        assert_eq!(store.load("a").unwrap().port.baudrate, 115200);

        store.remove("a").unwrap();

        assert_eq!(store.section_names().unwrap(), vec!["b"]);
        assert!(matches!(store.load("a"), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_invalid_utf8_is_parse_failure() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), b"[default]\nport=caf\xE9\n").unwrap();

        let err = store.load("default").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Parse {
                source: keyfile::ParseError::InvalidUtf8 { line: 2 },
                ..
            }
        ));
        assert!(matches!(store.remove("default"), Err(StoreError::Parse { .. })));
    }
}
