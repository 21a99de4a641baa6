//! Human-readable dump of a loaded section

use std::fmt;

use crate::config::Section;

/// Displays a section in the fixed report layout
pub struct SectionReport<'a>(pub &'a Section);

fn yes_no(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Fixed layout: serial port, terminal, then the macro table
impl fmt::Display for SectionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let section = self.0;
        let port = &section.port;
        let term = &section.terminal;

        writeln!(f, "Configuration loaded from file: [{}]", section.name)?;

        writeln!(f, "\nSerial port")?;
        writeln!(f, "Port                     : {}", port.port)?;
        writeln!(f, "Speed                    : {}", port.baudrate)?;
        writeln!(f, "Bits                     : {}", port.data_bits)?;
        writeln!(f, "Stopbits                 : {}", port.stop_bits)?;
        writeln!(f, "Parity                   : {}", port.parity)?;
        writeln!(f, "Flow control             : {}", port.flow_control)?;
        writeln!(f, "RS485 RTS time before TX : {}", port.rs485_rts_time_before_tx)?;
        writeln!(f, "RS485 RTS time after TX  : {}", port.rs485_rts_time_after_tx)?;
        writeln!(f, "Disable port lock        : {}", yes_no(port.disable_port_lock))?;

        let font = term
            .font
            .as_ref()
            .map(|font| font.to_string())
            .unwrap_or_else(|| "(none)".to_string());

        writeln!(f, "\nTerminal")?;
        writeln!(f, "Font                     : {font}")?;
        writeln!(f, "Echo                     : {}", yes_no(term.echo))?;
        writeln!(f, "CRLF                     : {}", yes_no(term.crlf_auto))?;
        writeln!(f, "Wait delay               : {}", term.wait_delay)?;
        writeln!(f, "Wait char                : {}", term.wait_char_value())?;
        writeln!(f, "Timestamp                : {}", yes_no(term.timestamp))?;
        writeln!(f, "Block cursor             : {}", yes_no(term.block_cursor))?;
        writeln!(f, "Show cursor              : {}", yes_no(term.show_cursor))?;
        writeln!(f, "Rows                     : {}", term.rows)?;
        writeln!(f, "Cols                     : {}", term.columns)?;
        writeln!(f, "Scrollback               : {}", term.scrollback)?;
        writeln!(f, "Visual bell              : {}", yes_no(term.visual_bell))?;
        if let Some(raw) = &term.raw_filename {
            writeln!(f, "Raw log file             : {raw}")?;
        }
        for (label, color) in [("Background", &term.background), ("Foreground", &term.foreground)] {
            writeln!(f, "{label} color red     : {:.6}", color.red)?;
            writeln!(f, "{label} color green   : {:.6}", color.green)?;
            writeln!(f, "{label} color blue    : {:.6}", color.blue)?;
            writeln!(f, "{label} color alpha   : {:.6}", color.alpha)?;
        }

        writeln!(f, "\nMacro's")?;
        if section.macros.is_empty() {
            writeln!(f, " (none)")?;
            return Ok(());
        }
        writeln!(f, " Nr  Shortcut  Command")?;
        for (i, m) in section.macros.iter().enumerate() {
            writeln!(f, "[{i:2}] {:<8}  {}", m.shortcut, m.action.escape_debug())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Macro;

    #[test]
    fn test_render_default_section() {
        let mut section = Section::hard_default("default");
        section.macros.insert(Macro::new("F1", "AT\r\n"));
        let text = SectionReport(&section).to_string();

        assert!(text.starts_with("Configuration loaded from file: [default]\n"));
        assert!(text.contains("Port                     : /dev/ttyS0\n"));
        assert!(text.contains("Speed                    : 9600\n"));
        assert!(text.contains("Parity                   : none\n"));
        assert!(text.contains("Wait char                : -1\n"));
        assert!(text.contains("Visual bell              : True\n"));
        assert!(text.contains("Foreground color red     : 0.660000\n"));
        assert!(text.contains("[ 0] F1        AT\\r\\n\n"));
        assert!(!text.contains("Raw log file"));
    }

    #[test]
    fn test_render_without_macros() {
        let text = SectionReport(&Section::hard_default("bare")).to_string();
        assert!(text.ends_with("Macro's\n (none)\n"));
        assert!(!text.contains("Shortcut"));
    }
}
