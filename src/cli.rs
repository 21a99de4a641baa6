//! Command-line interface for gtkterm-rc.
//!
//! Subcommands map one-to-one onto the section store operations.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{FlowControl, Macro, Parity, Section, TerminalConfig};
use crate::constants::paths::DEFAULT_SECTION;

/// gtkterm-rc - inspect and edit GTKTerm configuration sections
#[derive(Parser, Debug)]
#[command(name = "gtkterm-rc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this resource file instead of the per-user one (skips migration)
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Read stored zeros as "not set" and keep the built-in default
    #[arg(long, global = true)]
    pub zero_as_absent: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the file with a [default] section if it does not exist yet
    Init,
    /// List section names in file order
    List,
    /// Load, validate and print a section
    Dump {
        #[arg(default_value = DEFAULT_SECTION)]
        section: String,

        /// Print as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Write a section, creating it if needed
    Save(SaveArgs),
    /// Delete a section, leaving the rest of the file byte-for-byte intact
    Remove { section: String },
}

#[derive(Args, Debug, Default)]
pub struct SaveArgs {
    /// Target section name
    pub section: String,

    /// Start from this section instead of the target's current contents
    #[arg(long, value_name = "SECTION")]
    pub from: Option<String>,

    #[arg(long, value_name = "DEVICE")]
    pub port: Option<String>,

    #[arg(long, value_name = "BAUD")]
    pub speed: Option<u32>,

    #[arg(long)]
    pub bits: Option<i32>,

    #[arg(long)]
    pub stopbits: Option<i32>,

    /// none, odd or even
    #[arg(long, value_parser = parse_parity)]
    pub parity: Option<Parity>,

    /// none, xon, rts or rs485
    #[arg(long, value_parser = parse_flow)]
    pub flow: Option<FlowControl>,

    /// Delay after each line when sending a file (ms)
    #[arg(long, allow_hyphen_values = true)]
    pub delay: Option<i32>,

    /// Character code to wait for between lines, -1 to clear
    #[arg(long = "char", value_name = "CODE", allow_hyphen_values = true)]
    pub wait_char: Option<i64>,

    #[arg(long)]
    pub echo: Option<bool>,

    #[arg(long)]
    pub crlfauto: Option<bool>,

    /// Add or replace a macro, as SHORTCUT=ACTION (repeatable)
    #[arg(long = "macro", value_name = "SHORTCUT=ACTION", value_parser = parse_macro)]
    pub macros: Vec<Macro>,
}

impl SaveArgs {
    /// Apply every flag that was given on top of `section`
    pub fn apply_to(&self, section: &mut Section) {
        let port = &mut section.port;
        if let Some(device) = &self.port {
            port.port = device.clone();
        }
        if let Some(speed) = self.speed {
            port.baudrate = speed;
        }
        if let Some(bits) = self.bits {
            port.data_bits = bits;
        }
        if let Some(stopbits) = self.stopbits {
            port.stop_bits = stopbits;
        }
        if let Some(parity) = self.parity {
            port.parity = parity;
        }
        if let Some(flow) = self.flow {
            port.flow_control = flow;
        }

        let term = &mut section.terminal;
        if let Some(delay) = self.delay {
            term.wait_delay = delay;
        }
        if let Some(code) = self.wait_char {
            term.wait_char = TerminalConfig::wait_char_from_value(code);
        }
        if let Some(echo) = self.echo {
            term.echo = echo;
        }
        if let Some(crlf) = self.crlfauto {
            term.crlf_auto = crlf;
        }

        for entry in &self.macros {
            section.macros.insert(entry.clone());
        }
    }
}

fn parse_parity(value: &str) -> Result<Parity, String> {
    Parity::from_key_value(value).ok_or_else(|| format!("unknown parity '{value}'"))
}

fn parse_flow(value: &str) -> Result<FlowControl, String> {
    FlowControl::from_key_value(value).ok_or_else(|| format!("unknown flow control '{value}'"))
}

fn parse_macro(value: &str) -> Result<Macro, String> {
    match value.split_once('=') {
        Some((shortcut, action)) if !shortcut.is_empty() => Ok(Macro::new(shortcut, action)),
        _ => Err(format!("expected SHORTCUT=ACTION, got '{value}'")),
    }
}
