//! Serial port settings

use serde::Serialize;
use std::fmt;

use crate::constants::port::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

impl Parity {
    /// Value written to the `parity` key
    pub fn as_key_value(self) -> &'static str {
        match self {
            Parity::None => "none",
            Parity::Odd => "odd",
            Parity::Even => "even",
        }
    }

    /// Case-insensitive parse of a `parity` value
    pub fn from_key_value(value: &str) -> Option<Self> {
        [Parity::None, Parity::Odd, Parity::Even]
            .into_iter()
            .find(|p| p.as_key_value().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key_value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowControl {
    #[default]
    None,
    XonXoff,
    RtsCts,
    Rs485HalfDuplex,
}

impl FlowControl {
    const ALL: [FlowControl; 4] = [
        FlowControl::None,
        FlowControl::XonXoff,
        FlowControl::RtsCts,
        FlowControl::Rs485HalfDuplex,
    ];

    /// Value written to the `flow_control` key
    pub fn as_key_value(self) -> &'static str {
        match self {
            FlowControl::None => "none",
            FlowControl::XonXoff => "xon",
            FlowControl::RtsCts => "rts",
            FlowControl::Rs485HalfDuplex => "rs485",
        }
    }

    /// Case-insensitive parse of a `flow_control` value
    pub fn from_key_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|fc| fc.as_key_value().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for FlowControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlowControl::None => "none",
            FlowControl::XonXoff => "xon/xoff",
            FlowControl::RtsCts => "rts/cts",
            FlowControl::Rs485HalfDuplex => "rs485 half duplex",
        })
    }
}

/// Everything needed to open and drive the serial line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortConfig {
    pub port: String,
    pub baudrate: u32,
    /// 5 - 8
    pub data_bits: i32,
    /// 1 - 2
    pub stop_bits: i32,
    pub parity: Parity,
    pub flow_control: FlowControl,
    /// Wait between raising RTS and starting to transmit (ms)
    pub rs485_rts_time_before_tx: u32,
    /// Wait between the end of a transmission and dropping RTS (ms)
    pub rs485_rts_time_after_tx: u32,
    /// Skip the exclusive lock on the device node
    pub disable_port_lock: bool,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baudrate: DEFAULT_BAUDRATE,
            data_bits: DEFAULT_BITS,
            stop_bits: DEFAULT_STOPBITS,
            parity: Parity::None,
            flow_control: FlowControl::None,
            rs485_rts_time_before_tx: DEFAULT_DELAY_RS485,
            rs485_rts_time_after_tx: DEFAULT_DELAY_RS485,
            disable_port_lock: false,
        }
    }
}

impl PortConfig {
    pub fn has_standard_baudrate(&self) -> bool {
        STANDARD_BAUDRATES.contains(&self.baudrate)
    }
}
