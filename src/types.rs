//! This module defines the user-facing types shared by the configuration,
//! the device handle and the event dispatcher.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// The primary role of the transceiver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Role {
    /// No role was chosen yet. The radio is configured as a transmitter
    /// but neither sends nor dispatches events.
    #[default]
    Unset,
    /// Primary transmitter (PTX).
    Ptx,
    /// Primary receiver (PRX).
    Prx,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for Role {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Role::Unset => defmt::write!(fmt, "Unset"),
            Role::Ptx => defmt::write!(fmt, "PTX"),
            Role::Prx => defmt::write!(fmt, "PRX"),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Role::Unset => write!(f, "Unset"),
            Role::Ptx => write!(f, "PTX"),
            Role::Prx => write!(f, "PRX"),
        }
    }
}

/// Power Amplifier level. The units dBm (decibel-milliwatts or dB<sub>mW</sub>)
/// represents a logarithmic signal loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

impl PaLevel {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Min => 0,
            PaLevel::Low => 1,
            PaLevel::High => 2,
            PaLevel::Max => 3,
        }
    }
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value {
            0 => PaLevel::Min,
            1 => PaLevel::Low,
            2 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for PaLevel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PaLevel::Min => defmt::write!(fmt, "Min"),
            PaLevel::Low => defmt::write!(fmt, "Low"),
            PaLevel::High => defmt::write!(fmt, "High"),
            PaLevel::Max => defmt::write!(fmt, "Max"),
        }
    }
}

impl Display for PaLevel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PaLevel::Min => write!(f, "Min"),
            PaLevel::Low => write!(f, "Low"),
            PaLevel::High => write!(f, "High"),
            PaLevel::Max => write!(f, "Max"),
        }
    }
}

/// How fast data moves through the air. Units are in bits per second (bps).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    /// represents 1 Mbps
    Mbps1,
    /// represents 2 Mbps
    Mbps2,
}

impl DataRate {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => 1,
        }
    }
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value {
            0 => DataRate::Mbps1,
            _ => DataRate::Mbps2,
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Mbps1 => defmt::write!(fmt, "1 Mbps"),
            DataRate::Mbps2 => defmt::write!(fmt, "2 Mbps"),
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
        }
    }
}

/// The length of the CRC checksum appended to every packet.
///
/// CRC is always enabled because auto-acknowledgement requires it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrcLength {
    /// represents CRC 8 bit checksum is used
    Bit8,
    /// represents CRC 16 bit checksum is used
    Bit16,
}

impl CrcLength {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            CrcLength::Bit8 => 0,
            CrcLength::Bit16 => 1,
        }
    }
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value {
            0 => CrcLength::Bit8,
            _ => CrcLength::Bit16,
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for CrcLength {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CrcLength::Bit8 => defmt::write!(fmt, "8 bit"),
            CrcLength::Bit16 => defmt::write!(fmt, "16 bit"),
        }
    }
}

impl Display for CrcLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CrcLength::Bit8 => write!(f, "8 bit"),
            CrcLength::Bit16 => write!(f, "16 bit"),
        }
    }
}

/// A snapshot of the radio's STATUS register.
///
/// The three event flags are write-1-to-clear on the chip, so a flag observed
/// here stays set on the radio until it is explicitly cleared.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// RX Data Ready: a payload arrived in the RX FIFO.
    pub rx_dr: bool,

    /// TX Data Sent: a payload was sent (and acknowledged, if auto-ack is on).
    pub tx_ds: bool,

    /// Maximum retransmits: the auto-retry budget for the current payload ran out.
    pub max_rt: bool,

    /// The pipe number of the payload on top of the RX FIFO.
    /// `7` means the RX FIFO is empty.
    #[bits(3)]
    pub rx_pipe: u8,

    /// The TX FIFO has no free slots.
    pub tx_full: bool,
}

impl StatusFlags {
    /// A mask to isolate only the IRQ flags. Useful for STATUS and CONFIG registers.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// The pipe that holds the top RX payload, if any.
    ///
    /// Values 6 (unused) and 7 (RX FIFO empty) yield `None`.
    pub const fn rx_pipe_number(&self) -> Option<u8> {
        let pipe = self.rx_pipe();
        if pipe < 6 {
            Some(pipe)
        } else {
            None
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}, rx_pipe: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt(),
            self.rx_pipe()
        )
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}, rx_pipe: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt(),
            self.rx_pipe()
        )
    }
}

/// What happened during one dispatch cycle.
///
/// The integer form returned by [`RunOutcome::code()`] is `0` (nothing happened),
/// `1` (sent), `2` (received), `3` (both) or `-1` (transmission failed).
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct RunOutcome {
    /// A payload (or an ACK payload, in PRX role) went out.
    pub tx_done: bool,
    /// A payload was read from the RX FIFO and handed to the handler.
    pub rx_ready: bool,
    /// The radio exhausted its auto-retry budget. The TX FIFO was flushed.
    pub tx_failed: bool,
    #[bits(5)]
    _padding: u8,
}

impl RunOutcome {
    /// The outcome as the signed integer contract.
    pub const fn code(&self) -> i8 {
        if self.tx_failed() {
            -1
        } else {
            (self.into_bits() & 3) as i8
        }
    }

    /// Did nothing happen during the cycle?
    pub const fn is_idle(&self) -> bool {
        self.into_bits() == 0
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for RunOutcome {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "RunOutcome({=i8})", self.code())
    }
}

impl Display for RunOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "RunOutcome tx_done: {}, rx_ready: {}, tx_failed: {}",
            self.tx_done(),
            self.rx_ready(),
            self.tx_failed()
        )
    }
}
