//! Bit-exact encodings of the nRF24L01 control registers.

use bitfield_struct::bitfield;

use crate::{CrcLength, DataRate, PaLevel};

/// The CONFIG register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct Config {
    #[bits(1)]
    _padding: u8,

    /// Hide the "RX Data Ready" event from the IRQ pin.
    pub mask_rx_dr: bool,

    /// Hide the "TX Data Sent" event from the IRQ pin.
    pub mask_tx_ds: bool,

    /// Hide the "Max retransmits" event from the IRQ pin.
    pub mask_max_rt: bool,

    pub en_crc: bool,

    #[bits(1, default = CrcLength::Bit8)]
    pub crc_length: CrcLength,

    pub power: bool,

    /// `true` for PRX, `false` for PTX.
    pub is_rx: bool,
}

impl Config {
    /// Are all IRQ events hidden from the IRQ pin?
    pub const fn irq_masked(&self) -> bool {
        self.mask_rx_dr() && self.mask_tx_ds() && self.mask_max_rt()
    }

    /// Hide (or show) all IRQ events.
    pub const fn with_irq_masked(self, masked: bool) -> Self {
        self.with_mask_rx_dr(masked)
            .with_mask_tx_ds(masked)
            .with_mask_max_rt(masked)
    }
}

/// The SETUP_RETR register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct SetupRetry {
    /// The auto-retry `delay`, in steps of 250 microseconds (plus 250).
    #[bits(4)]
    pub ard: u8,

    /// The auto-retry `count`.
    #[bits(4)]
    pub arc: u8,
}

/// The RF_SETUP register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct RfSetup {
    #[bits(4)]
    _padding: u8,

    /// The RF_DR_HIGH bit.
    #[bits(1, default = DataRate::Mbps1)]
    pub data_rate: DataRate,

    #[bits(2, default = PaLevel::Min)]
    pub pa_level: PaLevel,

    /// The LNA_HCURR bit.
    pub lna_enable: bool,
}

/// The FEATURE register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct Feature {
    #[bits(5)]
    _padding: u8,

    pub dynamic_payloads: bool,

    pub ack_payloads: bool,

    /// Allows the W_TX_PAYLOAD_NOACK command.
    pub ask_no_ack: bool,
}

/// The OBSERVE_TX register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct ObserveTx {
    /// Lost packets. Resets when the RF channel is written.
    #[bits(4)]
    pub plos_cnt: u8,

    /// Retransmits of the last payload.
    #[bits(4)]
    pub arc_cnt: u8,
}
