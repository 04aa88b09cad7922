//! The chip-exact encoding of a [`RadioConfig`].

use crate::{
    radio::{RadioConfig, RxPipe},
    Role,
};

use super::{
    bit_fields::{Config, Feature, RfSetup, SetupRetry},
    registers,
};

/// A register that differs between two [`RegisterImage`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// The register's offset.
    pub register: u8,
    /// The value that was written (for multi-byte registers, the first differing byte).
    pub expected: u8,
    /// The value that was read back.
    pub found: u8,
}

/// Every register the driver configures.
///
/// Build one from a [`RadioConfig`] with [`RegisterImage::from_config()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterImage {
    pub config: Config,
    pub en_aa: u8,
    pub en_rxaddr: u8,
    pub setup_aw: u8,
    pub setup_retr: SetupRetry,
    pub rf_ch: u8,
    pub rf_setup: RfSetup,
    pub dynpd: u8,
    pub feature: Feature,
    pub tx_addr: [u8; 5],
    pub rx_addr_p0: [u8; 5],
    pub rx_addr_p1: [u8; 5],
    /// LSBytes of the pipe 2 - 5 addresses.
    pub rx_addr_short: [u8; 4],
}

impl RegisterImage {
    /// The register value for 5 byte addresses.
    const ADDRESS_WIDTH_5: u8 = 3;
    /// All 6 pipes.
    const ALL_PIPES: u8 = 0x3F;

    /// Translate a [`RadioConfig`] into register values.
    ///
    /// This is pure and never fails. Fields that are not exposed by [`RadioConfig`] get
    /// fixed values: 5 byte addresses, shortest retry delay with 15 retries,
    /// auto-ack and dynamic payloads on all pipes, and all features enabled.
    /// If the config names no IRQ line, all IRQ events are masked.
    pub fn from_config(config: &RadioConfig) -> Self {
        let rx_addr_short = [2u8, 3, 4, 5].map(|pipe| match config.rx_pipe(pipe) {
            Some(RxPipe::Short { address, .. }) => address,
            _ => 0,
        });
        let mut rx_addr = [[0u8; 5]; 2];
        for (pipe, address) in rx_addr.iter_mut().enumerate() {
            if let Some(RxPipe::Full { address: addr, .. }) = config.rx_pipe(pipe as u8) {
                *address = addr;
            }
        }
        Self {
            config: Config::new()
                .with_irq_masked(config.irq_line().is_none())
                .with_en_crc(true)
                .with_crc_length(config.crc_length())
                .with_power(true)
                .with_is_rx(config.role() == Role::Prx),
            en_aa: Self::ALL_PIPES,
            en_rxaddr: config.rx_pipes_enabled(),
            setup_aw: Self::ADDRESS_WIDTH_5,
            setup_retr: SetupRetry::new().with_ard(0).with_arc(15),
            rf_ch: config.channel(),
            rf_setup: RfSetup::new()
                .with_data_rate(config.data_rate())
                .with_pa_level(config.pa_level())
                .with_lna_enable(true),
            dynpd: Self::ALL_PIPES,
            feature: Feature::new()
                .with_dynamic_payloads(true)
                .with_ack_payloads(true)
                .with_ask_no_ack(true),
            tx_addr: config.tx_address(),
            rx_addr_p0: rx_addr[0],
            rx_addr_p1: rx_addr[1],
            rx_addr_short,
        }
    }

    /// The single byte control registers (except CONFIG) in the order they are written.
    pub fn control_registers(&self) -> [(u8, u8); 8] {
        [
            (registers::EN_AA, self.en_aa),
            (registers::EN_RXADDR, self.en_rxaddr),
            (registers::SETUP_AW, self.setup_aw),
            (registers::SETUP_RETR, self.setup_retr.into_bits()),
            (registers::RF_CH, self.rf_ch),
            (registers::RF_SETUP, self.rf_setup.into_bits()),
            (registers::DYNPD, self.dynpd),
            (registers::FEATURE, self.feature.into_bits()),
        ]
    }

    /// The 5 byte address registers in the order they are written.
    pub fn address_registers(&self) -> [(u8, [u8; 5]); 3] {
        [
            (registers::TX_ADDR, self.tx_addr),
            (registers::RX_ADDR_P0, self.rx_addr_p0),
            (registers::RX_ADDR_P1, self.rx_addr_p1),
        ]
    }

    /// The 1 byte address registers of pipes 2 - 5.
    pub fn short_address_registers(&self) -> [(u8, u8); 4] {
        let mut out = [(0u8, 0u8); 4];
        for (i, entry) in out.iter_mut().enumerate() {
            *entry = (registers::RX_ADDR_P2 + i as u8, self.rx_addr_short[i]);
        }
        out
    }

    /// Compare against an image that was read back from the radio.
    ///
    /// Returns the first difference, in the order registers are written.
    pub fn mismatch(&self, found: &Self) -> Option<Mismatch> {
        let singles = self
            .control_registers()
            .into_iter()
            .zip(found.control_registers());
        let addresses = self
            .address_registers()
            .into_iter()
            .zip(found.address_registers())
            .flat_map(|((reg, expected), (_, read))| {
                expected
                    .into_iter()
                    .zip(read)
                    .map(move |(e, r)| ((reg, e), (reg, r)))
            });
        let shorts = self
            .short_address_registers()
            .into_iter()
            .zip(found.short_address_registers());
        let config = core::iter::once((
            (registers::CONFIG, self.config.into_bits()),
            (registers::CONFIG, found.config.into_bits()),
        ));
        singles
            .chain(addresses)
            .chain(shorts)
            .chain(config)
            .find(|((_, expected), (_, found))| expected != found)
            .map(|((register, expected), (_, found))| Mismatch {
                register,
                expected,
                found,
            })
    }
}
