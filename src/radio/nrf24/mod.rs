use super::{CsSemaphore, RadioConfig, Semaphore, Transport};
use crate::StatusFlags;

pub mod bit_fields;
mod constants;
pub use constants::{commands, mnemonics, registers};
mod details;
mod dispatch;
mod fifo;
mod image;
pub use image::{Mismatch, RegisterImage};
mod init;
mod payload;
mod power;
mod status;

/// An collection of error types to describe hardware malfunctions
/// and misuse of the radio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error<E> {
    /// Represents a bus (or pin) error reported by the [`Transport`].
    Transport(E),
    /// The loopback test of the bus failed.
    ///
    /// No radio register was configured.
    SelfTestFailure,
    /// A register read back after configuration did not hold the value written.
    ///
    /// The radio was powered down again and must not be used.
    ConfigMismatch {
        register: u8,
        expected: u8,
        found: u8,
    },
    /// A payload must be 1 to 32 bytes long.
    InvalidPayloadLength,
    /// An ACK payload can only be queued for pipes 0 - 5.
    InvalidPipe,
    /// [`EsbInit::init()`](fn@crate::radio::prelude::EsbInit::init) did not succeed yet.
    NotInitialized,
    /// The radio was configured without a [`Role`](crate::Role).
    RoleUnset,
}

impl<E> From<Mismatch> for Nrf24Error<E> {
    fn from(value: Mismatch) -> Self {
        Nrf24Error::ConfigMismatch {
            register: value.register,
            expected: value.expected,
            found: value.found,
        }
    }
}

/// This struct implements the [`Esb*` traits](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver.
///
/// The radio owns its [`Transport`] and its [`RadioHandler`](crate::RadioHandler).
/// In interrupt mode, it also borrows the [`Semaphore`] that the IRQ handler releases.
pub struct Nrf24<'a, P, H, DELAY, S = CsSemaphore> {
    port: P,
    handler: H,
    delay_impl: DELAY,
    config: RadioConfig,
    irq_signal: Option<&'a S>,
    ack_queued: CsSemaphore,
    status: StatusFlags,
    features_activated: bool,
    ready: bool,
    buf: [u8; mnemonics::MAX_PAYLOAD],
}

impl<P, H, DELAY> Nrf24<'static, P, H, DELAY, CsSemaphore> {
    /// Instantiate a [`Nrf24`] object that talks through the given `port`.
    ///
    /// Nothing is sent to the radio until
    /// [`EsbInit::init()`](fn@crate::radio::prelude::EsbInit::init) is called.
    pub fn new(port: P, handler: H, delay_impl: DELAY, config: RadioConfig) -> Self {
        Nrf24 {
            port,
            handler,
            delay_impl,
            config,
            irq_signal: None,
            ack_queued: CsSemaphore::new(),
            status: StatusFlags::from_bits(0),
            features_activated: false,
            ready: false,
            buf: [0u8; mnemonics::MAX_PAYLOAD],
        }
    }
}

impl<'a, P, H, DELAY, S> Nrf24<'a, P, H, DELAY, S> {
    /// Attach the semaphore that the IRQ handler releases.
    ///
    /// The dispatcher only waits on it if the [`RadioConfig`] also names an IRQ line.
    pub fn with_irq_signal<'b, T: Semaphore>(self, signal: &'b T) -> Nrf24<'b, P, H, DELAY, T> {
        Nrf24 {
            port: self.port,
            handler: self.handler,
            delay_impl: self.delay_impl,
            config: self.config,
            irq_signal: Some(signal),
            ack_queued: self.ack_queued,
            status: self.status,
            features_activated: self.features_activated,
            ready: self.ready,
            buf: self.buf,
        }
    }

    /// The configuration the radio was (or will be) initialized with.
    pub fn config(&self) -> &RadioConfig {
        &self.config
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Did [`EsbInit::init()`](fn@crate::radio::prelude::EsbInit::init) succeed?
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn irq_mode(&self) -> bool {
        self.irq_signal.is_some() && self.config.irq_line().is_some()
    }
}

impl<'a, P, H, DELAY, S> Nrf24<'a, P, H, DELAY, S>
where
    P: Transport,
{
    /// Read a single byte register.
    pub fn read_register(&mut self, register: u8) -> Result<u8, Nrf24Error<P::Error>> {
        let mut value = [0u8];
        self.port
            .send_then_recv(&[commands::R_REGISTER | register], &mut value)
            .map_err(Nrf24Error::Transport)?;
        Ok(value[0])
    }

    /// Write a single byte register.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), Nrf24Error<P::Error>> {
        self.port
            .write(&[commands::W_REGISTER | register, value])
            .map_err(Nrf24Error::Transport)
    }

    /// Read-modify-write the contiguous bits of a register selected by `mask`.
    ///
    /// `value` is given unshifted; it is moved to the position of `mask`'s lowest set bit.
    /// Bits outside `mask` keep their current value. An empty `mask` does nothing.
    pub fn write_bits(
        &mut self,
        register: u8,
        mask: u8,
        value: u8,
    ) -> Result<(), Nrf24Error<P::Error>> {
        if mask == 0 {
            return Ok(());
        }
        let shifted = value << mask.trailing_zeros();
        let current = self.read_register(register)?;
        self.write_register(register, (current & !mask) | (shifted & mask))
    }

    /// Read a multi-byte register (like an address).
    pub fn read_buf(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Nrf24Error<P::Error>> {
        self.port
            .send_then_recv(&[commands::R_REGISTER | register], buf)
            .map_err(Nrf24Error::Transport)
    }

    /// Write a multi-byte register (like an address).
    pub fn write_buf(&mut self, register: u8, buf: &[u8]) -> Result<(), Nrf24Error<P::Error>> {
        self.port
            .send_then_send(&[commands::W_REGISTER | register], buf)
            .map_err(Nrf24Error::Transport)
    }

    /// Send a command that has no arguments.
    fn command(&mut self, command: u8) -> Result<(), Nrf24Error<P::Error>> {
        self.port.write(&[command]).map_err(Nrf24Error::Transport)
    }

    /// Unlock the FEATURE and DYNPD registers on older (non-plus) variants.
    ///
    /// The command toggles the unlock state, so it is only ever sent once per handle.
    fn activate_features(&mut self) -> Result<(), Nrf24Error<P::Error>> {
        if self.features_activated {
            return Ok(());
        }
        self.port
            .write(&[commands::ACTIVATE, mnemonics::ACTIVATE_FEATURES])
            .map_err(Nrf24Error::Transport)?;
        self.features_activated = true;
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, mnemonics, registers, Mismatch, Nrf24Error};
    use crate::{radio::RadioConfig, spi_test_expects, test::mk_radio};
    use std::vec;

    #[test]
    fn read_write_register() {
        let spi_expectations = spi_test_expects![
            send_then_recv(vec![registers::RF_CH], vec![76]),
            write(vec![registers::RF_CH | commands::W_REGISTER, 100]),
        ];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::default());
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.read_register(registers::RF_CH).unwrap(), 76);
        radio.write_register(registers::RF_CH, 100).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn write_single_bit() {
        // setting bit 1 must leave all other bits untouched
        let mut spi_expectations = vec![];
        for current in [0x00u8, 0x0C, 0xFD, 0x7E] {
            spi_expectations.extend(spi_test_expects![
                read_reg(registers::CONFIG, current),
                write_reg(registers::CONFIG, current | mnemonics::PWR_UP),
            ]);
        }
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::default());
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        for _ in 0..4 {
            radio
                .write_bits(registers::CONFIG, mnemonics::PWR_UP, 1)
                .unwrap();
        }
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn write_bit_field() {
        let spi_expectations = spi_test_expects![
            // RF_PWR lives in bits 2:1
            read_reg(registers::RF_SETUP, 0x09),
            write_reg(registers::RF_SETUP, 0x0D),
            // value bits that do not fit the mask are dropped
            read_reg(registers::RF_SETUP, 0x0F),
            write_reg(registers::RF_SETUP, 0x0B),
        ];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::default());
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.write_bits(registers::RF_SETUP, 0b110, 2).unwrap();
        radio.write_bits(registers::RF_SETUP, 0b110, 5).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn write_bits_empty_mask() {
        let mocks = mk_radio(&[], &[], RadioConfig::default());
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.write_bits(registers::CONFIG, 0, 1).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn addresses() {
        let spi_expectations = spi_test_expects![
            send_then_send(
                vec![registers::TX_ADDR | commands::W_REGISTER],
                vec![1, 2, 3, 4, 5]
            ),
            send_then_recv(vec![registers::TX_ADDR], vec![1, 2, 3, 4, 5]),
        ];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::default());
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.write_buf(registers::TX_ADDR, &[1, 2, 3, 4, 5]).unwrap();
        let mut address = [0u8; 5];
        radio.read_buf(registers::TX_ADDR, &mut address).unwrap();
        assert_eq!(address, [1, 2, 3, 4, 5]);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn activate_once() {
        let spi_expectations = spi_test_expects![write(vec![commands::ACTIVATE, 0x73])];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::default());
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.activate_features().unwrap();
        radio.activate_features().unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn mismatch_into_error() {
        let err: Nrf24Error<()> = Mismatch {
            register: registers::RF_CH,
            expected: 100,
            found: 0,
        }
        .into();
        assert_eq!(
            err,
            Nrf24Error::ConfigMismatch {
                register: registers::RF_CH,
                expected: 100,
                found: 0
            }
        );
    }
}
