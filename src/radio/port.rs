//! The narrow bus interface the driver talks through.

use core::convert::Infallible;

use embedded_hal::{
    digital::{ErrorType, InputPin, OutputPin},
    spi::{Operation, SpiDevice},
};

/// The four bus primitives (and two line controls) the radio needs.
///
/// Every primitive is one bus transaction with the radio's CSN held active.
/// Bus configuration (clock speed, bit order, chip-select) is the
/// implementor's business.
pub trait Transport {
    type Error;

    /// Write `bytes` in one transaction.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Write `command`, then read `reply.len()` bytes in the same transaction.
    fn send_then_recv(&mut self, command: &[u8], reply: &mut [u8]) -> Result<(), Self::Error>;

    /// Write `header`, then `payload`, in the same transaction.
    fn send_then_send(&mut self, header: &[u8], payload: &[u8]) -> Result<(), Self::Error>;

    /// Activate the radio's CE pin.
    fn set_ce(&mut self) -> Result<(), Self::Error>;

    /// Deactivate the radio's CE pin.
    fn reset_ce(&mut self) -> Result<(), Self::Error>;

    /// Read the level of the radio's IRQ line (`true` = high).
    ///
    /// The line is active low.
    fn read_irq(&mut self) -> Result<bool, Self::Error>;
}

/// An collection of error types to describe hardware malfunctions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PortError<SPI, DO, DI> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error.
    Gpo(DO),
    /// Represents a DigitalInput error.
    Gpi(DI),
}

/// An IRQ "pin" for boards that do not wire the radio's IRQ line.
///
/// It always reads high (deasserted).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIrqPin;

impl ErrorType for NoIrqPin {
    type Error = Infallible;
}

impl InputPin for NoIrqPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

/// A [`Transport`] over [`embedded-hal`](https://docs.rs/embedded-hal) traits.
///
/// The radio's CSN pin (aka Chip Select pin) shall be defined
/// when instantiating the [`SpiDevice`] object (passed to the `spi` parameter).
pub struct HalPort<SPI, CE, IRQ = NoIrqPin> {
    spi: SPI,
    ce_pin: CE,
    irq_pin: IRQ,
}

impl<SPI, CE> HalPort<SPI, CE, NoIrqPin> {
    /// A port without an IRQ line.
    pub fn new(spi: SPI, ce_pin: CE) -> Self {
        Self {
            spi,
            ce_pin,
            irq_pin: NoIrqPin,
        }
    }
}

impl<SPI, CE, IRQ> HalPort<SPI, CE, IRQ> {
    /// A port that can also read the radio's IRQ line.
    pub fn with_irq_pin(spi: SPI, ce_pin: CE, irq_pin: IRQ) -> Self {
        Self {
            spi,
            ce_pin,
            irq_pin,
        }
    }

    /// Give back the bus and pins.
    pub fn release(self) -> (SPI, CE, IRQ) {
        (self.spi, self.ce_pin, self.irq_pin)
    }
}

impl<SPI, CE, IRQ> Transport for HalPort<SPI, CE, IRQ>
where
    SPI: SpiDevice,
    CE: OutputPin,
    IRQ: InputPin,
{
    type Error = PortError<SPI::Error, CE::Error, IRQ::Error>;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes).map_err(PortError::Spi)
    }

    fn send_then_recv(&mut self, command: &[u8], reply: &mut [u8]) -> Result<(), Self::Error> {
        self.spi
            .transaction(&mut [Operation::Write(command), Operation::Read(reply)])
            .map_err(PortError::Spi)
    }

    fn send_then_send(&mut self, header: &[u8], payload: &[u8]) -> Result<(), Self::Error> {
        self.spi
            .transaction(&mut [Operation::Write(header), Operation::Write(payload)])
            .map_err(PortError::Spi)
    }

    fn set_ce(&mut self) -> Result<(), Self::Error> {
        self.ce_pin.set_high().map_err(PortError::Gpo)
    }

    fn reset_ce(&mut self) -> Result<(), Self::Error> {
        self.ce_pin.set_low().map_err(PortError::Gpo)
    }

    fn read_irq(&mut self) -> Result<bool, Self::Error> {
        self.irq_pin.is_high().map_err(PortError::Gpi)
    }
}
