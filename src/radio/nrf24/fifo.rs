use crate::radio::{prelude::EsbFifo, Nrf24, Nrf24Error, Transport};

use super::{commands, mnemonics, registers};

impl<P, H, DELAY, S> EsbFifo for Nrf24<'_, P, H, DELAY, S>
where
    P: Transport,
{
    type FifoErrorType = Nrf24Error<P::Error>;

    /// Use this to discard all 3 layers in the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.command(commands::FLUSH_RX)
    }

    /// Use this to discard all 3 layers in the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.command(commands::FLUSH_TX)
    }

    fn rx_fifo_empty(&mut self) -> Result<bool, Self::FifoErrorType> {
        let fifo_status = self.read_register(registers::FIFO_STATUS)?;
        Ok(fifo_status & mnemonics::RX_EMPTY != 0)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, registers, EsbFifo};
    use crate::{radio::RadioConfig, spi_test_expects, test::mk_radio};
    use std::vec;

    #[test]
    fn flush() {
        let spi_expectations = spi_test_expects![
            write(vec![commands::FLUSH_RX]),
            write(vec![commands::FLUSH_TX]),
        ];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::default());
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.flush_rx().unwrap();
        radio.flush_tx().unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn rx_fifo_empty() {
        let spi_expectations = spi_test_expects![
            read_reg(registers::FIFO_STATUS, 0x11),
            read_reg(registers::FIFO_STATUS, 0x10),
        ];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::default());
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(radio.rx_fifo_empty().unwrap());
        assert!(!radio.rx_fifo_empty().unwrap());
        spi.done();
        ce_pin.done();
    }
}
