use embedded_hal::delay::DelayNs;

use crate::radio::{prelude::EsbPower, Nrf24, Nrf24Error, Transport};

use super::{mnemonics, registers};

impl<P, H, DELAY, S> EsbPower for Nrf24<'_, P, H, DELAY, S>
where
    P: Transport,
    DELAY: DelayNs,
{
    type PowerErrorType = Nrf24Error<P::Error>;

    /// In full power down mode (a sleep state), the radio will consume approximately
    /// 900nA (.0009mA).
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType> {
        // Guarantee CE is low on powerDown
        self.port.reset_ce().map_err(Nrf24Error::Transport)?;
        self.write_bits(registers::CONFIG, mnemonics::PWR_UP, 0)
    }

    fn power_up(&mut self) -> Result<(), Self::PowerErrorType> {
        self.write_bits(registers::CONFIG, mnemonics::PWR_UP, 1)?;

        // There must be a delay of Tpd2standby after the nRF24L01+ leaves power down mode
        // before the CE is set high. Tpd2standby can be up to 5ms per the 1.0 datasheet
        self.delay_impl.delay_us(5000);
        Ok(())
    }
}

impl<P, H, DELAY, S> Nrf24<'_, P, H, DELAY, S>
where
    P: Transport,
    DELAY: DelayNs,
{
    /// Power down the radio and give back the port, handler and delay.
    pub fn release(mut self) -> Result<(P, H, DELAY), Nrf24Error<P::Error>> {
        self.power_down()?;
        Ok((self.port, self.handler, self.delay_impl))
    }
}
