use embedded_hal::delay::DelayNs;

use super::{
    bit_fields::{Config, Feature, RfSetup, SetupRetry},
    registers, Nrf24, Nrf24Error, RegisterImage,
};
use crate::{
    radio::{
        prelude::{EsbFifo, EsbInit, EsbPower, EsbStatus},
        RadioConfig, Semaphore, Transport,
    },
    StatusFlags,
};

/// The loopback pattern of the bus self-test.
const SELF_TEST_PATTERN: [u8; 5] = [1, 2, 3, 4, 5];

impl<P, H, DELAY, S> EsbInit for Nrf24<'_, P, H, DELAY, S>
where
    P: Transport,
    DELAY: DelayNs,
{
    type ConfigErrorType = Nrf24Error<P::Error>;

    /// Initialize the radio's hardware using the [`Transport`] given
    /// to [`Nrf24::new()`].
    fn init(&mut self) -> Result<(), Self::ConfigErrorType> {
        self.ready = false;
        self.port.reset_ce().map_err(Nrf24Error::Transport)?;

        // Must allow the radio time to settle else configuration bits will not necessarily stick.
        // Technically we require 4.5ms + 14us as a worst case. We'll just call it 5ms for good measure.
        self.delay_impl.delay_us(5000);

        self.check_transport()?;
        #[cfg(feature = "defmt")]
        defmt::trace!("Bus self-test passed");

        let image = RegisterImage::from_config(&self.config);
        self.apply_and_verify(&image)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("Configured radio on channel {}", image.rf_ch);

        self.flush_rx()?;
        self.flush_tx()?;
        self.clear_status(StatusFlags::from_bits(StatusFlags::IRQ_MASK))?;
        // queued ACK payloads were just flushed
        while self.ack_queued.try_take() {}

        // Tpd2standby
        self.delay_impl.delay_us(5000);
        self.port.set_ce().map_err(Nrf24Error::Transport)?;
        self.ready = true;
        Ok(())
    }

    fn reinit(&mut self, config: RadioConfig) -> Result<(), Self::ConfigErrorType> {
        self.config = config;
        self.init()
    }

    fn check_transport(&mut self) -> Result<(), Self::ConfigErrorType> {
        let mut backup = [0u8; 5];
        self.read_buf(registers::RX_ADDR_P1, &mut backup)?;

        let mut readback = [0u8; 5];
        let looped = self
            .write_buf(registers::RX_ADDR_P1, &SELF_TEST_PATTERN)
            .and_then(|()| self.read_buf(registers::RX_ADDR_P1, &mut readback));
        let restored = self.write_buf(registers::RX_ADDR_P1, &backup);
        looped?;
        restored?;

        if readback != SELF_TEST_PATTERN {
            #[cfg(feature = "defmt")]
            defmt::warn!("Bus self-test read back {}", readback);
            return Err(Nrf24Error::SelfTestFailure);
        }
        Ok(())
    }

    fn apply_and_verify(&mut self, image: &RegisterImage) -> Result<(), Self::ConfigErrorType> {
        // the radio leaves active mode here; only init() brings it back
        self.ready = false;
        self.power_down()?;
        self.activate_features()?;

        for (register, value) in image.control_registers() {
            self.write_register(register, value)?;
        }
        for (register, address) in image.address_registers() {
            self.write_buf(register, &address)?;
        }
        for (register, value) in image.short_address_registers() {
            self.write_register(register, value)?;
        }
        // CONFIG holds the power and role bits, so it goes last
        self.write_register(registers::CONFIG, image.config.into_bits())?;

        let found = self.read_image()?;
        if let Some(mismatch) = image.mismatch(&found) {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Register {=u8:#x} reads {=u8:#x}; expected {=u8:#x}",
                mismatch.register,
                mismatch.found,
                mismatch.expected
            );
            self.power_down()?;
            return Err(mismatch.into());
        }
        Ok(())
    }

    fn read_image(&mut self) -> Result<RegisterImage, Self::ConfigErrorType> {
        let en_aa = self.read_register(registers::EN_AA)?;
        let en_rxaddr = self.read_register(registers::EN_RXADDR)?;
        let setup_aw = self.read_register(registers::SETUP_AW)?;
        let setup_retr = SetupRetry::from_bits(self.read_register(registers::SETUP_RETR)?);
        let rf_ch = self.read_register(registers::RF_CH)?;
        let rf_setup = RfSetup::from_bits(self.read_register(registers::RF_SETUP)?);
        let dynpd = self.read_register(registers::DYNPD)?;
        let feature = Feature::from_bits(self.read_register(registers::FEATURE)?);

        let mut tx_addr = [0u8; 5];
        self.read_buf(registers::TX_ADDR, &mut tx_addr)?;
        let mut rx_addr_p0 = [0u8; 5];
        self.read_buf(registers::RX_ADDR_P0, &mut rx_addr_p0)?;
        let mut rx_addr_p1 = [0u8; 5];
        self.read_buf(registers::RX_ADDR_P1, &mut rx_addr_p1)?;
        let mut rx_addr_short = [0u8; 4];
        for (offset, address) in rx_addr_short.iter_mut().enumerate() {
            *address = self.read_register(registers::RX_ADDR_P2 + offset as u8)?;
        }

        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        Ok(RegisterImage {
            config,
            en_aa,
            en_rxaddr,
            setup_aw,
            setup_retr,
            rf_ch,
            rf_setup,
            dynpd,
            feature,
            tx_addr,
            rx_addr_p0,
            rx_addr_p1,
            rx_addr_short,
        })
    }
}
