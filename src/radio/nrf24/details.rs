use super::{Nrf24, Nrf24Error};
use crate::radio::{prelude::EsbDetails, Transport};
use embedded_hal::delay::DelayNs;

#[cfg(any(all(feature = "defmt", target_os = "none"), feature = "std"))]
use crate::radio::prelude::{EsbInit, EsbStatus};

#[cfg(feature = "std")]
extern crate std;

impl<P, H, DELAY, S> EsbDetails for Nrf24<'_, P, H, DELAY, S>
where
    P: Transport,
    DELAY: DelayNs,
{
    type DetailsErrorType = Nrf24Error<P::Error>;

    #[cfg(feature = "defmt")]
    #[cfg(target_os = "none")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        let status = self.read_status()?;
        let (lost, retries) = self.observe_tx()?;
        let image = self.read_image()?;

        let rx = defmt::intern!("R");
        let tx = defmt::intern!("T");
        defmt::println!(
            "Primary Mode______________{=istr}X",
            if image.config.is_rx() { rx } else { tx }
        );
        defmt::println!("Powered Up________________{=bool}", image.config.power());
        defmt::println!(
            "Channel___________________{=u8} ~ {=u16} MHz",
            image.rf_ch,
            image.rf_ch as u16 + 2400u16
        );
        defmt::println!("RF Data Rate______________{}", image.rf_setup.data_rate());
        defmt::println!("RF Power Amplifier________{}", image.rf_setup.pa_level());
        defmt::println!("RF LNA enabled____________{=bool}", image.rf_setup.lna_enable());
        defmt::println!("CRC enabled_______________{=bool}", image.config.en_crc());
        defmt::println!("CRC Length________________{}", image.config.crc_length());
        defmt::println!(
            "Address length____________{=u8} bytes",
            image.setup_aw + 2
        );
        defmt::println!(
            "Auto retry delay__________{=u16} microseconds",
            image.setup_retr.ard() as u16 * 250 + 250
        );
        defmt::println!(
            "Auto retry attempts_______{=u8} maximum",
            image.setup_retr.arc()
        );
        defmt::println!("Packets lost\n    on current channel____{=u8}", lost);
        defmt::println!("Retry attempts made\n    for last transmission_{=u8}", retries);

        defmt::println!("IRQ on Data Ready_________{=bool}", !image.config.mask_rx_dr());
        defmt::println!("    Data Ready triggered__{=bool}", status.rx_dr());
        defmt::println!("IRQ on Data Sent__________{=bool}", !image.config.mask_tx_ds());
        defmt::println!("    Data Sent triggered___{=bool}", status.tx_ds());
        defmt::println!("IRQ on Max Retries________{=bool}", !image.config.mask_max_rt());
        defmt::println!("    Max Retries triggered_{=bool}", status.max_rt());

        defmt::println!("Ask no ACK allowed________{=bool}", image.feature.ask_no_ack());
        defmt::println!("ACK Payload enabled_______{=bool}", image.feature.ack_payloads());
        defmt::println!("Dynamic Payloads__________0b{=0..8}", image.dynpd);
        defmt::println!("Auto Acknowledgment_______0b{=0..8}", image.en_aa);

        defmt::println!("TX address________________{=[u8; 5]:02X}", image.tx_addr);
        let opened = defmt::intern!(" open ");
        let closed = defmt::intern!("closed");
        for pipe in 0..6u8 {
            let state = if image.en_rxaddr & (1 << pipe) > 0 {
                opened
            } else {
                closed
            };
            let mut address = image.rx_addr_p1;
            match pipe {
                0 => address = image.rx_addr_p0,
                1 => (),
                _ => address[0] = image.rx_addr_short[pipe as usize - 2],
            }
            defmt::println!(
                "Pipe {=u8} ({=istr}) bound to {=[u8; 5]:02X}",
                pipe,
                state,
                address
            );
        }
        Ok(())
    }

    #[cfg(not(any(all(feature = "defmt", target_os = "none"), feature = "std")))]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        Ok(())
    }

    #[cfg(not(all(feature = "defmt", target_os = "none")))]
    #[cfg(feature = "std")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        let status = self.read_status()?;
        let (lost, retries) = self.observe_tx()?;
        let image = self.read_image()?;

        std::println!(
            "Primary Mode______________{}X",
            if image.config.is_rx() { "R" } else { "T" }
        );
        std::println!("Powered Up________________{}", image.config.power());
        std::println!(
            "Channel___________________{} ~ {} MHz",
            image.rf_ch,
            image.rf_ch as u16 + 2400u16
        );
        std::println!("RF Data Rate______________{}", image.rf_setup.data_rate());
        std::println!("RF Power Amplifier________{}", image.rf_setup.pa_level());
        std::println!("RF LNA enabled____________{}", image.rf_setup.lna_enable());
        std::println!("CRC enabled_______________{}", image.config.en_crc());
        std::println!("CRC Length________________{}", image.config.crc_length());
        std::println!("Address length____________{} bytes", image.setup_aw + 2);
        std::println!(
            "Auto retry delay__________{} microseconds",
            image.setup_retr.ard() as u16 * 250 + 250
        );
        std::println!(
            "Auto retry attempts_______{} maximum",
            image.setup_retr.arc()
        );
        std::println!("Packets lost\n    on current channel____{lost}");
        std::println!("Retry attempts made\n    for last transmission_{retries}");

        std::println!("IRQ on Data Ready_________{}", !image.config.mask_rx_dr());
        std::println!("    Data Ready triggered__{}", status.rx_dr());
        std::println!("IRQ on Data Sent__________{}", !image.config.mask_tx_ds());
        std::println!("    Data Sent triggered___{}", status.tx_ds());
        std::println!("IRQ on Max Retries________{}", !image.config.mask_max_rt());
        std::println!("    Max Retries triggered_{}", status.max_rt());

        std::println!("Ask no ACK allowed________{}", image.feature.ask_no_ack());
        std::println!("ACK Payload enabled_______{}", image.feature.ack_payloads());
        std::println!("Dynamic Payloads__________{:#010b}", image.dynpd);
        std::println!("Auto Acknowledgment_______{:#010b}", image.en_aa);

        std::println!("TX address________________{:02X?}", image.tx_addr);
        for pipe in 0..6u8 {
            let mut address = image.rx_addr_p1;
            match pipe {
                0 => address = image.rx_addr_p0,
                1 => (),
                _ => address[0] = image.rx_addr_short[pipe as usize - 2],
            }
            std::println!(
                "Pipe {pipe} ({}) bound to {:02X?}",
                if image.en_rxaddr & (1 << pipe) > 0 {
                    " open "
                } else {
                    "closed"
                },
                address,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::EsbDetails;
    use crate::{radio::RadioConfig, test::mk_radio};

    #[cfg(not(feature = "std"))]
    #[test]
    fn print_nothing() {
        let mocks = mk_radio(&[], &[], RadioConfig::default());
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(radio.print_details().is_ok());
        spi.done();
        ce_pin.done();
    }

    #[cfg(feature = "std")]
    #[test]
    fn print_everything() {
        extern crate std;
        use crate::{
            radio::nrf24::{registers, RegisterImage},
            test::{read_reg, send_then_recv},
            Role,
        };
        use std::vec;

        let config = RadioConfig::for_role(Role::Prx).with_rx_address(4, &[0xC5]);
        let image = RegisterImage::from_config(&config);
        let mut spi_expectations = read_reg(registers::STATUS, 0x0E);
        spi_expectations.extend(read_reg(registers::OBSERVE_TX, 0x00));
        for (register, value) in image.control_registers() {
            spi_expectations.extend(read_reg(register, value));
        }
        for (register, address) in image.address_registers() {
            spi_expectations.extend(send_then_recv(vec![register], address.to_vec()));
        }
        for (register, value) in image.short_address_registers() {
            spi_expectations.extend(read_reg(register, value));
        }
        spi_expectations.extend(read_reg(registers::CONFIG, image.config.into_bits()));

        let mocks = mk_radio(&[], &spi_expectations, config);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(radio.print_details().is_ok());
        spi.done();
        ce_pin.done();
    }
}
