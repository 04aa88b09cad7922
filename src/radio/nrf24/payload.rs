use crate::{
    radio::{
        prelude::{EsbFifo, EsbPayload},
        Nrf24, Nrf24Error, Semaphore, Transport,
    },
    Role,
};

use super::{commands, mnemonics};

impl<P, H, DELAY, S> EsbPayload for Nrf24<'_, P, H, DELAY, S>
where
    P: Transport,
{
    type PayloadErrorType = Nrf24Error<P::Error>;

    fn send(&mut self, data: &[u8], pipe: u8) -> Result<(), Self::PayloadErrorType> {
        if data.is_empty() || data.len() > mnemonics::MAX_PAYLOAD {
            return Err(Nrf24Error::InvalidPayloadLength);
        }
        if !self.ready {
            return Err(Nrf24Error::NotInitialized);
        }
        match self.config.role() {
            Role::Unset => Err(Nrf24Error::RoleUnset),
            Role::Ptx => self
                .port
                .send_then_send(&[commands::W_TX_PAYLOAD], data)
                .map_err(Nrf24Error::Transport),
            Role::Prx => {
                if pipe > 5 {
                    return Err(Nrf24Error::InvalidPipe);
                }
                self.port
                    .send_then_send(&[commands::W_ACK_PAYLOAD | pipe], data)
                    .map_err(Nrf24Error::Transport)?;
                self.ack_queued.release();
                Ok(())
            }
        }
    }

    fn payload_width(&mut self) -> Result<u8, Self::PayloadErrorType> {
        let mut width = [0u8];
        self.port
            .send_then_recv(&[commands::R_RX_PL_WID], &mut width)
            .map_err(Nrf24Error::Transport)?;
        Ok(width[0])
    }
}

impl<P, H, DELAY, S> Nrf24<'_, P, H, DELAY, S>
where
    P: Transport,
{
    /// Move the top RX FIFO payload into the internal buffer.
    ///
    /// Returns the payload's length, or `None` if the radio reported a
    /// width outside [1, 32]. In that case the RX FIFO is flushed.
    pub(super) fn read_payload(&mut self) -> Result<Option<usize>, Nrf24Error<P::Error>> {
        let width = self.payload_width()? as usize;
        if width == 0 || width > mnemonics::MAX_PAYLOAD {
            #[cfg(feature = "defmt")]
            defmt::warn!("Flushing RX FIFO; invalid payload width {}", width);
            self.flush_rx()?;
            return Ok(None);
        }
        self.port
            .send_then_recv(&[commands::R_RX_PAYLOAD], &mut self.buf[..width])
            .map_err(Nrf24Error::Transport)?;
        Ok(Some(width))
    }
}
