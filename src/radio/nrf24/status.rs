use crate::{
    radio::{prelude::EsbStatus, Nrf24, Nrf24Error, Transport},
    types::StatusFlags,
};

use super::{bit_fields::ObserveTx, registers};

impl<P, H, DELAY, S> EsbStatus for Nrf24<'_, P, H, DELAY, S>
where
    P: Transport,
{
    type StatusErrorType = Nrf24Error<P::Error>;

    fn read_status(&mut self) -> Result<StatusFlags, Self::StatusErrorType> {
        self.status = StatusFlags::from_bits(self.read_register(registers::STATUS)?);
        Ok(self.status)
    }

    fn status(&self) -> StatusFlags {
        self.status
    }

    fn clear_status(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        self.write_register(
            registers::STATUS,
            flags.into_bits() & StatusFlags::IRQ_MASK,
        )
    }

    fn observe_tx(&mut self) -> Result<(u8, u8), Self::StatusErrorType> {
        let observed = ObserveTx::from_bits(self.read_register(registers::OBSERVE_TX)?);
        Ok((observed.plos_cnt(), observed.arc_cnt()))
    }
}
