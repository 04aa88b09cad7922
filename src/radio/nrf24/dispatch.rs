//! The event dispatcher.
//!
//! Every cycle derives its decisions from a fresh STATUS read. The flags it acts
//! upon are cleared on the radio right away, so an event is never delivered twice.

use crate::{
    radio::{
        prelude::{EsbDispatch, EsbFifo, EsbStatus, RadioHandler},
        Nrf24, Nrf24Error, Semaphore, Transport,
    },
    Role, RunOutcome, StatusFlags,
};

impl<P, H, DELAY, S> EsbDispatch for Nrf24<'_, P, H, DELAY, S>
where
    P: Transport,
    H: RadioHandler,
    S: Semaphore,
{
    type DispatchErrorType = Nrf24Error<P::Error>;

    fn run(&mut self) -> Result<RunOutcome, Self::DispatchErrorType> {
        if !self.ready {
            return Err(Nrf24Error::NotInitialized);
        }
        let irq_signal = if self.irq_mode() {
            self.irq_signal
        } else {
            None
        };
        if let Some(signal) = irq_signal {
            if self.irq_asserted()? {
                // missed edge; drop the permit it may have left behind
                signal.try_take();
            } else {
                signal.take();
            }
        }

        let status = self.read_status()?;
        let observed = StatusFlags::new()
            .with_rx_dr(status.rx_dr())
            .with_tx_ds(status.tx_ds());
        if observed.into_bits() != 0 {
            self.clear_status(observed)?;
        }

        let mut outcome = RunOutcome::new();
        match self.config.role() {
            Role::Ptx => {
                if status.max_rt() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Max retries reached; discarding TX FIFO");
                    self.flush_tx()?;
                    self.clear_status(StatusFlags::new().with_max_rt(true))?;
                    self.handler.on_transmit_outcome(None);
                    return Ok(outcome.with_tx_failed(true));
                }
                // ACKs (and ACK payloads) come back on pipe 0
                let pipe = status.rx_pipe_number().unwrap_or(0);
                if status.rx_dr() && self.deliver(pipe)? {
                    outcome.set_rx_ready(true);
                }
                if status.tx_ds() {
                    self.handler.on_transmit_outcome(Some(pipe));
                    outcome.set_tx_done(true);
                }
            }
            Role::Prx => {
                if let Some(pipe) = status.rx_pipe_number() {
                    if self.deliver(pipe)? {
                        outcome.set_rx_ready(true);
                    }
                    // the ACK of the packet just read carried the queued ACK payload
                    if self.ack_queued.try_take() {
                        self.handler.on_transmit_outcome(Some(pipe));
                        outcome.set_tx_done(true);
                    }
                    if let Some(signal) = irq_signal {
                        // no new edge will come for packets already in the RX FIFO
                        if !self.rx_fifo_empty()? {
                            signal.release();
                        }
                    }
                }
            }
            Role::Unset => (),
        }
        #[cfg(feature = "defmt")]
        defmt::trace!("Run outcome {=i8}", outcome.code());
        Ok(outcome)
    }

    fn irq_asserted(&mut self) -> Result<bool, Self::DispatchErrorType> {
        let level = self.port.read_irq().map_err(Nrf24Error::Transport)?;
        Ok(!level)
    }
}

impl<P, H, DELAY, S> Nrf24<'_, P, H, DELAY, S>
where
    P: Transport,
    H: RadioHandler,
{
    /// Hand the top RX FIFO payload to the handler.
    fn deliver(&mut self, pipe: u8) -> Result<bool, Nrf24Error<P::Error>> {
        match self.read_payload()? {
            Some(len) => {
                self.handler.on_receive(&self.buf[..len], pipe);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::EsbDispatch;
    use crate::radio::prelude::EsbPayload;
    use crate::{
        radio::{
            nrf24::{commands, registers},
            CsSemaphore, HalPort, Nrf24, Nrf24Error, RadioConfig, Semaphore,
        },
        spi_test_expects,
        test::{mk_radio, Event, Recorder},
        Role,
    };
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction},
        spi::Mock as SpiMock,
    };
    use std::vec;

    #[test]
    fn ptx_sent() {
        let spi_expectations = spi_test_expects![
            read_reg(registers::STATUS, 0x2E),
            write_reg(registers::STATUS, 0x20),
        ];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::for_role(Role::Ptx));
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.ready = true;
        let outcome = radio.run().unwrap();
        assert!(outcome.tx_done());
        assert_eq!(outcome.code(), 1);
        assert_eq!(radio.handler().events, vec![Event::Sent(Some(0))]);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn ptx_max_retries() {
        let spi_expectations = spi_test_expects![
            read_reg(registers::STATUS, 0x1E),
            write(vec![commands::FLUSH_TX]),
            write_reg(registers::STATUS, 0x10),
        ];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::for_role(Role::Ptx));
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.ready = true;
        let outcome = radio.run().unwrap();
        assert!(outcome.tx_failed());
        assert_eq!(outcome.code(), -1);
        assert_eq!(radio.handler().events, vec![Event::Sent(None)]);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn ptx_max_retries_supersedes_rx() {
        let spi_expectations = spi_test_expects![
            read_reg(registers::STATUS, 0x50),
            write_reg(registers::STATUS, 0x40),
            write(vec![commands::FLUSH_TX]),
            write_reg(registers::STATUS, 0x10),
        ];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::for_role(Role::Ptx));
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.ready = true;
        assert_eq!(radio.run().unwrap().code(), -1);
        assert_eq!(radio.handler().events, vec![Event::Sent(None)]);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn ptx_ack_payload() {
        let spi_expectations = spi_test_expects![
            read_reg(registers::STATUS, 0x60),
            write_reg(registers::STATUS, 0x60),
            send_then_recv(vec![commands::R_RX_PL_WID], vec![2]),
            send_then_recv(vec![commands::R_RX_PAYLOAD], vec![0xAB, 0xCD]),
        ];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::for_role(Role::Ptx));
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.ready = true;
        assert_eq!(radio.run().unwrap().code(), 3);
        assert_eq!(
            radio.handler().events,
            vec![
                Event::Received(vec![0xAB, 0xCD], 0),
                Event::Sent(Some(0))
            ]
        );
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn prx_received() {
        let spi_expectations = spi_test_expects![
            read_reg(registers::STATUS, 0x42),
            write_reg(registers::STATUS, 0x40),
            send_then_recv(vec![commands::R_RX_PL_WID], vec![4]),
            send_then_recv(vec![commands::R_RX_PAYLOAD], b"ping".to_vec()),
        ];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::for_role(Role::Prx));
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.ready = true;
        let outcome = radio.run().unwrap();
        assert!(outcome.rx_ready());
        assert!(!outcome.tx_done());
        assert_eq!(outcome.code(), 2);
        assert_eq!(
            radio.handler().events,
            vec![Event::Received(b"ping".to_vec(), 1)]
        );
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn prx_ack_payload_sent() {
        let spi_expectations = spi_test_expects![
            send_then_send(vec![commands::W_ACK_PAYLOAD], b"pong".to_vec()),
            read_reg(registers::STATUS, 0x40),
            write_reg(registers::STATUS, 0x40),
            send_then_recv(vec![commands::R_RX_PL_WID], vec![4]),
            send_then_recv(vec![commands::R_RX_PAYLOAD], b"ping".to_vec()),
        ];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::for_role(Role::Prx));
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.ready = true;
        radio.send(b"pong", 0).unwrap();
        assert_eq!(radio.run().unwrap().code(), 3);
        assert_eq!(
            radio.handler().events,
            vec![Event::Received(b"ping".to_vec(), 0), Event::Sent(Some(0))]
        );
        assert_eq!(radio.ack_queued.permits(), 0);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn prx_nothing() {
        let spi_expectations = spi_test_expects![read_reg(registers::STATUS, 0x0E)];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::for_role(Role::Prx));
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.ready = true;
        assert!(radio.run().unwrap().is_idle());
        assert!(radio.handler().events.is_empty());
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn prx_invalid_width() {
        let spi_expectations = spi_test_expects![
            read_reg(registers::STATUS, 0x42),
            write_reg(registers::STATUS, 0x40),
            send_then_recv(vec![commands::R_RX_PL_WID], vec![0]),
            write(vec![commands::FLUSH_RX]),
        ];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::for_role(Role::Prx));
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.ready = true;
        assert_eq!(radio.run().unwrap().code(), 0);
        assert!(radio.handler().events.is_empty());
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn unset_role() {
        let spi_expectations = spi_test_expects![
            read_reg(registers::STATUS, 0x40),
            write_reg(registers::STATUS, 0x40),
        ];
        let mocks = mk_radio(&[], &spi_expectations, RadioConfig::default());
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.ready = true;
        assert!(radio.run().unwrap().is_idle());
        assert!(radio.handler().events.is_empty());
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn not_initialized() {
        let mocks = mk_radio(&[], &[], RadioConfig::for_role(Role::Prx));
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.run(), Err(Nrf24Error::NotInitialized));
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn prx_irq_driven() {
        let spi_expectations = spi_test_expects![
            // first cycle: 2 packets in the RX FIFO
            read_reg(registers::STATUS, 0x42),
            write_reg(registers::STATUS, 0x40),
            send_then_recv(vec![commands::R_RX_PL_WID], vec![1]),
            send_then_recv(vec![commands::R_RX_PAYLOAD], vec![5]),
            read_reg(registers::FIFO_STATUS, 0x10),
            // second cycle drains the RX FIFO without a new edge
            read_reg(registers::STATUS, 0x02),
            send_then_recv(vec![commands::R_RX_PL_WID], vec![1]),
            send_then_recv(vec![commands::R_RX_PAYLOAD], vec![6]),
            read_reg(registers::FIFO_STATUS, 0x11),
        ];
        let irq_expectations = [
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::High),
        ];
        let mut spi = SpiMock::new(&spi_expectations);
        let mut ce_pin = PinMock::new(&[]);
        let mut irq_pin = PinMock::new(&irq_expectations);
        let signal = CsSemaphore::new();
        let port = HalPort::with_irq_pin(spi.clone(), ce_pin.clone(), irq_pin.clone());
        let config = RadioConfig::for_role(Role::Prx).with_irq_line(Some(3));
        let mut radio =
            Nrf24::new(port, Recorder::default(), NoopDelay, config).with_irq_signal(&signal);
        radio.ready = true;

        // the IRQ handler
        signal.release();
        assert_eq!(radio.run().unwrap().code(), 2);
        assert_eq!(signal.permits(), 1);
        assert_eq!(radio.run().unwrap().code(), 2);
        assert_eq!(signal.permits(), 0);
        assert_eq!(
            radio.handler().events,
            vec![Event::Received(vec![5], 1), Event::Received(vec![6], 1)]
        );
        spi.done();
        ce_pin.done();
        irq_pin.done();
    }

    #[test]
    fn missed_edge() {
        let spi_expectations = spi_test_expects![
            read_reg(registers::STATUS, 0x2E),
            write_reg(registers::STATUS, 0x20),
        ];
        // the line is still asserted, so the cycle does not wait
        let irq_expectations = [PinTransaction::get(PinState::Low)];
        let mut spi = SpiMock::new(&spi_expectations);
        let mut ce_pin = PinMock::new(&[]);
        let mut irq_pin = PinMock::new(&irq_expectations);
        let signal = CsSemaphore::new();
        let port = HalPort::with_irq_pin(spi.clone(), ce_pin.clone(), irq_pin.clone());
        let config = RadioConfig::for_role(Role::Ptx).with_irq_line(Some(3));
        let mut radio =
            Nrf24::new(port, Recorder::default(), NoopDelay, config).with_irq_signal(&signal);
        radio.ready = true;
        assert_eq!(radio.run().unwrap().code(), 1);
        assert_eq!(signal.permits(), 0);
        spi.done();
        ce_pin.done();
        irq_pin.done();
    }
}
