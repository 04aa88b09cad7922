//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use nrf24_esb::radio::prelude::*;
//! ```

use crate::types::{RunOutcome, StatusFlags};

use super::{nrf24::RegisterImage, RadioConfig};

/// The application side of the event dispatcher.
///
/// An implementation is given to the radio when it is constructed and
/// invoked from [`EsbDispatch::run()`]. Both callbacks run in the driver's
/// own execution context, never in interrupt context.
pub trait RadioHandler {
    /// A payload arrived on the given `pipe`.
    ///
    /// For a PTX radio, this is an ACK payload that rode on the acknowledgement
    /// of a previously sent packet.
    fn on_receive(&mut self, data: &[u8], pipe: u8);

    /// A transmission finished.
    ///
    /// `Some(pipe)` means the payload (or the ACK payload, for a PRX radio) went out.
    /// `None` means the radio exhausted its retry budget and the payload was discarded.
    fn on_transmit_outcome(&mut self, pipe: Option<u8>);
}

/// A trait to represent manipulation of [`StatusFlags`]
/// for an ESB capable transceiver.
pub trait EsbStatus {
    type StatusErrorType;

    /// Read the STATUS register and cache it.
    ///
    /// The cached value is available via [`EsbStatus::status()`].
    fn read_status(&mut self) -> Result<StatusFlags, Self::StatusErrorType>;

    /// Get the status flags observed by the last call to [`EsbStatus::read_status()`].
    fn status(&self) -> StatusFlags;

    /// Clear the radio's IRQ status flags.
    ///
    /// Only the flags set to `true` in the given `flags` are cleared
    /// (the chip uses write-1-to-clear semantics).
    fn clear_status(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Read the OBSERVE_TX register.
    ///
    /// Returns a tuple of `(lost_packets, retransmits)`, where `retransmits`
    /// counts the retries of the last payload.
    fn observe_tx(&mut self) -> Result<(u8, u8), Self::StatusErrorType>;
}

/// A trait to represent manipulation of RX and TX FIFOs
/// for an ESB capable transceiver.
pub trait EsbFifo {
    type FifoErrorType;

    /// Flush the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Flush the radio's TX FIFO.
    ///
    /// This function is automatically called by [`EsbDispatch::run()`]
    /// when the radio reports exhausted retries.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Is the RX FIFO empty?
    fn rx_fifo_empty(&mut self) -> Result<bool, Self::FifoErrorType>;
}

/// A trait to represent moving payloads into the radio.
pub trait EsbPayload {
    type PayloadErrorType;

    /// Queue a payload.
    ///
    /// As a PTX radio, `data` is put into the TX FIFO and `pipe` is ignored.
    /// As a PRX radio, `data` is queued as the ACK payload for the given `pipe`;
    /// it goes out with the acknowledgement of the next packet received on that pipe.
    ///
    /// The length of `data` must be in range [1, 32]. This is checked before
    /// any bus I/O happens.
    fn send(&mut self, data: &[u8], pipe: u8) -> Result<(), Self::PayloadErrorType>;

    /// Get the width of the payload on top of the RX FIFO.
    fn payload_width(&mut self) -> Result<u8, Self::PayloadErrorType>;
}

/// A trait to represent the radio's event loop.
pub trait EsbDispatch {
    type DispatchErrorType;

    /// Run one dispatch cycle.
    ///
    /// In interrupt mode, this waits (unbounded) for the IRQ signal first.
    /// Otherwise, it just polls the radio's STATUS register, so it should be
    /// called on a fixed interval.
    fn run(&mut self) -> Result<RunOutcome, Self::DispatchErrorType>;

    /// Is the radio's (active low) IRQ line asserted?
    fn irq_asserted(&mut self) -> Result<bool, Self::DispatchErrorType>;
}

/// A trait to represent manipulation of the state of power
/// for an ESB capable transceiver.
pub trait EsbPower {
    type PowerErrorType;

    /// Power down the radio.
    ///
    /// This also deactivates the radio's CE pin.
    ///
    /// <div class="warning">
    ///
    /// The nRF24L01 cannot receive nor transmit data when powered down.
    ///
    /// </div>
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Power up the radio.
    ///
    /// This wakes the radio from a sleep state and waits 5 milliseconds
    /// for the radio's oscillator to settle.
    fn power_up(&mut self) -> Result<(), Self::PowerErrorType>;
}

/// A trait to represent debug output
/// for an ESB capable transceiver.
pub trait EsbDetails {
    type DetailsErrorType;

    /// Print details about radio's current configuration.
    ///
    /// This should only be used for debugging development.
    /// Using this in production should be limited due to a significant increase in
    /// compile size.
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType>;
}

pub trait EsbInit {
    type ConfigErrorType;

    /// Initialize the radio's hardware.
    ///
    /// This function
    ///
    /// - tests the bus with [`EsbInit::check_transport()`]
    /// - writes the register image built from the radio's [`RadioConfig`]
    ///   and verifies it with [`EsbInit::apply_and_verify()`]
    /// - flushes both FIFOs and clears all status flags
    /// - waits 5 milliseconds for radio to finish powering up, then activates the CE pin
    ///
    /// The radio can only send or dispatch events after this function succeeded.
    fn init(&mut self) -> Result<(), Self::ConfigErrorType>;

    /// Replace the radio's configuration and run [`EsbInit::init()`] again.
    fn reinit(&mut self, config: RadioConfig) -> Result<(), Self::ConfigErrorType>;

    /// Check the bus with a loopback test.
    ///
    /// A known pattern is written to a scratch register, read back and compared.
    /// The scratch register's previous value is restored, whatever the outcome.
    fn check_transport(&mut self) -> Result<(), Self::ConfigErrorType>;

    /// Write the given `image` while the radio is powered down,
    /// then read it back and compare.
    ///
    /// The CONFIG register is written last since it holds the power and role bits.
    /// On a mismatch, the radio is powered down again.
    /// Either way the radio is left out of active mode; [`EsbInit::init()`]
    /// is needed before it can send or dispatch events again.
    fn apply_and_verify(&mut self, image: &RegisterImage) -> Result<(), Self::ConfigErrorType>;

    /// Read every register that [`EsbInit::apply_and_verify()`] writes.
    fn read_image(&mut self) -> Result<RegisterImage, Self::ConfigErrorType>;
}
