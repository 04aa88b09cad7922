//! An event-driven driver for the nRF24L01(+) transceiver.
//!
//! The driver turns a [`RadioConfig`] into the chip's exact register image,
//! writes it under a power-safe envelope, reads it back to verify it, and then
//! interprets the chip's STATUS flags into [`RadioHandler`] callbacks.
//! Dynamic payloads, auto-acknowledgement and ACK payloads are always enabled.
//!
//! The bus is reached only through the [`Transport`](trait@crate::radio::Transport)
//! trait. [`HalPort`](struct@crate::radio::HalPort) implements it on top of
//! [`embedded-hal`](https://docs.rs/embedded-hal) SPI and GPIO traits.
//!
//! ## Basic API
//!
//! - [`Nrf24::new()`](fn@crate::radio::Nrf24::new)
//! - [`Nrf24::with_irq_signal()`](fn@crate::radio::Nrf24::with_irq_signal)
//! - [`Nrf24::init()`](radio/struct.Nrf24.html#method.init)
//! - [`Nrf24::send()`](radio/struct.Nrf24.html#method.send)
//! - [`Nrf24::run()`](radio/struct.Nrf24.html#method.run)
//! - [`Nrf24::release()`](fn@crate::radio::Nrf24::release)
//!
//! ## Advanced API
//!
//! - [`Nrf24::reinit()`](radio/struct.Nrf24.html#method.reinit)
//! - [`Nrf24::check_transport()`](radio/struct.Nrf24.html#method.check_transport)
//! - [`Nrf24::apply_and_verify()`](radio/struct.Nrf24.html#method.apply_and_verify)
//! - [`Nrf24::read_image()`](radio/struct.Nrf24.html#method.read_image)
//! - [`Nrf24::read_register()`](fn@crate::radio::Nrf24::read_register)
//! - [`Nrf24::write_register()`](fn@crate::radio::Nrf24::write_register)
//! - [`Nrf24::write_bits()`](fn@crate::radio::Nrf24::write_bits)
//! - [`Nrf24::read_status()`](radio/struct.Nrf24.html#method.read_status)
//! - [`Nrf24::clear_status()`](radio/struct.Nrf24.html#method.clear_status)
//! - [`Nrf24::observe_tx()`](radio/struct.Nrf24.html#method.observe_tx)
//! - [`Nrf24::flush_rx()`](radio/struct.Nrf24.html#method.flush_rx)
//! - [`Nrf24::flush_tx()`](radio/struct.Nrf24.html#method.flush_tx)
//! - [`Nrf24::power_up()`](radio/struct.Nrf24.html#method.power_up)
//! - [`Nrf24::power_down()`](radio/struct.Nrf24.html#method.power_down)
//! - [`Nrf24::print_details()`](radio/struct.Nrf24.html#method.print_details)
//!
//! ## Interrupts
//!
//! The interrupt handler must not touch the bus. Its only job is to release
//! the [`Semaphore`](trait@crate::radio::Semaphore) that was attached with
//! [`Nrf24::with_irq_signal()`](fn@crate::radio::Nrf24::with_irq_signal):
//! ```ignore
//! static IRQ_SIGNAL: CsSemaphore = CsSemaphore::new();
//!
//! fn on_falling_edge() {
//!     IRQ_SIGNAL.release();
//! }
//! ```
//! Without an IRQ line, call [`Nrf24::run()`](radio/struct.Nrf24.html#method.run)
//! on a fixed poll interval instead.
#![no_std]

#[cfg(test)]
extern crate std;

mod types;
pub use types::{CrcLength, DataRate, PaLevel, Role, RunOutcome, StatusFlags};
pub mod radio;
pub use radio::{RadioConfig, RadioHandler, RxPipe};
