//! A module to encapsulate all things related to radio operation.
pub mod prelude;
pub use prelude::RadioHandler;

pub mod nrf24;
pub use nrf24::{Nrf24, Nrf24Error};

mod config;
pub use config::{RadioConfig, RxPipe};

mod port;
pub use port::{HalPort, NoIrqPin, PortError, Transport};

mod sync;
pub use sync::{CsSemaphore, Semaphore};
