use crate::{CrcLength, DataRate, PaLevel, Role};

/// A descriptor of one RX pipe, as returned by [`RadioConfig::rx_pipe()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxPipe {
    /// Pipes 0 and 1 store a full 5-byte address.
    Full { enabled: bool, address: [u8; 5] },
    /// Pipes 2 - 5 only store the LSByte of their address.
    /// The other 4 bytes are shared with pipe 1.
    Short { enabled: bool, address: u8 },
}

impl RxPipe {
    /// Is the pipe open for receiving?
    pub const fn enabled(&self) -> bool {
        match self {
            RxPipe::Full { enabled, .. } | RxPipe::Short { enabled, .. } => *enabled,
        }
    }
}

/// A struct to contain configuration about pipe addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PipeAddresses {
    tx_address: [u8; 5],
    pipe0: [u8; 5],
    pipe1: [u8; 5],
    /// LSBytes of pipes 2 - 5
    short: [u8; 4],
    rx_pipes_enabled: u8,
}

impl Default for PipeAddresses {
    fn default() -> Self {
        Self {
            tx_address: [0, 1, 2, 3, 4],
            pipe0: [0, 1, 2, 3, 4],
            pipe1: [1, 2, 3, 4, 5],
            short: [2, 3, 4, 5],
            rx_pipes_enabled: 3,
        }
    }
}

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] (or [`RadioConfig::for_role()`]) constructor,
/// then mutate the object accordingly.
/// ```
/// use nrf24_esb::{RadioConfig, Role};
/// let config = RadioConfig::for_role(Role::Prx).with_channel(42);
/// assert_eq!(config.channel(), 42);
/// ```
///
/// The configuration is applied as a whole by
/// [`EsbInit::init()`](fn@crate::radio::prelude::EsbInit::init).
/// Changing it afterward requires
/// [`EsbInit::reinit()`](fn@crate::radio::prelude::EsbInit::reinit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioConfig {
    role: Role,
    pa_level: PaLevel,
    data_rate: DataRate,
    crc_length: CrcLength,
    channel: u8,
    irq_line: Option<u8>,
    pipes: PipeAddresses,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::role()`] | [`Role::Unset`] |
    /// | [`RadioConfig::channel()`] | `100` |
    /// | [`RadioConfig::pa_level()`] | [`PaLevel::Max`] |
    /// | [`RadioConfig::crc_length()`] | [`CrcLength::Bit16`] |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps1`] |
    /// | [`RadioConfig::irq_line()`] | `None` (poll the radio) |
    /// | [`RadioConfig::tx_address()`] | `[0, 1, 2, 3, 4]` |
    /// | [`RadioConfig::rx_pipe()`] | See below table about [Default RX addresses](#default-rx-pipes-configuration) |
    ///
    /// ## Default RX pipes' configuration
    ///
    /// | pipe number | state  | address           |
    /// |-------------|--------|-------------------|
    /// |      0      | open   | `[0, 1, 2, 3, 4]` |
    /// |      1      | open   | `[1, 2, 3, 4, 5]` |
    /// |      2[^1]  | closed | `2`               |
    /// |      3[^1]  | closed | `3`               |
    /// |      4[^1]  | closed | `4`               |
    /// |      5[^1]  | closed | `5`               |
    ///
    /// [^1]: Remember, pipes 2 - 5 share the same 4 MSBytes as the address on pipe 1.
    fn default() -> Self {
        Self {
            role: Role::Unset,
            pa_level: PaLevel::Max,
            data_rate: DataRate::Mbps1,
            crc_length: CrcLength::Bit16,
            channel: 100,
            irq_line: None,
            pipes: PipeAddresses::default(),
        }
    }
}

impl RadioConfig {
    /// The library defaults with the given `role`.
    pub fn for_role(role: Role) -> Self {
        Self::default().with_role(role)
    }

    /// Returns the value set by [`RadioConfig::with_role()`].
    pub const fn role(&self) -> Role {
        self.role
    }

    /// The primary role of the radio (PTX or PRX).
    pub fn with_role(self, role: Role) -> Self {
        Self { role, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_crc_length()`].
    pub const fn crc_length(&self) -> CrcLength {
        self.crc_length
    }

    /// The Cyclical Redundancy Checksum (CRC) length.
    pub fn with_crc_length(self, crc_length: CrcLength) -> Self {
        Self { crc_length, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.data_rate
    }

    /// The Data Rate (over the air).
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self { data_rate, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.pa_level
    }

    /// The Power Amplitude (PA) level.
    pub fn with_pa_level(self, pa_level: PaLevel) -> Self {
        Self { pa_level, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Set the channel (over the air frequency).
    ///
    /// This value is clamped to range [0, 127].
    /// The frequency used is 2400 + `channel` MHz.
    pub fn with_channel(self, channel: u8) -> Self {
        Self {
            channel: channel.min(127),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_irq_line()`].
    pub const fn irq_line(&self) -> Option<u8> {
        self.irq_line
    }

    /// The identifier of the board's line wired to the radio's IRQ pin.
    ///
    /// If `None`, all IRQ events are masked on the radio and the application
    /// must poll [`EsbDispatch::run()`](fn@crate::radio::prelude::EsbDispatch::run).
    pub fn with_irq_line(self, irq_line: Option<u8>) -> Self {
        Self { irq_line, ..self }
    }

    /// Close a RX pipe from receiving data.
    ///
    /// This is only useful if pipe 1 should be closed instead of open (after
    /// constructing [`RadioConfig::default()`]).
    pub fn close_rx_pipe(self, pipe: u8) -> Self {
        let mut pipes = self.pipes;
        if pipe < 6 {
            pipes.rx_pipes_enabled &= !(1 << pipe);
        }
        Self { pipes, ..self }
    }

    /// Is a specified RX pipe open (`true`) or closed (`false`)?
    ///
    /// The value returned here is controlled by
    /// [`RadioConfig::with_rx_address()`] (to open a pipe) and [`RadioConfig::close_rx_pipe()`].
    pub const fn is_rx_pipe_enabled(&self, pipe: u8) -> bool {
        pipe < 6 && self.pipes.rx_pipes_enabled & (1 << pipe) > 0
    }

    /// The bit mask of open RX pipes (bit N = pipe N).
    pub const fn rx_pipes_enabled(&self) -> u8 {
        self.pipes.rx_pipes_enabled
    }

    /// Describe the RX pipe of the given number.
    ///
    /// Returns `None` if `pipe` is not in range [0, 5].
    pub const fn rx_pipe(&self, pipe: u8) -> Option<RxPipe> {
        let enabled = self.is_rx_pipe_enabled(pipe);
        match pipe {
            0 => Some(RxPipe::Full {
                enabled,
                address: self.pipes.pipe0,
            }),
            1 => Some(RxPipe::Full {
                enabled,
                address: self.pipes.pipe1,
            }),
            2..=5 => Some(RxPipe::Short {
                enabled,
                address: self.pipes.short[pipe as usize - 2],
            }),
            _ => None,
        }
    }

    /// Set the address for a specified `pipe` and open it for receiving.
    ///
    /// Only the first byte of `address` is used for pipes 2 - 5.
    /// If `address` is shorter than 5 bytes, the remaining bytes are left unchanged.
    /// If `pipe` is not in range [0, 5] or `address` is empty, this does nothing.
    pub fn with_rx_address(self, pipe: u8, address: &[u8]) -> Self {
        let len = address.len().min(5);
        if len == 0 || pipe > 5 {
            return self;
        }
        let mut pipes = self.pipes;
        pipes.rx_pipes_enabled |= 1 << pipe;
        match pipe {
            0 => pipes.pipe0[..len].copy_from_slice(&address[..len]),
            1 => pipes.pipe1[..len].copy_from_slice(&address[..len]),
            _ => pipes.short[pipe as usize - 2] = address[0],
        }
        Self { pipes, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_tx_address()`].
    pub const fn tx_address(&self) -> [u8; 5] {
        self.pipes.tx_address
    }

    /// Set the TX address.
    ///
    /// A PTX radio expects its auto-acknowledgements on pipe 0, so pipe 0
    /// should be given the same address.
    pub fn with_tx_address(self, address: &[u8]) -> Self {
        let len = address.len().min(5);
        let mut pipes = self.pipes;
        pipes.tx_address[..len].copy_from_slice(&address[..len]);
        Self { pipes, ..self }
    }
}
