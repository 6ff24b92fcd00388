use std::path::PathBuf;

use crate::InvalidConfiguration;

/// The options used to open and configure a serial port.
///
/// All options are validated together before the device is opened.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OpenOptions {
	/// The path of the device, for example `/dev/ttyUSB0`.
	pub port_name: PathBuf,

	/// The baud rate for the port.
	///
	/// Any value is accepted, not just the [standard baud rates](crate::STANDARD_BAUD_RATES).
	/// Whether the hardware can actually produce the rate is up to the driver.
	pub baud_rate: u32,

	/// The number of data bits per frame: 5, 6, 7 or 8.
	pub data_bits: u8,

	/// The number of stop bits per frame: 1 or 2.
	pub stop_bits: u8,

	/// The parity bit to use.
	///
	/// Parity errors are not reported: received bytes are delivered as-is.
	pub parity_mode: ParityMode,

	/// Enable RTS/CTS (hardware) flow control.
	pub rts_cts_flow_control: bool,

	/// The inter-character timeout in milliseconds.
	///
	/// The kernel measures the timeout in tenths of a second,
	/// so the value is rounded to the nearest multiple of 100 milliseconds.
	/// The maximum is 25500 milliseconds.
	///
	/// Together with [`Self::minimum_read_size`] this determines when a read returns:
	///
	/// * timeout = 0, minimum = 0: not allowed.
	/// * timeout > 0, minimum = 0: a read returns immediately if data is available,
	///   otherwise it blocks until data arrives or the timeout elapses since the start of the call.
	///   The timeout must be at least 100 milliseconds in this mode.
	/// * timeout > 0, minimum > 0: a read returns when at least `minimum` bytes are available,
	///   or when the timeout elapses between two received bytes.
	///   The timer only starts after the first byte arrived.
	/// * timeout = 0, minimum > 0: a read returns only when at least `minimum` bytes are available.
	///
	/// Behaviour is undefined if a read is given a buffer smaller than the minimum read size.
	pub inter_character_timeout: u32,

	/// The minimum number of bytes to block for on each read.
	///
	/// See [`Self::inter_character_timeout`].
	pub minimum_read_size: u8,

	/// RS-485 half-duplex options.
	pub rs485: Rs485Options,
}

/// The parity mode of a serial port.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ParityMode {
	/// No parity bit.
	#[default]
	None,

	/// Odd parity.
	Odd,

	/// Even parity.
	Even,
}

/// Options for RS-485 mode.
///
/// RS-485 mode is only supported by some drivers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Rs485Options {
	/// Enable RS-485 mode.
	///
	/// All other RS-485 options are ignored if this is false.
	pub enable: bool,

	/// Drive RTS high while sending.
	pub rts_high_during_send: bool,

	/// Drive RTS high after sending.
	pub rts_high_after_send: bool,

	/// Keep receiving data while sending.
	///
	/// Currently not applied to the device: the port is always configured without `SER_RS485_RX_DURING_TX`.
	/// A warning is logged if this is set.
	pub rx_during_tx: bool,

	/// The delay between raising RTS and starting to send.
	pub delay_rts_before_send: i32,

	/// The delay between the end of the transmission and releasing RTS.
	pub delay_rts_after_send: i32,
}

impl Default for OpenOptions {
	fn default() -> Self {
		Self {
			port_name: PathBuf::new(),
			baud_rate: 9600,
			data_bits: 8,
			stop_bits: 1,
			parity_mode: ParityMode::None,
			rts_cts_flow_control: false,
			inter_character_timeout: 0,
			minimum_read_size: 1,
			rs485: Rs485Options::default(),
		}
	}
}

impl OpenOptions {
	/// Check the options without opening the device.
	pub fn validate(&self) -> Result<(), InvalidConfiguration> {
		crate::termios::Termios2::from_options(self)?;
		Ok(())
	}
}

impl ParityMode {
	/// Get the raw value of the parity mode: 0 for none, 1 for odd and 2 for even.
	pub fn raw(self) -> u8 {
		match self {
			Self::None => 0,
			Self::Odd => 1,
			Self::Even => 2,
		}
	}
}

impl TryFrom<u8> for ParityMode {
	type Error = InvalidConfiguration;

	fn try_from(raw: u8) -> Result<Self, Self::Error> {
		match raw {
			0 => Ok(Self::None),
			1 => Ok(Self::Odd),
			2 => Ok(Self::Even),
			x => Err(InvalidConfiguration::ParityMode(x)),
		}
	}
}

impl std::fmt::Display for ParityMode {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::None => write!(f, "none"),
			Self::Odd => write!(f, "odd"),
			Self::Even => write!(f, "even"),
		}
	}
}
