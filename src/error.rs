/// An error that can occur while opening and configuring a serial port.
#[derive(Debug)]
pub enum OpenError {
	/// The options do not describe a valid configuration.
	///
	/// This is always detected before the device is opened.
	InvalidConfiguration(InvalidConfiguration),

	/// The device could not be opened.
	Open(std::io::Error),

	/// The non-blocking flag could not be cleared after opening the device.
	ClearNonblocking(std::io::Error),

	/// A control call failed with an error from the kernel.
	ControlCall {
		call: ControlCall,
		error: std::io::Error,
	},

	/// A control call did not report an error, but returned an unexpected non-zero value.
	UnknownFailure {
		call: ControlCall,
		result: i32,
	},
}

/// The control calls used to configure a serial port.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ControlCall {
	/// The `TCSETS2` ioctl to set the line discipline and baud rate.
	LineConfig,

	/// The `TIOCSRS485` ioctl to configure RS-485 mode.
	Rs485Config,
}

/// The port options do not describe a valid configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum InvalidConfiguration {
	/// A minimum read size of zero requires an inter-character timeout of at least 100 milliseconds.
	ReadTiming {
		inter_character_timeout: u32,
		minimum_read_size: u8,
	},

	/// The inter-character timeout exceeds 25500 milliseconds.
	TimeoutTooLarge {
		inter_character_timeout: u32,
	},

	/// The number of stop bits is not 1 or 2.
	StopBits(u8),

	/// The raw parity value is not one of the recognized modes.
	ParityMode(u8),

	/// The number of data bits is not 5, 6, 7 or 8.
	DataBits(u8),
}

impl std::error::Error for OpenError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::InvalidConfiguration(e) => Some(e),
			Self::Open(e) => Some(e),
			Self::ClearNonblocking(e) => Some(e),
			Self::ControlCall { error, .. } => Some(error),
			Self::UnknownFailure { .. } => None,
		}
	}
}

impl std::error::Error for InvalidConfiguration {}

impl From<InvalidConfiguration> for OpenError {
	fn from(other: InvalidConfiguration) -> Self {
		Self::InvalidConfiguration(other)
	}
}

impl OpenError {
	/// Check if this error was caused by invalid port options.
	pub fn is_invalid_configuration(&self) -> bool {
		matches!(self, Self::InvalidConfiguration(_))
	}
}

impl std::fmt::Display for OpenError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::InvalidConfiguration(e) => write!(f, "invalid configuration: {}", e),
			Self::Open(e) => write!(f, "failed to open serial port: {}", e),
			Self::ClearNonblocking(e) => write!(f, "failed to clear non-blocking flag: {}", e),
			Self::ControlCall { call, error } => write!(f, "{} failed: {}", call, error),
			Self::UnknownFailure { call, result } => write!(f, "unknown failure from {}: returned {}", call, result),
		}
	}
}

impl std::fmt::Display for ControlCall {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::LineConfig => write!(f, "ioctl(TCSETS2)"),
			Self::Rs485Config => write!(f, "ioctl(TIOCSRS485)"),
		}
	}
}

impl std::fmt::Display for InvalidConfiguration {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::ReadTiming {
				inter_character_timeout,
				minimum_read_size,
			} => write!(
				f,
				"invalid values for inter-character timeout ({} ms) and minimum read size ({}): a minimum read size of 0 requires a timeout of at least 100 ms",
				inter_character_timeout, minimum_read_size
			),
			Self::TimeoutTooLarge { inter_character_timeout } => write!(
				f,
				"invalid inter-character timeout, expected at most 25500 ms, got {} ms",
				inter_character_timeout
			),
			Self::StopBits(x) => write!(f, "invalid number of stop bits, expected 1 or 2, got {}", x),
			Self::ParityMode(x) => write!(f, "invalid parity mode, expected 0 (none), 1 (odd) or 2 (even), got {}", x),
			Self::DataBits(x) => write!(f, "invalid number of data bits, expected 5, 6, 7 or 8, got {}", x),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use assert2::assert;
	use std::error::Error;

	#[test]
	fn test_display() {
		let error = OpenError::from(InvalidConfiguration::DataBits(9));
		assert!(error.to_string() == "invalid configuration: invalid number of data bits, expected 5, 6, 7 or 8, got 9");
		assert!(error.is_invalid_configuration());

		let error = OpenError::UnknownFailure {
			call: ControlCall::Rs485Config,
			result: 1,
		};
		assert!(error.to_string() == "unknown failure from ioctl(TIOCSRS485): returned 1");
		assert!(error.source().is_none());
		assert!(!error.is_invalid_configuration());
	}

	#[test]
	fn test_source() {
		let error = OpenError::ControlCall {
			call: ControlCall::LineConfig,
			error: std::io::Error::from_raw_os_error(libc::ENOTTY),
		};
		assert!(error.to_string().starts_with("ioctl(TCSETS2) failed: "));
		let source = error.source().and_then(|e| e.downcast_ref::<std::io::Error>());
		assert!(source.and_then(|e| e.raw_os_error()) == Some(libc::ENOTTY));
	}
}
