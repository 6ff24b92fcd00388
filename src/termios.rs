//! The `termios2` line discipline configuration.

use crate::{InvalidConfiguration, OpenOptions, ParityMode};

/// The number of control characters in the kernel `termios2` struct.
///
/// This differs from `NCCS` of the C library, which uses a larger array in its own `termios` struct.
pub const KERNEL_NCCS: usize = 19;

/// The largest inter-character timeout in milliseconds.
///
/// The timeout is stored as a single byte in tenths of a second.
pub const MAX_INTER_CHARACTER_TIMEOUT: u32 = 25500;

/// The smallest inter-character timeout allowed when the minimum read size is zero.
pub const MIN_TIMEOUT_WITHOUT_MINIMUM_READ_SIZE: u32 = 100;

/// Linux `struct termios2` from `asm-generic/termbits.h`.
///
/// Unlike the classic `termios` struct, this has explicit input and output speed fields.
/// Combined with the `BOTHER` flag in `c_cflag` that allows for arbitrary baud rates.
#[repr(C)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Termios2 {
	/// Input mode flags.
	pub c_iflag: u32,
	/// Output mode flags.
	pub c_oflag: u32,
	/// Control mode flags.
	pub c_cflag: u32,
	/// Local mode flags.
	pub c_lflag: u32,
	/// Line discipline.
	pub c_line: u8,
	/// Control characters.
	pub c_cc: [u8; KERNEL_NCCS],
	/// Input speed.
	pub c_ispeed: u32,
	/// Output speed.
	pub c_ospeed: u32,
}

static_assertions::assert_eq_size!(Termios2, [u8; 44]);
static_assertions::assert_eq_align!(Termios2, u32);
static_assertions::const_assert_eq!(std::mem::offset_of!(Termios2, c_cc), 17);
static_assertions::const_assert_eq!(std::mem::offset_of!(Termios2, c_ispeed), 36);

impl Termios2 {
	/// Build the line configuration for the given options.
	///
	/// Only the framing and timing options are used: the port name and RS-485 options are ignored.
	/// The input, output and local mode flags are left at zero, which gives a raw byte stream
	/// without echo, line editing, signal characters or output processing.
	pub fn from_options(options: &OpenOptions) -> Result<Self, InvalidConfiguration> {
		let vtime = read_timeout_tenths(options.inter_character_timeout, options.minimum_read_size)?;

		let mut c_cc = [0; KERNEL_NCCS];
		c_cc[libc::VTIME] = vtime;
		c_cc[libc::VMIN] = options.minimum_read_size;

		let mut termios = Self {
			c_cflag: libc::CLOCAL | libc::CREAD | libc::BOTHER,
			c_ispeed: options.baud_rate,
			c_ospeed: options.baud_rate,
			c_cc,
			..Self::default()
		};

		match options.stop_bits {
			1 => (),
			2 => termios.c_cflag |= libc::CSTOPB,
			x => return Err(InvalidConfiguration::StopBits(x)),
		}

		match options.parity_mode {
			ParityMode::None => (),
			ParityMode::Odd => termios.c_cflag |= libc::PARENB | libc::PARODD,
			ParityMode::Even => termios.c_cflag |= libc::PARENB,
		}

		termios.c_cflag |= match options.data_bits {
			5 => libc::CS5,
			6 => libc::CS6,
			7 => libc::CS7,
			8 => libc::CS8,
			x => return Err(InvalidConfiguration::DataBits(x)),
		};

		if options.rts_cts_flow_control {
			termios.c_cflag |= libc::CRTSCTS;
		}

		Ok(termios)
	}

	/// Get the `VTIME` control character: the read timeout in tenths of a second.
	pub fn vtime(&self) -> u8 {
		self.c_cc[libc::VTIME]
	}

	/// Get the `VMIN` control character: the minimum read size in bytes.
	pub fn vmin(&self) -> u8 {
		self.c_cc[libc::VMIN]
	}
}

/// Round a timeout in milliseconds to the nearest multiple of 100 milliseconds, rounding halfway cases up.
pub fn round_timeout(milliseconds: u32) -> u32 {
	(milliseconds / 100 + u32::from(milliseconds % 100 >= 50)) * 100
}

/// Check the read timing options and convert the timeout to tenths of a second.
///
/// Both limits are checked against the timeout as given, before rounding.
fn read_timeout_tenths(inter_character_timeout: u32, minimum_read_size: u8) -> Result<u8, InvalidConfiguration> {
	if minimum_read_size == 0 && inter_character_timeout < MIN_TIMEOUT_WITHOUT_MINIMUM_READ_SIZE {
		return Err(InvalidConfiguration::ReadTiming {
			inter_character_timeout,
			minimum_read_size,
		});
	}

	if inter_character_timeout > MAX_INTER_CHARACTER_TIMEOUT {
		return Err(InvalidConfiguration::TimeoutTooLarge { inter_character_timeout });
	}

	// Can not overflow: the timeout is at most 25500 here.
	Ok((round_timeout(inter_character_timeout) / 100) as u8)
}

#[cfg(test)]
mod test {
	use super::*;
	use assert2::{assert, let_assert};

	const DATA_BITS_MASK: u32 = libc::CS5 | libc::CS6 | libc::CS7 | libc::CS8;

	fn options(inter_character_timeout: u32, minimum_read_size: u8) -> OpenOptions {
		OpenOptions {
			inter_character_timeout,
			minimum_read_size,
			..Default::default()
		}
	}

	#[test]
	fn test_round_timeout() {
		assert!(round_timeout(0) == 0);
		assert!(round_timeout(49) == 0);
		assert!(round_timeout(50) == 100);
		assert!(round_timeout(149) == 100);
		assert!(round_timeout(150) == 200);
		assert!(round_timeout(25500) == 25500);
		assert!(round_timeout(25549) == 25500);
	}

	#[test]
	fn test_valid_read_timing() {
		for (timeout, minimum) in [(100, 0), (25500, 0), (0, 1), (0, 255), (100, 1), (25500, 255), (1, 1)] {
			assert!(let Ok(_) = read_timeout_tenths(timeout, minimum), "timeout: {}, minimum: {}", timeout, minimum);
		}
	}

	#[test]
	fn test_invalid_read_timing() {
		for (timeout, minimum) in [(0, 0), (50, 0), (99, 0)] {
			let_assert!(Err(e) = read_timeout_tenths(timeout, minimum));
			assert!(let InvalidConfiguration::ReadTiming { .. } = e);
		}
		for (timeout, minimum) in [(25501, 0), (25501, 1), (25600, 0), (25600, 10), (u32::MAX, 1)] {
			let_assert!(Err(e) = read_timeout_tenths(timeout, minimum));
			assert!(e == InvalidConfiguration::TimeoutTooLarge { inter_character_timeout: timeout });
		}
	}

	#[test]
	fn test_timeout_slot() {
		assert!(read_timeout_tenths(149, 0) == Ok(1));
		assert!(read_timeout_tenths(150, 0) == Ok(2));
		assert!(read_timeout_tenths(25500, 0) == Ok(255));
		assert!(read_timeout_tenths(0, 1) == Ok(0));

		let_assert!(Ok(termios) = Termios2::from_options(&options(149, 0)));
		assert!(termios.vtime() == 1);
		assert!(termios.vmin() == 0);
	}

	#[test]
	fn test_9600_8n1() {
		let_assert!(Ok(termios) = Termios2::from_options(&options(0, 1)));
		assert!(termios.c_cflag == libc::CLOCAL | libc::CREAD | libc::BOTHER | libc::CS8);
		assert!(termios.c_ispeed == 9600);
		assert!(termios.c_ospeed == 9600);
		assert!(termios.vmin() == 1);
		assert!(termios.vtime() == 0);
		assert!(termios.c_iflag == 0);
		assert!(termios.c_oflag == 0);
		assert!(termios.c_lflag == 0);
		assert!(termios.c_line == 0);
	}

	#[test]
	fn test_arbitrary_baud_rate() {
		let options = OpenOptions {
			baud_rate: 250_000,
			..Default::default()
		};
		let_assert!(Ok(termios) = Termios2::from_options(&options));
		assert!(termios.c_ispeed == 250_000);
		assert!(termios.c_ospeed == 250_000);
		assert!(termios.c_cflag & libc::BOTHER == libc::BOTHER);
	}

	#[test]
	fn test_data_bits() {
		for (data_bits, flag) in [(5, libc::CS5), (6, libc::CS6), (7, libc::CS7), (8, libc::CS8)] {
			let options = OpenOptions { data_bits, ..Default::default() };
			let_assert!(Ok(termios) = Termios2::from_options(&options));
			assert!(termios.c_cflag & DATA_BITS_MASK == flag);
		}
		for data_bits in [0, 4, 9] {
			let options = OpenOptions { data_bits, ..Default::default() };
			assert!(Termios2::from_options(&options) == Err(InvalidConfiguration::DataBits(data_bits)));
		}
	}

	#[test]
	fn test_stop_bits() {
		let one = OpenOptions { stop_bits: 1, ..Default::default() };
		let_assert!(Ok(termios) = Termios2::from_options(&one));
		assert!(termios.c_cflag & libc::CSTOPB == 0);

		let two = OpenOptions { stop_bits: 2, ..Default::default() };
		let_assert!(Ok(termios) = Termios2::from_options(&two));
		assert!(termios.c_cflag & libc::CSTOPB == libc::CSTOPB);

		for stop_bits in [0, 3] {
			let options = OpenOptions { stop_bits, ..Default::default() };
			assert!(Termios2::from_options(&options) == Err(InvalidConfiguration::StopBits(stop_bits)));
		}
	}

	#[test]
	fn test_parity() {
		let parity_flags = |parity_mode| {
			let options = OpenOptions { parity_mode, ..Default::default() };
			let_assert!(Ok(termios) = Termios2::from_options(&options));
			termios.c_cflag & (libc::PARENB | libc::PARODD)
		};
		assert!(parity_flags(ParityMode::None) == 0);
		assert!(parity_flags(ParityMode::Odd) == libc::PARENB | libc::PARODD);
		assert!(parity_flags(ParityMode::Even) == libc::PARENB);
	}

	#[test]
	fn test_flow_control() {
		let_assert!(Ok(termios) = Termios2::from_options(&OpenOptions::default()));
		assert!(termios.c_cflag & libc::CRTSCTS == 0);

		let options = OpenOptions {
			rts_cts_flow_control: true,
			..Default::default()
		};
		let_assert!(Ok(termios) = Termios2::from_options(&options));
		assert!(termios.c_cflag & libc::CRTSCTS == libc::CRTSCTS);
	}
}
