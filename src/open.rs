use std::fs::File;
use std::io::{Read, Write};

use crate::rs485::SerialRs485;
use crate::termios::Termios2;
use crate::{ControlCall, LinuxPlatform, OpenError, OpenOptions, Platform};

/// An open and configured serial port.
///
/// This is a plain byte stream: use the [`std::io::Read`] and [`std::io::Write`] implementations to transfer data.
/// The blocking behaviour of reads is determined by [`OpenOptions::inter_character_timeout`] and [`OpenOptions::minimum_read_size`].
///
/// The device is closed when the port is dropped.
pub struct SerialPort {
	file: File,
}

impl std::fmt::Debug for SerialPort {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use std::os::unix::io::AsRawFd;
		write!(f, "SerialPort({:?})", self.file.as_raw_fd())
	}
}

/// Open and configure a serial port.
///
/// The options are validated before the device is opened.
/// If anything fails after the device was opened, it is closed again before returning the error.
pub fn open(options: &OpenOptions) -> Result<SerialPort, OpenError> {
	let file = open_with(&mut LinuxPlatform, options)?;
	Ok(SerialPort { file })
}

/// Open and configure a serial port using the system calls of the given platform.
///
/// On success, the caller becomes the sole owner of the returned handle.
/// On failure, any handle that was opened has already been dropped.
pub fn open_with<P: Platform>(platform: &mut P, options: &OpenOptions) -> Result<P::Handle, OpenError> {
	let termios = Termios2::from_options(options)?;
	let rs485 = SerialRs485::from_options(&options.rs485);
	trace!("Line configuration for {}: {:?}", options.port_name.display(), termios);

	let handle = platform.open(&options.port_name).map_err(OpenError::Open)?;
	platform.clear_nonblocking(&handle).map_err(OpenError::ClearNonblocking)?;

	check_control_call(ControlCall::LineConfig, platform.apply_line_config(&handle, &termios))?;
	debug!(
		"Configured {} with baud rate {}, {} data bits, {} stop bits, parity {}",
		options.port_name.display(),
		options.baud_rate,
		options.data_bits,
		options.stop_bits,
		options.parity_mode,
	);

	if let Some(rs485) = rs485 {
		trace!("RS-485 configuration for {}: {:?}", options.port_name.display(), rs485);
		check_control_call(ControlCall::Rs485Config, platform.apply_rs485_config(&handle, &rs485))?;
		debug!("Enabled RS-485 mode on {}", options.port_name.display());
	}

	Ok(handle)
}

fn check_control_call(call: ControlCall, result: std::io::Result<i32>) -> Result<(), OpenError> {
	match result {
		Err(error) => Err(OpenError::ControlCall { call, error }),
		Ok(0) => Ok(()),
		Ok(result) => Err(OpenError::UnknownFailure { call, result }),
	}
}

impl std::io::Read for SerialPort {
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		self.file.read(buf)
	}
}

impl std::io::Write for SerialPort {
	fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
		self.file.write(buf)
	}

	fn flush(&mut self) -> std::io::Result<()> {
		self.file.flush()
	}
}

impl std::io::Read for &SerialPort {
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		(&self.file).read(buf)
	}
}

impl std::io::Write for &SerialPort {
	fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
		(&self.file).write(buf)
	}

	fn flush(&mut self) -> std::io::Result<()> {
		(&self.file).flush()
	}
}
