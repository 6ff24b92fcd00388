//! The [`Platform`] trait: the system calls needed to open and configure a serial port.
//!
//! Everything above this trait is platform independent.
//! The real implementation is [`LinuxPlatform`].
//! Other implementations can be used with [`crate::open_with()`], for example to test without hardware.

use std::path::Path;

use crate::rs485::SerialRs485;
use crate::termios::Termios2;

mod linux;
pub use linux::LinuxPlatform;

/// The system calls used to open and configure a serial port.
pub trait Platform {
	/// An open device.
	///
	/// The device must be closed when the handle is dropped.
	type Handle;

	/// Open a device for reading and writing, without making it the controlling terminal and without blocking.
	fn open(&mut self, path: &Path) -> std::io::Result<Self::Handle>;

	/// Clear the non-blocking flag of an open device.
	fn clear_nonblocking(&mut self, handle: &Self::Handle) -> std::io::Result<()>;

	/// Apply the line discipline and baud rate configuration.
	///
	/// Returns the raw result of the call if the kernel did not report an error.
	fn apply_line_config(&mut self, handle: &Self::Handle, termios: &Termios2) -> std::io::Result<i32>;

	/// Apply the RS-485 configuration.
	///
	/// Returns the raw result of the call if the kernel did not report an error.
	fn apply_rs485_config(&mut self, handle: &Self::Handle, rs485: &SerialRs485) -> std::io::Result<i32>;
}
