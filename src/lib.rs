//! Open Linux serial ports for raw byte-stream I/O.
//!
//! This library translates a small set of port options into the exact `termios2` configuration of a serial device.
//! It supports arbitrary baud rates through the `BOTHER` mechanism of the kernel,
//! precise control over the read blocking behaviour with `VMIN` and `VTIME`,
//! and optional RS-485 half-duplex transceiver control through `TIOCSRS485`.
//!
//! The configuration is applied once, when the port is opened with [`open()`].
//! The returned [`SerialPort`] is a plain bidirectional byte stream:
//! it implements [`std::io::Read`] and [`std::io::Write`] and closes the device when dropped.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::io::Read;
//!
//! let options = rawserial::OpenOptions {
//! 	port_name: "/dev/ttyUSB0".into(),
//! 	baud_rate: 250_000,
//! 	inter_character_timeout: 500,
//! 	minimum_read_size: 0,
//! 	..Default::default()
//! };
//!
//! let mut port = rawserial::open(&options)?;
//! let mut buffer = [0; 64];
//! let read = port.read(&mut buffer)?;
//! println!("{:02X?}", &buffer[..read]);
//! # Ok(())
//! # }
//! ```
//!
//! # Optional features
//!
//! * `log`: emit log messages through the `log` crate while configuring a port.

#![cfg(target_os = "linux")]

// `Termios2` and `SerialRs485` follow the asm-generic kernel headers.
#[cfg(not(any(
	target_arch = "x86",
	target_arch = "x86_64",
	target_arch = "arm",
	target_arch = "aarch64",
	target_arch = "riscv64",
)))]
compile_error!("rawserial only supports architectures using the asm-generic termios2 layout");

#[macro_use]
mod log;

mod baud_rate;
mod error;
mod open;
mod options;
pub mod platform;
pub mod rs485;
pub mod termios;

pub use baud_rate::is_standard_baud_rate;
pub use baud_rate::STANDARD_BAUD_RATES;
pub use error::{ControlCall, InvalidConfiguration, OpenError};
pub use open::{open, open_with, SerialPort};
pub use options::{OpenOptions, ParityMode, Rs485Options};
pub use platform::{LinuxPlatform, Platform};
