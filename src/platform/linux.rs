use std::fs::File;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use crate::rs485::SerialRs485;
use crate::termios::Termios2;

// The request codes differ per architecture, so they are taken from libc.
use libc::{TCSETS2, TIOCSRS485};

// The kernel structs passed to the ioctls must match the layout libc knows for this architecture.
static_assertions::assert_eq_size!(Termios2, libc::termios2);
static_assertions::assert_eq_align!(Termios2, libc::termios2);

/// The system calls of Linux.
#[derive(Debug, Default, Copy, Clone)]
pub struct LinuxPlatform;

impl crate::Platform for LinuxPlatform {
	type Handle = File;

	fn open(&mut self, path: &Path) -> std::io::Result<File> {
		std::fs::OpenOptions::new()
			.read(true)
			.write(true)
			.custom_flags(libc::O_NOCTTY | libc::O_NONBLOCK)
			.open(path)
	}

	fn clear_nonblocking(&mut self, handle: &File) -> std::io::Result<()> {
		let fd = handle.as_raw_fd();
		unsafe {
			let flags = check(libc::fcntl(fd, libc::F_GETFL))?;
			check(libc::fcntl(fd, libc::F_SETFL, flags & !libc::O_NONBLOCK))?;
		}
		Ok(())
	}

	fn apply_line_config(&mut self, handle: &File, termios: &Termios2) -> std::io::Result<i32> {
		unsafe { check(libc::ioctl(handle.as_raw_fd(), TCSETS2 as _, termios as *const Termios2)) }
	}

	fn apply_rs485_config(&mut self, handle: &File, rs485: &SerialRs485) -> std::io::Result<i32> {
		unsafe { check(libc::ioctl(handle.as_raw_fd(), TIOCSRS485 as _, rs485 as *const SerialRs485)) }
	}
}

/// Turn a `-1` return value into the last OS error.
fn check(result: libc::c_int) -> std::io::Result<libc::c_int> {
	if result == -1 {
		Err(std::io::Error::last_os_error())
	} else {
		Ok(result)
	}
}
