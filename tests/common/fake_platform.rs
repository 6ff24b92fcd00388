use rawserial::rs485::SerialRs485;
use rawserial::termios::Termios2;
use rawserial::Platform;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A system call made on the fake platform.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
	Open(PathBuf),
	ClearNonblocking(u32),
	LineConfig(u32, Termios2),
	Rs485Config(u32, SerialRs485),
	Close(u32),
}

/// How a call on the fake platform should fail.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Failure {
	Errno(i32),
	Result(i32),
}

/// The calls where the fake platform should fail.
#[derive(Debug, Default, Copy, Clone)]
pub struct Failures {
	pub open: Option<i32>,
	pub clear_nonblocking: Option<i32>,
	pub line_config: Option<Failure>,
	pub rs485_config: Option<Failure>,
}

/// A platform that records all calls and never touches a real device.
#[derive(Default)]
pub struct FakePlatform {
	pub calls: Arc<Mutex<Vec<Call>>>,
	pub failures: Failures,
	next_id: u32,
}

/// A fake device handle that records when it is closed.
#[derive(Debug)]
pub struct FakeHandle {
	pub id: u32,
	calls: Arc<Mutex<Vec<Call>>>,
}

impl Drop for FakeHandle {
	fn drop(&mut self) {
		log::trace!("Closing fake device {}", self.id);
		self.calls.lock().unwrap().push(Call::Close(self.id));
	}
}

impl FakePlatform {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn failing(failures: Failures) -> Self {
		Self {
			failures,
			..Self::default()
		}
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.lock().unwrap().clone()
	}

	/// The number of handles that were opened but not closed.
	pub fn open_handles(&self) -> usize {
		let calls = self.calls.lock().unwrap();
		let opened = calls.iter().filter(|call| matches!(call, Call::Open(_))).count();
		let closed = calls.iter().filter(|call| matches!(call, Call::Close(_))).count();
		opened - closed
	}

	pub fn line_configs(&self) -> Vec<Termios2> {
		self.calls()
			.into_iter()
			.filter_map(|call| match call {
				Call::LineConfig(_, termios) => Some(termios),
				_ => None,
			})
			.collect()
	}

	pub fn rs485_configs(&self) -> Vec<SerialRs485> {
		self.calls()
			.into_iter()
			.filter_map(|call| match call {
				Call::Rs485Config(_, rs485) => Some(rs485),
				_ => None,
			})
			.collect()
	}

	fn record(&self, call: Call) {
		log::trace!("Fake platform call: {:?}", call);
		self.calls.lock().unwrap().push(call);
	}
}

fn control_result(failure: Option<Failure>) -> std::io::Result<i32> {
	match failure {
		None => Ok(0),
		Some(Failure::Errno(errno)) => Err(std::io::Error::from_raw_os_error(errno)),
		Some(Failure::Result(result)) => Ok(result),
	}
}

impl Platform for FakePlatform {
	type Handle = FakeHandle;

	fn open(&mut self, path: &Path) -> std::io::Result<FakeHandle> {
		if let Some(errno) = self.failures.open {
			return Err(std::io::Error::from_raw_os_error(errno));
		}
		self.record(Call::Open(path.to_path_buf()));
		self.next_id += 1;
		Ok(FakeHandle {
			id: self.next_id,
			calls: self.calls.clone(),
		})
	}

	fn clear_nonblocking(&mut self, handle: &FakeHandle) -> std::io::Result<()> {
		self.record(Call::ClearNonblocking(handle.id));
		match self.failures.clear_nonblocking {
			None => Ok(()),
			Some(errno) => Err(std::io::Error::from_raw_os_error(errno)),
		}
	}

	fn apply_line_config(&mut self, handle: &FakeHandle, termios: &Termios2) -> std::io::Result<i32> {
		self.record(Call::LineConfig(handle.id, *termios));
		control_result(self.failures.line_config)
	}

	fn apply_rs485_config(&mut self, handle: &FakeHandle, rs485: &SerialRs485) -> std::io::Result<i32> {
		self.record(Call::Rs485Config(handle.id, *rs485));
		control_result(self.failures.rs485_config)
	}
}
