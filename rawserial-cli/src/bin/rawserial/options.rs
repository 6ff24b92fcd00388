use std::path::PathBuf;

/// Open and configure serial ports for raw byte-stream I/O.
///
/// The port options are shared by all commands.
/// They are validated before the serial port is opened.
#[derive(Debug, clap::Parser)]
#[command(author, version)]
pub struct Options {
	/// Print more verbose messages. Can be used multiple times.
	#[arg(long, short)]
	#[arg(global = true)]
	#[arg(action = clap::ArgAction::Count)]
	pub verbose: u8,

	#[command(flatten)]
	pub port: PortOptions,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, clap::Args)]
pub struct PortOptions {
	/// The serial port to use.
	#[arg(long, short)]
	#[arg(global = true)]
	#[arg(default_value = "/dev/ttyUSB0")]
	pub serial_port: PathBuf,

	/// The baud rate to use. Any rate is accepted, not only the standard ones.
	#[arg(long, short)]
	#[arg(global = true)]
	#[arg(default_value_t = 9600)]
	pub baud_rate: u32,

	/// The number of data bits per frame (5, 6, 7 or 8).
	#[arg(long)]
	#[arg(global = true)]
	#[arg(default_value_t = 8)]
	pub data_bits: u8,

	/// The number of stop bits per frame (1 or 2).
	#[arg(long)]
	#[arg(global = true)]
	#[arg(default_value_t = 1)]
	pub stop_bits: u8,

	/// The parity bit to use.
	#[arg(long)]
	#[arg(global = true)]
	#[arg(value_enum)]
	#[arg(default_value_t = Parity::None)]
	pub parity: Parity,

	/// Enable RTS/CTS (hardware) flow control.
	#[arg(long)]
	#[arg(global = true)]
	pub rts_cts: bool,

	/// The inter-character timeout in milliseconds, rounded to a multiple of 100.
	#[arg(long)]
	#[arg(global = true)]
	#[arg(value_name = "MILLISECONDS")]
	#[arg(default_value_t = 500)]
	pub timeout: u32,

	/// The minimum number of bytes to wait for on each read.
	#[arg(long)]
	#[arg(global = true)]
	#[arg(value_name = "BYTES")]
	#[arg(default_value_t = 0)]
	pub min_read: u8,

	/// Enable RS-485 mode.
	#[arg(long)]
	#[arg(global = true)]
	pub rs485: bool,

	/// Drive RTS high while sending in RS-485 mode.
	#[arg(long)]
	#[arg(global = true)]
	pub rs485_rts_on_send: bool,

	/// Drive RTS high after sending in RS-485 mode.
	#[arg(long)]
	#[arg(global = true)]
	pub rs485_rts_after_send: bool,

	/// The delay between raising RTS and sending in RS-485 mode.
	#[arg(long)]
	#[arg(global = true)]
	#[arg(default_value_t = 0)]
	#[arg(allow_negative_numbers = true)]
	pub rs485_delay_before: i32,

	/// The delay between the end of a transmission and releasing RTS in RS-485 mode.
	#[arg(long)]
	#[arg(global = true)]
	#[arg(default_value_t = 0)]
	#[arg(allow_negative_numbers = true)]
	pub rs485_delay_after: i32,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
	/// Validate the port options and show the configuration, without opening the serial port.
	Check,

	/// List the standard baud rates, or check if a baud rate is standard.
	BaudRates {
		/// The baud rate to check.
		#[arg(long)]
		#[arg(value_name = "BAUD_RATE")]
		check: Option<u32>,
	},

	/// Read from the serial port and write the data to stdout.
	///
	/// Reading stops when a read times out without data, or when the requested number of bytes has been read.
	Read {
		/// Stop after reading this many bytes.
		#[arg(long, short)]
		count: Option<usize>,

		/// Print the data as hexadecimal bytes.
		#[arg(long)]
		hex: bool,
	},

	/// Write data to the serial port.
	Write {
		/// The data to write.
		#[arg(value_name = "DATA")]
		data: String,

		/// Interpret the data as hexadecimal bytes, optionally separated by whitespace.
		#[arg(long)]
		hex: bool,
	},

	/// Write shell completions to a file or to stdout.
	ShellCompletion {
		/// The shell for which to generate completions.
		#[arg(long)]
		shell: clap_complete::Shell,

		/// The file to write the generated completion file to.
		#[arg(long, short)]
		output: Option<PathBuf>,
	},
}

#[derive(Debug, Copy, Clone, clap::ValueEnum)]
pub enum Parity {
	None,
	Odd,
	Even,
}

impl PortOptions {
	pub fn to_open_options(&self) -> rawserial::OpenOptions {
		rawserial::OpenOptions {
			port_name: self.serial_port.clone(),
			baud_rate: self.baud_rate,
			data_bits: self.data_bits,
			stop_bits: self.stop_bits,
			parity_mode: self.parity.into(),
			rts_cts_flow_control: self.rts_cts,
			inter_character_timeout: self.timeout,
			minimum_read_size: self.min_read,
			rs485: rawserial::Rs485Options {
				enable: self.rs485,
				rts_high_during_send: self.rs485_rts_on_send,
				rts_high_after_send: self.rs485_rts_after_send,
				rx_during_tx: false,
				delay_rts_before_send: self.rs485_delay_before,
				delay_rts_after_send: self.rs485_delay_after,
			},
		}
	}
}

impl From<Parity> for rawserial::ParityMode {
	fn from(other: Parity) -> Self {
		match other {
			Parity::None => Self::None,
			Parity::Odd => Self::Odd,
			Parity::Even => Self::Even,
		}
	}
}

/// Parse hexadecimal bytes, optionally separated by whitespace.
pub fn parse_hex(data: &str) -> Result<Vec<u8>, String> {
	let digits: Vec<u8> = data.bytes().filter(|c| !c.is_ascii_whitespace()).collect();
	if digits.len() % 2 != 0 {
		return Err(format!("odd number of hexadecimal digits: {}", digits.len()));
	}
	digits
		.chunks(2)
		.map(|pair| {
			let pair = std::str::from_utf8(pair).map_err(|_| "invalid hexadecimal data".to_string())?;
			u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hexadecimal byte: {:?}", pair))
		})
		.collect()
}

#[cfg(test)]
mod test {
	use super::*;
	use assert2::{assert, let_assert};
	use clap::Parser;

	#[test]
	fn test_parse_hex() {
		assert!(parse_hex("").unwrap().is_empty());
		assert!(parse_hex("00ff10").unwrap() == [0x00, 0xFF, 0x10]);
		assert!(parse_hex("DE AD\tbe\nef").unwrap() == [0xDE, 0xAD, 0xBE, 0xEF]);
		assert!(let Err(_) = parse_hex("abc"));
		assert!(let Err(_) = parse_hex("zz"));
	}

	#[test]
	fn test_port_options() {
		let_assert!(Ok(options) = Options::try_parse_from([
			"rawserial",
			"--serial-port",
			"/dev/ttyS1",
			"--baud-rate",
			"250000",
			"--parity",
			"odd",
			"--stop-bits",
			"2",
			"--rs485",
			"--rs485-rts-on-send",
			"--rs485-delay-after",
			"-1",
			"check",
		]));
		let options = options.port.to_open_options();
		assert!(options.port_name == std::path::Path::new("/dev/ttyS1"));
		assert!(options.baud_rate == 250_000);
		assert!(options.parity_mode == rawserial::ParityMode::Odd);
		assert!(options.stop_bits == 2);
		assert!(options.rs485.enable);
		assert!(options.rs485.rts_high_during_send);
		assert!(!options.rs485.rts_high_after_send);
		assert!(options.rs485.delay_rts_after_send == -1);
		assert!(let Ok(()) = options.validate());
	}

	#[test]
	fn test_command_definition() {
		use clap::CommandFactory;
		Options::command().debug_assert();
	}
}
