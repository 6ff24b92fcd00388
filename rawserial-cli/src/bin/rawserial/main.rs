use std::io::{Read, Write};
use std::path::Path;

mod logging;
mod options;

use options::{Command, Options};

fn main() {
	if let Err(()) = do_main(clap::Parser::parse()) {
		std::process::exit(1);
	}
}

fn do_main(options: Options) -> Result<(), ()> {
	logging::init(module_path!(), options.verbose);
	let open_options = options.port.to_open_options();
	match &options.command {
		Command::Check => {
			check(&open_options)?;
		},
		Command::BaudRates { check } => match check {
			Some(baud_rate) => {
				if rawserial::is_standard_baud_rate(*baud_rate) {
					log::info!("{} is a standard baud rate", baud_rate);
				} else {
					log::info!("{} is not a standard baud rate", baud_rate);
				}
			},
			None => {
				for baud_rate in rawserial::STANDARD_BAUD_RATES {
					log::info!("{}", baud_rate);
				}
			},
		},
		Command::Read { count, hex } => {
			let port = open_port(&open_options)?;
			read_to_stdout(&port, *count, *hex)?;
		},
		Command::Write { data, hex } => {
			let data = if *hex {
				options::parse_hex(data).map_err(|e| log::error!("Invalid data: {}", e))?
			} else {
				data.as_bytes().to_vec()
			};
			let mut port = open_port(&open_options)?;
			log::debug!("Writing {} bytes to {}", data.len(), open_options.port_name.display());
			port.write_all(&data)
				.map_err(|e| log::error!("Failed to write to serial port: {}", e))?;
			port.flush()
				.map_err(|e| log::error!("Failed to flush serial port: {}", e))?;
			log::info!("Wrote {} bytes", data.len());
		},
		Command::ShellCompletion { shell, output } => {
			write_shell_completion(*shell, output.as_deref())?;
		},
	}

	Ok(())
}

fn check(options: &rawserial::OpenOptions) -> Result<(), ()> {
	let termios = rawserial::termios::Termios2::from_options(options)
		.map_err(|e| log::error!("Invalid configuration: {}", e))?;

	log::info!("Serial port: {}", options.port_name.display());
	log::info!(" ├─ c_cflag: 0x{:08X}", termios.c_cflag);
	log::info!(" ├─ c_ispeed: {}", termios.c_ispeed);
	log::info!(" ├─ c_ospeed: {}", termios.c_ospeed);
	log::info!(" ├─ VMIN: {}", termios.vmin());
	log::info!(" └─ VTIME: {} (tenths of a second)", termios.vtime());
	if !rawserial::is_standard_baud_rate(options.baud_rate) {
		log::info!("Note: {} is not a standard baud rate", options.baud_rate);
	}
	if options.inter_character_timeout != rawserial::termios::round_timeout(options.inter_character_timeout) {
		log::warn!(
			"Inter-character timeout of {} ms will be rounded to {} ms",
			options.inter_character_timeout,
			rawserial::termios::round_timeout(options.inter_character_timeout),
		);
	}

	if let Some(rs485) = rawserial::rs485::SerialRs485::from_options(&options.rs485) {
		log::info!("RS-485:");
		log::info!(" ├─ flags: {:?}", rs485.flags());
		log::info!(" ├─ delay_rts_before_send: {}", rs485.delay_rts_before_send);
		log::info!(" └─ delay_rts_after_send: {}", rs485.delay_rts_after_send);
	}
	Ok(())
}

fn open_port(options: &rawserial::OpenOptions) -> Result<rawserial::SerialPort, ()> {
	let port = rawserial::open(options)
		.map_err(|e| log::error!("Failed to open serial port: {}: {}", options.port_name.display(), e))?;
	log::debug!(
		"Using serial port {} with baud rate {}",
		options.port_name.display(),
		options.baud_rate
	);
	Ok(port)
}

fn read_to_stdout(mut port: &rawserial::SerialPort, count: Option<usize>, hex: bool) -> Result<(), ()> {
	let stdout = std::io::stdout();
	let mut stdout = stdout.lock();
	let mut buffer = [0; 256];
	let mut total = 0;

	loop {
		let max = match count {
			Some(count) if total >= count => break,
			Some(count) => buffer.len().min(count - total),
			None => buffer.len(),
		};
		let read = port
			.read(&mut buffer[..max])
			.map_err(|e| log::error!("Failed to read from serial port: {}", e))?;
		if read == 0 {
			log::debug!("Read timed out without data");
			break;
		}
		total += read;

		let data = &buffer[..read];
		let result = if hex {
			writeln!(stdout, "{:02X?}", data)
		} else {
			stdout.write_all(data).and_then(|()| stdout.flush())
		};
		result.map_err(|e| log::error!("Failed to write to stdout: {}", e))?;
	}

	log::debug!("Read {} bytes in total", total);
	Ok(())
}

fn write_shell_completion(shell: clap_complete::Shell, path: Option<&Path>) -> Result<(), ()> {
	use clap::CommandFactory;

	let mut buffer = Vec::with_capacity(4 * 1024);

	let mut command = Options::command();
	clap_complete::generate(shell, &mut command, env!("CARGO_BIN_NAME"), &mut buffer);
	if !buffer.ends_with(b"\n") {
		buffer.push(b'\n');
	}

	let path = path.unwrap_or_else(|| Path::new("-"));
	if path == Path::new("-") {
		log::debug!("Writing shell completion for {} to stdout", shell);
		let stdout = std::io::stdout();
		stdout
			.lock()
			.write_all(&buffer)
			.map_err(|e| log::error!("Failed to write to stdout: {}", e))?;
	} else {
		log::debug!("Writing shell completion for {} to {}", shell, path.display());
		let mut output = std::fs::File::create(path).map_err(|e| log::error!("Failed to create {}: {}", path.display(), e))?;
		output
			.write_all(&buffer)
			.map_err(|e| log::error!("Failed to write to {}: {}", path.display(), e))?;
	}

	Ok(())
}
