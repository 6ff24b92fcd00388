use std::io::Write;

fn main() {
	let options = rawserial::OpenOptions {
		port_name: "/dev/ttyUSB0".into(),
		baud_rate: 250_000,
		rs485: rawserial::Rs485Options {
			enable: true,
			rts_high_during_send: true,
			..Default::default()
		},
		..Default::default()
	};

	let mut port = rawserial::open(&options)
		.map_err(|e| println!("Failed to open serial port: {}: {}", options.port_name.display(), e))
		.unwrap();

	port.write_all(b"hello\r\n").unwrap();
	port.flush().unwrap();
	println!("Wrote {} bytes at {} baud", 7, options.baud_rate);
}
