use std::io::Read;

fn main() {
	let options = rawserial::OpenOptions {
		port_name: "/dev/ttyUSB0".into(),
		baud_rate: 115200,
		inter_character_timeout: 500,
		minimum_read_size: 0,
		..Default::default()
	};

	let mut port = rawserial::open(&options)
		.map_err(|e| println!("Failed to open serial port: {}: {}", options.port_name.display(), e))
		.unwrap();

	let mut buffer = [0; 256];
	loop {
		match port.read(&mut buffer) {
			Ok(0) => {
				println!("Timeout");
				break;
			},
			Ok(read) => println!("Read {} bytes: {:02X?}", read, &buffer[..read]),
			Err(e) => panic!("Error: {}", e),
		}
	}
}
