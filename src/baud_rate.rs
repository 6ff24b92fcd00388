/// The list of standard baud rates.
///
/// This is purely informational: [`crate::open()`] accepts any baud rate,
/// since the rate is passed to the kernel as a plain number.
pub const STANDARD_BAUD_RATES: [u32; 22] = [
	50, 75, 110, 134, 150, 200, 300, 600, 1200, 1800, 2400, 4800, 7200, 9600, 14400, 19200, 28800, 38400, 57600, 76800,
	115200, 230400,
];

/// Check if a baud rate is one of the [standard baud rates](STANDARD_BAUD_RATES).
pub fn is_standard_baud_rate(baud_rate: u32) -> bool {
	STANDARD_BAUD_RATES.binary_search(&baud_rate).is_ok()
}
