//! RS-485 half-duplex configuration.
//!
//! In RS-485 mode the kernel drives the RTS line of the UART around every transmission,
//! which is typically wired to the driver-enable pin of the transceiver.

use crate::Rs485Options;

bitflags::bitflags! {
	/// Flags of the kernel `struct serial_rs485`.
	#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
	pub struct Rs485Flags: u32 {
		/// Enable RS-485 mode.
		const ENABLED = 1 << 0;
		/// Logical level of RTS while sending.
		const RTS_ON_SEND = 1 << 1;
		/// Logical level of RTS after sending.
		const RTS_AFTER_SEND = 1 << 2;
		/// Keep the receiver enabled while sending.
		const RX_DURING_TX = 1 << 4;
	}
}

/// Linux `struct serial_rs485` from `linux/serial.h`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct SerialRs485 {
	/// The raw [`Rs485Flags`].
	pub flags: u32,
	/// Delay before sending.
	pub delay_rts_before_send: u32,
	/// Delay after sending.
	pub delay_rts_after_send: u32,
	/// Reserved, must be zero.
	pub padding: [u32; 5],
}

static_assertions::assert_eq_size!(SerialRs485, [u8; 32]);
static_assertions::assert_eq_align!(SerialRs485, u32);

impl SerialRs485 {
	/// Build the RS-485 configuration for the given options.
	///
	/// Returns `None` if RS-485 mode is not enabled.
	pub fn from_options(options: &Rs485Options) -> Option<Self> {
		if !options.enable {
			return None;
		}

		if options.rx_during_tx {
			warn!("Receiving during transmission is requested for RS-485 mode, but it is not applied to the device");
		}

		let mut flags = Rs485Flags::ENABLED;
		flags.set(Rs485Flags::RTS_ON_SEND, options.rts_high_during_send);
		flags.set(Rs485Flags::RTS_AFTER_SEND, options.rts_high_after_send);

		// The kernel fields are unsigned: negative delays keep their bit pattern.
		Some(Self {
			flags: flags.bits(),
			delay_rts_before_send: options.delay_rts_before_send as u32,
			delay_rts_after_send: options.delay_rts_after_send as u32,
			padding: [0; 5],
		})
	}

	/// Get the flags, ignoring unknown bits.
	pub fn flags(&self) -> Rs485Flags {
		Rs485Flags::from_bits_truncate(self.flags)
	}
}
