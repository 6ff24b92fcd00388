// Forward to the `log` crate when the feature is enabled, and swallow the messages otherwise.

#[cfg(feature = "log")]
#[allow(unused_macros)]
macro_rules! trace {
	($($args:tt)*) => { ::log::trace!($($args)*) }
}

#[cfg(feature = "log")]
#[allow(unused_macros)]
macro_rules! debug {
	($($args:tt)*) => { ::log::debug!($($args)*) }
}

#[cfg(feature = "log")]
#[allow(unused_macros)]
macro_rules! warn {
	($($args:tt)*) => { ::log::warn!($($args)*) }
}

#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! trace {
	($($args:tt)*) => {};
}

#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! debug {
	($($args:tt)*) => {};
}

#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! warn {
	($($args:tt)*) => {};
}
