//! Tracing that is compiled out unless the `automin_debug-trace` feature is
//! enabled. Used for per-transition messages that are too verbose, and too
//! costly, for the regular trace level.

/// Forwards to [`log::trace!`] when the `automin_debug-trace` feature is enabled.
///
/// # Examples
///
/// ```
/// automin_utilities::debug_trace!("Read transition {} --[{}]-> {}", 1, "a", 2);
/// ```
#[macro_export]
#[cfg(feature = "automin_debug-trace")]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        {
            log::trace!($($arg)*);
        }
    };
}

#[macro_export]
#[cfg(not(feature = "automin_debug-trace"))]
macro_rules! debug_trace {
    ($($arg:tt)*) => {{}};
}
