//! Logging abstraction layer
//!
//! The coordinator and [`MemoryHistory`](crate::history::MemoryHistory) log through
//! these macros so the backend can be picked at compile time.
//!
//! # Features
//!
//! - `log` (default) - forwards to the `log` crate
//! - `tracing` - forwards to the `tracing` crate
//!
//! Enable one of them. With neither enabled the macros expand to nothing.
//!
//! # Usage
//!
//! ```ignore
//! use state_navigator::{debug_log, warn_log};
//!
//! debug_log!("Dispatching {} to history", request);
//! warn_log!("No confirmation hook installed, allowing transition");
//! ```

/// Forwards a record at the given level to whichever backend is enabled.
#[doc(hidden)]
#[macro_export]
macro_rules! __nav_log {
    ($level:ident, $($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
    }};
}

/// Trace-level logging (route resolution, cache hits).
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => { $crate::__nav_log!(trace, $($arg)*) };
}

/// Debug-level logging (dispatches, blocked or ignored transitions).
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => { $crate::__nav_log!(debug, $($arg)*) };
}

/// Info-level logging
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => { $crate::__nav_log!(info, $($arg)*) };
}

/// Warn-level logging
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => { $crate::__nav_log!(warn, $($arg)*) };
}

/// Error-level logging
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => { $crate::__nav_log!(error, $($arg)*) };
}
