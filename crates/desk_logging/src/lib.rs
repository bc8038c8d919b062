#![deny(missing_docs)]
//! Logging macros for the newsdesk workspace.
//!
//! `newsdesk_client` logs the request lifecycle, credential wipes,
//! notifications and sign-in redirects through the `desk_*` macros, and
//! `newsdesk_cli` installs the `simplelog` backend that receives them.
//! Library crates depend on this crate and `log` only, never on a logger
//! implementation. Access and refresh tokens are never passed to these
//! macros; log the method, path and status instead.
//!
//! ```
//! use desk_logging::{desk_debug, desk_warn};
//!
//! desk_logging::initialize_for_tests();
//! let (method, path) = ("GET", "cities");
//! desk_debug!("request {} {}", method, path);
//! desk_warn!("{} {} returned 401; clearing credentials", method, path);
//! ```

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! desk_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! desk_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! desk_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! desk_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! desk_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Trace in debug builds so request lifecycles show up in failing tests.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
