#[cfg(feature = "debug")]
#[macro_export]
macro_rules! debugln {
    ($($rest:tt)*) => {
        std::println!($($rest)*)
    }
}

#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! debugln {
    ($($rest:tt)*) => {
        ()
    };
}

/// Logs an informational message to stdout. Always compiled in, since
/// it is used for low-frequency events (serial bytes, link negotiation)
/// that are cheap regardless of build profile.
#[macro_export]
macro_rules! infoln {
    ($($rest:tt)*) => {
        std::println!($($rest)*)
    };
}

/// Logs a warning to stderr for a recoverable condition (unmapped
/// register access, malformed save data, ...).
#[macro_export]
macro_rules! warnln {
    ($($rest:tt)*) => {
        std::eprintln!($($rest)*)
    };
}
