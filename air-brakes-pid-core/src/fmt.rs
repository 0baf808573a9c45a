#![macro_use]
#![allow(unused_macros)]

// Logging front end shared by the whole crate. Routes to `log` when that
// feature is on, otherwise to `defmt`, otherwise expands to nothing.

macro_rules! log_trace {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::trace!($($arg)+);

        #[cfg(all(feature = "defmt", not(feature = "log")))]
        ::defmt::trace!($($arg)+);
    }};
}

macro_rules! log_debug {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::debug!($($arg)+);

        #[cfg(all(feature = "defmt", not(feature = "log")))]
        ::defmt::debug!($($arg)+);
    }};
}

macro_rules! log_info {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::info!($($arg)+);

        #[cfg(all(feature = "defmt", not(feature = "log")))]
        ::defmt::info!($($arg)+);
    }};
}
