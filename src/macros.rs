// src/macros.rs
//! Call-site capturing front ends for [`Logger`](crate::Logger).
//!
//! Each level macro takes the logger followed by `format!` arguments and
//! evaluates to `Result<(), LogError>`. The text is only formatted when the
//! level passes the threshold.

#[doc(hidden)]
#[macro_export]
macro_rules! __emit {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        if $logger.enabled($level) {
            $logger.emit($level, $crate::call_site!(), ::std::format!($($arg)+))
        } else {
            ::std::result::Result::<(), $crate::LogError>::Ok(())
        }
    }};
}

#[macro_export]
macro_rules! any {
    ($logger:expr, $($arg:tt)+) => { $crate::__emit!($logger, $crate::Level::Any, $($arg)+) };
}

#[macro_export]
macro_rules! out {
    ($logger:expr, $($arg:tt)+) => { $crate::__emit!($logger, $crate::Level::Out, $($arg)+) };
}

#[macro_export]
macro_rules! err {
    ($logger:expr, $($arg:tt)+) => { $crate::__emit!($logger, $crate::Level::Err, $($arg)+) };
}

#[macro_export]
macro_rules! wrn {
    ($logger:expr, $($arg:tt)+) => { $crate::__emit!($logger, $crate::Level::Wrn, $($arg)+) };
}

#[macro_export]
macro_rules! inf {
    ($logger:expr, $($arg:tt)+) => { $crate::__emit!($logger, $crate::Level::Inf, $($arg)+) };
}

/// Debug-level line. Import it explicitly to shadow `std::dbg!`.
#[macro_export]
macro_rules! dbg {
    ($logger:expr, $($arg:tt)+) => { $crate::__emit!($logger, $crate::Level::Dbg, $($arg)+) };
}

#[macro_export]
macro_rules! db2 {
    ($logger:expr, $($arg:tt)+) => { $crate::__emit!($logger, $crate::Level::Db2, $($arg)+) };
}

#[macro_export]
macro_rules! log {
    ($logger:expr, $($arg:tt)+) => { $crate::__emit!($logger, $crate::Level::Log, $($arg)+) };
}

/// Buffers a message for [`Logger::drain`](crate::Logger::drain).
#[macro_export]
macro_rules! record {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.record($level, $crate::call_site!(), ::std::format!($($arg)+))
    };
}

/// `enter!(log)` or `enter!(log, "loading {}", name)`.
#[macro_export]
macro_rules! enter {
    ($logger:expr) => { $logger.enter($crate::call_site!(), "") };
    ($logger:expr, $($arg:tt)+) => { $logger.enter($crate::call_site!(), &::std::format!($($arg)+)) };
}

/// `leave!(log)` or `leave!(log, "rows={}", n)`.
#[macro_export]
macro_rules! leave {
    ($logger:expr) => { $logger.leave($crate::call_site!(), "") };
    ($logger:expr, $($arg:tt)+) => { $logger.leave($crate::call_site!(), &::std::format!($($arg)+)) };
}

/// Logs and wraps an error: `return Err(throw!(log, e, "reading {}", path).into())`.
#[macro_export]
macro_rules! throw {
    ($logger:expr, $error:expr) => {
        $logger.throw($crate::call_site!(), $error, ::std::option::Option::None, ::std::option::Option::None)
    };
    ($logger:expr, $error:expr, $($arg:tt)+) => {
        $logger.throw(
            $crate::call_site!(),
            $error,
            ::std::option::Option::Some(::std::format!($($arg)+).as_str()),
            ::std::option::Option::None,
        )
    };
}
