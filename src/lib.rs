// src/lib.rs
//! Leveled console/log-file line logger with call-site headers, call-site
//! filtering, buffered replay, and enter/leave tracing.
//!
//! ```no_run
//! use dbglog::{err, inf, Config, Logger};
//!
//! let config = Config::with_level("inf")?;
//! let mut log = Logger::new(config)?;
//! inf!(log, "starting with {} workers", 4)?;
//! err!(log, "could not open {}", "db.sqlite")?;
//! # Ok::<(), dbglog::LogError>(())
//! ```

pub mod config;
pub mod logger;
mod macros;
pub mod utils;

pub use config::{Config, DbgArgs};
pub use logger::call_site::CallSite;
pub use logger::filter::{ReplayFilter, SiteFilter};
pub use logger::level::Level;
pub use logger::recorder::Message;
pub use logger::sink::CaptureBuffer;
pub use logger::throw::{BoxError, Thrown};
pub use logger::Logger;
pub use utils::LogError;
