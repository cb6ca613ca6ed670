// src/logger/throw.rs
use super::call_site::CallSite;
use std::error::Error;
use std::fmt;

pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// An error re-raised through [`Logger::throw`](crate::Logger::throw).
///
/// Carries the annotated message, the call site that raised it, the
/// wrapped error as its `source()`, and an optional extra cause.
#[derive(Debug)]
pub struct Thrown {
    message: Option<String>,
    site: CallSite,
    error: BoxError,
    cause: Option<BoxError>,
}

impl Thrown {
    pub(crate) fn new(
        message: Option<String>,
        site: CallSite,
        error: BoxError,
        cause: Option<BoxError>,
    ) -> Self {
        Self { message, site, error, cause }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn site(&self) -> &CallSite {
        &self.site
    }

    /// The wrapped error.
    pub fn error(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.error.as_ref()
    }

    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn into_error(self) -> BoxError {
        self.error
    }
}

impl fmt::Display for Thrown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}", msg)?,
            None => write!(f, "{}", self.error)?,
        }
        if let Some(cause) = &self.cause {
            write!(f, "; caused by: {}", cause)?;
        }
        Ok(())
    }
}

impl Error for Thrown {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.error.as_ref())
    }
}

/// Every error in the `source()` chain, outermost first.
pub fn error_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut chain = vec![error.to_string()];
    let mut current = error.source();
    while let Some(next) = current {
        chain.push(next.to_string());
        current = next.source();
    }
    chain
}
