//! Escalation of failures in roles that have no error channel.
//!
//! Comparator, fold, fork, fork rule, remover and subscription have host
//! signatures that cannot carry an error. Inside the provider their failures
//! stay ordinary `Result` values; only at the host boundary are they raised
//! as a panic whose payload is a [`Fault`]. Hosts that must survive a
//! defective script wrap the call in [`std::panic::catch_unwind`] and use
//! [`Fault::from_panic`] to recover the original error.

use sl_error::ScriptError;
use std::any::Any;
use std::fmt;
use tracing::error;

/// Panic payload carrying the failure that could not be returned.
#[derive(Debug, Clone)]
pub struct Fault {
    error: ScriptError,
}

impl Fault {
    /// Returns the underlying error.
    pub fn error(&self) -> &ScriptError {
        &self.error
    }

    /// Consumes the fault, returning the underlying error.
    pub fn into_error(self) -> ScriptError {
        self.error
    }

    /// Extracts a fault from a `catch_unwind` payload.
    ///
    /// Returns `None` for panics that were not raised by [`escalate`].
    pub fn from_panic(payload: &(dyn Any + Send)) -> Option<&Fault> {
        payload.downcast_ref::<Fault>()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecoverable plugin failure: {}", self.error)
    }
}

impl std::error::Error for Fault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Aborts the current call with an unrecoverable failure.
pub fn escalate(error: ScriptError) -> ! {
    error!(error = %error, "Unrecoverable plugin failure");
    std::panic::panic_any(Fault { error })
}
