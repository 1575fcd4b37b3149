use std::error::Error as StdError;

use crate::{FfiRequest, FfiResponse};

/// Failure reported by a [`Transport`].
///
/// Whatever went wrong while crossing the boundary belongs to the transport. This package
/// forwards the error untouched as the source of [`Error::Transport`][crate::Error::Transport].
pub type TransportError = Box<dyn StdError + Send + Sync + 'static>;

/// Executes one populated request envelope across the foreign boundary.
///
/// From the caller's point of view the call is blocking: it returns only once the response
/// envelope has been filled in, even if the boundary itself is asynchronous internally.
/// Timeouts, retries and cancellation are all the transport's business.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Sends the request and writes the matching response into `response`.
    ///
    /// `response` is borrowed from the same pool as the request envelope and is guaranteed
    /// to be empty when the call starts.
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport encountered while executing the call. Anything
    /// already written into `response` is discarded in that case.
    fn send(
        &self,
        request: &FfiRequest,
        response: &mut FfiResponse,
    ) -> Result<(), TransportError>;
}
