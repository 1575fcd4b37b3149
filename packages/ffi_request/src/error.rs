use thiserror::Error;

use crate::{MessageKind, TransportError};

/// Errors raised while marshalling or sending a request.
///
/// Apart from [`Transport`][Error::Transport], every variant signals a defect in the calling
/// code or in the pooling discipline rather than a transient condition. None of them are
/// worth retrying.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A payload type outside the message catalog was offered for injection.
    ///
    /// This means the catalog compiled into this package and the one the caller was built
    /// against have drifted apart.
    #[error("cannot inject {type_name}: the type does not belong to the message catalog")]
    UnrecognizedKind {
        /// Name of the offending type.
        type_name: &'static str,
    },

    /// An envelope that was expected to be empty still carries a message.
    #[error("{container} envelope is not clean: field '{}' is populated", .kind.field_name())]
    DirtyContainer {
        /// Which envelope was inspected: `"request"` or `"response"`.
        container: &'static str,

        /// The kind whose field was found populated.
        kind: MessageKind,
    },

    /// A request lease was asked to send a second time.
    #[error("the request has already been sent; a request lease sends exactly once")]
    AlreadySent,

    /// A request lease was used after it had been disposed.
    #[error("the request lease has been disposed and can no longer be used")]
    LeaseDisposed,

    /// The transport failed to execute the request. The transport's error is passed through
    /// unmodified as the source.
    #[error("the transport failed to execute the request")]
    Transport(#[source] TransportError),
}

/// A specialized `Result` type for request operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::error::Error as _;
    use std::fmt::Debug;
    use std::io;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn dirty_container_names_the_field() {
        let error = Error::DirtyContainer {
            container: "request",
            kind: MessageKind::PublishTrack,
        };

        assert_eq!(
            error.to_string(),
            "request envelope is not clean: field 'publish_track' is populated"
        );
    }

    #[test]
    fn unrecognized_kind_names_the_type() {
        let error = Error::UnrecognizedKind {
            type_name: "my_app::Custom",
        };

        assert!(error.to_string().contains("my_app::Custom"));
    }

    #[test]
    fn transport_error_is_exposed_as_source() {
        let error = Error::Transport(Box::new(io::Error::other("pipe closed")));

        let source = error.source().expect("transport errors carry a source");
        assert_eq!(source.to_string(), "pipe closed");
    }
}
