use crate::{MessageKind, RequestMessage, ResponseMessage};

/// A type whose instances can be borrowed from a [`Pool`][crate::Pool] and handed back for
/// reuse by a later borrower.
///
/// Whoever returns an instance to a pool is responsible for calling [`reset()`][Self::reset]
/// first. Pools do not reset instances themselves.
pub trait Reusable: Default + Send + 'static {
    /// Removes all state attributable to the current borrower.
    ///
    /// The default implementation replaces the instance with [`Default::default()`], which also
    /// drops any nested collections instead of retaining their contents.
    #[inline]
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A request payload belonging to exactly one [`MessageKind`] of the catalog.
///
/// This is the static mapping from payload type to request envelope slot. It is implemented
/// for every request payload in the catalog and for nothing else.
pub trait RequestPayload: Reusable {
    /// The catalog entry this payload belongs to.
    const KIND: MessageKind;

    /// Wraps the payload in its message variant.
    fn into_message(self) -> RequestMessage;

    /// Unwraps the payload, handing back the message unchanged if it is of another kind.
    ///
    /// # Errors
    ///
    /// Returns the original message if it does not carry this payload type.
    fn from_message(message: RequestMessage) -> Result<Self, RequestMessage>;

    /// Borrows the payload if the message carries this payload type.
    fn from_message_ref(message: &RequestMessage) -> Option<&Self>;

    /// Mutably borrows the payload if the message carries this payload type.
    fn from_message_mut(message: &mut RequestMessage) -> Option<&mut Self>;
}

/// A response payload belonging to exactly one [`MessageKind`] of the catalog.
pub trait ResponsePayload: Reusable {
    /// The catalog entry this payload belongs to.
    const KIND: MessageKind;

    /// Wraps the payload in its message variant.
    fn into_message(self) -> ResponseMessage;

    /// Unwraps the payload, handing back the message unchanged if it is of another kind.
    ///
    /// # Errors
    ///
    /// Returns the original message if it does not carry this payload type.
    fn from_message(message: ResponseMessage) -> Result<Self, ResponseMessage>;

    /// Borrows the payload if the message carries this payload type.
    fn from_message_ref(message: &ResponseMessage) -> Option<&Self>;
}
