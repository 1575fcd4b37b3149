use std::any::{Any, TypeId, type_name};

use crate::catalog::request_converter;
use crate::{
    Error, MessageKind, RequestMessage, RequestPayload, ResponseMessage, ResponsePayload, Result,
    Reusable,
};

/// Behavior shared by both envelope types that cross the foreign boundary.
///
/// An envelope has one slot per [`MessageKind`], of which at most one can be populated at any
/// time. Envelopes are pooled and reused, so before one is reused it must be verified to be
/// empty via [`ensure_clean()`][Self::ensure_clean].
pub trait Envelope: Reusable {
    /// Human-readable name of the envelope type, used in diagnostics.
    const NAME: &'static str;

    /// Returns the kind of the populated slot, if any.
    fn populated_kind(&self) -> Option<MessageKind>;

    /// Empties the populated slot, if any.
    fn clear(&mut self);

    /// Verifies that no slot of the envelope is populated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirtyContainer`] naming the populated field if the envelope is not empty.
    #[inline]
    fn ensure_clean(&self) -> Result<()> {
        match self.populated_kind() {
            None => Ok(()),
            Some(kind) => Err(Error::DirtyContainer {
                container: Self::NAME,
                kind,
            }),
        }
    }
}

/// The request envelope: the only type the foreign boundary accepts as call input.
///
/// # Example
///
/// ```rust
/// use ffi_request::{ConnectRequest, Envelope, FfiRequest, MessageKind};
///
/// let mut envelope = FfiRequest::new();
/// envelope.ensure_clean()?;
///
/// envelope.inject(ConnectRequest {
///     server_url: "wss://example.com".to_string(),
///     token: "secret".to_string(),
///     ..Default::default()
/// });
///
/// assert_eq!(envelope.kind(), Some(MessageKind::Connect));
/// assert!(envelope.ensure_clean().is_err());
/// # Ok::<(), ffi_request::Error>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FfiRequest {
    message: Option<RequestMessage>,
}

impl FfiRequest {
    /// Creates an empty request envelope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates the slot that matches the payload's kind.
    ///
    /// The envelope is expected to be empty. Injecting into a populated envelope replaces the
    /// previous message.
    #[inline]
    pub fn inject<R: RequestPayload>(&mut self, request: R) {
        debug_assert!(
            self.message.is_none(),
            "injecting {} into a request envelope that already carries {:?}",
            R::KIND,
            self.kind()
        );

        self.message = Some(request.into_message());
    }

    /// Populates the slot that matches the runtime type of `request`.
    ///
    /// This is the type-erased form of [`inject()`][Self::inject] for callers that are generic
    /// over arbitrary types and cannot name [`RequestPayload`] as a bound. The type is resolved
    /// against the catalog once per call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognizedKind`] if `R` is not a request payload of the catalog. The
    /// envelope is left unmodified in that case.
    pub fn inject_any<R: Any + Send>(&mut self, request: R) -> Result<MessageKind> {
        let unrecognized = || Error::UnrecognizedKind {
            type_name: type_name::<R>(),
        };

        let convert = request_converter(TypeId::of::<R>()).ok_or_else(unrecognized)?;
        let message = convert(Box::new(request)).ok_or_else(unrecognized)?;
        let kind = message.kind();

        self.message = Some(message);
        Ok(kind)
    }

    /// The populated message, if any.
    #[must_use]
    #[inline]
    pub fn message(&self) -> Option<&RequestMessage> {
        self.message.as_ref()
    }

    /// The kind of the populated message, if any.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> Option<MessageKind> {
        self.message.as_ref().map(RequestMessage::kind)
    }

    /// Whether no slot is populated.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.message.is_none()
    }

    /// Borrows the payload of kind `R`, if that is the populated slot.
    #[must_use]
    pub fn get<R: RequestPayload>(&self) -> Option<&R> {
        self.message.as_ref().and_then(R::from_message_ref)
    }

    /// Mutably borrows the payload of kind `R`, if that is the populated slot.
    #[must_use]
    pub fn get_mut<R: RequestPayload>(&mut self) -> Option<&mut R> {
        self.message.as_mut().and_then(R::from_message_mut)
    }

    /// Removes and returns the payload of kind `R`, if that is the populated slot.
    ///
    /// A message of any other kind stays in place.
    pub fn take<R: RequestPayload>(&mut self) -> Option<R> {
        let message = self.message.take()?;

        match R::from_message(message) {
            Ok(payload) => Some(payload),
            Err(other) => {
                self.message = Some(other);
                None
            }
        }
    }

    /// Removes and returns the populated message, leaving the envelope empty.
    #[inline]
    pub fn take_message(&mut self) -> Option<RequestMessage> {
        self.message.take()
    }
}

impl From<RequestMessage> for FfiRequest {
    fn from(message: RequestMessage) -> Self {
        Self {
            message: Some(message),
        }
    }
}

impl Reusable for FfiRequest {
    #[inline]
    fn reset(&mut self) {
        self.clear();
    }
}

impl Envelope for FfiRequest {
    const NAME: &'static str = "request";

    #[inline]
    fn populated_kind(&self) -> Option<MessageKind> {
        self.kind()
    }

    #[inline]
    fn clear(&mut self) {
        self.message = None;
    }
}

/// The response envelope: the only type the foreign boundary produces as call output.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FfiResponse {
    message: Option<ResponseMessage>,
}

impl FfiResponse {
    /// Creates an empty response envelope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates the slot that matches the payload's kind.
    ///
    /// Used by transports that assemble responses on this side of the boundary.
    #[inline]
    pub fn inject<R: ResponsePayload>(&mut self, response: R) {
        debug_assert!(
            self.message.is_none(),
            "injecting {} into a response envelope that already carries {:?}",
            R::KIND,
            self.kind()
        );

        self.message = Some(response.into_message());
    }

    /// The populated message, if any.
    #[must_use]
    #[inline]
    pub fn message(&self) -> Option<&ResponseMessage> {
        self.message.as_ref()
    }

    /// The kind of the populated message, if any.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> Option<MessageKind> {
        self.message.as_ref().map(ResponseMessage::kind)
    }

    /// Whether no slot is populated.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.message.is_none()
    }

    /// Borrows the payload of kind `R`, if that is the populated slot.
    #[must_use]
    pub fn get<R: ResponsePayload>(&self) -> Option<&R> {
        self.message.as_ref().and_then(R::from_message_ref)
    }

    /// Removes and returns the payload of kind `R`, if that is the populated slot.
    ///
    /// A message of any other kind stays in place.
    pub fn take<R: ResponsePayload>(&mut self) -> Option<R> {
        let message = self.message.take()?;

        match R::from_message(message) {
            Ok(payload) => Some(payload),
            Err(other) => {
                self.message = Some(other);
                None
            }
        }
    }

    /// Removes and returns the populated message, leaving the envelope empty.
    #[inline]
    pub fn take_message(&mut self) -> Option<ResponseMessage> {
        self.message.take()
    }
}

impl From<ResponseMessage> for FfiResponse {
    fn from(message: ResponseMessage) -> Self {
        Self {
            message: Some(message),
        }
    }
}

impl Reusable for FfiResponse {
    #[inline]
    fn reset(&mut self) {
        self.clear();
    }
}

impl Envelope for FfiResponse {
    const NAME: &'static str = "response";

    #[inline]
    fn populated_kind(&self) -> Option<MessageKind> {
        self.kind()
    }

    #[inline]
    fn clear(&mut self) {
        self.message = None;
    }
}
