use std::any::type_name;
use std::fmt;
use std::mem;
use std::ops::Deref;

use tracing::trace;

use crate::{Envelope, FfiResponse, Pool, ResponsePayload};

/// The response envelope filled in by a [`Transport`][crate::Transport] for one
/// [`RequestLease::send()`][crate::RequestLease::send] call.
///
/// The envelope is borrowed from the same pool as the request. The handle derefs to the
/// response exactly as the transport left it. When the handle is dropped, the response
/// envelope is cleared and released back to that pool for the next call.
pub struct ResponseHandle<'a, P: Pool> {
    response: FfiResponse,
    pool: &'a P,
}

impl<'a, P: Pool> ResponseHandle<'a, P> {
    #[must_use]
    pub(crate) fn new(response: FfiResponse, pool: &'a P) -> Self {
        Self { response, pool }
    }

    /// Removes and returns the payload of kind `R`, if that is the populated slot.
    pub fn take<R: ResponsePayload>(&mut self) -> Option<R> {
        self.response.take::<R>()
    }

    /// Takes ownership of the response envelope.
    ///
    /// The pool receives a fresh empty envelope in its place, so it does not shrink.
    #[must_use]
    pub fn into_inner(mut self) -> FfiResponse {
        mem::take(&mut self.response)
    }
}

impl<P: Pool> Deref for ResponseHandle<'_, P> {
    type Target = FfiResponse;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.response
    }
}

impl<P: Pool> Drop for ResponseHandle<'_, P> {
    fn drop(&mut self) {
        let mut response = mem::take(&mut self.response);

        trace!(kind = ?response.kind(), "returning response envelope to the pool");

        response.clear();
        self.pool.release(response);
    }
}

impl<P: Pool> fmt::Debug for ResponseHandle<'_, P> {
    #[cfg_attr(test, mutants::skip)] // Debug output is informational, no API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{MultiPool, NewVideoStreamResponse, NewVideoSourceResponse};

    fn stream_response() -> FfiResponse {
        let mut response = FfiResponse::new();
        response.inject(NewVideoStreamResponse { stream_handle: 11 });
        response
    }

    #[test]
    fn derefs_to_unmodified_response() {
        let pool = MultiPool::new();
        let handle = ResponseHandle::new(stream_response(), &pool);

        assert_eq!(*handle, stream_response());
        assert_eq!(
            handle.get::<NewVideoStreamResponse>(),
            Some(&NewVideoStreamResponse { stream_handle: 11 })
        );
    }

    #[test]
    fn drop_returns_cleared_envelope_to_pool() {
        let pool = MultiPool::new();
        drop(ResponseHandle::new(stream_response(), &pool));

        assert_eq!(pool.idle_count::<FfiResponse>(), 1);

        let reused: FfiResponse = pool.get();
        reused.ensure_clean().unwrap();
    }

    #[test]
    fn take_extracts_matching_payload_only() {
        let pool = MultiPool::new();
        let mut handle = ResponseHandle::new(stream_response(), &pool);

        assert!(handle.take::<NewVideoSourceResponse>().is_none());
        assert_eq!(
            handle.take::<NewVideoStreamResponse>(),
            Some(NewVideoStreamResponse { stream_handle: 11 })
        );
        assert!(handle.is_empty());
    }

    #[test]
    fn into_inner_hands_over_the_response() {
        let pool = MultiPool::new();
        let handle = ResponseHandle::new(stream_response(), &pool);

        let response = handle.into_inner();

        assert_eq!(response, stream_response());
        assert_eq!(pool.idle_count::<FfiResponse>(), 1);
    }
}
