use std::any::type_name;
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};

use tracing::{debug, trace, warn};

use crate::{
    ERR_LEASE_DISPOSED, Envelope, Error, FfiRequest, FfiResponse, Pool, RequestPayload,
    ResponseHandle, Result, Reusable, Transport, acquire_clean,
};

/// Lifecycle of a [`RequestLease`].
///
/// ```text
/// Idle --send()--> Sent
/// Idle --dispose()--> Disposed
/// Sent --dispose()--> Disposed
/// ```
///
/// No transition leaves `Disposed`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum LeaseState {
    /// The payload is available for population and the request has not been sent.
    Idle,

    /// The request has been handed to the transport. It cannot be sent again.
    Sent,

    /// The payload and envelope have been returned to the pool.
    Disposed,
}

/// A pooled payload and a pooled request envelope, bound together for exactly one call.
///
/// The lease borrows both objects from a [`Pool`] when it is acquired. The payload is exposed
/// via [`Deref`] and [`DerefMut`] so the caller can fill it in place, after which
/// [`send()`][Self::send] injects it into the envelope and executes the call on the
/// [`Transport`].
///
/// Disposal hands both objects back to the pool, cleared. It happens exactly once: on the first
/// call to [`dispose()`][Self::dispose] or when the lease is dropped, whichever comes first,
/// regardless of whether the request was ever sent or whether sending failed.
///
/// # Example
///
/// ```rust
/// use ffi_request::{
///     FfiRequest, FfiResponse, LeaseState, MultiPool, RequestLease, Transport,
///     TransportError, UpdateLocalNameRequest,
/// };
///
/// #[derive(Debug)]
/// struct Echo;
///
/// impl Transport for Echo {
///     fn send(
///         &self,
///         _request: &FfiRequest,
///         _response: &mut FfiResponse,
///     ) -> Result<(), TransportError> {
///         Ok(())
///     }
/// }
///
/// let pool = MultiPool::new();
///
/// let mut lease = RequestLease::<UpdateLocalNameRequest, _, _>::acquire(&pool, &Echo)?;
/// lease.local_participant_handle = 1;
/// lease.name = "Alice".to_string();
///
/// let _response = lease.send()?;
/// assert_eq!(lease.state(), LeaseState::Sent);
///
/// lease.dispose();
/// assert_eq!(lease.state(), LeaseState::Disposed);
/// # Ok::<(), ffi_request::Error>(())
/// ```
///
/// # Thread safety
///
/// A lease is owned by a single caller and performs no locking of its own. It can be moved to
/// another thread if the payload type, the pool and the transport allow it.
pub struct RequestLease<'a, T, P, X>
where
    T: RequestPayload,
    P: Pool,
    X: Transport + ?Sized,
{
    /// Present while the lease is idle. Once sent, the payload lives inside the envelope.
    payload: Option<T>,

    envelope: FfiRequest,

    state: LeaseState,

    pool: &'a P,

    transport: &'a X,
}

impl<'a, T, P, X> RequestLease<'a, T, P, X>
where
    T: RequestPayload,
    P: Pool,
    X: Transport + ?Sized,
{
    /// Borrows a payload and a request envelope from the pool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirtyContainer`] if the pool supplied an envelope that still carries a
    /// message. Nothing is borrowed in that case.
    pub fn acquire(pool: &'a P, transport: &'a X) -> Result<Self> {
        let envelope = acquire_clean::<FfiRequest, P>(pool)?;
        let payload = pool.get::<T>();

        Ok(Self::from_parts(payload, envelope, pool, transport))
    }

    /// Binds an already borrowed payload and envelope into a lease.
    ///
    /// Both objects are assumed to come from `pool` and to be clean. They are returned to
    /// `pool` when the lease is disposed.
    #[must_use]
    pub fn from_parts(payload: T, envelope: FfiRequest, pool: &'a P, transport: &'a X) -> Self {
        Self {
            payload: Some(payload),
            envelope,
            state: LeaseState::Idle,
            pool,
            transport,
        }
    }

    /// The current lifecycle state.
    #[must_use]
    #[inline]
    pub fn state(&self) -> LeaseState {
        self.state
    }

    /// Injects the payload into the envelope and executes the call on the transport.
    ///
    /// The response envelope is borrowed from the pool and verified to be clean before the
    /// transport fills it in. The transport is invoked exactly once per lease. The returned
    /// handle wraps the response exactly as the transport left it.
    ///
    /// # Errors
    ///
    /// * [`Error::AlreadySent`] if the request has already been sent. The transport is not
    ///   invoked again.
    /// * [`Error::LeaseDisposed`] if the lease has been disposed.
    /// * [`Error::DirtyContainer`] if the pool supplied a response envelope that still
    ///   carries a message. The lease stays idle and the transport is not invoked.
    /// * [`Error::Transport`] if the transport failed, carrying its error as the source.
    ///
    /// In every case the lease can still be disposed normally.
    pub fn send(&mut self) -> Result<ResponseHandle<'a, P>> {
        match self.state {
            LeaseState::Idle => {}
            LeaseState::Sent => return Err(Error::AlreadySent),
            LeaseState::Disposed => return Err(Error::LeaseDisposed),
        }

        let mut response = acquire_clean::<FfiResponse, P>(self.pool)?;

        self.state = LeaseState::Sent;

        if let Some(payload) = self.payload.take() {
            self.envelope.inject(payload);
        }

        debug!(kind = %T::KIND, "sending request");

        if let Err(error) = self.transport.send(&self.envelope, &mut response) {
            response.clear();
            self.pool.release(response);

            return Err(Error::Transport(error));
        }

        Ok(ResponseHandle::new(response, self.pool))
    }

    /// Clears the envelope and returns it and the payload to the pool.
    ///
    /// Only the first call has any effect. Dropping the lease disposes it automatically.
    pub fn dispose(&mut self) {
        if self.state == LeaseState::Disposed {
            return;
        }

        let previous = mem::replace(&mut self.state, LeaseState::Disposed);

        // The envelope is emptied unconditionally, whatever became of the payload.
        let message = self.envelope.take_message();

        let payload = self
            .payload
            .take()
            .or_else(|| message.and_then(|message| T::from_message(message).ok()));

        match payload {
            Some(mut payload) => {
                payload.reset();
                self.pool.release(payload);
            }
            None => warn!(
                kind = %T::KIND,
                "request payload could not be recovered from its envelope and is not returned to the pool"
            ),
        }

        self.pool.release(mem::take(&mut self.envelope));

        trace!(kind = %T::KIND, ?previous, "request lease disposed");
    }
}

impl<T, P, X> Deref for RequestLease<'_, T, P, X>
where
    T: RequestPayload,
    P: Pool,
    X: Transport + ?Sized,
{
    type Target = T;

    /// Provides access to the borrowed payload, also after it has been sent.
    ///
    /// # Panics
    ///
    /// Panics if the lease has been disposed.
    #[inline]
    fn deref(&self) -> &Self::Target {
        self.payload
            .as_ref()
            .or_else(|| self.envelope.get::<T>())
            .expect(ERR_LEASE_DISPOSED)
    }
}

impl<T, P, X> DerefMut for RequestLease<'_, T, P, X>
where
    T: RequestPayload,
    P: Pool,
    X: Transport + ?Sized,
{
    /// Provides mutable access to the borrowed payload for in-place population.
    ///
    /// # Panics
    ///
    /// Panics if the lease has been disposed.
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        match &mut self.payload {
            Some(payload) => payload,
            None => self.envelope.get_mut::<T>().expect(ERR_LEASE_DISPOSED),
        }
    }
}

impl<T, P, X> Drop for RequestLease<'_, T, P, X>
where
    T: RequestPayload,
    P: Pool,
    X: Transport + ?Sized,
{
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T, P, X> fmt::Debug for RequestLease<'_, T, P, X>
where
    T: RequestPayload,
    P: Pool,
    X: Transport + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("kind", &T::KIND)
            .field("state", &self.state)
            .field("envelope", &self.envelope)
            .finish_non_exhaustive()
    }
}
