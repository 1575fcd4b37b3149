use crate::{FfiResponse, MultiPool, Pool, RequestLease, RequestPayload, Result, Transport};

/// Entry point for issuing requests: owns a [`Pool`] and a [`Transport`] and hands out
/// [`RequestLease`]s that borrow from both.
///
/// # Example
///
/// ```rust
/// use ffi_request::{
///     FfiClient, FfiRequest, FfiResponse, GetStatsRequest, GetStatsResponse, Transport,
///     TransportError,
/// };
///
/// #[derive(Debug)]
/// struct Stats;
///
/// impl Transport for Stats {
///     fn send(
///         &self,
///         _request: &FfiRequest,
///         response: &mut FfiResponse,
///     ) -> Result<(), TransportError> {
///         response.inject(GetStatsResponse { async_id: 5 });
///         Ok(())
///     }
/// }
///
/// let client = FfiClient::new(Stats);
///
/// let response = client.request(|stats: &mut GetStatsRequest| stats.track_handle = 3)?;
/// assert_eq!(response.get::<GetStatsResponse>().map(|r| r.async_id), Some(5));
/// # Ok::<(), ffi_request::Error>(())
/// ```
#[derive(Debug)]
pub struct FfiClient<X, P = MultiPool> {
    pool: P,
    transport: X,
}

impl<X: Transport> FfiClient<X, MultiPool> {
    /// Creates a client backed by a [`MultiPool`] with default configuration.
    #[must_use]
    pub fn new(transport: X) -> Self {
        Self::with_pool(MultiPool::new(), transport)
    }
}

impl<X: Transport, P: Pool> FfiClient<X, P> {
    /// Creates a client backed by the given pool.
    #[must_use]
    pub fn with_pool(pool: P, transport: X) -> Self {
        Self { pool, transport }
    }

    /// Borrows a payload of kind `T` and a request envelope for one call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirtyContainer`][crate::Error::DirtyContainer] if the pool supplied an
    /// envelope that still carries a message.
    pub fn lease<T: RequestPayload>(&self) -> Result<RequestLease<'_, T, P, X>> {
        RequestLease::acquire(&self.pool, &self.transport)
    }

    /// Leases a payload of kind `T`, lets `populate` fill it in and sends it.
    ///
    /// The lease is disposed before returning. The response is handed over as an owned
    /// envelope.
    ///
    /// # Errors
    ///
    /// Returns any error from [`lease()`][Self::lease] or
    /// [`RequestLease::send()`][RequestLease::send].
    pub fn request<T, F>(&self, populate: F) -> Result<FfiResponse>
    where
        T: RequestPayload,
        F: FnOnce(&mut T),
    {
        let mut lease = self.lease::<T>()?;
        populate(&mut *lease);

        Ok(lease.send()?.into_inner())
    }

    /// The pool that leases borrow from.
    #[must_use]
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// The transport that executes requests.
    #[must_use]
    pub fn transport(&self) -> &X {
        &self.transport
    }
}
