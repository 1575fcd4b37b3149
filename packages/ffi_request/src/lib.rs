#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Pooled, single-use request leases for a foreign call boundary that accepts exactly one
//! envelope per call.
//!
//! The boundary speaks in two container types: [`FfiRequest`] going in and [`FfiResponse`]
//! coming back. Each carries at most one message out of a fixed [catalog][MessageKind] of
//! message kinds. This package takes care of three things:
//!
//! * Putting a typed request payload into the right envelope slot ([`FfiRequest::inject()`]).
//! * Verifying that an envelope carries no stale message before it is reused
//!   ([`Envelope::ensure_clean()`]).
//! * Borrowing the payload and both envelopes from a [`Pool`] for exactly one call and
//!   always handing them back, cleared, no matter how the call went ([`RequestLease`]).
//!
//! Executing the call is the job of a [`Transport`], which is supplied by the caller.
//!
//! # Example
//!
//! ```rust
//! use ffi_request::{
//!     ConnectRequest, ConnectResponse, FfiClient, FfiRequest, FfiResponse, Transport,
//!     TransportError,
//! };
//!
//! #[derive(Debug)]
//! struct Loopback;
//!
//! impl Transport for Loopback {
//!     fn send(
//!         &self,
//!         request: &FfiRequest,
//!         response: &mut FfiResponse,
//!     ) -> Result<(), TransportError> {
//!         if request.get::<ConnectRequest>().is_some() {
//!             response.inject(ConnectResponse { async_id: 1 });
//!         }
//!
//!         Ok(())
//!     }
//! }
//!
//! let client = FfiClient::new(Loopback);
//!
//! let mut lease = client.lease::<ConnectRequest>()?;
//! lease.server_url = "wss://example.com".to_string();
//! lease.token = "secret".to_string();
//!
//! let response = lease.send()?;
//! assert_eq!(response.get::<ConnectResponse>().map(|r| r.async_id), Some(1));
//!
//! // Dropping the lease and the response returns everything to the pool, cleared.
//! drop(response);
//! drop(lease);
//! # Ok::<(), ffi_request::Error>(())
//! ```

mod catalog;
mod client;
mod constants;
mod envelope;
mod error;
mod lease;
mod multi_pool;
mod payload;
mod pool;
mod response;
mod transport;

pub use catalog::*;
pub use client::*;
pub(crate) use constants::*;
pub use envelope::*;
pub use error::*;
pub use lease::*;
pub use multi_pool::*;
pub use payload::*;
pub use pool::*;
pub use response::*;
pub use transport::*;
