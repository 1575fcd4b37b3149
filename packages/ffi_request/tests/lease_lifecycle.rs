//! Integration tests for `ffi_request`.
//!
//! These tests drive leases end to end against a recording transport and a pool that counts
//! every borrow and release, verifying that pooled objects are always returned exactly once.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;

use ffi_request::{
    CaptureAudioFrameRequest, ConnectRequest, ConnectResponse, Envelope, Error, FfiClient,
    FfiRequest, FfiResponse, LeaseState, MessageKind, MultiPool, Pool, RequestLease,
    RequestPayload, Reusable, Transport, TransportError,
};

/// Counts borrows and releases per type on top of a real pool.
#[derive(Debug, Default)]
struct CountingPool {
    inner: MultiPool,
    gets: Mutex<HashMap<TypeId, usize>>,
    releases: Mutex<HashMap<TypeId, usize>>,
    released_envelopes_clean: Mutex<Vec<bool>>,
}

impl CountingPool {
    fn gets<T: 'static>(&self) -> usize {
        self.gets
            .lock()
            .unwrap()
            .get(&TypeId::of::<T>())
            .copied()
            .unwrap_or_default()
    }

    fn releases<T: 'static>(&self) -> usize {
        self.releases
            .lock()
            .unwrap()
            .get(&TypeId::of::<T>())
            .copied()
            .unwrap_or_default()
    }
}

impl Pool for CountingPool {
    fn get<T: Reusable>(&self) -> T {
        *self
            .gets
            .lock()
            .unwrap()
            .entry(TypeId::of::<T>())
            .or_default() += 1;

        self.inner.get()
    }

    fn release<T: Reusable>(&self, instance: T) {
        *self
            .releases
            .lock()
            .unwrap()
            .entry(TypeId::of::<T>())
            .or_default() += 1;

        if TypeId::of::<T>() == TypeId::of::<FfiRequest>() {
            let is_empty = (&instance as &dyn Any)
                .downcast_ref::<FfiRequest>()
                .is_some_and(|envelope| envelope.ensure_clean().is_ok());
            self.released_envelopes_clean.lock().unwrap().push(is_empty);
        }

        self.inner.release(instance);
    }
}

/// Records every request it receives and answers with a fixed response.
#[derive(Debug)]
struct RecordingTransport {
    received: Mutex<Vec<FfiRequest>>,
    supplied_responses_clean: Mutex<Vec<bool>>,
    response: FfiResponse,
}

impl RecordingTransport {
    fn answering(response: FfiResponse) -> Self {
        Self {
            received: Mutex::new(Vec::new()),
            supplied_responses_clean: Mutex::new(Vec::new()),
            response,
        }
    }

    fn received(&self) -> Vec<FfiRequest> {
        self.received.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    fn send(
        &self,
        request: &FfiRequest,
        response: &mut FfiResponse,
    ) -> Result<(), TransportError> {
        self.received.lock().unwrap().push(request.clone());
        self.supplied_responses_clean
            .lock()
            .unwrap()
            .push(response.is_empty());

        response.clone_from(&self.response);
        Ok(())
    }
}

fn connect_response() -> FfiResponse {
    let mut response = FfiResponse::new();
    response.inject(ConnectResponse { async_id: 1234 });
    response
}

#[test]
fn connect_end_to_end() {
    let pool = CountingPool::default();
    let transport = RecordingTransport::answering(connect_response());

    let mut lease = RequestLease::<ConnectRequest, _, _>::acquire(&pool, &transport).unwrap();
    lease.server_url = "wss://x".to_string();
    lease.token = "abc".to_string();

    let response = lease.send().unwrap();

    // The transport saw exactly one envelope with only the connect slot populated.
    let received = transport.received();
    assert_eq!(received.len(), 1);

    let envelope = received.first().unwrap();
    assert_eq!(envelope.kind(), Some(MessageKind::Connect));

    let connect = envelope.get::<ConnectRequest>().unwrap();
    assert_eq!(connect.server_url, "wss://x");
    assert_eq!(connect.token, "abc");
    assert_eq!(
        connect,
        &ConnectRequest {
            server_url: "wss://x".to_string(),
            token: "abc".to_string(),
            ..Default::default()
        }
    );

    // The handle wraps the transport's response unmodified.
    assert_eq!(*response, connect_response());
    drop(response);

    lease.dispose();
    assert_eq!(lease.state(), LeaseState::Disposed);

    assert_eq!(pool.releases::<ConnectRequest>(), 1);
    assert_eq!(pool.releases::<FfiRequest>(), 1);
    assert_eq!(*pool.released_envelopes_clean.lock().unwrap(), vec![true]);

    let recycled: ConnectRequest = pool.get();
    assert_eq!(recycled, ConnectRequest::default());
}

#[test]
fn every_borrow_is_released_exactly_once() {
    let pool = CountingPool::default();
    let transport = RecordingTransport::answering(FfiResponse::new());

    // Sent, then disposed repeatedly.
    let mut sent = RequestLease::<CaptureAudioFrameRequest, _, _>::acquire(&pool, &transport)
        .unwrap();
    drop(sent.send().unwrap());
    sent.dispose();
    sent.dispose();
    drop(sent);

    // Never sent.
    let unsent = RequestLease::<CaptureAudioFrameRequest, _, _>::acquire(&pool, &transport)
        .unwrap();
    drop(unsent);

    // Sent twice; the second send fails.
    let mut twice = RequestLease::<CaptureAudioFrameRequest, _, _>::acquire(&pool, &transport)
        .unwrap();
    drop(twice.send().unwrap());
    assert!(matches!(twice.send().unwrap_err(), Error::AlreadySent));
    drop(twice);

    assert_eq!(transport.received().len(), 2);

    assert_eq!(pool.gets::<CaptureAudioFrameRequest>(), 3);
    assert_eq!(pool.releases::<CaptureAudioFrameRequest>(), 3);
    assert_eq!(pool.gets::<FfiRequest>(), 3);
    assert_eq!(pool.releases::<FfiRequest>(), 3);

    // Only the two sends that reached the transport borrowed a response envelope.
    assert_eq!(pool.gets::<FfiResponse>(), 2);
    assert_eq!(pool.releases::<FfiResponse>(), 2);

    assert!(
        pool.released_envelopes_clean
            .lock()
            .unwrap()
            .iter()
            .all(|clean| *clean)
    );
}

#[test]
fn response_envelopes_are_recycled_between_calls() {
    const CALLS: usize = 100;

    let client = FfiClient::with_pool(
        CountingPool::default(),
        RecordingTransport::answering(connect_response()),
    );

    for _ in 0..CALLS {
        let mut lease = client.lease::<ConnectRequest>().unwrap();
        let response = lease.send().unwrap();
        assert_eq!(*response, connect_response());
    }

    let pool = client.pool();
    assert_eq!(pool.gets::<FfiResponse>(), CALLS);
    assert_eq!(pool.releases::<FfiResponse>(), CALLS);

    // A single envelope served every call instead of the pool filling up with unused ones.
    assert_eq!(pool.inner.idle_count::<FfiResponse>(), 1);
    assert_eq!(pool.inner.idle_count::<FfiRequest>(), 1);

    let supplied_clean = client
        .transport()
        .supplied_responses_clean
        .lock()
        .unwrap()
        .clone();
    assert_eq!(supplied_clean.len(), CALLS);
    assert!(supplied_clean.iter().all(|clean| *clean));
}

#[test]
fn recycled_envelope_does_not_leak_previous_message() {
    let client = FfiClient::with_pool(
        MultiPool::builder().max_idle_per_type(1).build(),
        RecordingTransport::answering(FfiResponse::new()),
    );

    client
        .request(|connect: &mut ConnectRequest| {
            connect.server_url = "wss://first".to_string();
            connect.token = "first-token".to_string();
        })
        .unwrap();

    client
        .request(|capture: &mut CaptureAudioFrameRequest| {
            capture.source_handle = 2;
            capture.buffer_handle = 3;
        })
        .unwrap();

    let received = client.transport().received();
    assert_eq!(received.len(), 2);

    let second = received.get(1).unwrap();
    assert_eq!(second.kind(), Some(MessageKind::CaptureAudioFrame));
    assert!(second.get::<ConnectRequest>().is_none());

    // The recycled connect payload carries nothing from the first call.
    let mut lease = client.lease::<ConnectRequest>().unwrap();
    assert!(lease.server_url.is_empty());
    assert!(lease.token.is_empty());
    lease.dispose();
}

#[test]
fn erased_injection_rejects_types_outside_catalog() {
    let mut envelope = FfiRequest::new();

    let error = envelope.inject_any(String::from("not a request")).unwrap_err();

    match error {
        Error::UnrecognizedKind { type_name } => {
            assert_eq!(type_name, type_name_of::<String>());
        }
        other => panic!("expected UnrecognizedKind, got {other:?}"),
    }

    envelope.ensure_clean().unwrap();
}

#[test]
fn every_kind_reports_its_own_field_when_dirty() {
    for kind in MessageKind::ALL {
        let envelope = envelope_for(*kind);

        let error = envelope.ensure_clean().unwrap_err();
        assert_eq!(
            error.to_string(),
            format!(
                "request envelope is not clean: field '{}' is populated",
                kind.field_name()
            )
        );
    }
}

#[test]
fn concurrent_clients_never_share_instances() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 50;

    let client = Arc::new(FfiClient::new(RecordingTransport::answering(
        connect_response(),
    )));

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_index| {
            let client = Arc::clone(&client);

            thread::spawn(move || {
                for round in 0..ROUNDS {
                    let token = format!("{thread_index}-{round}");

                    let mut lease = client.lease::<ConnectRequest>().unwrap();
                    assert!(lease.token.is_empty(), "borrowed a payload with stale state");

                    lease.token.clone_from(&token);
                    let response = lease.send().unwrap();
                    assert_eq!(*response, connect_response());

                    // Nobody else mutated our instance while we held it.
                    assert_eq!(lease.token, token);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let received = client.transport().received();
    assert_eq!(received.len(), THREADS * ROUNDS);
    assert!(received.iter().all(|request| request.kind() == Some(MessageKind::Connect)));
}

fn type_name_of<T>() -> &'static str {
    type_name::<T>()
}

/// Builds a request envelope with only the slot for `kind` populated, going through the
/// erased injection path so the catalog registry does the routing.
fn envelope_for(kind: MessageKind) -> FfiRequest {
    macro_rules! inject_matching {
        ($($payload:ident),+ $(,)?) => {{
            let mut envelope = FfiRequest::new();
            $(
                if <ffi_request::$payload as RequestPayload>::KIND == kind {
                    envelope.inject_any(ffi_request::$payload::default()).unwrap();
                }
            )+
            envelope
        }};
    }

    inject_matching!(
        DisposeRequest,
        ConnectRequest,
        DisconnectRequest,
        PublishTrackRequest,
        UnpublishTrackRequest,
        PublishDataRequest,
        SetSubscribedRequest,
        UpdateLocalMetadataRequest,
        UpdateLocalNameRequest,
        GetSessionStatsRequest,
        CreateVideoTrackRequest,
        CreateAudioTrackRequest,
        GetStatsRequest,
        AllocVideoBufferRequest,
        NewVideoStreamRequest,
        NewVideoSourceRequest,
        CaptureVideoFrameRequest,
        ToI420Request,
        ToArgbRequest,
        AllocAudioBufferRequest,
        NewAudioStreamRequest,
        NewAudioSourceRequest,
        CaptureAudioFrameRequest,
        NewAudioResamplerRequest,
        RemixAndResampleRequest,
        E2eeRequest,
    )
}
