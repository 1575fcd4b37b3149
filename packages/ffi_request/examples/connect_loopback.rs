//! Example demonstrating a full request round trip through a pooled lease.
//!
//! A loopback transport stands in for the foreign boundary and answers every connect request.

use ffi_request::{
    ConnectRequest, ConnectResponse, DisconnectRequest, DisconnectResponse, Envelope, FfiClient,
    FfiRequest, FfiResponse, RequestMessage, Transport, TransportError,
};

#[derive(Debug)]
struct Loopback;

impl Transport for Loopback {
    fn send(
        &self,
        request: &FfiRequest,
        response: &mut FfiResponse,
    ) -> Result<(), TransportError> {
        match request.message() {
            Some(RequestMessage::Connect(connect)) => {
                println!("Boundary received connect to {}", connect.server_url);
                response.inject(ConnectResponse { async_id: 1 });
            }
            Some(RequestMessage::Disconnect(disconnect)) => {
                println!("Boundary received disconnect of room {}", disconnect.room_handle);
                response.inject(DisconnectResponse { async_id: 2 });
            }
            other => return Err(format!("loopback cannot handle {other:?}").into()),
        }

        Ok(())
    }
}

fn main() -> Result<(), ffi_request::Error> {
    println!("=== Pooled request round trip ===");

    let client = FfiClient::new(Loopback);

    {
        let mut lease = client.lease::<ConnectRequest>()?;
        lease.server_url = "wss://example.com".to_string();
        lease.token = "secret".to_string();
        lease.options.auto_subscribe = true;

        let response = lease.send()?;
        println!("Connect answered with {:?}", response.get::<ConnectResponse>());

        // Sending twice is a usage error.
        if let Err(error) = lease.send() {
            println!("Second send rejected: {error}");
        }
    }

    let response = client.request(|disconnect: &mut DisconnectRequest| {
        disconnect.room_handle = 1;
    })?;
    println!("Disconnect answered with {:?}", response.get::<DisconnectResponse>());

    // Everything borrowed has been returned to the pool, cleared.
    println!("Idle pooled instances: {}", client.pool().len());

    let envelope: FfiRequest = ffi_request::Pool::get(client.pool());
    envelope.ensure_clean()?;
    println!("Recycled request envelope is clean");

    let response: FfiResponse = ffi_request::Pool::get(client.pool());
    response.ensure_clean()?;
    println!("Recycled response envelope is clean");

    Ok(())
}
