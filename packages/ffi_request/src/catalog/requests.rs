//! Request payloads, one per message kind.
//!
//! Handles are opaque identifiers minted by the foreign side and passed back verbatim.

#![allow(
    clippy::exhaustive_structs,
    reason = "payload shapes are owned by the foreign protocol and built with struct literals"
)]

/// Releases the foreign object behind a handle.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DisposeRequest {
    /// The handle to release.
    pub handle: u64,

    /// Whether the foreign side may complete the release asynchronously.
    pub is_async: bool,
}

/// Room behavior negotiated at connect time.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoomOptions {
    /// Subscribe to every remote track automatically.
    pub auto_subscribe: bool,

    /// Let the server adapt stream quality to the rendered size.
    pub adaptive_stream: bool,

    /// Pause publishing layers that nobody is subscribed to.
    pub dynacast: bool,
}

/// Connects to a room.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConnectRequest {
    /// The signaling server URL, e.g. `wss://example.com`.
    pub server_url: String,

    /// The access token authorizing the participant.
    pub token: String,

    /// Room behavior options.
    pub options: RoomOptions,
}

/// Leaves a room.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DisconnectRequest {
    /// The room to leave.
    pub room_handle: u64,
}

/// Publishes a local track.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PublishTrackRequest {
    /// The local participant publishing the track.
    pub local_participant_handle: u64,

    /// The track to publish.
    pub track_handle: u64,

    /// Whether to enable simulcast layers for video.
    pub simulcast: bool,
}

/// Stops publishing a local track.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UnpublishTrackRequest {
    /// The local participant that published the track.
    pub local_participant_handle: u64,

    /// The server-assigned track identifier.
    pub track_sid: String,

    /// Whether to also stop the underlying media source.
    pub stop_on_unpublish: bool,
}

/// Sends a data packet to other participants in the room.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PublishDataRequest {
    /// The local participant sending the data.
    pub local_participant_handle: u64,

    /// The packet contents.
    pub data: Vec<u8>,

    /// Deliver reliably (ordered, retransmitted) instead of lossy.
    pub reliable: bool,

    /// Recipients; empty means everybody in the room.
    pub destination_sids: Vec<String>,

    /// Application-defined topic.
    pub topic: Option<String>,
}

/// Subscribes to or unsubscribes from a remote track publication.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SetSubscribedRequest {
    /// The desired subscription state.
    pub subscribe: bool,

    /// The remote publication.
    pub publication_handle: u64,
}

/// Replaces the metadata of the local participant.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UpdateLocalMetadataRequest {
    /// The local participant.
    pub local_participant_handle: u64,

    /// The new metadata.
    pub metadata: String,
}

/// Replaces the display name of the local participant.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UpdateLocalNameRequest {
    /// The local participant.
    pub local_participant_handle: u64,

    /// The new display name.
    pub name: String,
}

/// Collects statistics for the whole room session.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GetSessionStatsRequest {
    /// The room to collect statistics for.
    pub room_handle: u64,
}

/// Creates a local video track fed by a video source.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreateVideoTrackRequest {
    /// The track name.
    pub name: String,

    /// The video source feeding the track.
    pub source_handle: u64,
}

/// Creates a local audio track fed by an audio source.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreateAudioTrackRequest {
    /// The track name.
    pub name: String,

    /// The audio source feeding the track.
    pub source_handle: u64,
}

/// Collects statistics for one track.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GetStatsRequest {
    /// The track to collect statistics for.
    pub track_handle: u64,
}

/// Allocates a video frame buffer on the foreign side.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AllocVideoBufferRequest {
    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,
}

/// Opens a stream of frames from a video track.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NewVideoStreamRequest {
    /// The track to stream from.
    pub track_handle: u64,
}

/// Creates a video source that frames can be captured into.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NewVideoSourceRequest {
    /// Native width of the source in pixels.
    pub width: u32,

    /// Native height of the source in pixels.
    pub height: u32,
}

/// Pushes a frame into a video source.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CaptureVideoFrameRequest {
    /// The video source receiving the frame.
    pub source_handle: u64,

    /// The buffer holding the frame.
    pub buffer_handle: u64,

    /// Capture time in microseconds.
    pub timestamp_us: i64,

    /// Clockwise rotation in degrees (0, 90, 180 or 270).
    pub rotation: u32,
}

/// Converts a video buffer to I420.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ToI420Request {
    /// The buffer to convert.
    pub buffer_handle: u64,

    /// Flip the image vertically during conversion.
    pub flip_y: bool,
}

/// Converts a video buffer to ARGB into memory owned by the caller.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ToArgbRequest {
    /// The buffer to convert.
    pub buffer_handle: u64,

    /// Address of the destination memory.
    pub dst_ptr: u64,

    /// Bytes per destination row.
    pub dst_stride: u32,

    /// Destination width in pixels.
    pub dst_width: u32,

    /// Destination height in pixels.
    pub dst_height: u32,

    /// Flip the image vertically during conversion.
    pub flip_y: bool,
}

/// Allocates an audio frame buffer on the foreign side.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AllocAudioBufferRequest {
    /// Samples per second.
    pub sample_rate: u32,

    /// Number of interleaved channels.
    pub num_channels: u32,

    /// Samples per channel held by the buffer.
    pub samples_per_channel: u32,
}

/// Opens a stream of frames from an audio track.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NewAudioStreamRequest {
    /// The track to stream from.
    pub track_handle: u64,
}

/// Creates an audio source that frames can be captured into.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NewAudioSourceRequest {
    /// Samples per second.
    pub sample_rate: u32,

    /// Number of interleaved channels.
    pub num_channels: u32,
}

/// Pushes a frame into an audio source.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CaptureAudioFrameRequest {
    /// The audio source receiving the frame.
    pub source_handle: u64,

    /// The buffer holding the frame.
    pub buffer_handle: u64,
}

/// Creates an audio resampler.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NewAudioResamplerRequest {}

/// Remixes and resamples an audio buffer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RemixAndResampleRequest {
    /// The resampler to use.
    pub resampler_handle: u64,

    /// The buffer to process.
    pub buffer_handle: u64,

    /// Target channel count.
    pub num_channels: u32,

    /// Target samples per second.
    pub sample_rate: u32,
}

/// Controls end-to-end encryption of a room.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct E2eeRequest {
    /// The room whose encryption is controlled.
    pub room_handle: u64,

    /// Whether encryption should be enabled.
    pub enabled: bool,

    /// Shared key material; empty leaves the current key unchanged.
    pub shared_key: Vec<u8>,
}
