//! Response payloads, one per message kind.
//!
//! Requests that complete asynchronously on the foreign side answer with an `async_id` that
//! later events are correlated by.

#![allow(
    clippy::exhaustive_structs,
    reason = "payload shapes are owned by the foreign protocol and built with struct literals"
)]

/// Answer to [`DisposeRequest`][crate::DisposeRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DisposeResponse {
    /// Present if the release completes asynchronously.
    pub async_id: Option<u64>,
}

/// Answer to [`ConnectRequest`][crate::ConnectRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConnectResponse {
    /// Correlates the eventual connection result.
    pub async_id: u64,
}

/// Answer to [`DisconnectRequest`][crate::DisconnectRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DisconnectResponse {
    /// Correlates the eventual disconnection result.
    pub async_id: u64,
}

/// Answer to [`PublishTrackRequest`][crate::PublishTrackRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PublishTrackResponse {
    /// Correlates the eventual publication result.
    pub async_id: u64,
}

/// Answer to [`UnpublishTrackRequest`][crate::UnpublishTrackRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UnpublishTrackResponse {
    /// Correlates the eventual result.
    pub async_id: u64,
}

/// Answer to [`PublishDataRequest`][crate::PublishDataRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PublishDataResponse {
    /// Correlates the eventual delivery result.
    pub async_id: u64,
}

/// Answer to [`SetSubscribedRequest`][crate::SetSubscribedRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SetSubscribedResponse {}

/// Answer to [`UpdateLocalMetadataRequest`][crate::UpdateLocalMetadataRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UpdateLocalMetadataResponse {
    /// Correlates the eventual result.
    pub async_id: u64,
}

/// Answer to [`UpdateLocalNameRequest`][crate::UpdateLocalNameRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UpdateLocalNameResponse {
    /// Correlates the eventual result.
    pub async_id: u64,
}

/// Answer to [`GetSessionStatsRequest`][crate::GetSessionStatsRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GetSessionStatsResponse {
    /// Correlates the eventual statistics report.
    pub async_id: u64,
}

/// Answer to [`CreateVideoTrackRequest`][crate::CreateVideoTrackRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreateVideoTrackResponse {
    /// The new track.
    pub track_handle: u64,
}

/// Answer to [`CreateAudioTrackRequest`][crate::CreateAudioTrackRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreateAudioTrackResponse {
    /// The new track.
    pub track_handle: u64,
}

/// Answer to [`GetStatsRequest`][crate::GetStatsRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GetStatsResponse {
    /// Correlates the eventual statistics report.
    pub async_id: u64,
}

/// Answer to [`AllocVideoBufferRequest`][crate::AllocVideoBufferRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AllocVideoBufferResponse {
    /// The new buffer.
    pub buffer_handle: u64,
}

/// Answer to [`NewVideoStreamRequest`][crate::NewVideoStreamRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NewVideoStreamResponse {
    /// The new stream.
    pub stream_handle: u64,
}

/// Answer to [`NewVideoSourceRequest`][crate::NewVideoSourceRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NewVideoSourceResponse {
    /// The new source.
    pub source_handle: u64,
}

/// Answer to [`CaptureVideoFrameRequest`][crate::CaptureVideoFrameRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CaptureVideoFrameResponse {}

/// Answer to [`ToI420Request`][crate::ToI420Request].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ToI420Response {
    /// The converted buffer.
    pub buffer_handle: u64,
}

/// Answer to [`ToArgbRequest`][crate::ToArgbRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ToArgbResponse {}

/// Answer to [`AllocAudioBufferRequest`][crate::AllocAudioBufferRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AllocAudioBufferResponse {
    /// The new buffer.
    pub buffer_handle: u64,
}

/// Answer to [`NewAudioStreamRequest`][crate::NewAudioStreamRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NewAudioStreamResponse {
    /// The new stream.
    pub stream_handle: u64,
}

/// Answer to [`NewAudioSourceRequest`][crate::NewAudioSourceRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NewAudioSourceResponse {
    /// The new source.
    pub source_handle: u64,
}

/// Answer to [`CaptureAudioFrameRequest`][crate::CaptureAudioFrameRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CaptureAudioFrameResponse {
    /// Correlates the eventual capture result.
    pub async_id: u64,
}

/// Answer to [`NewAudioResamplerRequest`][crate::NewAudioResamplerRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NewAudioResamplerResponse {
    /// The new resampler.
    pub resampler_handle: u64,
}

/// Answer to [`RemixAndResampleRequest`][crate::RemixAndResampleRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RemixAndResampleResponse {
    /// The buffer holding the processed audio.
    pub buffer_handle: u64,
}

/// Answer to [`E2eeRequest`][crate::E2eeRequest].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct E2eeResponse {}
