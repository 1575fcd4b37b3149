//! The fixed catalog of message kinds understood by the foreign boundary.
//!
//! The catalog is versioned by the foreign protocol. Every kind has one request payload type
//! and one response payload type. All catalog items are generated from a single table below so
//! that the kind list, the two message sum types and the payload trait implementations cannot
//! drift apart.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::LazyLock;

use foldhash::{HashMap, HashMapExt};

use crate::{RequestPayload, ResponsePayload, Reusable};

mod requests;
mod responses;

pub use requests::*;
pub use responses::*;

/// Converts an erased request payload into its catalog message.
///
/// Returns `None` if the value is not of the type the converter was registered for.
type RequestConverter = fn(Box<dyn Any + Send>) -> Option<RequestMessage>;

/// Coarse grouping of message kinds, mirroring how the foreign protocol organizes them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Category {
    /// Handle lifetime management.
    Lifecycle,

    /// Room session management and participant state.
    Room,

    /// Track creation and statistics.
    Track,

    /// Video buffers, sources and streams.
    Video,

    /// Audio buffers, sources, streams and resampling.
    Audio,

    /// End-to-end encryption control.
    Encryption,
}

macro_rules! message_catalog {
    ($(
        $(#[$meta:meta])*
        $kind:ident => $field:literal, $category:ident, $request:ident, $response:ident;
    )+) => {
        /// One entry in the fixed message catalog of the foreign protocol.
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum MessageKind {
            $(
                $(#[$meta])*
                $kind,
            )+
        }

        impl MessageKind {
            /// Every kind in the catalog, in protocol order.
            pub const ALL: &'static [Self] = &[$(Self::$kind),+];

            /// The name of the envelope field that carries this kind.
            #[must_use]
            pub const fn field_name(self) -> &'static str {
                match self {
                    $(Self::$kind => $field,)+
                }
            }

            /// The protocol category this kind belongs to.
            #[must_use]
            pub const fn category(self) -> Category {
                match self {
                    $(Self::$kind => Category::$category,)+
                }
            }
        }

        /// A request message: exactly one populated slot of the request envelope.
        #[derive(Clone, Debug, Eq, PartialEq)]
        #[non_exhaustive]
        pub enum RequestMessage {
            $(
                $(#[$meta])*
                $kind($request),
            )+
        }

        impl RequestMessage {
            /// The kind of message carried.
            #[must_use]
            pub const fn kind(&self) -> MessageKind {
                match self {
                    $(Self::$kind(_) => MessageKind::$kind,)+
                }
            }
        }

        /// A response message: exactly one populated slot of the response envelope.
        #[derive(Clone, Debug, Eq, PartialEq)]
        #[non_exhaustive]
        pub enum ResponseMessage {
            $(
                $(#[$meta])*
                $kind($response),
            )+
        }

        impl ResponseMessage {
            /// The kind of message carried.
            #[must_use]
            pub const fn kind(&self) -> MessageKind {
                match self {
                    $(Self::$kind(_) => MessageKind::$kind,)+
                }
            }
        }

        $(
            impl Reusable for $request {}

            impl RequestPayload for $request {
                const KIND: MessageKind = MessageKind::$kind;

                #[inline]
                fn into_message(self) -> RequestMessage {
                    RequestMessage::$kind(self)
                }

                #[inline]
                fn from_message(message: RequestMessage) -> Result<Self, RequestMessage> {
                    match message {
                        RequestMessage::$kind(payload) => Ok(payload),
                        other => Err(other),
                    }
                }

                #[inline]
                fn from_message_ref(message: &RequestMessage) -> Option<&Self> {
                    match message {
                        RequestMessage::$kind(payload) => Some(payload),
                        _ => None,
                    }
                }

                #[inline]
                fn from_message_mut(message: &mut RequestMessage) -> Option<&mut Self> {
                    match message {
                        RequestMessage::$kind(payload) => Some(payload),
                        _ => None,
                    }
                }
            }

            impl Reusable for $response {}

            impl ResponsePayload for $response {
                const KIND: MessageKind = MessageKind::$kind;

                #[inline]
                fn into_message(self) -> ResponseMessage {
                    ResponseMessage::$kind(self)
                }

                #[inline]
                fn from_message(message: ResponseMessage) -> Result<Self, ResponseMessage> {
                    match message {
                        ResponseMessage::$kind(payload) => Ok(payload),
                        other => Err(other),
                    }
                }

                #[inline]
                fn from_message_ref(message: &ResponseMessage) -> Option<&Self> {
                    match message {
                        ResponseMessage::$kind(payload) => Some(payload),
                        _ => None,
                    }
                }
            }
        )+

        static REQUEST_CONVERTERS: LazyLock<HashMap<TypeId, RequestConverter>> =
            LazyLock::new(|| {
                let mut converters = HashMap::with_capacity(MessageKind::ALL.len());

                $(
                    converters.insert(
                        TypeId::of::<$request>(),
                        (|erased: Box<dyn Any + Send>| {
                            erased
                                .downcast::<$request>()
                                .ok()
                                .map(|payload| RequestMessage::$kind(*payload))
                        }) as RequestConverter,
                    );
                )+

                converters
            });
    };
}

message_catalog! {
    /// Releases a handle owned by the foreign side.
    Dispose => "dispose", Lifecycle, DisposeRequest, DisposeResponse;

    /// Connects to a room.
    Connect => "connect", Room, ConnectRequest, ConnectResponse;
    /// Leaves a room.
    Disconnect => "disconnect", Room, DisconnectRequest, DisconnectResponse;
    /// Publishes a local track.
    PublishTrack => "publish_track", Room, PublishTrackRequest, PublishTrackResponse;
    /// Stops publishing a local track.
    UnpublishTrack => "unpublish_track", Room, UnpublishTrackRequest, UnpublishTrackResponse;
    /// Sends a data packet to other participants.
    PublishData => "publish_data", Room, PublishDataRequest, PublishDataResponse;
    /// Subscribes to or unsubscribes from a remote publication.
    SetSubscribed => "set_subscribed", Room, SetSubscribedRequest, SetSubscribedResponse;
    /// Replaces the metadata of the local participant.
    UpdateLocalMetadata => "update_local_metadata", Room, UpdateLocalMetadataRequest, UpdateLocalMetadataResponse;
    /// Replaces the display name of the local participant.
    UpdateLocalName => "update_local_name", Room, UpdateLocalNameRequest, UpdateLocalNameResponse;
    /// Collects statistics for the whole room session.
    GetSessionStats => "get_session_stats", Room, GetSessionStatsRequest, GetSessionStatsResponse;

    /// Creates a local video track from a video source.
    CreateVideoTrack => "create_video_track", Track, CreateVideoTrackRequest, CreateVideoTrackResponse;
    /// Creates a local audio track from an audio source.
    CreateAudioTrack => "create_audio_track", Track, CreateAudioTrackRequest, CreateAudioTrackResponse;
    /// Collects statistics for one track.
    GetStats => "get_stats", Track, GetStatsRequest, GetStatsResponse;

    /// Allocates a video frame buffer on the foreign side.
    AllocVideoBuffer => "alloc_video_buffer", Video, AllocVideoBufferRequest, AllocVideoBufferResponse;
    /// Opens a stream of frames from a video track.
    NewVideoStream => "new_video_stream", Video, NewVideoStreamRequest, NewVideoStreamResponse;
    /// Creates a video source that frames can be captured into.
    NewVideoSource => "new_video_source", Video, NewVideoSourceRequest, NewVideoSourceResponse;
    /// Pushes a frame into a video source.
    CaptureVideoFrame => "capture_video_frame", Video, CaptureVideoFrameRequest, CaptureVideoFrameResponse;
    /// Converts a video buffer to I420.
    ToI420 => "to_i420", Video, ToI420Request, ToI420Response;
    /// Converts a video buffer to ARGB into caller-owned memory.
    ToArgb => "to_argb", Video, ToArgbRequest, ToArgbResponse;

    /// Allocates an audio frame buffer on the foreign side.
    AllocAudioBuffer => "alloc_audio_buffer", Audio, AllocAudioBufferRequest, AllocAudioBufferResponse;
    /// Opens a stream of frames from an audio track.
    NewAudioStream => "new_audio_stream", Audio, NewAudioStreamRequest, NewAudioStreamResponse;
    /// Creates an audio source that frames can be captured into.
    NewAudioSource => "new_audio_source", Audio, NewAudioSourceRequest, NewAudioSourceResponse;
    /// Pushes a frame into an audio source.
    CaptureAudioFrame => "capture_audio_frame", Audio, CaptureAudioFrameRequest, CaptureAudioFrameResponse;
    /// Creates an audio resampler.
    NewAudioResampler => "new_audio_resampler", Audio, NewAudioResamplerRequest, NewAudioResamplerResponse;
    /// Remixes and resamples an audio buffer.
    RemixAndResample => "remix_and_resample", Audio, RemixAndResampleRequest, RemixAndResampleResponse;

    /// Controls end-to-end encryption of a room.
    E2ee => "e2ee", Encryption, E2eeRequest, E2eeResponse;
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Looks up the catalog converter for a request payload type, if the type is in the catalog.
pub(crate) fn request_converter(type_id: TypeId) -> Option<RequestConverter> {
    REQUEST_CONVERTERS.get(&type_id).copied()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_has_every_protocol_kind_once() {
        assert_eq!(MessageKind::ALL.len(), 26);

        let field_names: HashSet<_> = MessageKind::ALL
            .iter()
            .map(|kind| kind.field_name())
            .collect();
        assert_eq!(field_names.len(), MessageKind::ALL.len());
    }

    #[test]
    fn categories_match_protocol_grouping() {
        let count_in = |category: Category| {
            MessageKind::ALL
                .iter()
                .filter(|kind| kind.category() == category)
                .count()
        };

        assert_eq!(count_in(Category::Lifecycle), 1);
        assert_eq!(count_in(Category::Room), 9);
        assert_eq!(count_in(Category::Track), 3);
        assert_eq!(count_in(Category::Video), 6);
        assert_eq!(count_in(Category::Audio), 6);
        assert_eq!(count_in(Category::Encryption), 1);
    }

    #[test]
    fn display_is_field_name() {
        assert_eq!(MessageKind::Connect.to_string(), "connect");
        assert_eq!(MessageKind::ToI420.to_string(), "to_i420");
        assert_eq!(MessageKind::E2ee.to_string(), "e2ee");
    }

    #[test]
    fn payload_kinds_match_message_kinds() {
        assert_eq!(ConnectRequest::KIND, MessageKind::Connect);
        assert_eq!(ConnectResponse::KIND, MessageKind::Connect);
        assert_eq!(
            ConnectRequest::default().into_message().kind(),
            MessageKind::Connect
        );
        assert_eq!(
            RemixAndResampleResponse::default().into_message().kind(),
            MessageKind::RemixAndResample
        );
    }

    #[test]
    fn from_message_returns_foreign_messages_untouched() {
        let message = DisconnectRequest { room_handle: 7 }.into_message();

        let returned = ConnectRequest::from_message(message.clone())
            .expect_err("a disconnect message is not a connect payload");

        assert_eq!(returned, message);
        assert!(ConnectRequest::from_message_ref(&returned).is_none());
    }

    #[test]
    fn converters_cover_every_request_type() {
        assert_eq!(REQUEST_CONVERTERS.len(), MessageKind::ALL.len());

        let convert = request_converter(TypeId::of::<GetStatsRequest>())
            .expect("GetStatsRequest is in the catalog");
        let message = convert(Box::new(GetStatsRequest { track_handle: 3 }))
            .expect("converter accepts its own type");

        assert_eq!(
            message,
            RequestMessage::GetStats(GetStatsRequest { track_handle: 3 })
        );
    }

    #[test]
    fn converters_reject_other_types() {
        assert!(request_converter(TypeId::of::<String>()).is_none());
        assert!(request_converter(TypeId::of::<ConnectResponse>()).is_none());

        let convert = request_converter(TypeId::of::<GetStatsRequest>())
            .expect("GetStatsRequest is in the catalog");
        assert!(convert(Box::new(42_u32)).is_none());
    }
}
