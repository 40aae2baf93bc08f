//! Kick webhook event catalogue.
//!
//! Every webhook carries an `Event-Type` header naming the schema of its body.
//! [`EventType`] is the closed set of names this crate understands, and
//! [`WebhookEvent`] ties each typed payload in [`kick_events`] to its name so
//! the handler registry can decode bodies without per-event logic.
//!
//! # Examples
//!
//! ```rust
//! use kick_webhooks::events::{ChannelFollowed, EventType, WebhookEvent};
//!
//! let event_type: EventType = "channel.followed".parse().unwrap();
//! assert_eq!(event_type, ChannelFollowed::EVENT_TYPE);
//! assert_eq!(event_type.to_string(), "channel.followed");
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod kick_events;

pub use kick_events::*;

// ============================================================================
// Event Type
// ============================================================================

/// Names of the event schemas Kick delivers over webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "chat.message.sent")]
    ChatMessageSent,
    #[serde(rename = "channel.followed")]
    ChannelFollowed,
    #[serde(rename = "channel.subscription.renewal")]
    ChannelSubscriptionRenewal,
    #[serde(rename = "channel.subscription.gifted")]
    ChannelSubscriptionGifted,
    #[serde(rename = "channel.subscription.new")]
    ChannelSubscriptionNew,
    #[serde(rename = "channel.reward.redemption.updated")]
    ChannelRewardRedemptionUpdated,
    #[serde(rename = "livestream.status.updated")]
    LivestreamStatusUpdated,
    #[serde(rename = "livestream.metadata.updated")]
    LivestreamMetadataUpdated,
    #[serde(rename = "moderation.banned")]
    ModerationBanned,
    #[serde(rename = "kicks.gifted")]
    KicksGifted,
}

impl EventType {
    /// Every known event type, in declaration order.
    pub const ALL: [EventType; 10] = [
        Self::ChatMessageSent,
        Self::ChannelFollowed,
        Self::ChannelSubscriptionRenewal,
        Self::ChannelSubscriptionGifted,
        Self::ChannelSubscriptionNew,
        Self::ChannelRewardRedemptionUpdated,
        Self::LivestreamStatusUpdated,
        Self::LivestreamMetadataUpdated,
        Self::ModerationBanned,
        Self::KicksGifted,
    ];

    /// Wire name as it appears in the `Event-Type` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChatMessageSent => "chat.message.sent",
            Self::ChannelFollowed => "channel.followed",
            Self::ChannelSubscriptionRenewal => "channel.subscription.renewal",
            Self::ChannelSubscriptionGifted => "channel.subscription.gifted",
            Self::ChannelSubscriptionNew => "channel.subscription.new",
            Self::ChannelRewardRedemptionUpdated => "channel.reward.redemption.updated",
            Self::LivestreamStatusUpdated => "livestream.status.updated",
            Self::LivestreamMetadataUpdated => "livestream.metadata.updated",
            Self::ModerationBanned => "moderation.banned",
            Self::KicksGifted => "kicks.gifted",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `Event-Type` value that names no known schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognised event type: '{0}'")]
pub struct UnrecognisedEventType(pub String);

impl FromStr for EventType {
    type Err = UnrecognisedEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event_type| event_type.as_str() == s)
            .ok_or_else(|| UnrecognisedEventType(s.to_string()))
    }
}

// ============================================================================
// Typed Events
// ============================================================================

/// A payload schema bound to the event type it is delivered under.
///
/// Registering a handler for `E` keys it by `E::EVENT_TYPE`; matching
/// requests have their body decoded as `E` before the handler runs.
pub trait WebhookEvent: DeserializeOwned + Send + 'static {
    /// Event type whose bodies decode into this payload.
    const EVENT_TYPE: EventType;
}

macro_rules! webhook_event {
    ($($payload:ty => $event_type:ident),+ $(,)?) => {
        $(
            impl WebhookEvent for $payload {
                const EVENT_TYPE: EventType = EventType::$event_type;
            }
        )+
    };
}

webhook_event! {
    ChatMessageSent => ChatMessageSent,
    ChannelFollowed => ChannelFollowed,
    SubscriptionRenewal => ChannelSubscriptionRenewal,
    SubscriptionGifted => ChannelSubscriptionGifted,
    SubscriptionNew => ChannelSubscriptionNew,
    RewardRedemptionUpdated => ChannelRewardRedemptionUpdated,
    LivestreamStatusUpdated => LivestreamStatusUpdated,
    LivestreamMetadataUpdated => LivestreamMetadataUpdated,
    ModerationBanned => ModerationBanned,
    KicksGifted => KicksGifted,
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
