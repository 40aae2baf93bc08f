//! Typed payloads for each Kick webhook event.
//!
//! Fields that Kick documents as nullable are `Option`s; unknown fields in a
//! body are ignored so that additive changes on the issuer side do not break
//! decoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Shared Types
// ============================================================================

/// A Kick user as it appears inside event payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventUser {
    /// Whether the user is anonymous (e.g. an anonymous gifter)
    #[serde(default)]
    pub is_anonymous: bool,

    /// Kick user ID, absent for anonymous users
    pub user_id: Option<u64>,

    /// Display name, absent for anonymous users
    pub username: Option<String>,

    /// Whether the account is verified
    #[serde(default)]
    pub is_verified: bool,

    /// Profile picture URL
    pub profile_picture: Option<String>,

    /// Channel slug of the user's own channel
    pub channel_slug: Option<String>,

    /// Chat identity, only present on chat senders
    #[serde(default)]
    pub identity: Option<UserIdentity>,
}

/// Chat appearance of a message sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub username_color: String,

    #[serde(default)]
    pub badges: Vec<Badge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,

    #[serde(rename = "type")]
    pub badge_type: String,

    /// Months or gift count for badges that carry one
    pub count: Option<u32>,
}

// ============================================================================
// Chat Events
// ============================================================================

/// `chat.message.sent`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageSent {
    pub message_id: String,

    /// Message this one replies to, if any
    #[serde(default)]
    pub replies_to: Option<ReplyTo>,

    pub broadcaster: EventUser,

    pub sender: EventUser,

    /// Raw message content, emotes inlined as `[emote:<id>:<name>]`
    pub content: String,

    #[serde(default)]
    pub emotes: Vec<Emote>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyTo {
    pub message_id: String,
    pub content: String,
    pub sender: EventUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emote {
    pub emote_id: String,

    #[serde(default)]
    pub positions: Vec<EmotePosition>,
}

/// Character range of an emote within the message content (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotePosition {
    #[serde(rename = "s")]
    pub start: u32,

    #[serde(rename = "e")]
    pub end: u32,
}

// ============================================================================
// Channel Events
// ============================================================================

/// `channel.followed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelFollowed {
    pub broadcaster: EventUser,
    pub follower: EventUser,
}

/// `channel.subscription.renewal`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRenewal {
    pub broadcaster: EventUser,
    pub subscriber: EventUser,

    /// Total subscribed months
    pub duration: u32,

    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// `channel.subscription.gifted`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionGifted {
    pub broadcaster: EventUser,

    /// Gifting user, `is_anonymous` set for anonymous gifts
    pub gifter: EventUser,

    #[serde(default)]
    pub giftees: Vec<EventUser>,

    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// `channel.subscription.new`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionNew {
    pub broadcaster: EventUser,
    pub subscriber: EventUser,
    pub duration: u32,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// `channel.reward.redemption.updated`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardRedemptionUpdated {
    /// Redemption ID
    pub id: String,

    /// Free text the viewer entered when redeeming
    #[serde(default)]
    pub user_input: String,

    pub status: RedemptionStatus,
    pub redeemed_at: DateTime<Utc>,
    pub reward: Reward,
    pub redeemer: EventUser,
    pub broadcaster: EventUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedemptionStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub title: String,
    pub cost: u32,

    #[serde(default)]
    pub description: String,
}

// ============================================================================
// Livestream Events
// ============================================================================

/// `livestream.status.updated`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivestreamStatusUpdated {
    pub broadcaster: EventUser,
    pub is_live: bool,
    pub title: String,
    pub started_at: Option<DateTime<Utc>>,

    /// Only set once the stream has gone offline
    pub ended_at: Option<DateTime<Utc>>,
}

/// `livestream.metadata.updated`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivestreamMetadataUpdated {
    pub broadcaster: EventUser,
    pub metadata: StreamMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamMetadata {
    pub title: String,
    pub language: String,

    #[serde(default)]
    pub has_mature_content: bool,

    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub thumbnail: Option<String>,
}

// ============================================================================
// Moderation Events
// ============================================================================

/// `moderation.banned`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationBanned {
    pub broadcaster: EventUser,
    pub moderator: EventUser,
    pub banned_user: EventUser,
    pub metadata: BanMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanMetadata {
    #[serde(default)]
    pub reason: String,

    pub created_at: DateTime<Utc>,

    /// `None` for permanent bans
    pub expires_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Kicks Events
// ============================================================================

/// `kicks.gifted`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KicksGifted {
    pub broadcaster: EventUser,
    pub sender: EventUser,
    pub gift: Gift,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gift {
    /// Number of Kicks gifted
    pub amount: u64,

    pub name: String,

    #[serde(rename = "type")]
    pub gift_type: String,

    pub tier: String,

    pub message: Option<String>,

    pub pinned_time_seconds: Option<u64>,
}

#[cfg(test)]
#[path = "kick_events_tests.rs"]
mod tests;
