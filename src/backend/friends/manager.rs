/**
 * Friend Relationship Manager
 *
 * Owns the relationship state machine of a pair of users:
 *
 * ```text
 *            send(A,B)              accept(B,A)
 *   NONE  ─────────────▶ PENDING(A→B) ─────────▶ FRIENDS
 *    ▲                      │                       │
 *    └── cancel(A,B) ───────┤                       │
 *    └── ignore(B,A) ───────┘                       │
 *    └────────────────── unfriend(A,B) ─────────────┘
 * ```
 *
 * Each transition reads the pair's state, checks its guard, writes the
 * edges and appends a notification inside one gateway transaction. A
 * storage conflict aborts the whole attempt and it is replayed from the
 * read, so a transition that lost a race fails on its guard instead of
 * writing over the winner.
 */

use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::gateway::{GatewayTx, NewNotification, SharedGateway, User};
use crate::shared::{FriendPreview, Notification, NotificationType, Relationship, UserSummary};

/// Friends shown next to every listed user
pub const SUMMARY_PREVIEW_LEN: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Send,
    Accept,
    Cancel,
    Ignore,
    Unfriend,
}

impl Transition {
    fn name(self) -> &'static str {
        match self {
            Transition::Send => "send_request",
            Transition::Accept => "accept_request",
            Transition::Cancel => "cancel_sent_request",
            Transition::Ignore => "ignore_received_request",
            Transition::Unfriend => "remove_friend",
        }
    }

    /// Notification text, read as "<actor> <content>"
    fn content(self) -> &'static str {
        match self {
            Transition::Send => "sent a friend request",
            Transition::Accept => "accepted your friend request",
            Transition::Cancel => "cancelled your friend request",
            Transition::Ignore => "ignored your friend request",
            Transition::Unfriend => "unfriended you",
        }
    }
}

/// Runs friend transitions and relationship queries against the gateway
#[derive(Clone)]
pub struct FriendManager {
    gateway: SharedGateway,
    max_retries: u32,
}

impl FriendManager {
    pub fn new(gateway: SharedGateway, max_retries: u32) -> Self {
        Self {
            gateway,
            max_retries,
        }
    }

    /// `actor` asks `target` to become friends
    pub async fn send_request(&self, actor: Uuid, target: Uuid) -> BackendResult<Notification> {
        self.apply(Transition::Send, actor, target).await
    }

    /// `actor` accepts the pending request `target` sent them
    pub async fn accept_request(&self, actor: Uuid, target: Uuid) -> BackendResult<Notification> {
        self.apply(Transition::Accept, actor, target).await
    }

    /// `actor` withdraws the request they sent to `target`
    pub async fn cancel_sent_request(
        &self,
        actor: Uuid,
        target: Uuid,
    ) -> BackendResult<Notification> {
        self.apply(Transition::Cancel, actor, target).await
    }

    /// `actor` declines the request `target` sent them
    pub async fn ignore_received_request(
        &self,
        actor: Uuid,
        target: Uuid,
    ) -> BackendResult<Notification> {
        self.apply(Transition::Ignore, actor, target).await
    }

    /// `actor` ends the friendship with `target`
    pub async fn remove_friend(&self, actor: Uuid, target: Uuid) -> BackendResult<Notification> {
        self.apply(Transition::Unfriend, actor, target).await
    }

    pub async fn list_friends(&self, user: Uuid) -> BackendResult<Vec<UserSummary>> {
        let mut tx = self.gateway.begin().await?;
        let users = tx.friends_of(user, None).await?;
        let summaries = summarize_all(tx.as_mut(), users).await?;
        tx.commit().await?;
        Ok(summaries)
    }

    pub async fn list_sent_requests(&self, user: Uuid) -> BackendResult<Vec<UserSummary>> {
        let mut tx = self.gateway.begin().await?;
        let users = tx.sent_requests(user).await?;
        let summaries = summarize_all(tx.as_mut(), users).await?;
        tx.commit().await?;
        Ok(summaries)
    }

    pub async fn list_received_requests(&self, user: Uuid) -> BackendResult<Vec<UserSummary>> {
        let mut tx = self.gateway.begin().await?;
        let users = tx.received_requests(user).await?;
        let summaries = summarize_all(tx.as_mut(), users).await?;
        tx.commit().await?;
        Ok(summaries)
    }

    /// Everyone the user has no friendship and no pending request with
    pub async fn suggest_friends(&self, user: Uuid) -> BackendResult<Vec<UserSummary>> {
        let mut tx = self.gateway.begin().await?;
        let users = tx.suggestion_candidates(user).await?;
        let summaries = summarize_all(tx.as_mut(), users).await?;
        tx.commit().await?;
        Ok(summaries)
    }

    /// Where `viewer` stands with `other`. A user has no relationship with
    /// themselves.
    pub async fn relationship(&self, viewer: Uuid, other: Uuid) -> BackendResult<Relationship> {
        let mut tx = self.gateway.begin().await?;
        if tx.find_user(other).await?.is_none() {
            return Err(BackendError::UserNotFound);
        }
        if viewer == other {
            return Ok(Relationship::None);
        }
        let relationship = relationship_in(tx.as_mut(), viewer, other).await?;
        tx.commit().await?;
        Ok(relationship)
    }

    async fn apply(
        &self,
        transition: Transition,
        actor: Uuid,
        target: Uuid,
    ) -> BackendResult<Notification> {
        let mut attempt = 0;
        loop {
            match self.try_apply(transition, actor, target).await {
                Ok(notification) => {
                    tracing::info!("{}: {} -> {}", transition.name(), actor, target);
                    return Ok(notification);
                }
                Err(err) if err.is_storage_conflict() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "{}: storage conflict on {} -> {}, retrying ({}/{})",
                        transition.name(),
                        actor,
                        target,
                        attempt,
                        self.max_retries
                    );
                }
                Err(err) => {
                    if err.status_code().is_server_error() {
                        tracing::error!("{}: {} -> {} failed: {}", transition.name(), actor, target, err);
                    } else {
                        tracing::warn!("{}: {} -> {} rejected: {}", transition.name(), actor, target, err);
                    }
                    return Err(err);
                }
            }
        }
    }

    async fn try_apply(
        &self,
        transition: Transition,
        actor: Uuid,
        target: Uuid,
    ) -> BackendResult<Notification> {
        if actor == target {
            return Err(BackendError::SelfRelationship);
        }

        let mut tx = self.gateway.begin().await?;

        let pair = tx.lock_users(actor, target).await?;
        if !pair.iter().any(|user| user.id == target) {
            return Err(BackendError::UserNotFound);
        }

        let current = relationship_in(tx.as_mut(), actor, target).await?;
        match (transition, current) {
            (Transition::Send, Relationship::None) => {
                tx.connect_request(actor, target).await?;
            }
            (Transition::Send, Relationship::Friends) => return Err(BackendError::AlreadyFriends),
            (Transition::Send, Relationship::RequestSent) => {
                return Err(BackendError::already_requested("Friend request already sent"));
            }
            (Transition::Send, Relationship::RequestReceived) => {
                return Err(BackendError::already_requested(
                    "This user has already sent you a friend request",
                ));
            }

            (Transition::Accept, Relationship::RequestReceived) => {
                tx.disconnect_request(target, actor).await?;
                tx.connect_friendship(actor, target).await?;
            }
            (Transition::Accept, Relationship::Friends) => return Err(BackendError::AlreadyFriends),
            (Transition::Accept, _) => {
                return Err(BackendError::request_not_found("Friend request not received"));
            }

            (Transition::Cancel, Relationship::RequestSent) => {
                tx.disconnect_request(actor, target).await?;
            }
            (Transition::Cancel, _) => {
                return Err(BackendError::request_not_found("You have not sent friend request"));
            }

            (Transition::Ignore, Relationship::RequestReceived) => {
                tx.disconnect_request(target, actor).await?;
            }
            (Transition::Ignore, _) => {
                return Err(BackendError::request_not_found(
                    "You have not received friend request",
                ));
            }

            (Transition::Unfriend, Relationship::Friends) => {
                tx.disconnect_friendship(actor, target).await?;
            }
            (Transition::Unfriend, _) => return Err(BackendError::NotFriends),
        }

        let notification = tx
            .create_notification(NewNotification {
                kind: NotificationType::Friend,
                from_user_id: actor,
                to_user_id: target,
                content: transition.content().to_string(),
            })
            .await?;

        tx.commit().await?;
        Ok(notification)
    }
}

/// Reads the pair's state inside an open transaction
async fn relationship_in(
    tx: &mut dyn GatewayTx,
    viewer: Uuid,
    other: Uuid,
) -> BackendResult<Relationship> {
    if tx.friendship_exists(viewer, other).await? {
        return Ok(Relationship::Friends);
    }
    if tx.request_exists(viewer, other).await? {
        return Ok(Relationship::RequestSent);
    }
    if tx.request_exists(other, viewer).await? {
        return Ok(Relationship::RequestReceived);
    }
    Ok(Relationship::None)
}

/// First `limit` friends of a user as avatar entries
pub(crate) async fn friend_previews(
    tx: &mut dyn GatewayTx,
    user: Uuid,
    limit: i64,
) -> BackendResult<Vec<FriendPreview>> {
    Ok(tx
        .friends_of(user, Some(limit))
        .await?
        .into_iter()
        .map(|friend| FriendPreview {
            id: friend.id,
            first_name: friend.first_name,
            profile_image: friend.profile_image,
        })
        .collect())
}

async fn summarize_all(tx: &mut dyn GatewayTx, users: Vec<User>) -> BackendResult<Vec<UserSummary>> {
    let mut summaries = Vec::with_capacity(users.len());
    for user in users {
        let friends_preview = friend_previews(tx, user.id, SUMMARY_PREVIEW_LEN).await?;
        let friend_count = tx.friend_count(user.id).await?;
        summaries.push(UserSummary {
            id: user.id,
            status: user.status(),
            first_name: user.first_name,
            last_name: user.last_name,
            profile_image: user.profile_image,
            friends_preview,
            friend_count,
        });
    }
    Ok(summaries)
}
