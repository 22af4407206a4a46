//! Message store for huddle.
//!
//! Durable append-and-query log of chat messages keyed by room.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::DbPool;
use crate::Result;

/// A persisted chat message.
///
/// This is also the outbound wire shape delivered to recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Sequence id assigned by the store.
    pub id: i64,
    /// Sender display name.
    pub sender: String,
    /// Sender address.
    pub sender_email: String,
    /// Room the message belongs to.
    pub room_id: String,
    /// Message body.
    pub msg: String,
    /// Server receipt time.
    pub time: DateTime<Utc>,
}

/// A stamped message ready to be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    /// Sender display name.
    pub sender: String,
    /// Sender address.
    pub sender_email: String,
    /// Room the message belongs to.
    pub room_id: String,
    /// Message body.
    pub msg: String,
    /// Server receipt time.
    pub time: DateTime<Utc>,
}

impl NewMessage {
    /// Create a message stamped with the current server time.
    pub fn stamped(
        sender: impl Into<String>,
        sender_email: impl Into<String>,
        room_id: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            sender_email: sender_email.into(),
            room_id: room_id.into(),
            msg: msg.into(),
            time: Utc::now(),
        }
    }

    /// Attach the sequence id assigned on append.
    pub fn into_message(self, id: i64) -> ChatMessage {
        ChatMessage {
            id,
            sender: self.sender,
            sender_email: self.sender_email,
            room_id: self.room_id,
            msg: self.msg,
            time: self.time,
        }
    }
}

/// Database row type for ChatMessage.
#[derive(sqlx::FromRow)]
struct MessageRow {
    id: i64,
    sender: String,
    sender_email: String,
    room_id: String,
    msg: String,
    time: String,
}

impl From<MessageRow> for ChatMessage {
    fn from(row: MessageRow) -> Self {
        let time = DateTime::parse_from_rfc3339(&row.time)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Self {
            id: row.id,
            sender: row.sender,
            sender_email: row.sender_email,
            room_id: row.room_id,
            msg: row.msg,
            time,
        }
    }
}

/// Repository for message operations.
pub struct MessageStore<'a> {
    pool: &'a DbPool,
}

impl<'a> MessageStore<'a> {
    /// Create a new MessageStore with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Persist one message and return its sequence id.
    ///
    /// Fails if the room does not exist or the database is unreachable.
    pub async fn append(&self, message: &NewMessage) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO messages (sender, sender_email, room_id, msg, time)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&message.sender)
        .bind(&message.sender_email)
        .bind(&message.room_id)
        .bind(&message.msg)
        .bind(message.time.to_rfc3339())
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Get every message of a room in insertion order.
    pub async fn query_by_room(&self, room_id: &str) -> Result<Vec<ChatMessage>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, sender, sender_email, room_id, msg, time
            FROM messages
            WHERE room_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ChatMessage::from).collect())
    }

    /// Count messages for a room.
    pub async fn count(&self, room_id: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE room_id = ?")
            .bind(room_id)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
