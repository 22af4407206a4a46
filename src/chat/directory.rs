//! Room directory for huddle.
//!
//! Rooms and their membership are created once, inside a single
//! transaction, and only read afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::DbPool;
use crate::Result;

/// A room together with its full member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    /// Display name.
    pub room_name: String,
    /// Creator address.
    pub room_maker: String,
    /// Room identifier.
    pub room_id: String,
    /// Member addresses in insertion order, creator included.
    pub invites: Vec<String>,
}

/// Database row type for room metadata.
#[derive(sqlx::FromRow)]
struct RoomRow {
    room_id: String,
    room_name: String,
    room_maker: String,
}

/// Build the member set for a new room.
///
/// Duplicates are dropped keeping first-seen order. The maker is always a
/// member and goes last unless already invited.
fn member_set(maker: &str, invites: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    invites
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(maker))
        .filter(|email| seen.insert(*email))
        .map(str::to_string)
        .collect()
}

/// Repository for room and membership operations.
pub struct RoomDirectory<'a> {
    pool: &'a DbPool,
}

impl<'a> RoomDirectory<'a> {
    /// Create a new RoomDirectory with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a room with its membership.
    ///
    /// An empty name is a no-op and returns `Ok(None)`. Otherwise the room
    /// row and every membership row are written in one transaction; if any
    /// insert fails the transaction is dropped uncommitted and nothing of the
    /// room remains.
    pub async fn create_room(
        &self,
        name: &str,
        maker: &str,
        invites: &[String],
    ) -> Result<Option<String>> {
        if name.is_empty() {
            return Ok(None);
        }

        let room_id = Uuid::new_v4().to_string();
        let members = member_set(maker, invites);

        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO chat_rooms (room_id, room_name, room_maker) VALUES (?, ?, ?)")
            .bind(&room_id)
            .bind(name)
            .bind(maker)
            .execute(&mut *tx)
            .await?;

        for email in &members {
            sqlx::query("INSERT INTO room_members (email, room_id) VALUES (?, ?)")
                .bind(email)
                .bind(&room_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            room_id = %room_id,
            room_name = %name,
            members = members.len(),
            "Chat room created"
        );
        Ok(Some(room_id))
    }

    /// List every room the address belongs to, oldest first.
    pub async fn rooms_for(&self, email: &str) -> Result<Vec<RoomSummary>> {
        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT r.room_id, r.room_name, r.room_maker
            FROM chat_rooms r
            JOIN room_members m ON m.room_id = r.room_id
            WHERE m.email = ?
            ORDER BY r.rowid ASC
            "#,
        )
        .bind(email)
        .fetch_all(self.pool)
        .await?;

        let mut rooms = Vec::with_capacity(rows.len());
        for row in rows {
            rooms.push(self.summarize(row).await?);
        }
        Ok(rooms)
    }

    /// Member addresses of a room in insertion order.
    ///
    /// Unknown rooms have no members.
    pub async fn members_of(&self, room_id: &str) -> Result<Vec<String>> {
        let members: Vec<String> =
            sqlx::query_scalar("SELECT email FROM room_members WHERE room_id = ? ORDER BY rowid ASC")
                .bind(room_id)
                .fetch_all(self.pool)
                .await?;
        Ok(members)
    }

    #[cfg(test)]
    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chat_rooms")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    async fn summarize(&self, row: RoomRow) -> Result<RoomSummary> {
        let invites = self.members_of(&row.room_id).await?;
        Ok(RoomSummary {
            room_name: row.room_name,
            room_maker: row.room_maker,
            room_id: row.room_id,
            invites,
        })
    }
}
