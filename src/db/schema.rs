//! Database schema and migrations for huddle.
//!
//! Migrations are applied in order when the database is opened. The
//! `schema_version` table records which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: accounts, rooms, membership, messages
    r#"
CREATE TABLE users (
    email       TEXT PRIMARY KEY,
    name        TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE chat_rooms (
    room_id     TEXT PRIMARY KEY,        -- UUID v4, hyphenated
    room_name   TEXT NOT NULL,
    room_maker  TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE room_members (
    email       TEXT NOT NULL CHECK (length(email) > 0),
    room_id     TEXT NOT NULL REFERENCES chat_rooms(room_id) ON DELETE CASCADE,
    PRIMARY KEY (email, room_id)
);

CREATE INDEX idx_room_members_room ON room_members(room_id);

CREATE TABLE messages (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    sender        TEXT NOT NULL,
    sender_email  TEXT NOT NULL,
    room_id       TEXT NOT NULL REFERENCES chat_rooms(room_id),
    msg           TEXT NOT NULL,
    time          TEXT NOT NULL          -- RFC 3339, server-assigned
);

CREATE INDEX idx_messages_room ON messages(room_id, id);
"#,
];
