/// Notes, users, and boards are identified by UUIDs, both on the wire and
/// in storage.
pub type NoteId = uuid::Uuid;
pub type UserId = uuid::Uuid;
pub type BoardId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
