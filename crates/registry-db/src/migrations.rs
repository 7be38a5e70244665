use anyhow::Result;
use rusqlite::Connection;
use tracing::debug;

/// Idempotent: creates the table when missing and never touches existing rows.
pub fn run(conn: &Connection) -> Result<()> {
    // WAL mode for concurrent reads during inserts; persists in the file
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS submissions (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name_enc        TEXT NOT NULL,
            instagram_enc   TEXT NOT NULL,
            entry_enc       TEXT NOT NULL,
            gender_enc      TEXT NOT NULL,
            created_at      TEXT NOT NULL
        );
        ",
    )?;

    debug!("Submission schema ensured");
    Ok(())
}
