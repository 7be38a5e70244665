use crate::SubmissionStore;
use crate::models::{EncryptedSubmission, SubmissionRow};
use anyhow::Result;
use chrono::{SecondsFormat, Utc};

impl SubmissionStore {
    /// Append one submission. `id` and `created_at` are assigned here; the
    /// returned id is the new row's.
    pub fn insert(&self, submission: &EncryptedSubmission) -> Result<i64> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO submissions (name_enc, instagram_enc, entry_enc, gender_enc, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    &submission.name_enc,
                    &submission.instagram_enc,
                    &submission.entry_enc,
                    &submission.gender_enc,
                    &created_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn count(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM submissions", [], |row| row.get(0))?;
            Ok(count)
        })
    }

    /// Every row, oldest first.
    pub fn list_all(&self) -> Result<Vec<SubmissionRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name_enc, instagram_enc, entry_enc, gender_enc, created_at
                 FROM submissions
                 ORDER BY id ASC",
            )?;

            let rows = stmt
                .query_map([], |row| {
                    Ok(SubmissionRow {
                        id: row.get(0)?,
                        name_enc: row.get(1)?,
                        instagram_enc: row.get(2)?,
                        entry_enc: row.get(3)?,
                        gender_enc: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}
