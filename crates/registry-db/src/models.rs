//! Database row types. Every `*_enc` column holds a cipher token; this layer
//! never sees plaintext and never rewrites what it is given.

/// The four encrypted fields of a submission, as handed to `insert`.
#[derive(Debug, Clone)]
pub struct EncryptedSubmission {
    pub name_enc: String,
    pub instagram_enc: String,
    pub entry_enc: String,
    pub gender_enc: String,
}

#[derive(Debug, Clone)]
pub struct SubmissionRow {
    pub id: i64,
    pub name_enc: String,
    pub instagram_enc: String,
    pub entry_enc: String,
    pub gender_enc: String,
    pub created_at: String,
}
