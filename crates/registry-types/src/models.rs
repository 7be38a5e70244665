use serde::Serialize;

/// Column order of the admin CSV export.
pub const EXPORT_HEADER: [&str; 5] = ["name", "instagram", "entry_number", "gender", "created_at"];

/// A normalized registration, still in plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub instagram: String,
    pub entry_number: String,
    pub gender: String,
}

/// One decrypted row of the export. Field order matches [`EXPORT_HEADER`].
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord {
    pub name: String,
    pub instagram: String,
    pub entry_number: String,
    pub gender: String,
    pub created_at: String,
}
