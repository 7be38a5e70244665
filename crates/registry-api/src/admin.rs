use anyhow::anyhow;
use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};
use tracing::{info, warn_span};

use registry_crypto::Cipher;
use registry_db::SubmissionRow;
use registry_types::api::CountResponse;
use registry_types::models::{EXPORT_HEADER, ExportRecord};

use crate::AppState;
use crate::error::ApiError;

/// GET /admin/count
pub async fn count(State(state): State<AppState>) -> Result<Json<CountResponse>, ApiError> {
    let count = state.store.count().map_err(ApiError::Storage)?;
    Ok(Json(CountResponse { count }))
}

/// GET /admin/export — every submission, decrypted, as a CSV attachment.
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = state.store.list_all().map_err(ApiError::Storage)?;
    let records = decrypt_rows(&state.cipher, &rows);
    let body = render_csv(&records).map_err(ApiError::Export)?;

    info!("Exported {} submissions", records.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"submissions.csv\"",
            ),
        ],
        body,
    ))
}

/// Decrypt stored rows in order. Fields that fail verification come out as
/// the decryption sentinel; one bad field never drops the row.
pub fn decrypt_rows(cipher: &Cipher, rows: &[SubmissionRow]) -> Vec<ExportRecord> {
    rows.iter()
        .map(|row| {
            let _span = warn_span!("export_row", id = row.id).entered();
            ExportRecord {
                name: cipher.decrypt_or_sentinel(&row.name_enc),
                instagram: cipher.decrypt_or_sentinel(&row.instagram_enc),
                entry_number: cipher.decrypt_or_sentinel(&row.entry_enc),
                gender: cipher.decrypt_or_sentinel(&row.gender_enc),
                created_at: row.created_at.clone(),
            }
        })
        .collect()
}

/// Header row first, then one line per record; written even when empty.
pub fn render_csv(records: &[ExportRecord]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow!("Flushing CSV failed: {}", e.error()))
}
