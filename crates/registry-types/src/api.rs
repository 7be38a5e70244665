use serde::{Deserialize, Serialize};

// -- Registration --

/// Raw form body of `POST /submit`, before trimming and normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitForm {
    pub name: String,
    pub instagram: String,
    pub entry_number: String,
    pub gender: String,
}

// -- Admin --

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: i64,
}

// -- Misc --

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Body of every error response, `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
