//! HTTP request handlers and their wire types.
//!
//! Response bodies follow the envelope convention of the reference surface:
//! `{"success": true, "message"?: ..., "data": ...}`; errors are rendered
//! by [`ApiError`](crate::error::ApiError).

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use verdict_store::{Document, IdentityStore, StoreError};
use verdict_types::{DocumentId, DocumentStatus, KycStatus, Timestamp, UserId};

use crate::credentials;
use crate::error::ApiError;
use crate::server::AppState;
use crate::validate;

fn ok<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

fn ok_with_message<T: Serialize>(message: &str, data: T) -> Json<Value> {
    Json(json!({ "success": true, "message": message, "data": data }))
}

// ── Registration ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub user_id: UserId,
    pub email: String,
    pub phone: String,
    pub created_at: Timestamp,
    pub kyc_status: KycStatus,
    pub kyc_verified_at: Option<Timestamp>,
}

pub async fn register_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (email, password, phone) = match (req.email, req.password, req.phone) {
        (Some(e), Some(p), Some(ph)) if !e.is_empty() && !p.is_empty() && !ph.is_empty() => {
            (e, p, ph)
        }
        _ => {
            return Err(ApiError::Validation(
                "Email, password, and phone number are required".to_string(),
            ))
        }
    };

    validate::email(&email)?;
    validate::password(&password)?;
    validate::phone(&phone)?;

    let credential_secret = credentials::hash_password(&password)?;
    let user = state.identities.create(&email, &phone, &credential_secret)?;

    tracing::info!(user = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        ok_with_message(
            "User registered successfully",
            RegisteredUser {
                user_id: user.id,
                email: user.email,
                phone: user.phone,
                created_at: user.created_at,
                kyc_status: user.kyc_status,
                kyc_verified_at: user.kyc_verified_at,
            },
        ),
    ))
}

// ── User lookup ──────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub phone: String,
    pub kyc_status: KycStatus,
    pub kyc_verified_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let user = state
        .identities
        .get(&UserId::new(user_id))
        .map_err(|e| match e {
            StoreError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            other => other.into(),
        })?;

    Ok(ok(UserView {
        id: user.id,
        email: user.email,
        phone: user.phone,
        kyc_status: user.kyc_status,
        kyc_verified_at: user.kyc_verified_at,
        created_at: user.created_at,
    }))
}

// ── Document submission ──────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedDocument {
    pub document_id: DocumentId,
    pub filename: String,
    pub status: DocumentStatus,
    pub uploaded_at: Timestamp,
}

/// The multipart field carrying the document payload.
const DOCUMENT_FIELD: &str = "document";

pub async fn upload_document(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let user_id = UserId::new(user_id);

    // Resolve and vet the file field before the workflow is touched: a
    // missing, mistyped, or oversize file must never create a document.
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() != Some(DOCUMENT_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or(DOCUMENT_FIELD).to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        validate::document_content_type(&content_type)?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read uploaded file: {e}")))?;
        validate::document_size(bytes.len())?;

        upload = Some((original_name, bytes));
        break;
    }

    let (original_name, bytes) = upload
        .ok_or_else(|| ApiError::Validation("Document file is required".to_string()))?;

    let stored = state
        .uploads
        .save(&original_name, &bytes)
        .map_err(|e| ApiError::Internal(format!("failed to persist upload: {e}")))?;

    let document = state.engine.submit_document(
        &user_id,
        &original_name,
        &stored.filename,
        &stored.payload_ref,
    )?;

    Ok(ok_with_message(
        "Document uploaded successfully. Verification in progress.",
        SubmittedDocument {
            document_id: document.id,
            filename: document.filename,
            status: document.status,
            uploaded_at: document.uploaded_at,
        },
    ))
}

// ── KYC status polling ───────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub id: DocumentId,
    pub filename: String,
    pub original_name: String,
    pub status: DocumentStatus,
    pub uploaded_at: Timestamp,
}

impl From<Document> for DocumentView {
    fn from(d: Document) -> Self {
        Self {
            id: d.id,
            filename: d.filename,
            original_name: d.original_name,
            status: d.status,
            uploaded_at: d.uploaded_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KycView {
    pub kyc_status: KycStatus,
    pub kyc_verified_at: Option<Timestamp>,
    pub documents: Vec<DocumentView>,
}

pub async fn get_kyc(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let user_id = UserId::new(user_id);

    let status = state.queries.status_of(&user_id)?;
    let documents = state.queries.documents_of(&user_id)?;

    Ok(ok(KycView {
        kyc_status: status.kyc_status,
        kyc_verified_at: status.kyc_verified_at,
        documents: documents.into_iter().map(DocumentView::from).collect(),
    }))
}
