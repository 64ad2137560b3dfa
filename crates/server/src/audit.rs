//! Audit log endpoints

use api_types::audit::{AuditEntry, AuditEntryNew};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn map_entry(entry: engine::AuditEntry) -> AuditEntry {
    AuditEntry {
        id: entry.id,
        action: entry.action,
        user_id: entry.user_id,
        timestamp: entry.timestamp,
    }
}

/// List the audit entries of a user, newest first
pub async fn list(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<AuditEntry>>, ServerError> {
    let entries = state.engine.audit_entries(&user_id).await?;
    Ok(Json(entries.into_iter().map(map_entry).collect()))
}

/// Append an entry to the audit log
pub async fn record(
    State(state): State<ServerState>,
    Json(payload): Json<AuditEntryNew>,
) -> Result<(StatusCode, Json<AuditEntry>), ServerError> {
    let entry = state
        .engine
        .record_audit(&payload.user_id, &payload.action)
        .await?;
    tracing::info!(user_id = %entry.user_id, action = %entry.action, "audit entry recorded");
    Ok((StatusCode::CREATED, Json(map_entry(entry))))
}
