//! Audit log entries.
//!
//! The audit log is an append-only record of actions keyed by a free-form
//! user identifier. It is unrelated to the ledger summary.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: Uuid,
    pub action: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(user_id: &str, action: &str, timestamp: DateTime<Utc>) -> ResultEngine<Self> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(EngineError::InvalidInput(
                "audit user id must not be empty".to_string(),
            ));
        }
        let action = action.trim();
        if action.is_empty() {
            return Err(EngineError::InvalidInput(
                "audit action must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            action: action.to_string(),
            user_id: user_id.to_string(),
            timestamp,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub action: String,
    pub user_id: String,
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&AuditEntry> for ActiveModel {
    fn from(entry: &AuditEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.to_string()),
            action: ActiveValue::Set(entry.action.clone()),
            user_id: ActiveValue::Set(entry.user_id.clone()),
            timestamp: ActiveValue::Set(entry.timestamp),
        }
    }
}

impl TryFrom<Model> for AuditEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id).map_err(|_| {
                EngineError::CorruptRecord(format!("audit entry id {:?}", model.id))
            })?,
            action: model.action,
            user_id: model.user_id,
            timestamp: model.timestamp,
        })
    }
}
