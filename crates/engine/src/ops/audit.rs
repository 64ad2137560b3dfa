use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::{AuditEntry, ResultEngine, audit};

use super::Engine;

impl Engine {
    /// Appends an entry to the audit log.
    pub async fn record_audit(&self, user_id: &str, action: &str) -> ResultEngine<AuditEntry> {
        let entry = AuditEntry::new(user_id, action, Utc::now())?;
        audit::ActiveModel::from(&entry)
            .insert(&self.database)
            .await?;
        Ok(entry)
    }

    /// Audit entries of `user_id`, newest first.
    pub async fn audit_entries(&self, user_id: &str) -> ResultEngine<Vec<AuditEntry>> {
        let models = audit::Entity::find()
            .filter(audit::Column::UserId.eq(user_id.trim()))
            .order_by_desc(audit::Column::Timestamp)
            .all(&self.database)
            .await?;
        models.into_iter().map(AuditEntry::try_from).collect()
    }
}
