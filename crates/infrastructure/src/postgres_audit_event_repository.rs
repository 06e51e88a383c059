use async_trait::async_trait;
use sqlx::PgPool;

use tessera_application::{AuditEvent, AuditEventRepository};
use tessera_core::{AppError, AppResult};

/// PostgreSQL-backed append-only audit event repository.
#[derive(Clone)]
pub struct PostgresAuditEventRepository {
    pool: PgPool,
}

impl PostgresAuditEventRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditEventRepository for PostgresAuditEventRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        let target_reference = event
            .target
            .target
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|error| {
                AppError::Internal(format!("failed to encode audit target reference: {error}"))
            })?;
        let ip_address = Some(event.ip_address).filter(|value| !value.is_empty());

        sqlx::query(
            r#"
            INSERT INTO audit_events (
                action,
                doer_type,
                doer_id,
                doer_name,
                scope_type,
                scope_id,
                scope_name,
                target_type,
                target_id,
                target_name,
                target_reference,
                message,
                ip_address,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(event.action.as_str())
        .bind(event.doer.object_type.as_str())
        .bind(event.doer.primary_key.to_string())
        .bind(event.doer.friendly_name)
        .bind(event.scope.object_type.as_str())
        .bind(event.scope.primary_key.to_string())
        .bind(event.scope.friendly_name)
        .bind(event.target.object_type.as_str())
        .bind(event.target.primary_key.to_string())
        .bind(event.target.friendly_name)
        .bind(target_reference)
        .bind(event.message)
        .bind(ip_address)
        .bind(event.time)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append audit event: {error}")))?;

        Ok(())
    }
}
