use std::env;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tessera_application::{AuditEventRepository, AuditRecorder};
use tessera_core::{AppError, AppResult};
use tracing::info;

use crate::{
    AuditQueueDrain, PostgresAuditEventRepository, QueuedAuditRecorder, TracingAuditRecorder,
};

const DEFAULT_QUEUE_CAPACITY: usize = 1024;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Destination for recorded audit events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditSinkKind {
    /// Structured log lines only.
    Log,
    /// Durable storage in PostgreSQL.
    Postgres {
        /// Connection string.
        database_url: String,
        /// Pool size reserved for audit writes.
        max_connections: u32,
    },
}

/// Runtime configuration for the audit sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditSinkConfig {
    /// Selected sink.
    pub sink: AuditSinkKind,
    /// Bound of the in-process queue in front of durable sinks.
    pub queue_capacity: usize,
}

impl AuditSinkConfig {
    /// Loads the configuration from process environment variables.
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let queue_capacity = match lookup("AUDIT_QUEUE_CAPACITY") {
            Some(value) => parse_positive::<usize>("AUDIT_QUEUE_CAPACITY", value.as_str())?,
            None => DEFAULT_QUEUE_CAPACITY,
        };

        let sink = match lookup("AUDIT_SINK")
            .unwrap_or_else(|| "log".to_owned())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "log" => AuditSinkKind::Log,
            "postgres" => {
                let database_url = lookup("DATABASE_URL")
                    .ok_or_else(|| AppError::Validation("DATABASE_URL is required".to_owned()))?;
                if database_url.trim().is_empty() {
                    return Err(AppError::Validation(
                        "DATABASE_URL must not be empty".to_owned(),
                    ));
                }

                let max_connections = match lookup("AUDIT_DATABASE_MAX_CONNECTIONS") {
                    Some(value) => {
                        parse_positive::<u32>("AUDIT_DATABASE_MAX_CONNECTIONS", value.as_str())?
                    }
                    None => DEFAULT_MAX_CONNECTIONS,
                };

                AuditSinkKind::Postgres {
                    database_url,
                    max_connections,
                }
            }
            other => {
                return Err(AppError::Validation(format!(
                    "AUDIT_SINK must be either 'log' or 'postgres', got '{other}'"
                )));
            }
        };

        Ok(Self {
            sink,
            queue_capacity,
        })
    }
}

impl Default for AuditSinkConfig {
    fn default() -> Self {
        Self {
            sink: AuditSinkKind::Log,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Composed audit recorder together with the task that persists its queue.
pub struct AuditSink {
    recorder: Arc<dyn AuditRecorder>,
    drain: Option<AuditQueueDrain>,
}

impl AuditSink {
    /// Creates a sink that writes events to the log.
    #[must_use]
    pub fn logging() -> Self {
        Self {
            recorder: Arc::new(TracingAuditRecorder::new()),
            drain: None,
        }
    }

    /// Creates a queued sink in front of a repository.
    ///
    /// Must be called inside a Tokio runtime.
    #[must_use]
    pub fn queued(repository: Arc<dyn AuditEventRepository>, capacity: usize) -> Self {
        let (recorder, drain) = QueuedAuditRecorder::spawn(repository, capacity);
        Self {
            recorder: Arc::new(recorder),
            drain: Some(drain),
        }
    }

    /// Returns the shared recorder handed to application services.
    #[must_use]
    pub fn recorder(&self) -> Arc<dyn AuditRecorder> {
        Arc::clone(&self.recorder)
    }

    /// Flushes queued events and stops the drain task.
    ///
    /// Outstanding recorder clones stay usable but drop their events with a
    /// warning once the queue is closed.
    pub async fn shutdown(self) -> AppResult<()> {
        match self.drain {
            Some(drain) => drain.shutdown().await,
            None => Ok(()),
        }
    }
}

/// Builds the sink selected by the configuration.
///
/// The Postgres sink connects a pool, applies migrations and spawns the
/// queue drain task, so it must run inside a Tokio runtime.
pub async fn connect_audit_sink(config: &AuditSinkConfig) -> AppResult<AuditSink> {
    match &config.sink {
        AuditSinkKind::Log => {
            info!("audit events are written to the log");
            Ok(AuditSink::logging())
        }
        AuditSinkKind::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(database_url)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to connect audit database: {error}"))
                })?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to run audit migrations: {error}"))
                })?;

            let repository = Arc::new(PostgresAuditEventRepository::new(pool));

            info!(
                queue_capacity = config.queue_capacity,
                max_connections = *max_connections,
                "audit events are persisted to postgres"
            );
            Ok(AuditSink::queued(repository, config.queue_capacity))
        }
    }
}

fn parse_positive<T>(name: &str, value: &str) -> AppResult<T>
where
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let parsed = value
        .trim()
        .parse::<T>()
        .map_err(|error| AppError::Validation(format!("invalid {name}: {error}")))?;
    if parsed <= T::default() {
        return Err(AppError::Validation(format!("{name} must be positive")));
    }

    Ok(parsed)
}
