//! Collaborator seams for statement execution and session acquisition.
//!
//! The populate engine only needs two capabilities from the outside world:
//! "give me a ready session" and "run this statement, tell me if it worked".
//! Keeping them behind traits lets tests drive the whole orchestrator with a
//! recording backend instead of a live server.

use anyhow::Context;
use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Conn, Opts, OptsBuilder};

/// Executes statement text against a MySQL-compatible server.
///
/// Result sets are never inspected; only success or failure matters.
#[async_trait]
pub trait SqlExecutor: Send {
    async fn execute(&mut self, statement: &str) -> anyhow::Result<()>;

    /// Release the underlying session. Dropping releases it too; this exists
    /// so the happy path can surface close errors.
    async fn close(self: Box<Self>) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Hands out ready sessions. The target database exists before any session
/// is returned.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    async fn session(&self) -> anyhow::Result<Box<dyn SqlExecutor>>;
}

/// Connection settings for a MySQL/TiDB server.
#[derive(Debug, Clone)]
pub struct MySqlConnector {
    host: String,
    port: u16,
    user: String,
    password: String,
    database: String,
}

impl MySqlConnector {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            user: user.into(),
            password: password.into(),
            database: database.into(),
        }
    }

    /// Create the target database if it is missing, over a server-level
    /// connection. Run once before handing out sessions.
    pub async fn ensure_database(&self) -> anyhow::Result<()> {
        let mut conn = Conn::new(self.opts(None))
            .await
            .with_context(|| format!("connecting to {}:{}", self.host, self.port))?;
        conn.query_drop(format!(
            "create database if not exists `{}`",
            self.database
        ))
        .await
        .with_context(|| format!("creating database `{}`", self.database))?;
        conn.disconnect().await.context("closing bootstrap connection")?;

        tracing::debug!(database = %self.database, "target database ready");
        Ok(())
    }

    fn opts(&self, database: Option<&str>) -> Opts {
        let password = if self.password.is_empty() {
            None
        } else {
            Some(self.password.clone())
        };
        OptsBuilder::default()
            .ip_or_hostname(self.host.clone())
            .tcp_port(self.port)
            .user(Some(self.user.clone()))
            .pass(password)
            .db_name(database.map(str::to_string))
            .into()
    }
}

#[async_trait]
impl ConnectionProvider for MySqlConnector {
    async fn session(&self) -> anyhow::Result<Box<dyn SqlExecutor>> {
        let conn = Conn::new(self.opts(Some(&self.database)))
            .await
            .with_context(|| {
                format!(
                    "connecting to {}:{}/{}",
                    self.host, self.port, self.database
                )
            })?;
        Ok(Box::new(MySqlSession { conn }))
    }
}

struct MySqlSession {
    conn: Conn,
}

#[async_trait]
impl SqlExecutor for MySqlSession {
    async fn execute(&mut self, statement: &str) -> anyhow::Result<()> {
        self.conn.query_drop(statement).await?;
        Ok(())
    }

    async fn close(self: Box<Self>) -> anyhow::Result<()> {
        self.conn.disconnect().await?;
        Ok(())
    }
}
