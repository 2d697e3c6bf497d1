//! Concurrent populate orchestration.
//!
//! One run walks through a fixed sequence: create the table, partition the
//! row count, fan out to workers, join them all, then insert the remainder
//! on the orchestrator's own session. Any failure along the way is fatal to
//! the whole run.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::PopulateError;
use crate::executor::{ConnectionProvider, SqlExecutor};
use crate::insert::build_insert;
use crate::partition::partition;
use crate::schema::{drop_table_statement, generate_create_table, ColumnTypeRegistry};

/// Settings for one populate run.
#[derive(Debug, Clone)]
pub struct PopulateConfig {
    pub table: String,
    /// Total column count, including the generated primary key.
    pub column_count: usize,
    pub row_count: u64,
    pub worker_count: u64,
    /// Upper bound on rows per INSERT statement.
    pub batch_size: u64,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy)]
pub struct PopulateReport {
    pub rows_inserted: u64,
    pub batch_count: u64,
    pub duration: Duration,
}

/// Creates the table once and drives the worker pool to fill it.
pub struct Populator {
    provider: Arc<dyn ConnectionProvider>,
    config: PopulateConfig,
}

impl Populator {
    pub fn new(provider: Arc<dyn ConnectionProvider>, config: PopulateConfig) -> Self {
        Self { provider, config }
    }

    /// Run the whole generation: synthesize the schema, create the table,
    /// insert every row, and report.
    ///
    /// Fail-fast: the first connection, DDL, or INSERT error aborts the run
    /// after the join barrier. There is no rollback; rows committed before
    /// the failure stay in the table.
    pub async fn run(&self) -> Result<PopulateReport, PopulateError> {
        let cfg = &self.config;
        assert!(cfg.worker_count >= 1, "worker_count must be >= 1");
        assert!(cfg.batch_size >= 1, "batch_size must be >= 1");

        let started = Instant::now();

        let mut rng = StdRng::from_os_rng();
        let (create_stmt, registry) =
            generate_create_table(&cfg.table, cfg.column_count, true, &mut rng);
        let registry = Arc::new(registry);

        let mut session = self
            .provider
            .session()
            .await
            .map_err(PopulateError::Connection)?;
        for ddl in [drop_table_statement(&cfg.table), create_stmt] {
            session
                .execute(&ddl)
                .await
                .map_err(|source| PopulateError::SchemaCreation {
                    table: cfg.table.clone(),
                    source,
                })?;
        }
        tracing::info!(table = %cfg.table, columns = cfg.column_count, "created table");

        let shares = partition(cfg.row_count, cfg.worker_count);
        tracing::debug!(
            workers = cfg.worker_count,
            per_worker = shares.per_worker,
            remainder = shares.remainder,
            "partitioned row count"
        );

        let mut handles = Vec::with_capacity(cfg.worker_count as usize);
        for worker in 0..cfg.worker_count {
            let provider = Arc::clone(&self.provider);
            let registry = Arc::clone(&registry);
            let table = cfg.table.clone();
            let rows = shares.per_worker;
            let batch_size = cfg.batch_size;
            handles.push(tokio::spawn(async move {
                let batches =
                    run_worker(provider, &table, rows, batch_size, registry.as_ref()).await?;
                tracing::debug!(worker, rows, batches, "worker finished");
                Ok::<u64, PopulateError>(batches)
            }));
        }

        // Join barrier: every worker finishes (or fails) before any result
        // is observed; the first error wins.
        let mut batch_count = 0u64;
        let mut first_error = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(batches)) => batch_count += batches,
                Ok(Err(e)) => first_error = first_error.or(Some(e)),
                Err(join) => first_error = first_error.or(Some(PopulateError::Worker(join))),
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }

        // Remainder rows go through the orchestrator's own session, the one
        // the table was created on.
        batch_count += insert_rows(
            session.as_mut(),
            &cfg.table,
            shares.remainder,
            cfg.batch_size,
            registry.as_ref(),
        )
        .await?;
        session.close().await.map_err(PopulateError::Connection)?;

        Ok(PopulateReport {
            rows_inserted: cfg.row_count,
            batch_count,
            duration: started.elapsed(),
        })
    }
}

/// One worker's life: open a session, insert the share in batches, release
/// the session on both exit paths.
async fn run_worker(
    provider: Arc<dyn ConnectionProvider>,
    table: &str,
    rows: u64,
    batch_size: u64,
    registry: &ColumnTypeRegistry,
) -> Result<u64, PopulateError> {
    let mut session = provider.session().await.map_err(PopulateError::Connection)?;
    let result = insert_rows(session.as_mut(), table, rows, batch_size, registry).await;
    let closed = session.close().await;
    let batches = result?;
    closed.map_err(PopulateError::Connection)?;
    Ok(batches)
}

/// Insert `total_rows` rows in batches of at most `batch_size`, returning
/// the number of statements executed. Every batch is full except possibly
/// the last one.
async fn insert_rows(
    session: &mut dyn SqlExecutor,
    table: &str,
    total_rows: u64,
    batch_size: u64,
    registry: &ColumnTypeRegistry,
) -> Result<u64, PopulateError> {
    if total_rows == 0 {
        return Ok(0);
    }

    let mut rng = StdRng::from_os_rng();
    let full_batches = total_rows / batch_size;
    let tail = total_rows % batch_size;

    let mut executed = 0u64;
    for _ in 0..full_batches {
        let stmt = build_insert(table, batch_size as usize, registry, &mut rng);
        session
            .execute(&stmt)
            .await
            .map_err(|source| PopulateError::Insert {
                table: table.to_string(),
                source,
            })?;
        executed += 1;
    }
    if tail > 0 {
        let stmt = build_insert(table, tail as usize, registry, &mut rng);
        session
            .execute(&stmt)
            .await
            .map_err(|source| PopulateError::Insert {
                table: table.to_string(),
                source,
            })?;
        executed += 1;
    }
    Ok(executed)
}
