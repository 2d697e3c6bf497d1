//! Command-line interface for mysql-datagen.
//!
//! # Usage Examples
//! ```bash
//! # Fill `test`.`t` on a local TiDB with 20000 rows over 10 workers
//! mysql-datagen
//!
//! # Custom shape and volume
//! mysql-datagen --host db.internal --port 3306 \
//!   --database bench --table wide --columns 32 \
//!   --rows 1000000 --workers 16 --batch 2000
//!
//! # Inspect the generated schema and the partition plan only
//! mysql-datagen --columns 5 --rows 100 --dry-run
//! ```

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use mysql_datagen::{
    generate_create_table, partition, MySqlConnector, PopulateConfig, Populator,
};

#[derive(Parser)]
#[command(name = "mysql-datagen")]
#[command(about = "Generate a randomized table filled with test data on TiDB/MySQL")]
struct Cli {
    /// DB host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// DB port
    #[arg(long, default_value_t = 4000)]
    port: u16,

    /// DB username
    #[arg(long, default_value = "root")]
    user: String,

    /// DB password
    #[arg(long, default_value = "", env = "MYSQL_PASSWORD")]
    password: String,

    /// Database name
    #[arg(long, default_value = "test")]
    database: String,

    /// Table name
    #[arg(long, default_value = "t")]
    table: String,

    /// Column count, including the generated primary key
    #[arg(long, default_value_t = 10)]
    columns: usize,

    /// Total row count
    #[arg(long, default_value_t = 20000)]
    rows: u64,

    /// Parallel worker count
    #[arg(long, default_value_t = 10)]
    workers: u64,

    /// Rows per INSERT statement
    #[arg(long, default_value_t = 1000)]
    batch: u64,

    /// Print the generated schema and partition plan without touching the server
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.columns >= 1, "--columns must be at least 1");
    anyhow::ensure!(cli.workers >= 1, "--workers must be at least 1");
    anyhow::ensure!(cli.batch >= 1, "--batch must be at least 1");

    if cli.dry_run {
        let mut rng = StdRng::from_os_rng();
        let (create_stmt, registry) =
            generate_create_table(&cli.table, cli.columns, true, &mut rng);
        let shares = partition(cli.rows, cli.workers);

        tracing::info!("[DRY-RUN] Would execute: {}", create_stmt);
        tracing::info!(
            "[DRY-RUN] {} data columns; {} workers x {} rows + {} remainder, batch size {}",
            registry.len(),
            cli.workers,
            shares.per_worker,
            shares.remainder,
            cli.batch
        );
        return Ok(());
    }

    let connector = MySqlConnector::new(
        &cli.host,
        cli.port,
        &cli.user,
        &cli.password,
        &cli.database,
    );
    connector
        .ensure_database()
        .await
        .context("failed to prepare target database")?;

    tracing::info!(
        "Populating `{}`.`{}` with {} rows across {} workers",
        cli.database,
        cli.table,
        cli.rows,
        cli.workers
    );

    let populator = Populator::new(
        Arc::new(connector),
        PopulateConfig {
            table: cli.table,
            column_count: cli.columns,
            row_count: cli.rows,
            worker_count: cli.workers,
            batch_size: cli.batch,
        },
    );
    let report = populator.run().await?;

    let secs = report.duration.as_secs_f64();
    let rows_per_second = if secs > 0.0 {
        report.rows_inserted as f64 / secs
    } else {
        0.0
    };
    tracing::info!(
        "Inserted {} rows in {} batches in {:?} ({:.0} rows/s)",
        report.rows_inserted,
        report.batch_count,
        report.duration,
        rows_per_second
    );
    Ok(())
}
