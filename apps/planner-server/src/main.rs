use anyhow::{anyhow, Context, Result};
use axum::{Extension, Router};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend};
use sea_orm_migration::MigratorTrait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use url::Url;

use identity::infra::storage::SeaOrmUsersRepository;
use identity::security::SessionSigner;
use migration::Migrator;
use planner::PlannerDataPurge;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
/// - Appends mode=rwc so a missing database file is created.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Rebuild DSN with absolute path and normalized slashes
    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    match query {
        Some(q) => {
            out.push('?');
            out.push_str(q);
            if !q.contains("mode=") {
                out.push_str("&mode=rwc");
            }
        }
        None => out.push_str("?mode=rwc"),
    }
    Ok(out)
}

/// Student planner backend
#[derive(Parser)]
#[command(name = "planner-server")]
#[command(about = "Student planner backend - timetable, assignments, exams and notes")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    // Initialize logging
    match config.logging.as_ref() {
        Some(logging) => runtime::logging::init_logging_from_config(
            logging,
            Path::new(&config.server.home_dir),
        ),
        None => runtime::logging::init_default_logging(),
    }
    tracing::info!("Planner server starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config).await,
    }
}

/// Detect DB backend from URL scheme (sqlite/postgres).
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim().to_owned();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(&raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" | "sqlite3" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

async fn connect_database(dsn: &str, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    // A pooled in-memory SQLite database is one database per connection;
    // a single connection keeps the state shared.
    let in_memory = dsn.contains(":memory:");
    let max_conns = if in_memory {
        1
    } else {
        cfg.max_conns.unwrap_or(10)
    };

    let mut opts = ConnectOptions::new(dsn.to_owned());
    opts.max_connections(max_conns)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    tracing::info!("Connecting to database: {}", dsn);
    let db = Database::connect(opts)
        .await
        .with_context(|| format!("Failed to connect to database: {dsn}"))?;

    if db.get_database_backend() == DbBackend::Sqlite {
        if let Some(ms) = cfg.busy_timeout_ms {
            db.execute_unprepared(&format!("PRAGMA busy_timeout = {ms};"))
                .await
                .context("Failed to set sqlite busy_timeout")?;
        }
    }

    tracing::info!("Connected DB backend: {:?}", db.get_database_backend());
    Ok(db)
}

/// Compose the application router: identity + planner routes sharing one
/// session signer, wrapped in CORS and request tracing.
fn build_router(db: DatabaseConnection, signer: Arc<SessionSigner>, timeout_sec: u64) -> Router {
    let users_repo = Arc::new(SeaOrmUsersRepository::new(db.clone()));
    let identity_svc = Arc::new(identity::Service::new(
        users_repo,
        signer.clone(),
        Arc::new(PlannerDataPurge),
        identity::ServiceConfig::default(),
    ));
    let planner_svc = Arc::new(planner::Service::new(db, planner::ServiceConfig::default()));

    let mut router = Router::new()
        .merge(identity::api::rest::routes::router(identity_svc))
        .merge(planner::api::rest::routes::router(planner_svc))
        .layer(Extension(signer))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    if timeout_sec > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(timeout_sec)));
    }

    router
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("Database configuration is required to run the server"))?;

    let _backend = detect_from_dsn(&db_config)?;

    // Use URL from config; override with in-memory SQLite when --mock is set
    let mut dsn = if args.mock {
        "sqlite::memory:".to_string()
    } else {
        db_config.url.trim().to_owned()
    };

    // Absolutize sqlite DSNs to avoid cwd issues
    if dsn.starts_with("sqlite://") {
        dsn = absolutize_sqlite_dsn(&dsn, Path::new(&config.server.home_dir))?;
    }

    let db = connect_database(&dsn, &db_config).await?;

    tracing::info!("Running database migrations");
    Migrator::up(&db, None)
        .await
        .context("Database migration failed")?;

    if config.auth.secret == "change-me-in-production" {
        tracing::warn!("auth.secret is the default value; set APP__AUTH__SECRET in production");
    }
    let signer = Arc::new(SessionSigner::new(
        &config.auth.secret,
        config.auth.access_ttl,
        config.auth.refresh_ttl,
    ));

    let router = build_router(db, signer, config.server.timeout_sec);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!(e))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping server");
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    if let Some(db_config) = config.database.as_ref() {
        detect_from_dsn(db_config)?;
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_memory_dsn_is_kept() {
        let out = absolutize_sqlite_dsn("sqlite::memory:", Path::new("/base")).unwrap();
        assert_eq!(out, "sqlite::memory:");
        let out = absolutize_sqlite_dsn("sqlite://:memory:", Path::new("/base")).unwrap();
        assert_eq!(out, "sqlite::memory:");
    }

    #[test]
    fn relative_sqlite_path_is_absolutized() {
        let tmp = tempfile::tempdir().unwrap();
        let out = absolutize_sqlite_dsn("sqlite://database/planner.db", tmp.path()).unwrap();
        assert!(out.starts_with("sqlite://"));
        assert!(out.contains("database/planner.db"));
        assert!(out.ends_with("?mode=rwc"));
        // parent directory is created eagerly
        assert!(tmp.path().join("database").exists());
    }

    #[test]
    fn existing_query_params_are_preserved() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        let out = absolutize_sqlite_dsn("sqlite://planner.db?cache=shared", base).unwrap();
        assert!(out.contains("cache=shared"));
        assert!(out.ends_with("&mode=rwc"));

        let out = absolutize_sqlite_dsn("sqlite://planner.db?mode=ro", base).unwrap();
        assert!(out.ends_with("?mode=ro"));
    }

    #[test]
    fn dsn_scheme_detection() {
        let cfg = |url: &str| DatabaseConfig {
            url: url.to_string(),
            max_conns: None,
            busy_timeout_ms: None,
        };

        assert_eq!(detect_from_dsn(&cfg("sqlite://a.db")).unwrap(), "sqlite");
        assert_eq!(
            detect_from_dsn(&cfg("postgres://u:p@h/db")).unwrap(),
            "postgres"
        );
        assert!(detect_from_dsn(&cfg("mysql://u:p@h/db")).is_err());
        assert!(detect_from_dsn(&cfg("")).is_err());
    }
}
