// src/main.rs
use anyhow::Result;
use newsdesk_core::application::{
    ports::{ClockPort, SlugGeneratorPort, TokenVerifierPort},
    services::ApplicationServices,
};
use newsdesk_core::config::{AppConfig, StoreBackend};
use newsdesk_core::domain::article::{ArticleReadRepository, ArticleWriteRepository};
use newsdesk_core::infrastructure::{
    database,
    repositories::{InMemoryArticleRepository, PostgresArticleRepository},
    security::token::BiscuitTokenVerifier,
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use newsdesk_core::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

type ArticleRepos = (
    Arc<dyn ArticleWriteRepository>,
    Arc<dyn ArticleReadRepository>,
);

async fn article_repositories(config: &AppConfig) -> Result<ArticleRepos> {
    match config.store() {
        StoreBackend::Postgres => {
            let pool = database::init_pool(config.database_url()).await?;
            database::run_migrations(&pool).await?;
            let repo = Arc::new(PostgresArticleRepository::new(pool));
            let write_repo: Arc<dyn ArticleWriteRepository> = repo.clone();
            let read_repo: Arc<dyn ArticleReadRepository> = repo;
            Ok((write_repo, read_repo))
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory article store; data is lost on exit");
            let repo = Arc::new(InMemoryArticleRepository::new());
            let write_repo: Arc<dyn ArticleWriteRepository> = repo.clone();
            let read_repo: Arc<dyn ArticleReadRepository> = repo;
            Ok((write_repo, read_repo))
        }
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let (article_write_repo, article_read_repo) = article_repositories(&config).await?;

    let token_verifier: Arc<TokenVerifierPort> =
        Arc::new(BiscuitTokenVerifier::new(config.biscuit_public_key())?);
    let clock: Arc<ClockPort> = Arc::new(SystemClock);
    let slugger: Arc<SlugGeneratorPort> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        article_write_repo,
        article_read_repo,
        token_verifier,
        clock,
        slugger,
    ));

    let app = build_router(HttpState::new(services), config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
