use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use valyn_core::api::OpenAiClient;
use valyn_core::config::Config;
use valyn_core::routes::{self, AppState};
use valyn_core::services::session_service::DashboardSession;
use valyn_core::services::waitlist_service::LogSink;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let mut filter = EnvFilter::from_default_env();
    for directive in ["valyn_core=debug", "tower_http=info"] {
        match directive.parse::<Directive>() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Ignoring log directive {}: {}", directive, e),
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🚀 Starting Valyn Core v{}...", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if !config.public_dir.is_dir() {
        warn!("Public directory {} not found, pages will 404", config.public_dir.display());
    }

    let provider = OpenAiClient::with_base_url(config.openai_api_key.clone(), config.openai_base_url.clone());
    info!("AI provider: {}", provider.base_url());

    let session = DashboardSession::new();
    session.start().await;

    let state = Arc::new(AppState {
        provider: Arc::new(provider),
        waitlist: Arc::new(LogSink),
        session: session.clone(),
    });
    let app = routes::create_router(state, &config.public_dir);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("🚀 Valyn Core server running at http://localhost:{}", config.port);
    info!("📚 Docs available at http://localhost:{}/docs", config.port);
    info!("🤖 AI Chat endpoint: http://localhost:{}/api/chat", config.port);
    info!("📈 Dashboard feed: http://localhost:{}/api/dashboard/live", config.port);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }

    session.shutdown();
    info!("Valyn Core stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
