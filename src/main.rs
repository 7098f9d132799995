use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use brevik::application::services::{SummarizationService, SummarizerConfig};
use brevik::infrastructure::auth::OidcIdentityProvider;
use brevik::infrastructure::llm::GeminiClient;
use brevik::infrastructure::observability::{init_tracing, TracingConfig};
use brevik::infrastructure::persistence::{
    create_pool, run_migrations, PgSummaryRepository, PgUserRepository,
};
use brevik::infrastructure::text_processing::{LopdfTextExtractor, PdfiumPageRenderer};
use brevik::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(TracingConfig::from_env(), settings.server.port);

    let pool = create_pool(&settings.database.url, settings.database.max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("database unavailable: {e}"))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("migrations failed: {e}"))?;

    let model = Arc::new(GeminiClient::new(
        &settings.model.base_url,
        &settings.model.model,
        &settings.model.api_key,
    ));
    let extractor = Arc::new(LopdfTextExtractor::new());
    let renderer = Arc::new(PdfiumPageRenderer::new());

    let summarization_service = Arc::new(SummarizationService::new(
        model,
        extractor,
        renderer,
        SummarizerConfig::default(),
    ));

    let state = AppState {
        summarization_service,
        identity_provider: Arc::new(OidcIdentityProvider::new(&settings.auth.userinfo_url)),
        summary_repository: Arc::new(PgSummaryRepository::new(pool.clone())),
        user_repository: Arc::new(PgUserRepository::new(pool)),
        history_limit: settings.history.limit,
    };

    let router = create_router(state);

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
