use crate::config::ServerConfig;
use crate::error::Result;
use axum::http::StatusCode;
use axum::{response::IntoResponse, routing::get, Router};
use filmes_app::state::{AppConfig, AppState};
use futures::FutureExt;
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn run(args: ServerConfig) -> Result<()> {
    let state = build_state(&args).await?;
    run_with_state(args, state).await
}

pub async fn run_with_state(args: ServerConfig, state: AppState) -> Result<()> {
    let shutdown = tokio::signal::ctrl_c().map(|_| ());
    run_graceful_with_state(args, state, shutdown).await
}

pub async fn run_graceful_with_state<S>(
    args: ServerConfig,
    state: AppState,
    shutdown_signal: S,
) -> Result<()>
where
    S: std::future::Future<Output = ()> + Send + 'static,
{
    let mut app = main_router(state);

    if !args.no_cors {
        app = app.layer(tower_http::cors::CorsLayer::very_permissive());
    }
    app = app.layer(TraceLayer::new_for_http());

    let ip: std::net::IpAddr = args.listen_address.parse()?;
    let addr = std::net::SocketAddr::from((ip, args.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "Listening on {}, serving {}",
        listener.local_addr()?,
        args.base_url
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server stopped");
    Ok(())
}

#[cfg(feature = "openapi")]
fn api_docs() -> utoipa::openapi::OpenApi {
    #[derive(utoipa::OpenApi)]
    #[openapi(
        info(title = "Filmes API", description = "Catalogue of filmes"),
        components(schemas(filmes_app::error::ErrorBody))
    )]
    struct OpenApi;

    use utoipa::OpenApi as _;
    OpenApi::openapi().nest("/filmes", filmes_app::rest_api::filme::api_docs())
}

fn main_router(state: AppState) -> Router<()> {
    #[allow(unused_mut)]
    let mut router = Router::new()
        .nest("/filmes", filmes_app::rest_api::filme::router())
        .with_state(state)
        .route("/health", get(health));

    #[cfg(feature = "openapi")]
    {
        let docs = api_docs();
        router = router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs),
        );
    }
    router
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let data_dir = config.data_dir();
    if !data_dir.is_dir() {
        tokio::fs::create_dir_all(&data_dir).await?;
        info!("Created data directory {}", data_dir.display());
    }

    let pool = filmes_dal::new_pool(&config.database_url()).await?;
    let app_config: AppConfig = config.into();

    Ok(AppState::new(app_config, pool))
}
