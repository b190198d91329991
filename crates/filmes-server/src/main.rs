use filmes_server::{config::ServerConfig, run::run, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = ServerConfig::load()?;
    run(args).await
}
