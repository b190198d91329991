use std::path::PathBuf;

use crate::error::Result;
pub use clap::Parser;
use url::Url;

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "REST API for filmes catalogue")]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 3000,
        env = "FILMES_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,
    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "FILMES_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long,
        env = "FILMES_BASE_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of server, as visible to clients"
    )]
    pub base_url: Url,

    #[arg(
        long,
        env = "FILMES_DATABASE_URL",
        help = "Database URL e.g. sqlite://file.db, default is sqlite://[data-dir]/filmes.db, where data-dir is set by --data-dir"
    )]
    database_url: Option<String>,

    #[arg(
        long,
        env = "FILMES_DATA_DIR",
        help = "Data directory for database, default is system default like ~/.local/share/filmes",
        default_value_t = default_data_dir()
    )]
    data_dir: String,

    #[arg(
        long,
        env = "FILMES_LIST_LIMIT",
        default_value_t = filmes_dal::MAX_LIMIT,
        help = "Maximum number of filmes returned by list"
    )]
    pub list_limit: usize,

    #[arg(long, env = "FILMES_NO_CORS", help = "Disable CORS")]
    pub no_cors: bool,
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("filmes"))
        .unwrap_or_else(|| PathBuf::from("filmes"))
        .to_string_lossy()
        .to_string()
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}/filmes.db", self.data_dir))
    }
}

impl From<&ServerConfig> for filmes_app::state::AppConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            list_limit: config.list_limit,
        }
    }
}
