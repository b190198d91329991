pub mod rest;

use std::{fmt::Display, path::Path, time::Duration};

use anyhow::{Result, anyhow};
use filmes_server::config::{Parser, ServerConfig};
use filmes_server::run::{build_state, run_graceful_with_state};
use futures::FutureExt as _;
use rand::Rng as _;
use reqwest::Url;
use tempfile::TempDir;
use tokio::{sync::oneshot, task::JoinHandle};
use tracing::{debug, error};

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, std::time::Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

pub struct ConfigGuard {
    #[allow(dead_code)]
    data_dir: TempDir,
}

pub fn test_config(test_name: &str, base_dir: &Path) -> Result<(ServerConfig, ConfigGuard)> {
    let tmp_data_dir = TempDir::with_prefix_in(format!("{}_", test_name), base_dir)?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let port = random_port()?;
    let port = port.to_string();
    let base_url = format!("http://localhost:{}", port);
    let args = &[
        "filmes-e2e-tests",
        "--data-dir",
        &data_dir,
        "--port",
        &port,
        "--base-url",
        &base_url,
    ];
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
        },
    ))
}

/// Config with fresh data directory, database is created on launch
pub async fn prepare_env(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let base_dir = std::env::temp_dir();
    test_config(test_name, &base_dir)
}

/// Stops server when dropped
pub struct ServerGuard {
    shutdown: Option<oneshot::Sender<()>>,
    #[allow(dead_code)]
    handle: JoinHandle<()>,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

pub async fn launch_env(args: ServerConfig) -> Result<(reqwest::Client, ServerGuard)> {
    let base_url = args.base_url.clone();
    let state = build_state(&args).await?;
    let (shutdown_sender, shutdown_receiver) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        if let Err(e) =
            run_graceful_with_state(args, state, shutdown_receiver.map(|_| ())).await
        {
            error!("Server failed: {e}");
        }
    });
    let guard = ServerGuard {
        shutdown: Some(shutdown_sender),
        handle,
    };

    let client = reqwest::Client::new();
    let health_url = base_url.join("health")?;
    for _ in 0..50 {
        match client.get(health_url.clone()).send().await {
            Ok(response) if response.status().is_success() => return Ok((client, guard)),
            Ok(response) => debug!("Server not ready: {}", response.status()),
            Err(e) => debug!("Server not ready: {e}"),
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    Err(anyhow!("Server did not start"))
}

pub fn extend_url(url: &Url, segment: impl Display) -> Url {
    let mut url = url.clone();
    url.path_segments_mut()
        .expect("Base URL")
        .push(&segment.to_string());
    url
}
