use anyhow::Result;
use filmes_app::error::ErrorBody;
use filmes_dal::filme::Filme;
use reqwest::{StatusCode, Url};
use serde_json::{Value, json};
use tracing::info;

pub fn filme_payload(titulo: &str) -> Value {
    json!({
        "titulo": titulo,
        "atores": "Testes",
        "genero": "Teste",
        "classificacao": 1,
        "preco": "12.99"
    })
}

pub async fn create_filme(client: &reqwest::Client, base_url: &Url, payload: &Value) -> Result<Filme> {
    let api_url = base_url.join("filmes")?;

    let response = client.post(api_url).json(payload).send().await?;
    info!("Response: {:#?}", response);
    assert_eq!(response.status(), StatusCode::CREATED);

    let new_filme: Filme = response.json().await?;
    Ok(new_filme)
}

/// Posts payload, expecting it to be rejected
pub async fn create_invalid_filme(
    client: &reqwest::Client,
    base_url: &Url,
    payload: &Value,
) -> Result<(StatusCode, ErrorBody)> {
    let api_url = base_url.join("filmes")?;

    let response = client.post(api_url).json(payload).send().await?;
    info!("Response: {:#?}", response);
    let status = response.status();
    let body: ErrorBody = response.json().await?;
    Ok((status, body))
}

pub async fn count_filmes(client: &reqwest::Client, base_url: &Url) -> Result<u64> {
    let api_url = base_url.join("filmes/count")?;
    let response = client.get(api_url).send().await?;
    assert!(response.status().is_success());
    Ok(response.json().await?)
}
