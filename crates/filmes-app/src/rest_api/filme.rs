use crate::{error::ApiResult, repository_from_request, validate::Garde};
#[cfg_attr(not(feature = "openapi"), allow(unused_imports))]
use filmes_dal::filme::{CreateFilme, Filme, FilmeRepository};

use super::Path;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Json,
};
use http::StatusCode;
use tracing::{debug, info};

#[cfg_attr(not(feature = "openapi"), allow(unused_imports))]
use crate::error::ErrorBody;
use crate::state::AppState;

repository_from_request!(FilmeRepository);

#[cfg(feature = "openapi")]
#[derive(utoipa::OpenApi)]
#[openapi(paths(
    list_filmes,
    count_filmes,
    get_filme,
    create_filme,
    update_filme,
    delete_filme
))]
struct ModuleDocs;

#[cfg(feature = "openapi")]
pub fn api_docs() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi as _;
    ModuleDocs::openapi()
}

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "", tag = "Filme", operation_id = "listFilmes",
    responses((status = StatusCode::OK, description = "All filmes ordered by id", body = Vec<Filme>))))]
pub async fn list_filmes(
    repository: FilmeRepository,
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let records = repository.list_all(state.config().list_limit).await?;
    Ok((StatusCode::OK, Json(records)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/count", tag = "Filme", operation_id = "countFilmes",
    responses((status = StatusCode::OK, description = "Count", body = u64))))]
pub async fn count_filmes(repository: FilmeRepository) -> ApiResult<impl IntoResponse> {
    let count = repository.count().await?;
    Ok((StatusCode::OK, Json(count)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/{id}", tag = "Filme", operation_id = "getFilme",
    params(("id" = i64, Path, description = "Filme id")),
    responses((status = StatusCode::OK, description = "Get one", body = Filme),
        (status = StatusCode::NOT_FOUND, description = "No such filme", body = ErrorBody))))]
pub async fn get_filme(
    Path(id): Path<i64>,
    repository: FilmeRepository,
) -> ApiResult<impl IntoResponse> {
    let record = repository.get(id).await?;

    Ok((StatusCode::OK, Json(record)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(post, path = "", tag = "Filme", operation_id = "createFilme",
    request_body = CreateFilme,
    responses((status = StatusCode::CREATED, description = "Created Filme", body = Filme),
        (status = StatusCode::BAD_REQUEST, description = "Invalid payload", body = ErrorBody))))]
pub async fn create_filme(
    repository: FilmeRepository,
    Garde(Json(payload)): Garde<Json<CreateFilme>>,
) -> ApiResult<impl IntoResponse> {
    let record = repository.create(payload).await?;
    info!("Created filme {}", record.id);

    Ok((StatusCode::CREATED, Json(record)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(put, path = "/{id}", tag = "Filme", operation_id = "updateFilme",
    params(("id" = i64, Path, description = "Filme id")),
    request_body = CreateFilme,
    responses((status = StatusCode::OK, description = "Updated Filme", body = Filme),
        (status = StatusCode::BAD_REQUEST, description = "Invalid payload", body = ErrorBody),
        (status = StatusCode::NOT_FOUND, description = "No such filme", body = ErrorBody))))]
pub async fn update_filme(
    Path(id): Path<i64>,
    repository: FilmeRepository,
    Garde(Json(payload)): Garde<Json<CreateFilme>>,
) -> ApiResult<impl IntoResponse> {
    let record = repository.update(id, payload).await?;

    Ok((StatusCode::OK, Json(record)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(delete, path = "/{id}", tag = "Filme", operation_id = "deleteFilme",
    params(("id" = i64, Path, description = "Filme id")),
    responses((status = StatusCode::OK, description = "Deleted, also when filme did not exist"))))]
pub async fn delete_filme(
    Path(id): Path<i64>,
    repository: FilmeRepository,
) -> ApiResult<impl IntoResponse> {
    if repository.delete(id).await? {
        info!("Deleted filme {id}");
    } else {
        debug!("Filme {id} was not present");
    }

    Ok(StatusCode::OK)
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(list_filmes).post(create_filme))
        .route("/count", get(count_filmes))
        .route(
            "/{id}",
            get(get_filme).put(update_filme).delete(delete_filme),
        )
}
