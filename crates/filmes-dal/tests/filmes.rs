use filmes_dal::{
    Error,
    filme::{CreateFilme, FilmeRepositoryImpl},
};
use sqlx::Executor;

const TEST_DATA: &str = r#"
INSERT INTO filme (id, titulo, atores, genero, classificacao, preco)
VALUES (1, 'Matrix', 'Keanu Reeves', 'Ficção', 4, '19.90');
INSERT INTO filme (id, titulo, atores, genero, classificacao, preco)
VALUES (2, 'Central do Brasil', 'Fernanda Montenegro', 'Drama', 5, '14.50');
"#;

async fn init_db() -> sqlx::Pool<sqlx::Sqlite> {
    const DB_URL: &str = "sqlite::memory:";
    let conn = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(DB_URL)
        .await
        .unwrap();
    filmes_dal::migrate(&conn).await.unwrap();
    conn.execute(TEST_DATA).await.unwrap();

    conn
}

fn payload(titulo: &str) -> CreateFilme {
    CreateFilme {
        titulo: titulo.to_string(),
        atores: "Testes".to_string(),
        genero: "Teste".to_string(),
        classificacao: Some(1),
        preco: "12.99".to_string(),
    }
}

#[tokio::test]
async fn test_filme_create_and_get() {
    let conn = init_db().await;
    let repo = FilmeRepositoryImpl::new(conn);

    let created = repo.create(payload("Teste")).await.unwrap();
    assert_eq!(3, created.id);
    assert_eq!("Teste", created.titulo);
    assert_eq!("Testes", created.atores);
    assert_eq!("Teste", created.genero);
    assert_eq!(1, created.classificacao);
    assert_eq!("12.99", created.preco);

    let fetched = repo.get(created.id).await.unwrap();
    assert_eq!(created, fetched);

    let second = repo.create(payload("Teste")).await.unwrap();
    assert_ne!(created.id, second.id);
    assert_eq!(4, repo.count().await.unwrap());
}

#[tokio::test]
async fn test_filme_list_ordered() {
    let conn = init_db().await;
    let repo = FilmeRepositoryImpl::new(conn);

    let all = repo.list_all(filmes_dal::MAX_LIMIT).await.unwrap();
    assert_eq!(2, all.len());
    assert_eq!("Matrix", all[0].titulo);
    assert_eq!("Central do Brasil", all[1].titulo);

    let limited = repo.list_all(1).await.unwrap();
    assert_eq!(1, limited.len());
    assert_eq!(1, limited[0].id);
}

#[tokio::test]
async fn test_filme_update() {
    let conn = init_db().await;
    let repo = FilmeRepositoryImpl::new(conn);

    let updated = repo.update(2, payload("Updated")).await.unwrap();
    assert_eq!(2, updated.id);
    assert_eq!("Updated", updated.titulo);
    assert_eq!("Testes", updated.atores);

    let fetched = repo.get(2).await.unwrap();
    assert_eq!(updated, fetched);

    let res = repo.update(99, payload("Updated")).await;
    assert!(matches!(res, Err(Error::RecordNotFound(_))));
}

#[tokio::test]
async fn test_filme_delete() {
    let conn = init_db().await;
    let repo = FilmeRepositoryImpl::new(conn);

    assert!(repo.delete(1).await.unwrap());
    assert!(!repo.delete(1).await.unwrap());

    let res = repo.get(1).await;
    assert!(matches!(res, Err(Error::RecordNotFound(_))));

    let all = repo.list_all(100).await.unwrap();
    assert_eq!(1, all.len());
    assert_eq!(2, all[0].id);
}

#[tokio::test]
async fn test_deleted_id_not_reused() {
    let conn = init_db().await;
    let repo = FilmeRepositoryImpl::new(conn);

    let created = repo.create(payload("Teste")).await.unwrap();
    assert!(repo.delete(created.id).await.unwrap());
    let next = repo.create(payload("Teste")).await.unwrap();
    assert!(next.id > created.id);
}
