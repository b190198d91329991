use crate::{Error, error::Result};
use futures::TryStreamExt as _;
use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::Pool;
use tracing::debug;

pub const BLANK_MESSAGE: &str = "não pode estar em branco !";

/// Non-blank text with minimal number of characters
struct TextRule {
    min_chars: usize,
    too_short: &'static str,
}

impl TextRule {
    fn check(&self, value: &str) -> garde::Result {
        if value.trim().is_empty() {
            Err(garde::Error::new(BLANK_MESSAGE))
        } else if value.chars().count() < self.min_chars {
            Err(garde::Error::new(self.too_short))
        } else {
            Ok(())
        }
    }
}

const TITULO: TextRule = TextRule {
    min_chars: 5,
    too_short: "deve ter no minimo 5 caracteres!",
};
const ATORES: TextRule = TextRule {
    min_chars: 4,
    too_short: "deve ter no minimo 4 caracteres!",
};
const GENERO: TextRule = TextRule {
    min_chars: 5,
    too_short: "deve ter no minimo 5 caracteres",
};
const PRECO: TextRule = TextRule {
    min_chars: 5,
    too_short: "deve ter no minimo 5 caracteres",
};

const MIN_CLASSIFICACAO: i64 = 1;
const CLASSIFICACAO_TOO_LOW: &str = "deve ter pelo menos uma classificação";

fn valid_titulo(value: &str, _ctx: &()) -> garde::Result {
    TITULO.check(value)
}

fn valid_atores(value: &str, _ctx: &()) -> garde::Result {
    ATORES.check(value)
}

fn valid_genero(value: &str, _ctx: &()) -> garde::Result {
    GENERO.check(value)
}

fn valid_classificacao(value: &Option<i64>, _ctx: &()) -> garde::Result {
    match value {
        None => Err(garde::Error::new(BLANK_MESSAGE)),
        Some(v) if *v < MIN_CLASSIFICACAO => Err(garde::Error::new(CLASSIFICACAO_TOO_LOW)),
        Some(_) => Ok(()),
    }
}

fn valid_preco(value: &str, _ctx: &()) -> garde::Result {
    PRECO.check(value)
}

/// Payload for create and update. Each field reports at most one violation.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateFilme {
    #[serde(default)]
    #[garde(custom(valid_titulo))]
    pub titulo: String,
    #[serde(default)]
    #[garde(custom(valid_atores))]
    pub atores: String,
    #[serde(default)]
    #[garde(custom(valid_genero))]
    pub genero: String,
    #[serde(default)]
    #[garde(custom(valid_classificacao))]
    pub classificacao: Option<i64>,
    #[serde(default)]
    #[garde(custom(valid_preco))]
    pub preco: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Filme {
    pub id: i64,
    pub titulo: String,
    pub atores: String,
    pub genero: String,
    pub classificacao: i64,
    pub preco: String,
}

pub type FilmeRepository = FilmeRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct FilmeRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> FilmeRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, payload: CreateFilme) -> Result<Filme> {
        let result = sqlx::query(
            "INSERT INTO filme (titulo, atores, genero, classificacao, preco) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&payload.titulo)
        .bind(&payload.atores)
        .bind(&payload.genero)
        .bind(payload.classificacao)
        .bind(&payload.preco)
        .execute(&self.executor)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted filme {id}");
        self.get(id).await
    }

    /// Replaces all fields of existing record, id stays same
    pub async fn update(&self, id: i64, payload: CreateFilme) -> Result<Filme> {
        let result = sqlx::query(
            "UPDATE filme SET titulo = ?, atores = ?, genero = ?, classificacao = ?, preco = ? WHERE id = ?",
        )
        .bind(&payload.titulo)
        .bind(&payload.atores)
        .bind(&payload.genero)
        .bind(payload.classificacao)
        .bind(&payload.preco)
        .bind(id)
        .execute(&self.executor)
        .await?;

        if result.rows_affected() == 0 {
            debug!("No filme {id} to update");
            Err(Error::RecordNotFound(format!("Filme {id}")))
        } else {
            self.get(id).await
        }
    }

    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM filme")
            .fetch_one(&self.executor)
            .await?;
        Ok(count.max(0) as u64)
    }

    pub async fn list_all(&self, limit: usize) -> Result<Vec<Filme>> {
        let limit = limit.min(crate::MAX_LIMIT) as i64;
        let records = sqlx::query_as::<_, Filme>(
            "SELECT id, titulo, atores, genero, classificacao, preco FROM filme ORDER BY id LIMIT ?",
        )
        .bind(limit)
        .fetch(&self.executor)
        .try_collect::<Vec<_>>()
        .await?;
        Ok(records)
    }

    /// Returns true if record existed
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM filme WHERE id = ?")
            .bind(id)
            .execute(&self.executor)
            .await?;

        Ok(res.rows_affected() > 0)
    }

    pub async fn get(&self, id: i64) -> Result<Filme> {
        sqlx::query_as::<_, Filme>(
            "SELECT id, titulo, atores, genero, classificacao, preco FROM filme WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.executor)
        .await?
        .ok_or_else(|| Error::RecordNotFound(format!("Filme {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateFilme {
        CreateFilme {
            titulo: "Teste".into(),
            atores: "Testes".into(),
            genero: "Teste".into(),
            classificacao: Some(1),
            preco: "12.99".into(),
        }
    }

    fn first_error(payload: &CreateFilme) -> (String, String) {
        let report = payload.validate().unwrap_err();
        report
            .iter()
            .map(|(path, error)| (path.to_string(), error.message().to_string()))
            .min()
            .unwrap()
    }

    #[test]
    fn test_valid_filme() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_blank_fields() {
        let mut f = valid();
        f.titulo = "".into();
        assert_eq!(
            ("titulo".to_string(), BLANK_MESSAGE.to_string()),
            first_error(&f)
        );

        let mut f = valid();
        f.atores = "   ".into();
        assert_eq!(
            ("atores".to_string(), BLANK_MESSAGE.to_string()),
            first_error(&f)
        );

        let mut f = valid();
        f.classificacao = None;
        assert_eq!(
            ("classificacao".to_string(), BLANK_MESSAGE.to_string()),
            first_error(&f)
        );

        let mut f = valid();
        f.preco = "".into();
        assert_eq!(
            ("preco".to_string(), BLANK_MESSAGE.to_string()),
            first_error(&f)
        );
    }

    #[test]
    fn test_too_short() {
        let mut f = valid();
        f.titulo = "test".into();
        assert_eq!("deve ter no minimo 5 caracteres!", first_error(&f).1);

        let mut f = valid();
        f.atores = "tes".into();
        assert_eq!("deve ter no minimo 4 caracteres!", first_error(&f).1);

        let mut f = valid();
        f.genero = "Test".into();
        assert_eq!("deve ter no minimo 5 caracteres", first_error(&f).1);

        let mut f = valid();
        f.classificacao = Some(0);
        assert_eq!("deve ter pelo menos uma classificação", first_error(&f).1);

        let mut f = valid();
        f.preco = "9.99".into();
        assert_eq!("deve ter no minimo 5 caracteres", first_error(&f).1);
    }

    #[test]
    fn test_length_counts_chars() {
        let mut f = valid();
        // 5 characters, but more bytes
        f.genero = "Ação!".into();
        assert!(f.validate().is_ok());
        f.genero = "Açõe".into();
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_all_fields_reported() {
        let f = CreateFilme {
            titulo: "test".into(),
            atores: "".into(),
            genero: "".into(),
            classificacao: None,
            preco: "".into(),
        };
        let report = f.validate().unwrap_err();
        let mut fields: Vec<String> = report.iter().map(|(p, _)| p.to_string()).collect();
        fields.sort();
        assert_eq!(
            vec!["atores", "classificacao", "genero", "preco", "titulo"],
            fields
        );
    }

    #[test]
    fn test_missing_fields_deserialize() {
        let f: CreateFilme = serde_json::from_str(r#"{"id": 7, "titulo": "Teste"}"#).unwrap();
        assert_eq!(f.atores, "");
        assert_eq!(f.classificacao, None);
        assert_eq!(
            ("atores".to_string(), BLANK_MESSAGE.to_string()),
            first_error(&f)
        );
    }
}
