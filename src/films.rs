use std::sync::Arc;

use jiff::civil::{Date, date};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    models::{Film, FilmRequest, RecordId},
    store::Table,
};

/// Films must be released strictly after this date.
pub const EARLIEST_RELEASE_DATE: Date = date(1895, 12, 28);
pub const MAX_DESCRIPTION_CHARS: usize = 200;

#[derive(Clone, Default)]
pub struct FilmStore {
    table: Arc<RwLock<Table<Film>>>,
}

impl FilmStore {
    pub async fn find_all(&self) -> Vec<Film> {
        let table = self.table.read().await;
        info!(count = table.len(), "listing films");
        table.snapshot()
    }

    pub async fn create(&self, req: FilmRequest) -> AppResult<Film> {
        let fields = validate(req)?;

        let mut table = self.table.write().await;
        let film = table.insert_with(|id| fields.into_film(id));

        info!(id = film.id, name = %film.name, "film created");
        Ok(film)
    }

    pub async fn update(&self, req: FilmRequest) -> AppResult<Film> {
        let Some(id) = req.id else {
            warn!("film update without id");
            return Err(AppError::Precondition("film id must be provided".into()));
        };

        let mut table = self.table.write().await;
        let Some(existing) = table.get_mut(id) else {
            warn!(id, "film not found");
            return Err(AppError::NotFound(format!("film with id = {id} not found")));
        };

        *existing = validate(req)?.into_film(id);

        info!(id, name = %existing.name, "film updated");
        Ok(existing.clone())
    }
}

struct FilmFields {
    name: String,
    description: String,
    release_date: Date,
    duration: i32,
}

impl FilmFields {
    fn into_film(self, id: RecordId) -> Film {
        Film {
            id,
            name: self.name,
            description: self.description,
            release_date: self.release_date,
            duration: self.duration,
        }
    }
}

fn validate(req: FilmRequest) -> AppResult<FilmFields> {
    let name = match req.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(reject("name must not be blank")),
    };

    let description = match req.description {
        Some(d) if d.chars().count() <= MAX_DESCRIPTION_CHARS => d,
        Some(_) => {
            return Err(reject(format!(
                "description must be at most {MAX_DESCRIPTION_CHARS} characters"
            )));
        },
        None => return Err(reject("description is required")),
    };

    let release_date = match req.release_date {
        Some(d) if d > EARLIEST_RELEASE_DATE => d,
        Some(_) => {
            return Err(reject(format!("release date must be after {EARLIEST_RELEASE_DATE}")));
        },
        None => return Err(reject("release date is required")),
    };

    let duration = match req.duration {
        Some(d) if d > 0 => d,
        Some(_) => return Err(reject("duration must be a positive number of minutes")),
        None => return Err(reject("duration is required")),
    };

    Ok(FilmFields { name, description, release_date, duration })
}

fn reject(msg: impl Into<String>) -> AppError {
    let err = AppError::validation(msg);
    warn!(error = %err, "film validation failed");
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception() -> FilmRequest {
        FilmRequest {
            id: None,
            name: Some("Inception".into()),
            description: Some("A thief who steals corporate secrets...".into()),
            release_date: Some(date(2010, 7, 16)),
            duration: Some(148),
        }
    }

    fn assert_validation<T: std::fmt::Debug>(result: AppResult<T>) {
        assert!(matches!(result, Err(AppError::Validation(_))), "got {result:?}");
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = FilmStore::default();

        let first = store.create(inception()).await.unwrap();
        let second = store.create(inception()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.name, "Inception");
        assert_eq!(first.release_date, date(2010, 7, 16));
        assert_eq!(first.duration, 148);
        assert_eq!(store.find_all().await, vec![first, second]);
    }

    #[tokio::test]
    async fn create_ignores_client_id() {
        let store = FilmStore::default();
        let film = store.create(FilmRequest { id: Some(42), ..inception() }).await.unwrap();
        assert_eq!(film.id, 1);
    }

    #[tokio::test]
    async fn rejects_blank_or_missing_name() {
        let store = FilmStore::default();
        assert_validation(store.create(FilmRequest { name: Some("  ".into()), ..inception() }).await);
        assert_validation(store.create(FilmRequest { name: None, ..inception() }).await);
        assert!(store.find_all().await.is_empty());
    }

    #[tokio::test]
    async fn description_limit_is_inclusive() {
        let store = FilmStore::default();

        let ok = FilmRequest { description: Some("a".repeat(200)), ..inception() };
        assert!(store.create(ok).await.is_ok());

        let too_long = FilmRequest { description: Some("a".repeat(201)), ..inception() };
        assert_validation(store.create(too_long).await);

        assert_validation(store.create(FilmRequest { description: None, ..inception() }).await);
    }

    #[tokio::test]
    async fn description_counts_characters_not_bytes() {
        let store = FilmStore::default();
        let cyrillic = FilmRequest { description: Some("ж".repeat(200)), ..inception() };
        assert!(store.create(cyrillic).await.is_ok());
    }

    #[tokio::test]
    async fn release_date_boundary_is_exclusive() {
        let store = FilmStore::default();

        let on_boundary = FilmRequest { release_date: Some(date(1895, 12, 28)), ..inception() };
        assert_validation(store.create(on_boundary).await);

        let day_after = FilmRequest { release_date: Some(date(1895, 12, 29)), ..inception() };
        assert!(store.create(day_after).await.is_ok());

        assert_validation(store.create(FilmRequest { release_date: None, ..inception() }).await);
    }

    #[tokio::test]
    async fn duration_must_be_positive() {
        let store = FilmStore::default();
        assert_validation(store.create(FilmRequest { duration: Some(0), ..inception() }).await);
        assert_validation(store.create(FilmRequest { duration: Some(-5), ..inception() }).await);
        assert!(store.create(FilmRequest { duration: Some(1), ..inception() }).await.is_ok());
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_id() {
        let store = FilmStore::default();
        store.create(inception()).await.unwrap();

        let updated = store
            .update(FilmRequest {
                id: Some(1),
                name: Some("Inception 2".into()),
                duration: Some(150),
                ..inception()
            })
            .await
            .unwrap();

        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "Inception 2");
        assert_eq!(updated.duration, 150);
        assert_eq!(store.find_all().await, vec![updated]);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = FilmStore::default();
        let result = store.update(FilmRequest { id: Some(7), ..inception() }).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_without_id_is_precondition() {
        let store = FilmStore::default();
        store.create(inception()).await.unwrap();
        let result = store.update(inception()).await;
        assert!(matches!(result, Err(AppError::Precondition(_))));
    }

    #[tokio::test]
    async fn not_found_wins_over_invalid_fields() {
        let store = FilmStore::default();
        let result = store.update(FilmRequest { id: Some(3), duration: Some(0), ..inception() }).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn rejected_update_leaves_record_untouched() {
        let store = FilmStore::default();
        let original = store.create(inception()).await.unwrap();

        let result = store
            .update(FilmRequest {
                id: Some(1),
                name: Some("Changed".into()),
                duration: Some(0),
                ..inception()
            })
            .await;

        assert_validation(result);
        assert_eq!(store.find_all().await, vec![original]);
    }

    #[tokio::test]
    async fn update_release_date_boundary_is_exclusive() {
        let store = FilmStore::default();
        let original = store.create(inception()).await.unwrap();

        let on_boundary =
            FilmRequest { id: Some(1), release_date: Some(date(1895, 12, 28)), ..inception() };
        assert_validation(store.update(on_boundary).await);
        assert_eq!(store.find_all().await, vec![original]);

        let day_after =
            FilmRequest { id: Some(1), release_date: Some(date(1895, 12, 29)), ..inception() };
        let updated = store.update(day_after).await.unwrap();
        assert_eq!(updated.release_date, date(1895, 12, 29));
    }

    #[tokio::test]
    async fn update_description_limit_is_inclusive() {
        let store = FilmStore::default();
        let original = store.create(inception()).await.unwrap();

        let too_long = FilmRequest { id: Some(1), description: Some("a".repeat(201)), ..inception() };
        assert_validation(store.update(too_long).await);
        assert_eq!(store.find_all().await, vec![original]);

        let at_limit = FilmRequest { id: Some(1), description: Some("a".repeat(200)), ..inception() };
        let updated = store.update(at_limit).await.unwrap();
        assert_eq!(updated.description.len(), 200);
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let store = FilmStore::default();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.create(inception()).await.unwrap().id })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<_>>());
    }
}
