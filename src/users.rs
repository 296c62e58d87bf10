use std::sync::Arc;

use jiff::civil::Date;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::{
    error::{AppError, AppResult},
    models::{RecordId, User, UserRequest},
    store::Table,
};

#[derive(Clone, Default)]
pub struct UserStore {
    table: Arc<RwLock<Table<User>>>,
}

impl UserStore {
    pub async fn find_all(&self) -> Vec<User> {
        let table = self.table.read().await;
        info!(count = table.len(), "listing users");
        table.snapshot()
    }

    pub async fn create(&self, req: UserRequest) -> AppResult<User> {
        let fields = validate(req, today())?;

        let mut table = self.table.write().await;
        ensure_login_free(&table, &fields.login, None)?;
        let user = table.insert_with(|id| fields.into_user(id));

        info!(id = user.id, login = %user.login, "user created");
        Ok(user)
    }

    pub async fn update(&self, req: UserRequest) -> AppResult<User> {
        let Some(id) = req.id else {
            warn!("user update without id");
            return Err(AppError::Precondition("user id must be provided".into()));
        };

        let mut table = self.table.write().await;
        if !table.contains(id) {
            warn!(id, "user not found");
            return Err(AppError::NotFound(format!("user with id = {id} not found")));
        }

        let fields = validate(req, today())?;
        ensure_login_free(&table, &fields.login, Some(id))?;

        let Some(existing) = table.get_mut(id) else {
            return Err(AppError::NotFound(format!("user with id = {id} not found")));
        };
        *existing = fields.into_user(id);

        info!(id, login = %existing.login, "user updated");
        Ok(existing.clone())
    }
}

fn today() -> Date {
    jiff::Zoned::now().date()
}

/// Fails when another user already holds `login`. `owner` is the user allowed to keep it.
fn ensure_login_free(table: &Table<User>, login: &str, owner: Option<RecordId>) -> AppResult<()> {
    let taken = table.values().any(|u| u.login == login && Some(u.id) != owner);
    if taken {
        warn!(login, "login already in use");
        return Err(AppError::Duplicate(format!("login {login} is already in use")));
    }
    Ok(())
}

struct UserFields {
    email: String,
    login: String,
    name: String,
    birthday: Date,
}

impl UserFields {
    fn into_user(self, id: RecordId) -> User {
        User { id, email: self.email, login: self.login, name: self.name, birthday: self.birthday }
    }
}

fn validate(req: UserRequest, today: Date) -> AppResult<UserFields> {
    let email = match req.email {
        Some(e) if !e.trim().is_empty() && e.contains('@') => e,
        _ => return Err(reject("email must be provided and contain @")),
    };

    let login = match req.login {
        Some(l) if !l.is_empty() && !l.chars().any(char::is_whitespace) => l,
        _ => return Err(reject("login must not be blank or contain whitespace")),
    };

    let birthday = match req.birthday {
        Some(b) if b <= today => b,
        Some(_) => return Err(reject("birthday must not be in the future")),
        None => return Err(reject("birthday is required")),
    };

    let name = match req.name {
        Some(n) if !n.trim().is_empty() => n,
        _ => {
            debug!(login = %login, "blank name replaced with login");
            login.clone()
        },
    };

    Ok(UserFields { email, login, name, birthday })
}

fn reject(msg: &str) -> AppError {
    warn!(error = msg, "user validation failed");
    AppError::validation(msg)
}
