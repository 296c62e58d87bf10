use jiff::civil::Date;
use serde::{Deserialize, Serialize};

pub type RecordId = u64;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub release_date: Date,
    /// Minutes.
    pub duration: i32,
}

/// Body of `POST /films` and `PUT /films`. Presence of each field is checked by the store.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmRequest {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<Date>,
    pub duration: Option<i32>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: Date,
}

/// Body of `POST /users` and `PUT /users`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub id: Option<RecordId>,
    pub email: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<Date>,
}
