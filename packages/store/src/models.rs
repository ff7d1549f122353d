//! # Domain models exchanged with the Taskly backend
//!
//! Every type here is `Serialize + Deserialize` and uses the backend's camelCase
//! field names on the wire.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`SignUpData`] / [`SignInData`] | Request bodies for `POST /sign-up` and `POST /sign-in`. |
//! | [`AuthResponse`] | Token plus profile fields returned by both auth endpoints. Accepts the flat and the nested (`user: {..}`) response shapes. |
//! | [`Todo`] | A workspace todo with priority, optional due date and tags. |
//! | [`Project`] | A project card in the workspace sidebar (name, colour, task count). |
//! | [`ProjectData`] / [`ProjectResponse`] / [`ProjectList`] | Project creation payload and the backend's replies. |
//! | [`TaskData`] / [`TaskResponse`] | Task creation payload and the backend's acknowledgement. |
//! | [`User`] / [`SystemStats`] | Admin panel rows and counters. |
//!
//! ## Lenient fields
//!
//! The backend has been seen sending `id` and `age` either as numbers or as
//! strings. [`AuthResponse`] and [`ProjectResponse`] accept both.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Body of `POST /sign-up`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignUpData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: u32,
}

/// Body of `POST /sign-in`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignInData {
    pub email: String,
    pub password: String,
}

/// Token and profile returned by the auth endpoints.
///
/// Serializes flat. A password echoed back by the backend is dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "AuthResponseWire")]
pub struct AuthResponse {
    pub token: String,
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Deserialize)]
struct AuthUserFields {
    #[serde(default, deserialize_with = "string_or_number")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    age: Option<u32>,
    #[serde(default)]
    role: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AuthResponseWire {
    Nested {
        token: String,
        user: AuthUserFields,
    },
    Flat {
        token: String,
        #[serde(flatten)]
        user: AuthUserFields,
    },
}

impl From<AuthResponseWire> for AuthResponse {
    fn from(wire: AuthResponseWire) -> Self {
        let (token, user) = match wire {
            AuthResponseWire::Nested { token, user } | AuthResponseWire::Flat { token, user } => {
                (token, user)
            }
        };
        Self {
            token,
            id: user.id,
            name: user.name,
            email: user.email,
            age: user.age,
            role: user.role,
        }
    }
}

impl AuthResponse {
    /// Name to greet the user with, falling back to email if name is empty.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Todo priority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// A workspace todo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Order carries no meaning.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A project as shown in the workspace sidebar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub task_count: u32,
}

/// Body of `POST /projects`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Project record returned by `POST /projects` and `GET /projects/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectResponse {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Reply of `GET /projects`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectList {
    #[serde(default, alias = "products")]
    pub projects: Vec<ProjectData>,
}

/// Body of `POST /tasks`, also the element type of `GET /tasks`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskData {
    pub name_task: String,
    pub description: String,
    pub status_task: String,
    pub priority: Priority,
    pub due_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Acknowledgement returned by task endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Account status shown in the admin panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

/// Account role shown in the admin panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Moderator,
}

/// A row of the admin users table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    pub last_login: NaiveDateTime,
    pub tasks: u32,
    pub projects: u32,
    pub role: Role,
}

/// Counters for the admin dashboard. Storage figures are in GB.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub total_users: u64,
    pub active_users: u64,
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub storage_used: f64,
    pub storage_total: f64,
    pub projects: u64,
    pub teams: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Int(n) => n.to_string(),
        StringOrNumber::Float(n) => n.to_string(),
    })
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrNumber::Int(n)) => u32::try_from(n).map(Some).map_err(de::Error::custom),
        Some(StringOrNumber::Float(n)) if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => {
            Ok(Some(n as u32))
        }
        Some(StringOrNumber::Float(n)) => Err(de::Error::custom(format!("invalid age: {n}"))),
        Some(StringOrNumber::String(s)) if s.trim().is_empty() => Ok(None),
        Some(StringOrNumber::String(s)) => s.trim().parse().map(Some).map_err(de::Error::custom),
    }
}
