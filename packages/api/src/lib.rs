//! # API crate — typed client for the Taskly backend
//!
//! Everything the Taskly front ends need to talk to the REST backend: request
//! assembly and error normalization in one place, and a thin service method
//! per endpoint on top.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: URL joining, bearer/content-type headers, dispatch, decoding |
//! | [`error`] | [`ApiError`] variants, [`ErrorKind`], and the user-facing message rendering |
//! | [`navigation`] | [`Navigator`] seam used to send the user back to `/sign-in` on 401 |
//! | [`settings`] | [`Settings`] loaded from defaults, `taskly.toml` and `TASKLY_*` env vars |
//! | [`auth`] | Sign-up/sign-in/sign-out and the sign-up form validation rules |
//!
//! ## Endpoints
//!
//! | Method | Call | Returns |
//! |--------|------|---------|
//! | `POST /sign-up` | [`ApiClient::sign_up`] | [`AuthResponse`], saved to the session |
//! | `POST /sign-in` | [`ApiClient::sign_in`] | [`AuthResponse`], saved to the session |
//! | `POST /projects` | [`ApiClient::create_project`] | [`ProjectResponse`] |
//! | `GET /projects` | [`ApiClient::list_projects`] | [`ProjectList`] |
//! | `GET /projects/{id}` | [`ApiClient::get_project`] | [`ProjectResponse`] |
//! | `POST /tasks` | [`ApiClient::create_task`] | [`TaskResponse`] |
//! | `GET /tasks` | [`ApiClient::list_tasks`] | `Vec<`[`TaskData`]`>` |
//! | `GET /tasks/{id}` | [`ApiClient::get_task`] | [`TaskData`] |

pub mod auth;
pub mod client;
pub mod error;
pub mod navigation;
pub mod settings;

mod projects;
mod tasks;

pub use client::{join_url, ApiClient, Body, PreparedRequest, RequestConfig};
pub use error::{ApiError, ErrorKind};
pub use navigation::{History, LogNavigator, Navigator, SIGN_IN_PATH};
pub use settings::Settings;

pub use store::{
    AuthResponse, ProjectData, ProjectList, ProjectResponse, Session, SignInData, SignUpData,
    TaskData, TaskResponse,
};
