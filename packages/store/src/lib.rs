pub mod admin;
pub mod error;
pub mod models;
pub mod session;
pub mod todos;

mod file_store;
mod memory;

pub use error::StoreError;
pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use models::{
    AuthResponse, Priority, Project, ProjectData, ProjectList, ProjectResponse, Role, SignInData,
    SignUpData, SystemStats, TaskData, TaskResponse, Todo, User, UserStatus,
};
pub use session::{Session, SessionStore};
pub use todos::{ProjectFilter, StatusFilter, TodoList};
