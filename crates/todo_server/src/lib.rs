//! REST deployment shape of the to-do list: an axum router exposing the
//! task operations over HTTP, backed by a shared [`TaskService`].
//!
//! [`TaskService`]: todo_core::service::TaskService

pub mod api;

pub use api::{AppState, router};
