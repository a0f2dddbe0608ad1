//! HTTP transport for the shortly alias store.
//!
//! `POST /url` saves a URL under a caller-chosen or generated alias and
//! `GET /{alias}` redirects to the stored URL.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
