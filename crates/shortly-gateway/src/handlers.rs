mod health;
mod url;

pub use health::health_handler;
pub use url::{redirect_handler, save_url_handler, MAX_GENERATE_ATTEMPTS};
