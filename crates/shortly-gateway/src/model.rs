mod url;

pub use url::{ApiResponse, HealthResponse, SaveUrlRequest};
