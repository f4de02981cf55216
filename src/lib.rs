pub mod config;
pub mod errors;
pub mod server;
pub mod upstream;
pub mod window;

// Re-export commonly used types
pub use config::ServerConfig;
pub use errors::{ServiceError, UpstreamError};
pub use server::{router, ApiServer, AppState};
pub use upstream::NumberClient;
pub use window::{IngestOutcome, NumberWindow, WindowManager};
