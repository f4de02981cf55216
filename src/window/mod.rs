pub mod buffer;
pub mod manager;

pub use buffer::NumberWindow;
pub use manager::{IngestOutcome, WindowManager};
