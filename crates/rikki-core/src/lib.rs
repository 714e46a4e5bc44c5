pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod scheduler;
pub mod session;
pub mod state;

// Re-export main types for convenience
pub use api::{ChatReply, ChatTransport, EcoApiClient, ImageAnalysis, ImageUpload};
pub use config::Config;
pub use error::{Error, ImageAnalysisError, Result, TransportError};
pub use navigation::{Navigator, Screen};
pub use scheduler::{FixedScheduler, ReplyScheduler, SeededScheduler};
pub use session::{ChatSession, ReplyMode, SessionBuilder, SessionEvent};
pub use state::{ChatMessage, ChatRole};
