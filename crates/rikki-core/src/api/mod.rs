pub mod client;

pub use client::{ChatReply, ChatTransport, EcoApiClient, ImageAnalysis, ImageUpload};
