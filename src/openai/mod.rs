//! Blocking OpenAI-compatible API helpers: request shapes and the client that
//! sends them.

/// Speech-to-text request shape.
pub mod audio;
/// Chat and vision request shapes.
pub mod chat;
/// Remote client.
pub mod client;
/// Image-generation request shape.
pub mod images;

pub use audio::TranscriptionRequest;
pub use chat::{ChatMessage, ChatRequest, ContentPart, MessageContent, Role, image_data_url};
pub use client::OpenAiClient;
pub use images::ImageRequest;
