mod command;
mod config;
mod document;
mod edit;
mod input;
mod keys;
mod motion;
mod row;
mod session;
mod theme;
mod types;
mod viewport;

pub use config::load_config;
pub use document::Document;
pub use keys::KeyDecoder;
pub use session::Session;
pub use types::Editor;
pub use viewport::Viewport;

#[cfg(test)]
pub(crate) use types::tests::editor_with;
