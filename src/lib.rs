pub mod client;
pub mod error;
pub mod render;
pub mod templates;
pub mod tree;
