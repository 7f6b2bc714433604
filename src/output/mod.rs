// src/output/mod.rs
//! What the CLI shows the user about a pull before or instead of saving.

mod preview;

pub use preview::{ChangeLine, ChangePreview};
