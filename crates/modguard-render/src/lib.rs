//! Rendering utilities for terminals and CI surfaces (text, Checkstyle, Markdown, GitHub
//! annotations).

#![forbid(unsafe_code)]

mod checkstyle;
mod gha;
mod markdown;
mod model;
mod text;

pub use checkstyle::render_checkstyle;
pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{RenderableData, RenderableIssue, RenderableReport, RenderableVerdictStatus};
pub use text::render_text;
