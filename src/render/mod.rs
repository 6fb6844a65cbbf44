mod client;
mod types;
pub mod xml;

pub use client::{AdsRenderClient, DocumentRenderer};
pub use types::{RenderRequest, RenderResponse, TemplateName};
