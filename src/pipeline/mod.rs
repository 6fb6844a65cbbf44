pub mod fsm;
mod service;
mod types;

pub use fsm::{RequestEvent, RequestState, RequestStateMachine};
pub use service::{RenderOutcome, RenderPipeline, derive_template_name};
pub use types::*;
