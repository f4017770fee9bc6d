//! Remote stage gateway.
//!
//! The launch-kit pipeline has three remote stages: market analysis,
//! strategy (SEO plus creative variants) and the launch plan. [`StageGateway`]
//! is the contract the workflow engine drives; [`HttpStageGateway`] speaks the
//! stage service's JSON-over-HTTP protocol and validates every response shape
//! before handing it on. Image previews go through [`PreviewRenderer`].

mod http_client;
mod http_gateway;
mod preview;
mod types;
mod validate;

pub use http_client::HttpClient;
pub use http_gateway::HttpStageGateway;
pub use preview::{HttpPreviewRenderer, PreviewImage, PreviewRenderer};
pub use types::{AnalysisResponse, StageGateway};
