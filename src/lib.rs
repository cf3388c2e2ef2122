//! # EconTutor backend core
//!
//! Backend for an economics tutoring assistant: a chat surface, a policy
//! simulator and a data visualization panel, all backed by one external
//! chat-completions endpoint.
//!
//! ## Architecture
//!
//! ```text
//! User action → prompt (build instruction)
//!             → llm (completion endpoint)
//!             → extract / chart (heuristic recovery, always-degrade)
//!             → api (well-formed data + optional error string)
//! ```
//!
//! The model's natural-language formatting is not contractually structured,
//! so the recovery layers are defensive by construction: every path has a
//! non-empty fallback, and the `api` module never returns a hard failure to
//! the presentation layer.

pub mod api;
pub mod chart;
pub mod concepts;
pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod prompt;
pub mod types;

pub use api::{ApiResponse, AppState, RequestPhase, Surface, TutorApi};
pub use config::{load_config, validate_environment, Config};
pub use error::{TutorError, TutorResult};
pub use types::{ChartKind, ChatMessage, PolicyKind, PolicySimulation, Role, VisualizationData};
