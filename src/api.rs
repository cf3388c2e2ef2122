//! The boundary the presentation layer calls into.
//!
//! Every operation returns renderable data plus an optional user-facing
//! error string. Failures never escape as errors: a broken network, a
//! malformed envelope or an unusable chart payload all degrade to a
//! well-formed fallback so the UI can always draw a bubble, a result card
//! or a chart, and surface the error string as a toast.
//!
//! Each surface allows at most one in-flight request, tracked by a phase
//! flag on the shared state (Idle → Requesting → Succeeded | Failed). Each
//! state slot is written only by its own surface's handler.

use crate::chart;
use crate::config::load_config;
use crate::error::{TutorError, TutorResult};
use crate::extract::{extract_description, extract_historical_examples, extract_impacts, Timeframe};
use crate::llm::{CompletionBackend, CompletionOptions, DeepSeekClient};
use crate::prompt;
use crate::types::{
    ChartKind, ChatMessage, ImpactAreas, PolicyKind, PolicySimulation, VisualizationData,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Greeting seeded into every fresh session.
pub const WELCOME_MESSAGE: &str = "欢迎使用经济学AI助手！您可以向我询问任何经济学概念、政策影响或请求数据可视化。\
     试试问我：\"什么是供需平衡？\"";

/// Apology bubble shown when a chat completion fails.
pub const CHAT_FALLBACK_MESSAGE: &str = "抱歉，处理您的请求时出现了错误，请稍后再试。";

const BUSY_MESSAGE: &str = "上一个请求仍在处理中，请稍候再试";

/// Well-formed data plus an optional user-facing error string.
#[derive(Serialize, Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self { data, error: None }
    }

    fn recovered(data: T, error: &TutorError) -> Self {
        Self {
            data,
            error: Some(error.to_string()),
        }
    }

    fn busy(data: T) -> Self {
        Self {
            data,
            error: Some(BUSY_MESSAGE.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Chat,
    Simulator,
    Visualization,
}

impl Surface {
    fn index(self) -> usize {
        match self {
            Surface::Chat => 0,
            Surface::Simulator => 1,
            Surface::Visualization => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    Requesting,
    Succeeded,
    Failed,
}

/// Session-scoped UI state: the message list and the latest result per
/// surface. Single writer per slot; no persistence.
pub struct AppState {
    pub messages: Vec<ChatMessage>,
    pub latest_simulation: Option<PolicySimulation>,
    pub latest_visualization: Option<VisualizationData>,
    phases: [RequestPhase; 3],
}

impl AppState {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
            latest_simulation: None,
            latest_visualization: None,
            phases: [RequestPhase::Idle; 3],
        }
    }

    pub fn phase(&self, surface: Surface) -> RequestPhase {
        self.phases[surface.index()]
    }

    /// Claims the surface for a new request. Returns false while a request
    /// is already outstanding — the caller must bail out without touching
    /// any slot.
    fn try_begin(&mut self, surface: Surface) -> bool {
        if self.phases[surface.index()] == RequestPhase::Requesting {
            return false;
        }
        self.phases[surface.index()] = RequestPhase::Requesting;
        true
    }

    fn finish(&mut self, surface: Surface, succeeded: bool) {
        self.phases[surface.index()] = if succeeded {
            RequestPhase::Succeeded
        } else {
            RequestPhase::Failed
        };
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Application facade: one completion backend, one shared session state.
pub struct TutorApi {
    backend: Box<dyn CompletionBackend>,
    state: Mutex<AppState>,
}

impl TutorApi {
    pub fn new(backend: Box<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            state: Mutex::new(AppState::new()),
        }
    }

    /// Builds the facade against the real completion endpoint configured
    /// from the environment.
    pub fn from_env() -> TutorResult<Self> {
        let client = DeepSeekClient::new(load_config()?)?;
        Ok(Self::new(Box::new(client)))
    }

    /// Read access for the rendering layer.
    pub fn with_state<R>(&self, read: impl FnOnce(&AppState) -> R) -> R {
        let state = self.state.lock().unwrap();
        read(&state)
    }

    /// Sends one user message and appends both sides of the exchange to the
    /// session transcript. Display order follows append order, which
    /// matches submission order since only one request is outstanding.
    pub async fn send_chat_message(&self, content: &str) -> ApiResponse<ChatMessage> {
        {
            let mut state = self.state.lock().unwrap();
            if !state.try_begin(Surface::Chat) {
                return ApiResponse::busy(ChatMessage::assistant(CHAT_FALLBACK_MESSAGE));
            }
            state.messages.push(ChatMessage::user(content));
        }

        let result = self
            .backend
            .complete(prompt::CHAT_SYSTEM_PROMPT, content, CompletionOptions::default())
            .await;

        let mut state = self.state.lock().unwrap();
        match result {
            Ok(reply) => {
                let message = ChatMessage::assistant(reply);
                state.messages.push(message.clone());
                state.finish(Surface::Chat, true);
                ApiResponse::ok(message)
            }
            Err(e) => {
                error!(error = %e, "chat completion failed");
                state.finish(Surface::Chat, false);
                ApiResponse::recovered(ChatMessage::assistant(CHAT_FALLBACK_MESSAGE), &e)
            }
        }
    }

    /// Runs one policy simulation. On completion failure the result is
    /// built from the extraction defaults, so impacts and historical
    /// examples are never empty.
    pub async fn simulate_policy(
        &self,
        kind: PolicyKind,
        params: &HashMap<String, f64>,
    ) -> ApiResponse<PolicySimulation> {
        {
            let mut state = self.state.lock().unwrap();
            if !state.try_begin(Surface::Simulator) {
                return ApiResponse::busy(compose_simulation(kind, ""));
            }
        }

        let user_prompt = prompt::build_simulation_prompt(kind, params);
        let result = self
            .backend
            .complete(
                prompt::SIMULATION_SYSTEM_PROMPT,
                &user_prompt,
                CompletionOptions::analysis(),
            )
            .await;

        let mut state = self.state.lock().unwrap();
        match result {
            Ok(raw) => {
                let simulation = compose_simulation(kind, &raw);
                info!(policy = kind.label(), "simulation completed");
                state.latest_simulation = Some(simulation.clone());
                state.finish(Surface::Simulator, true);
                ApiResponse::ok(simulation)
            }
            Err(e) => {
                warn!(policy = kind.label(), error = %e, "simulation fell back to defaults");
                state.finish(Surface::Simulator, false);
                // Empty input routes every extraction pass to its defaults.
                ApiResponse::recovered(compose_simulation(kind, ""), &e)
            }
        }
    }

    /// Generates one chart dataset. Both a failed completion and an
    /// unusable payload degrade to the error placeholder.
    pub async fn generate_visualization(
        &self,
        kind: &ChartKind,
    ) -> ApiResponse<VisualizationData> {
        {
            let mut state = self.state.lock().unwrap();
            if !state.try_begin(Surface::Visualization) {
                return ApiResponse::busy(chart::error_placeholder(kind));
            }
        }

        let user_prompt = prompt::build_visualization_prompt(kind);
        let result = self
            .backend
            .complete(
                prompt::VISUALIZATION_SYSTEM_PROMPT,
                &user_prompt,
                CompletionOptions::data(),
            )
            .await;

        let mut state = self.state.lock().unwrap();
        let normalized = result.and_then(|raw| chart::normalize_visualization(kind, &raw));
        match normalized {
            Ok(dataset) => {
                state.latest_visualization = Some(dataset.clone());
                state.finish(Surface::Visualization, true);
                ApiResponse::ok(dataset)
            }
            Err(e) => {
                warn!(kind = kind.as_str(), error = %e, "visualization fell back to placeholder");
                state.finish(Surface::Visualization, false);
                ApiResponse::recovered(chart::error_placeholder(kind), &e)
            }
        }
    }
}

fn compose_simulation(kind: PolicyKind, raw: &str) -> PolicySimulation {
    PolicySimulation {
        id: Uuid::new_v4().to_string(),
        name: format!("{}模拟", kind.label()),
        description: extract_description(raw),
        impact_areas: ImpactAreas {
            short_term: extract_impacts(raw, Timeframe::Short),
            medium_term: extract_impacts(raw, Timeframe::Medium),
            long_term: extract_impacts(raw, Timeframe::Long),
        },
        historical_examples: extract_historical_examples(raw),
    }
}
