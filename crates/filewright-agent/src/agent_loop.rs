//! Agent loop — the human ↔ LLM ↔ tool state machine.
//!
//! The loop waits for a line of human input, sends the whole conversation to
//! the provider, runs any tool requests in the reply, and keeps calling the
//! provider on its own for as long as the model keeps asking for tools.
//! A reply with no tool requests hands control back to the human.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use filewright_core::config::AgentConfig;
use filewright_core::error::{ConversationError, ProviderError};
use filewright_core::types::ContentBlock;
use filewright_core::Conversation;
use filewright_providers::traits::{LlmProvider, LlmRequestConfig};

use crate::tools::default_registry;
use crate::tools::registry::ToolRegistry;

pub use filewright_core::config::DEFAULT_MAX_CHAIN_ROUNDS;

// ─────────────────────────────────────────────
// State, errors, settings
// ─────────────────────────────────────────────

/// Where the loop is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting for the next line of human input.
    AwaitingHuman,
    /// Inside a turn: inferring or executing tools.
    Running,
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Conversation invariant broken: {0}")]
    Conversation(#[from] ConversationError),

    /// The model kept requesting tools for `limit` rounds in a row.
    #[error("Stopped after {limit} consecutive tool rounds; waiting for your input")]
    ChainLimitExceeded { limit: u32 },
}

/// Per-session knobs for the loop.
#[derive(Clone, Debug)]
pub struct AgentSettings {
    /// `None` uses the provider's default model.
    pub model: Option<String>,
    pub request_config: LlmRequestConfig,
    pub max_chain_rounds: u32,
}

impl AgentSettings {
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            model: Some(config.model.clone()).filter(|m| !m.is_empty()),
            request_config: LlmRequestConfig {
                max_tokens: config.max_tokens,
                system: config.system_prompt.clone(),
            },
            max_chain_rounds: config.max_chain_rounds,
        }
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default())
    }
}

/// What one human turn cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnSummary {
    /// Inference calls made.
    pub rounds: u32,
    /// Tool requests executed.
    pub tool_calls: usize,
}

// ─────────────────────────────────────────────
// Human channel
// ─────────────────────────────────────────────

/// The human side of the conversation: where input comes from and where
/// assistant output goes.
pub trait HumanChannel {
    /// Read one line. `Ok(None)` means the input is closed.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Show an assistant text block.
    fn show_text(&mut self, text: &str);

    /// Show that a tool is about to run.
    fn show_tool_request(&mut self, name: &str, arguments: &Map<String, Value>);

    /// Show a loop-level notice (e.g. the chain limit was hit).
    fn notice(&mut self, text: &str);
}

// ─────────────────────────────────────────────
// AgentLoop
// ─────────────────────────────────────────────

pub struct AgentLoop {
    provider: Arc<dyn LlmProvider>,
    tools: ToolRegistry,
    conversation: Conversation,
    state: LoopState,
    /// Settings model, or the provider's default when none is set.
    model: String,
    settings: AgentSettings,
}

impl AgentLoop {
    /// Create a loop with the filesystem tools rooted at `workspace`.
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        workspace: impl Into<PathBuf>,
        settings: AgentSettings,
    ) -> Self {
        Self::with_registry(provider, default_registry(workspace), settings)
    }

    /// Create a loop with a caller-built registry.
    pub fn with_registry(
        provider: Arc<dyn LlmProvider>,
        tools: ToolRegistry,
        settings: AgentSettings,
    ) -> Self {
        let model = settings
            .model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string());
        info!(
            provider = provider.display_name(),
            model = %model,
            tools = tools.len(),
            "agent loop ready"
        );
        Self {
            provider,
            tools,
            conversation: Conversation::new(),
            state: LoopState::AwaitingHuman,
            model,
            settings,
        }
    }

    /// Drive the loop until the human channel closes.
    ///
    /// A read error ends the session like end of input does. Provider
    /// failures are returned; a chain limit is reported on the channel and
    /// the loop keeps going.
    pub async fn run(&mut self, channel: &mut dyn HumanChannel) -> Result<(), AgentError> {
        info!("agent loop started");
        loop {
            let line = match channel.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    info!("input closed, agent loop exiting");
                    return Ok(());
                }
                Err(e) => {
                    warn!(error = %e, "failed to read input, agent loop exiting");
                    return Ok(());
                }
            };

            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            match self.run_turn(text, channel).await {
                Ok(summary) => info!(
                    rounds = summary.rounds,
                    tool_calls = summary.tool_calls,
                    "turn complete"
                ),
                Err(e @ AgentError::ChainLimitExceeded { .. }) => {
                    warn!(error = %e, "tool chain cut short");
                    channel.notice(&e.to_string());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One AwaitingHuman → Running → AwaitingHuman cycle for `text`.
    ///
    /// Dropping the returned future mid-turn leaves every fully appended
    /// message in place and the loop back in `AwaitingHuman`.
    pub async fn run_turn(
        &mut self,
        text: &str,
        channel: &mut dyn HumanChannel,
    ) -> Result<TurnSummary, AgentError> {
        let Self {
            provider,
            tools,
            conversation,
            state,
            model,
            settings,
        } = self;

        let _running = RunningGuard::enter(state);
        let turn = Turn {
            provider: &**provider,
            tools: &*tools,
            conversation,
            model: model.as_str(),
            settings: &*settings,
        };
        turn.drive(text, channel).await
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

// ─────────────────────────────────────────────
// Turn
// ─────────────────────────────────────────────

/// Holds `Running` for the life of a turn and restores `AwaitingHuman` on drop.
struct RunningGuard<'a>(&'a mut LoopState);

impl<'a> RunningGuard<'a> {
    fn enter(state: &'a mut LoopState) -> Self {
        *state = LoopState::Running;
        Self(state)
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        *self.0 = LoopState::AwaitingHuman;
    }
}

/// The parts of an [`AgentLoop`] one turn works on.
struct Turn<'a> {
    provider: &'a dyn LlmProvider,
    tools: &'a ToolRegistry,
    conversation: &'a mut Conversation,
    model: &'a str,
    settings: &'a AgentSettings,
}

impl Turn<'_> {
    async fn drive(
        self,
        text: &str,
        channel: &mut dyn HumanChannel,
    ) -> Result<TurnSummary, AgentError> {
        self.conversation.push_human_text(text);

        let limit = self.settings.max_chain_rounds.max(1);
        let specs = self.tools.specs();
        let mut summary = TurnSummary::default();

        loop {
            summary.rounds += 1;
            debug!(
                round = summary.rounds,
                messages = self.conversation.len(),
                "calling LLM"
            );

            let reply = self
                .provider
                .chat(
                    self.conversation.messages(),
                    &specs,
                    self.model,
                    &self.settings.request_config,
                )
                .await?;
            self.conversation.push_assistant(reply)?;

            let outcomes = self.dispatch_last(channel).await;
            if outcomes.is_empty() {
                return Ok(summary);
            }

            summary.tool_calls += outcomes.len();
            self.conversation.push_tool_outcomes(outcomes)?;

            if summary.rounds >= limit {
                return Err(AgentError::ChainLimitExceeded { limit });
            }
        }
    }

    /// Surface text and execute every tool request of the newest message,
    /// returning one outcome per request in request order.
    async fn dispatch_last(&self, channel: &mut dyn HumanChannel) -> Vec<ContentBlock> {
        let mut outcomes = Vec::new();
        let Some(reply) = self.conversation.last() else {
            return outcomes;
        };

        for block in &reply.content {
            match block {
                ContentBlock::Text { text } => channel.show_text(text),
                ContentBlock::ToolRequest {
                    id,
                    name,
                    arguments,
                } => {
                    channel.show_tool_request(name, arguments);
                    info!(tool = %name, id = %id, "executing tool call");

                    let output = self.tools.execute(name, arguments).await;
                    debug!(
                        tool = %name,
                        is_error = output.is_error,
                        result_len = output.payload.len(),
                        "tool result"
                    );
                    outcomes.push(ContentBlock::tool_outcome(
                        id.clone(),
                        output.payload,
                        output.is_error,
                    ));
                }
                ContentBlock::ToolOutcome { .. } => {}
            }
        }
        outcomes
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use filewright_core::types::{Message, Role, ToolSpec};
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays scripted replies and records what it was sent.
    struct MockProvider {
        replies: Mutex<VecDeque<Result<Message, ProviderError>>>,
        /// Conversation length seen by each call.
        seen: Mutex<Vec<usize>>,
        tool_names: Mutex<Vec<Vec<String>>>,
        models: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn new(replies: Vec<Result<Message, ProviderError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::new(Vec::new()),
                tool_names: Mutex::new(Vec::new()),
                models: Mutex::new(Vec::new()),
            }
        }

        fn texts(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Ok(Message::assistant_text(*t))).collect())
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmProvider for MockProvider {
        async fn chat(
            &self,
            messages: &[Message],
            tools: &[ToolSpec],
            model: &str,
            _config: &LlmRequestConfig,
        ) -> Result<Message, ProviderError> {
            self.seen.lock().unwrap().push(messages.len());
            self.models.lock().unwrap().push(model.to_string());
            self.tool_names
                .lock()
                .unwrap()
                .push(tools.iter().map(|t| t.name.clone()).collect());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Message::assistant_text("(script exhausted)")))
        }

        fn default_model(&self) -> &str {
            "mock-model"
        }

        fn display_name(&self) -> &str {
            "MockProvider"
        }
    }

    /// Feeds scripted lines and captures everything shown.
    #[derive(Default)]
    struct ScriptedChannel {
        lines: VecDeque<io::Result<Option<String>>>,
        reads: usize,
        texts: Vec<String>,
        tool_requests: Vec<String>,
        notices: Vec<String>,
    }

    impl ScriptedChannel {
        fn with_lines(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|l| Ok(Some(l.to_string()))).collect(),
                ..Default::default()
            }
        }
    }

    impl HumanChannel for ScriptedChannel {
        fn read_line(&mut self) -> io::Result<Option<String>> {
            self.reads += 1;
            self.lines.pop_front().unwrap_or(Ok(None))
        }

        fn show_text(&mut self, text: &str) {
            self.texts.push(text.to_string());
        }

        fn show_tool_request(&mut self, name: &str, _arguments: &Map<String, Value>) {
            self.tool_requests.push(name.to_string());
        }

        fn notice(&mut self, text: &str) {
            self.notices.push(text.to_string());
        }
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn tool_reply(requests: &[(&str, &str, Value)]) -> Message {
        Message::assistant(
            requests
                .iter()
                .map(|(id, name, a)| ContentBlock::tool_request(*id, *name, args(a.clone())))
                .collect(),
        )
    }

    fn make_loop(provider: Arc<MockProvider>, workspace: &std::path::Path) -> AgentLoop {
        AgentLoop::new(provider, workspace, AgentSettings::default())
    }

    #[tokio::test]
    async fn test_text_reply_returns_to_human() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockProvider::texts(&["Hello there!"]));
        let mut agent = make_loop(provider.clone(), dir.path());
        let mut channel = ScriptedChannel::default();

        let summary = agent.run_turn("hi", &mut channel).await.unwrap();

        assert_eq!(summary, TurnSummary { rounds: 1, tool_calls: 0 });
        assert_eq!(agent.state(), LoopState::AwaitingHuman);
        assert_eq!(channel.texts, vec!["Hello there!"]);
        let messages = agent.conversation().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::Human);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_two_tool_requests_auto_continue() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "alpha").unwrap();

        let provider = Arc::new(MockProvider::new(vec![
            Ok(tool_reply(&[
                ("t1", "list_files", json!({})),
                ("t2", "read_file", json!({"path": "a.txt"})),
            ])),
            Ok(Message::assistant_text("a.txt says alpha")),
        ]));
        let mut agent = make_loop(provider.clone(), dir.path());
        let mut channel = ScriptedChannel::with_lines(&["what is in a.txt?"]);

        agent.run(&mut channel).await.unwrap();

        // One line, then end of input: no prompt between the two rounds.
        assert_eq!(channel.reads, 2);
        assert_eq!(provider.calls(), 2);
        assert_eq!(*provider.seen.lock().unwrap(), vec![1, 3]);
        assert_eq!(channel.tool_requests, vec!["list_files", "read_file"]);
        assert_eq!(channel.texts, vec!["a.txt says alpha"]);

        let messages = agent.conversation().messages();
        assert_eq!(messages.len(), 4);
        let outcomes = &messages[2];
        assert_eq!(outcomes.role, Role::Human);
        assert_eq!(
            outcomes.content,
            vec![
                ContentBlock::tool_outcome("t1", r#"["a.txt"]"#, false),
                ContentBlock::tool_outcome("t2", "alpha", false),
            ]
        );
    }

    #[tokio::test]
    async fn test_tool_specs_sent_in_registration_order() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockProvider::texts(&["ok"]));
        let mut agent = make_loop(provider.clone(), dir.path());

        agent.run_turn("hi", &mut ScriptedChannel::default()).await.unwrap();

        assert_eq!(
            provider.tool_names.lock().unwrap()[0],
            vec!["read_file", "list_files", "edit_file"]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_becomes_error_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockProvider::new(vec![
            Ok(tool_reply(&[("t1", "teleport", json!({}))])),
            Ok(Message::assistant_text("sorry")),
        ]));
        let mut agent = make_loop(provider, dir.path());

        let summary = agent.run_turn("go", &mut ScriptedChannel::default()).await.unwrap();

        assert_eq!(summary, TurnSummary { rounds: 2, tool_calls: 1 });
        assert_eq!(
            agent.conversation().messages()[2].content,
            vec![ContentBlock::tool_outcome("t1", "Tool not found", true)]
        );
    }

    #[tokio::test]
    async fn test_tool_error_reported_to_model() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dup.txt"), "x x").unwrap();
        let provider = Arc::new(MockProvider::new(vec![
            Ok(tool_reply(&[(
                "t1",
                "edit_file",
                json!({"path": "dup.txt", "old_str": "x", "new_str": "y"}),
            )])),
            Ok(Message::assistant_text("that was ambiguous")),
        ]));
        let mut agent = make_loop(provider, dir.path());

        agent.run_turn("edit", &mut ScriptedChannel::default()).await.unwrap();

        match &agent.conversation().messages()[2].content[0] {
            ContentBlock::ToolOutcome { payload, is_error, .. } => {
                assert!(*is_error);
                assert!(payload.contains("matches 2 times"));
            }
            other => panic!("expected outcome, got {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(dir.path().join("dup.txt")).unwrap(), "x x");
    }

    #[tokio::test]
    async fn test_chain_limit_returns_control() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockProvider::new(vec![
            Ok(tool_reply(&[("t1", "list_files", json!({}))])),
            Ok(tool_reply(&[("t2", "list_files", json!({}))])),
            Ok(tool_reply(&[("t3", "list_files", json!({}))])),
        ]));
        let settings = AgentSettings {
            max_chain_rounds: 2,
            ..AgentSettings::default()
        };
        let mut agent = AgentLoop::new(provider.clone(), dir.path(), settings);

        let err = agent
            .run_turn("loop forever", &mut ScriptedChannel::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::ChainLimitExceeded { limit: 2 }));
        assert_eq!(provider.calls(), 2);
        assert_eq!(agent.state(), LoopState::AwaitingHuman);
        // human, assistant, outcomes, assistant, outcomes
        let messages = agent.conversation().messages();
        assert_eq!(messages.len(), 5);
        assert!(!messages[4].has_tool_requests());
        assert_eq!(messages[4].role, Role::Human);
    }

    #[tokio::test]
    async fn test_run_reports_chain_limit_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockProvider::new(vec![
            Ok(tool_reply(&[("t1", "list_files", json!({}))])),
            Ok(Message::assistant_text("back to you")),
        ]));
        let settings = AgentSettings {
            max_chain_rounds: 1,
            ..AgentSettings::default()
        };
        let mut agent = AgentLoop::new(provider.clone(), dir.path(), settings);
        let mut channel = ScriptedChannel::with_lines(&["first", "second"]);

        agent.run(&mut channel).await.unwrap();

        assert_eq!(channel.notices.len(), 1);
        assert!(channel.notices[0].contains("1 consecutive tool rounds"));
        assert_eq!(channel.texts, vec!["back to you"]);
        assert_eq!(provider.calls(), 2);
        // The second human line follows the outcome message directly.
        let messages = agent.conversation().messages();
        assert_eq!(messages[2].role, Role::Human);
        assert_eq!(messages[3], Message::human_text("second"));
    }

    #[tokio::test]
    async fn test_blank_lines_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockProvider::texts(&["ok"]));
        let mut agent = make_loop(provider.clone(), dir.path());
        let mut channel = ScriptedChannel::with_lines(&["", "   ", "real"]);

        agent.run(&mut channel).await.unwrap();

        assert_eq!(provider.calls(), 1);
        assert_eq!(agent.conversation().messages()[0], Message::human_text("real"));
    }

    #[tokio::test]
    async fn test_end_of_input_terminates_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockProvider::texts(&[]));
        let mut agent = make_loop(provider.clone(), dir.path());
        let mut channel = ScriptedChannel::default();

        agent.run(&mut channel).await.unwrap();

        assert_eq!(channel.reads, 1);
        assert_eq!(provider.calls(), 0);
        assert!(agent.conversation().is_empty());
    }

    #[tokio::test]
    async fn test_read_error_terminates_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockProvider::texts(&[]));
        let mut agent = make_loop(provider.clone(), dir.path());
        let mut channel = ScriptedChannel::default();
        channel
            .lines
            .push_back(Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone")));

        assert!(agent.run(&mut channel).await.is_ok());
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_protocol_violation_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockProvider::new(vec![Err(
            ProviderError::ProtocolViolation("unknown block".into()),
        )]));
        let mut agent = make_loop(provider.clone(), dir.path());
        let mut channel = ScriptedChannel::with_lines(&["hi", "never read"]);

        let err = agent.run(&mut channel).await.unwrap_err();

        assert!(matches!(
            err,
            AgentError::Provider(ProviderError::ProtocolViolation(_))
        ));
        assert_eq!(channel.reads, 1);
        assert_eq!(agent.state(), LoopState::AwaitingHuman);
        assert_eq!(agent.conversation().len(), 1);
    }

    /// A gateway that never answers.
    struct StalledProvider;

    #[async_trait]
    impl LlmProvider for StalledProvider {
        async fn chat(
            &self,
            _messages: &[Message],
            _tools: &[ToolSpec],
            _model: &str,
            _config: &LlmRequestConfig,
        ) -> Result<Message, ProviderError> {
            std::future::pending().await
        }

        fn default_model(&self) -> &str {
            "stalled"
        }

        fn display_name(&self) -> &str {
            "StalledProvider"
        }
    }

    #[tokio::test]
    async fn test_cancelled_turn_keeps_conversation_and_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut agent = AgentLoop::new(Arc::new(StalledProvider), dir.path(), AgentSettings::default());
        let mut channel = ScriptedChannel::default();

        let result = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            agent.run_turn("hello?", &mut channel),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(agent.state(), LoopState::AwaitingHuman);
        assert_eq!(agent.conversation().len(), 1);
        assert_eq!(agent.conversation().messages()[0], Message::human_text("hello?"));
    }

    #[tokio::test]
    async fn test_cancelled_turn_then_next_turn_proceeds() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockProvider::texts(&["recovered"]));
        let mut agent = make_loop(provider.clone(), dir.path());

        // Cancel before the first poll: nothing is appended.
        drop(agent.run_turn("dropped", &mut ScriptedChannel::default()));
        assert_eq!(agent.state(), LoopState::AwaitingHuman);
        assert!(agent.conversation().is_empty());

        agent.run_turn("again", &mut ScriptedChannel::default()).await.unwrap();
        assert_eq!(agent.conversation().len(), 2);
    }

    #[tokio::test]
    async fn test_model_falls_back_to_provider_default() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockProvider::texts(&["ok"]));
        let settings = AgentSettings {
            model: None,
            ..AgentSettings::default()
        };
        let mut agent = AgentLoop::new(provider.clone(), dir.path(), settings);
        assert_eq!(agent.model(), "mock-model");

        agent.run_turn("hi", &mut ScriptedChannel::default()).await.unwrap();
        assert_eq!(*provider.models.lock().unwrap(), vec!["mock-model"]);
    }

    #[tokio::test]
    async fn test_configured_model_sent_to_provider() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockProvider::texts(&["ok"]));
        let settings = AgentSettings {
            model: Some("claude-custom".into()),
            ..AgentSettings::default()
        };
        let mut agent = AgentLoop::new(provider.clone(), dir.path(), settings);

        agent.run_turn("hi", &mut ScriptedChannel::default()).await.unwrap();
        assert_eq!(*provider.models.lock().unwrap(), vec!["claude-custom"]);
    }

    #[test]
    fn test_settings_from_config() {
        let config = AgentConfig {
            model: "claude-test".into(),
            max_tokens: 2048,
            max_chain_rounds: 5,
            system_prompt: Some("be brief".into()),
            ..AgentConfig::default()
        };
        let settings = AgentSettings::from_config(&config);
        assert_eq!(settings.model.as_deref(), Some("claude-test"));
        assert_eq!(settings.request_config.max_tokens, 2048);
        assert_eq!(settings.request_config.system.as_deref(), Some("be brief"));
        assert_eq!(settings.max_chain_rounds, 5);
        assert_eq!(AgentSettings::default().max_chain_rounds, DEFAULT_MAX_CHAIN_ROUNDS);

        let blank = AgentConfig {
            model: String::new(),
            ..AgentConfig::default()
        };
        assert_eq!(AgentSettings::from_config(&blank).model, None);
    }
}
