use std::time::Duration;

use serde::Serialize;

use crate::browser::BrowserSession;
use crate::error::Result;

pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Browser tools the agent is allowed to use, in the order they are offered.
pub const DEFAULT_TOOLS: &[&str] = &[
    "navigate",
    "click",
    "input_text",
    "select_dropdown",
    "scroll",
    "switch_frame",
    "upload_file",
    "go_back",
    "done",
];

#[derive(Debug, Clone, Serialize)]
pub struct BrowserSessionConfig {
    pub headless: bool,
    pub stealth: bool,
    /// Keep cross-origin iframes reachable so embedded application forms can be filled.
    pub cross_origin_iframes: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub chrome_path: Option<String>,
    /// Timeout for opening the start page (default: 30s).
    #[serde(skip)]
    pub default_timeout: Duration,
}

impl Default for BrowserSessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            stealth: true,
            cross_origin_iframes: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chrome_path: None,
            default_timeout: Duration::from_secs(30),
        }
    }
}

pub struct SessionBuilder {
    config: BrowserSessionConfig,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            config: BrowserSessionConfig::default(),
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn stealth(mut self, stealth: bool) -> Self {
        self.config.stealth = stealth;
        self
    }

    pub fn cross_origin_iframes(mut self, enabled: bool) -> Self {
        self.config.cross_origin_iframes = enabled;
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    pub fn chrome_path(mut self, path: impl Into<String>) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.default_timeout = timeout;
        self
    }

    pub fn build_config(self) -> BrowserSessionConfig {
        self.config
    }

    pub async fn launch(self) -> Result<BrowserSession> {
        BrowserSession::launch(self.build_config()).await
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered set of tool names; duplicates are dropped on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ToolSet(Vec<String>);

impl ToolSet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, tool: impl Into<String>) -> Self {
        let tool = tool.into();
        if !self.0.contains(&tool) {
            self.0.push(tool);
        }
        self
    }

    pub fn contains(&self, tool: &str) -> bool {
        self.0.iter().any(|t| t == tool)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        DEFAULT_TOOLS.iter().fold(Self::empty(), |set, t| set.with(*t))
    }
}

/// Everything the agent is configured with besides the task itself.
#[derive(Debug, Clone, Serialize)]
pub struct AgentConfig {
    pub model: String,
    pub browser: BrowserSessionConfig,
    pub tools: ToolSet,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            browser: BrowserSessionConfig::default(),
            tools: ToolSet::default(),
        }
    }
}
