use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::widget::mount::CancellationToken;

// ============================================================================
// Host environment seam
// ============================================================================

/// Side effects that belong to the embedding browser rather than the widget:
/// loading external scripts, navigation, globals registered by third-party
/// runtimes, and bot-mitigation tokens.
pub trait HostEnvironment {
    /// Load an external script and report when it has finished loading.
    fn load_script(&mut self, src: &str) -> Result<(), String>;

    /// Navigate the current page.
    fn navigate(&mut self, url: &str);

    /// Open `url` in a new browsing context.
    fn open_new_tab(&mut self, url: &str);

    /// Invoke a global entry point registered by an external script
    /// (e.g. `renderReactApp(mount, payload)`).
    fn call_global(&mut self, name: &str, mount_selector: &str, payload: &Value) -> Result<(), String>;

    /// Obtain a challenge token from the bot-mitigation client.
    fn bot_token(&mut self, site_key: &str, action: &str) -> Result<String, String>;
}

/// One observable side effect performed through a [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum HostEffect {
    ScriptLoaded { src: String },
    ScriptFailed { src: String },
    Navigated { url: String },
    OpenedTab { url: String },
    GlobalCalled { name: String, mount: String, payload: Value },
    TokenIssued { site_key: String, action: String },
}

/// Headless host that records effects instead of performing them.
///
/// Scripts load successfully unless listed in `failing_scripts`; globals are
/// only callable once registered; bot tokens are issued when `bot_token` is set.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub effects: Vec<HostEffect>,
    pub failing_scripts: HashSet<String>,
    pub globals: HashSet<String>,
    pub bot_token: Option<String>,
    /// Cancelled once the named script has loaded.
    pub cancel_after_script: Option<(String, CancellationToken)>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global(mut self, name: &str) -> Self {
        self.globals.insert(name.to_string());
        self
    }

    pub fn with_failing_script(mut self, src: &str) -> Self {
        self.failing_scripts.insert(src.to_string());
        self
    }

    pub fn with_bot_token(mut self, token: &str) -> Self {
        self.bot_token = Some(token.to_string());
        self
    }

    pub fn cancelling_after_script(mut self, src: &str, token: CancellationToken) -> Self {
        self.cancel_after_script = Some((src.to_string(), token));
        self
    }

    pub fn navigations(&self) -> Vec<&str> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                HostEffect::Navigated { url } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl HostEnvironment for RecordingHost {
    fn load_script(&mut self, src: &str) -> Result<(), String> {
        if self.failing_scripts.contains(src) {
            self.effects.push(HostEffect::ScriptFailed { src: src.to_string() });
            return Err(format!("script {} failed to load", src));
        }
        self.effects.push(HostEffect::ScriptLoaded { src: src.to_string() });
        if let Some((watched, token)) = &self.cancel_after_script {
            if watched == src {
                token.cancel();
            }
        }
        Ok(())
    }

    fn navigate(&mut self, url: &str) {
        self.effects.push(HostEffect::Navigated { url: url.to_string() });
    }

    fn open_new_tab(&mut self, url: &str) {
        self.effects.push(HostEffect::OpenedTab { url: url.to_string() });
    }

    fn call_global(&mut self, name: &str, mount_selector: &str, payload: &Value) -> Result<(), String> {
        if !self.globals.contains(name) {
            return Err(format!("global '{}' is not registered", name));
        }
        self.effects.push(HostEffect::GlobalCalled {
            name: name.to_string(),
            mount: mount_selector.to_string(),
            payload: payload.clone(),
        });
        Ok(())
    }

    fn bot_token(&mut self, site_key: &str, action: &str) -> Result<String, String> {
        let token = self
            .bot_token
            .clone()
            .ok_or_else(|| "bot mitigation client is not loaded".to_string())?;
        self.effects.push(HostEffect::TokenIssued {
            site_key: site_key.to_string(),
            action: action.to_string(),
        });
        Ok(token)
    }
}
