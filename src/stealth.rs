use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::page::Page as CrPage;

use crate::error::{Error, Result};

/// The user-agent string to use in stealth mode (Chrome 145 on macOS).
pub const STEALTH_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/145.0.0.0 Safari/537.36";

/// Key-only stealth args. chromiumoxide adds the `--` prefix automatically.
pub fn stealth_key_args() -> Vec<&'static str> {
    vec![
        "disable-infobars",
        "disable-default-apps",
        "disable-component-update",
        "no-first-run",
    ]
}

/// Key-value stealth args as tuples.
pub fn stealth_kv_args() -> Vec<(&'static str, &'static str)> {
    vec![
        ("disable-blink-features", "AutomationControlled"),
        ("user-agent", STEALTH_USER_AGENT),
    ]
}

/// Register the evasion script so it runs before any site JS, in this page and
/// every frame it loads.
pub async fn apply_stealth(page: &CrPage) -> Result<()> {
    let params = AddScriptToEvaluateOnNewDocumentParams::new(STEALTH_JS);
    page.execute(params)
        .await
        .map_err(|e| Error::JsError(format!("Failed to inject stealth scripts: {e}")))?;
    Ok(())
}

/// Login portals refuse sessions that look automated; hide the usual tells.
static STEALTH_JS: &str = r#"
Object.defineProperty(Navigator.prototype, 'webdriver', {
    get: () => false,
    configurable: true,
    enumerable: true,
});

if (!window.chrome) {
    window.chrome = { runtime: {}, loadTimes: function() { return {}; }, csi: function() { return {}; } };
}

Object.defineProperty(Navigator.prototype, 'languages', {
    get: () => ['en-US', 'en'],
    configurable: true,
});

const originalQuery = window.navigator.permissions && window.navigator.permissions.query;
if (originalQuery) {
    window.navigator.permissions.query = (parameters) =>
        parameters.name === 'notifications'
            ? Promise.resolve({ state: Notification.permission })
            : originalQuery.call(window.navigator.permissions, parameters);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_is_not_headless() {
        assert!(!STEALTH_USER_AGENT.contains("Headless"));
        assert!(stealth_kv_args().contains(&("user-agent", STEALTH_USER_AGENT)));
    }
}
