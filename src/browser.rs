use chromiumoxide::browser::{Browser as CrBrowser, BrowserConfig as CrBrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;
use tracing::{debug, info};

use crate::config::{BrowserSessionConfig, SessionBuilder};
use crate::error::{Error, Result};
use crate::stealth;

/// Chrome flags that improve performance without affecting functionality.
const PERF_ARGS: &[&str] = &[
    "disable-gpu",
    "disable-extensions",
    "metrics-recording-only",
    "mute-audio",
    "no-default-browser-check",
    "disable-client-side-phishing-detection",
    "disable-popup-blocking",
    "disable-prompt-on-repost",
];

/// Keeps cross-origin iframes in the embedding page's renderer so a page-level
/// CDP client can reach into them.
const CROSS_ORIGIN_IFRAME_KEY_ARGS: &[&str] = &["disable-site-isolation-trials"];
const CROSS_ORIGIN_IFRAME_KV_ARGS: &[(&str, &str)] =
    &[("disable-features", "IsolateOrigins,site-per-process")];

/// Flag-only args for a launch config. chromiumoxide adds the `--` prefix itself.
pub fn key_args(config: &BrowserSessionConfig) -> Vec<&'static str> {
    let mut args: Vec<&'static str> = PERF_ARGS.to_vec();
    if config.cross_origin_iframes {
        args.extend_from_slice(CROSS_ORIGIN_IFRAME_KEY_ARGS);
    }
    if config.stealth {
        args.extend(stealth::stealth_key_args());
    }
    args
}

/// `--key=value` args for a launch config.
pub fn kv_args(config: &BrowserSessionConfig) -> Vec<(&'static str, &'static str)> {
    let mut args = Vec::new();
    if config.cross_origin_iframes {
        args.extend_from_slice(CROSS_ORIGIN_IFRAME_KV_ARGS);
    }
    if config.stealth {
        args.extend(stealth::stealth_kv_args());
    }
    args
}

/// One locally launched Chromium the agent attaches to over CDP.
pub struct BrowserSession {
    browser: CrBrowser,
    stealth: bool,
    default_timeout: std::time::Duration,
    _handler_task: tokio::task::JoinHandle<()>,
}

impl BrowserSession {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Launch a browser with the given configuration.
    pub async fn launch(config: BrowserSessionConfig) -> Result<Self> {
        let mut builder = CrBrowserConfig::builder();

        if config.headless {
            builder = builder.new_headless_mode().no_sandbox();
        } else {
            builder = builder.with_head().no_sandbox();
        }

        for arg in key_args(&config) {
            builder = builder.arg(arg);
        }
        for arg in kv_args(&config) {
            builder = builder.arg(arg);
        }

        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder = builder.viewport(Viewport {
            width: config.viewport_width,
            height: config.viewport_height,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: false,
            has_touch: false,
        });

        let cr_config = builder
            .build()
            .map_err(|e| Error::LaunchError(e.to_string()))?;

        let (browser, mut handler) = CrBrowser::launch(cr_config)
            .await
            .map_err(|e| Error::LaunchError(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        info!(
            headless = config.headless,
            cross_origin_iframes = config.cross_origin_iframes,
            cdp_url = %browser.websocket_address(),
            "browser session launched"
        );

        Ok(Self {
            browser,
            stealth: config.stealth,
            default_timeout: config.default_timeout,
            _handler_task: handler_task,
        })
    }

    /// DevTools websocket URL the agent connects to.
    pub fn cdp_url(&self) -> &str {
        self.browser.websocket_address()
    }

    /// Open the first tab at `url`, with stealth scripts in place before any site JS
    /// runs, so the agent attaches to a ready page.
    pub async fn open_start_page(&self, url: &str) -> Result<()> {
        let cr_page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))?;

        if self.stealth {
            stealth::apply_stealth(&cr_page).await?;
        }

        tokio::time::timeout(self.default_timeout, cr_page.goto(url))
            .await
            .map_err(|_| Error::NavigationError(format!("timed out opening {url}")))?
            .map_err(|e| Error::NavigationError(e.to_string()))?;

        debug!(url, "start page ready");
        Ok(())
    }

    /// Close the browser and wait for the process to exit.
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        self.browser.wait().await?;
        Ok(())
    }
}
