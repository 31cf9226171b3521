//! Finding, launching and connecting to Chrome.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use courtbot_protocols::DriverError;
use thiserror::Error;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::cdp::{CdpClient, CdpError};

const STARTUP_CHECKS: u32 = 30;
const STARTUP_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Chrome not found. Please install Google Chrome or Chromium.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    #[error(transparent)]
    Cdp(#[from] CdpError),
}

impl From<LaunchError> for DriverError {
    fn from(e: LaunchError) -> Self {
        match e {
            LaunchError::Cdp(inner) => inner.into(),
            other => DriverError::Other(other.to_string()),
        }
    }
}

/// How Chrome is started.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub debug_port: u16,
    /// Profile directory; keeps cookies between runs.
    pub profile_dir: Option<PathBuf>,
    pub headless: bool,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            profile_dir: None,
            headless: true,
        }
    }
}

impl LaunchConfig {
    pub fn profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".courtbot")
                .join("browser-profile")
        })
    }

    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.debug_port),
            format!("--user-data-dir={}", self.profile_dir().display()),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-sync".to_string(),
            "--disable-translate".to_string(),
            "--window-size=1280,900".to_string(),
        ];
        if self.headless {
            args.push("--headless=new".to_string());
        }
        args
    }
}

/// Reuses a Chrome already listening on the debug port, or starts one.
pub struct BrowserLauncher {
    config: LaunchConfig,
    /// Set only when this launcher started Chrome.
    chrome_process: Mutex<Option<Child>>,
}

impl BrowserLauncher {
    pub fn new(config: LaunchConfig) -> Self {
        Self {
            config,
            chrome_process: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Locate a Chrome or Chromium executable.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    async fn is_chrome_running(&self) -> bool {
        reqwest::get(format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok()
    }

    async fn launch_chrome(&self) -> Result<Child, LaunchError> {
        let chrome_path = Self::find_chrome().ok_or(LaunchError::ChromeNotFound)?;
        let profile_dir = self.config.profile_dir();

        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!(
            "Launching Chrome (headless: {}) with profile at {}",
            self.config.headless,
            profile_dir.display()
        );

        let child = Command::new(&chrome_path)
            .args(self.config.args())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| LaunchError::LaunchFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Connect to Chrome, launching it first if nothing is listening.
    pub async fn connect(&self) -> Result<CdpClient, LaunchError> {
        if self.is_chrome_running().await {
            info!("Chrome already running on port {}", self.config.debug_port);
        } else {
            info!(
                "Chrome not running on port {}, launching",
                self.config.debug_port
            );
            let child = self.launch_chrome().await?;
            *self.chrome_process.lock().await = Some(child);

            let mut up = false;
            for _ in 0..STARTUP_CHECKS {
                tokio::time::sleep(STARTUP_INTERVAL).await;
                if self.is_chrome_running().await {
                    up = true;
                    break;
                }
            }
            if !up {
                self.shutdown().await;
                return Err(LaunchError::LaunchFailed(
                    "Chrome failed to start within timeout".to_string(),
                ));
            }
        }

        let client = CdpClient::connect(&self.config.endpoint()).await?;
        info!("Connected to Chrome at {}", self.config.endpoint());
        Ok(client)
    }

    /// Kill Chrome if this launcher started it.
    pub async fn shutdown(&self) {
        if let Some(mut child) = self.chrome_process.lock().await.take() {
            info!("Shutting down Chrome");
            if let Err(e) = child.kill().await {
                warn!("Failed to stop Chrome: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = LaunchConfig::default();
        assert_eq!(config.debug_port, 9222);
        assert!(config.headless);
        assert_eq!(config.endpoint(), "http://localhost:9222");
    }

    #[test]
    fn test_default_profile_dir() {
        let profile = LaunchConfig::default().profile_dir();
        assert!(profile.ends_with(".courtbot/browser-profile"));
    }

    #[test]
    fn test_headless_flag() {
        let headless = LaunchConfig::default().args();
        assert!(headless.contains(&"--headless=new".to_string()));
        assert!(headless.contains(&"--remote-debugging-port=9222".to_string()));

        let headed = LaunchConfig {
            headless: false,
            debug_port: 9333,
            profile_dir: Some(PathBuf::from("/tmp/courtbot-profile")),
        }
        .args();
        assert!(!headed.iter().any(|a| a.starts_with("--headless")));
        assert!(headed.contains(&"--user-data-dir=/tmp/courtbot-profile".to_string()));
    }

    #[test]
    fn test_launch_error_into_driver_error() {
        let err: DriverError = LaunchError::ChromeNotFound.into();
        assert!(matches!(err, DriverError::Other(msg) if msg.contains("Chrome not found")));

        let err: DriverError = LaunchError::Cdp(CdpError::SessionClosed).into();
        assert!(matches!(err, DriverError::NotConnected));
    }

    #[tokio::test]
    async fn test_shutdown_without_launch() {
        let launcher = BrowserLauncher::new(LaunchConfig::default());
        launcher.shutdown().await;
    }

    #[test]
    fn test_find_chrome() {
        let _result = BrowserLauncher::find_chrome();
    }
}
