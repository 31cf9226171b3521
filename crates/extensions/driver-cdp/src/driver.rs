//! [`PageDriver`] over one Chrome page.

use async_trait::async_trait;
use courtbot_protocols::{DriverError, ElementHandle, PageDriver};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cdp::{CdpClient, PageSession};
use crate::launcher::{BrowserLauncher, LaunchConfig};
use crate::script;

/// One Chrome tab driven through CDP.
pub struct CdpDriver {
    launcher: BrowserLauncher,
    client: CdpClient,
    page: PageSession,
}

impl CdpDriver {
    /// Connect to (or start) Chrome and open a fresh tab.
    pub async fn launch(config: LaunchConfig) -> Result<Self, DriverError> {
        let launcher = BrowserLauncher::new(config);
        let client = match launcher.connect().await {
            Ok(client) => client,
            Err(e) => {
                launcher.shutdown().await;
                return Err(e.into());
            }
        };
        let page = match client.new_page(None).await {
            Ok(page) => page,
            Err(e) => {
                launcher.shutdown().await;
                return Err(e.into());
            }
        };
        info!("Opened page {}", page.target_id());
        Ok(Self {
            launcher,
            client,
            page,
        })
    }

    async fn eval(&self, expression: String) -> Result<Value, DriverError> {
        Ok(self.page.evaluate(&expression).await?)
    }

    async fn click_at(&self, selector: &str, index: usize) -> Result<(), DriverError> {
        let point = self.eval(script::center(selector, index)).await?;
        let describe = || format!("{} [{}]", selector, index);

        if point.is_null() {
            return Err(DriverError::ElementNotFound(describe()));
        }
        if point["visible"] == Value::Bool(false) {
            return Err(DriverError::ElementNotFound(format!("{} (not visible)", describe())));
        }
        let (Some(x), Some(y)) = (point["x"].as_f64(), point["y"].as_f64()) else {
            return Err(DriverError::Script(format!(
                "unexpected element position for {}: {}",
                describe(),
                point
            )));
        };

        self.page.click(x, y).await?;
        Ok(())
    }

    async fn text_at(&self, selector: &str, index: usize) -> Result<String, DriverError> {
        match self.eval(script::text(selector, index)).await? {
            Value::String(text) => Ok(text),
            Value::Null => Err(DriverError::ElementNotFound(format!("{} [{}]", selector, index))),
            other => Ok(other.to_string()),
        }
    }
}

#[async_trait]
impl PageDriver for CdpDriver {
    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        debug!("navigate {}", url);
        self.page.navigate(url).await?;
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<(), DriverError> {
        debug!("fill {}", selector);
        let focused = self.eval(script::focus_and_clear(selector)).await?;
        if focused != Value::Bool(true) {
            return Err(DriverError::ElementNotFound(selector.to_string()));
        }
        self.page.insert_text(value).await?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), DriverError> {
        debug!("click {}", selector);
        self.click_at(selector, 0).await
    }

    async fn click_element(&self, element: &ElementHandle) -> Result<(), DriverError> {
        debug!("click {} [{}]", element.selector, element.index);
        self.click_at(&element.selector, element.index).await
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, DriverError> {
        let count = self
            .eval(script::count(selector))
            .await?
            .as_u64()
            .unwrap_or(0) as usize;
        debug!(
            "query {} ({}): {} match(es)",
            selector,
            if script::is_xpath(selector) { "xpath" } else { "css" },
            count
        );
        Ok((0..count)
            .map(|index| ElementHandle::new(selector, index))
            .collect())
    }

    async fn text_content(&self, selector: &str) -> Result<String, DriverError> {
        self.text_at(selector, 0).await
    }

    async fn element_text(&self, element: &ElementHandle) -> Result<String, DriverError> {
        self.text_at(&element.selector, element.index).await
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<(), DriverError> {
        debug!("select {} in {}", value, selector);
        let status = self.eval(script::select_option(selector, value)).await?;
        match status.as_str() {
            Some("ok") => Ok(()),
            Some("no-option") => Err(DriverError::OptionNotFound {
                selector: selector.to_string(),
                value: value.to_string(),
            }),
            _ => Err(DriverError::ElementNotFound(selector.to_string())),
        }
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        Ok(self.page.get_url().await?)
    }

    async fn close(&self) -> Result<(), DriverError> {
        if let Err(e) = self.client.close_page(self.page.target_id()).await {
            warn!("Failed to close page: {}", e);
        }
        self.launcher.shutdown().await;
        info!("Browser closed");
        Ok(())
    }
}
