// src/driver/webdriver.rs
//! W3C WebDriver client for a locally running chromedriver.
//!
//! Every command is a blocking JSON request against
//! `<endpoint>/session/<id>/...`; the reply carries its payload (or an
//! error object) under `value`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::{DriverError, ElementRef, Locator, PageDriver};

/// Key W3C uses for element references in JSON.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

#[derive(Clone, Debug)]
pub struct BrowserConfig {
    pub headless: bool,
    pub user_agent: String,
    pub window_size: (u32, u32),
    /// Per-request HTTP timeout against the driver.
    pub request_timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            user_agent: s!(crate::config::consts::USER_AGENT),
            window_size: crate::config::consts::WINDOW_SIZE,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl BrowserConfig {
    fn capabilities(&self) -> Value {
        let mut args = vec![
            format!("--user-agent={}", self.user_agent),
            s!("--disable-blink-features=AutomationControlled"),
            format!("--window-size={},{}", self.window_size.0, self.window_size.1),
        ];
        if self.headless {
            args.push(s!("--headless=new"));
        }
        json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": {
                        "args": args,
                        "excludeSwitches": ["enable-automation"],
                    }
                }
            }
        })
    }
}

pub struct WebDriverSession {
    client: Client,
    base: String,
    session_id: Option<String>,
}

impl WebDriverSession {
    /// Start a browser session on the driver at `endpoint` (e.g. `http://localhost:9515`).
    pub fn connect(endpoint: &str, browser: &BrowserConfig) -> Result<Self, DriverError> {
        let client = Client::builder().timeout(browser.request_timeout).build()?;
        let base = endpoint.trim_end_matches('/').to_string();

        let resp = client.post(format!("{base}/session")).json(&browser.capabilities()).send()?;
        let value = unwrap_value(resp.json::<Value>()?)?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or(DriverError::Malformed("sessionId"))?
            .to_string();

        info!(endpoint = %base, session = %session_id, headless = browser.headless, "browser session started");
        Ok(Self { client, base, session_id: Some(session_id) })
    }

    fn url(&self, path: &str) -> Result<String, DriverError> {
        let id = self.session_id.as_deref().ok_or(DriverError::Closed)?;
        Ok(format!("{}/session/{id}{path}", self.base))
    }

    fn get(&self, path: &str) -> Result<Value, DriverError> {
        let resp = self.client.get(self.url(path)?).send()?;
        unwrap_value(resp.json::<Value>()?)
    }

    fn post(&self, path: &str, body: Value) -> Result<Value, DriverError> {
        let resp = self.client.post(self.url(path)?).json(&body).send()?;
        unwrap_value(resp.json::<Value>()?)
    }

    fn find_from(&self, path: &str, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        let body = json!({ "using": locator.strategy(), "value": locator.value() });
        let value = self.post(path, body)?;
        let items = value.as_array().ok_or(DriverError::Malformed("element list"))?;
        items.iter().map(element_ref).collect()
    }

    fn options_of(&self, select: &ElementRef) -> Result<Vec<(ElementRef, String)>, DriverError> {
        let opts = self.find_from(&format!("/element/{}/elements", select.0), &Locator::Css("option"))?;
        let mut out = Vec::with_capacity(opts.len());
        for opt in opts {
            let text = self.get(&format!("/element/{}/text", opt.0))?;
            let text = text.as_str().unwrap_or_default().trim().to_string();
            out.push((opt, text));
        }
        Ok(out)
    }
}

impl PageDriver for WebDriverSession {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        debug!(url, "navigate");
        self.post("/url", json!({ "url": url })).map(|_| ())
    }

    fn page_source(&mut self) -> Result<String, DriverError> {
        let value = self.get("/source")?;
        value.as_str().map(str::to_string).ok_or(DriverError::Malformed("page source"))
    }

    fn find_elements(&mut self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        self.find_from("/elements", locator)
    }

    fn click(&mut self, element: &ElementRef) -> Result<(), DriverError> {
        self.post(&format!("/element/{}/click", element.0), json!({})).map(|_| ())
    }

    fn option_texts(&mut self, select: &ElementRef) -> Result<Vec<String>, DriverError> {
        Ok(self.options_of(select)?.into_iter().map(|(_, t)| t).collect())
    }

    fn select_by_text(&mut self, select: &ElementRef, text: &str) -> Result<(), DriverError> {
        let (opt, _) = self
            .options_of(select)?
            .into_iter()
            .find(|(_, t)| t == text)
            .ok_or_else(|| DriverError::Other(format!("no option {text:?}")))?;
        self.click(&opt)
    }

    fn close(&mut self) -> Result<(), DriverError> {
        let Some(id) = self.session_id.take() else { return Ok(()) };
        let resp = self.client.delete(format!("{}/session/{id}", self.base)).send()?;
        unwrap_value(resp.json::<Value>()?)?;
        info!(session = %id, "browser session closed");
        Ok(())
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        if self.session_id.is_some() {
            if let Err(e) = self.close() {
                warn!("closing browser session on drop: {e}");
            }
        }
    }
}

/// Pull `value` out of a reply, turning W3C error objects into `DriverError::Protocol`.
fn unwrap_value(mut body: Value) -> Result<Value, DriverError> {
    let value = body.get_mut("value").map(Value::take).ok_or(DriverError::Malformed("value"))?;
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        let message = value.get("message").and_then(Value::as_str).unwrap_or_default();
        return Err(DriverError::Protocol { error: error.to_string(), message: message.to_string() });
    }
    Ok(value)
}

fn element_ref(v: &Value) -> Result<ElementRef, DriverError> {
    v.get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(|id| ElementRef(id.to_string()))
        .ok_or(DriverError::Malformed("element reference"))
}
