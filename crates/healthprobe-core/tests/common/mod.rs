#![allow(dead_code)]

use async_trait::async_trait;
use healthprobe::config::{parse_url, Config, ENDPOINT_URL_VAR};
use healthprobe::transport::{Transport, TransportResponse};
use healthprobe::{Error, Result};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

pub const WEBHOOK: &str = "http://hooks.test/services/T000/B000/XXXX";

/// What the scripted endpoint does for one GET
#[derive(Debug, Clone)]
pub enum Step {
    Status(u16),
    SlowStatus(u16, Duration),
    Refused,
}

/// Transport replaying a fixed script of GET outcomes and recording POSTs
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    gets: Mutex<usize>,
    posts: Mutex<Vec<(Url, serde_json::Value)>>,
    webhook_status: StatusCode,
}

impl ScriptedTransport {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            gets: Mutex::new(0),
            posts: Mutex::new(Vec::new()),
            webhook_status: StatusCode::OK,
        }
    }

    pub fn with_webhook_status(mut self, status: StatusCode) -> Self {
        self.webhook_status = status;
        self
    }

    pub fn gets(&self) -> usize {
        *self.gets.lock().unwrap()
    }

    pub fn posts(&self) -> Vec<(Url, serde_json::Value)> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, _url: &Url) -> Result<StatusCode> {
        *self.gets.lock().unwrap() += 1;
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Step::Status(202));

        match step {
            Step::Status(code) => Ok(StatusCode::from_u16(code).unwrap()),
            Step::SlowStatus(code, delay) => {
                tokio::time::sleep(delay).await;
                Ok(StatusCode::from_u16(code).unwrap())
            }
            Step::Refused => Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }

    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> Result<TransportResponse> {
        self.posts.lock().unwrap().push((url.clone(), body.clone()));
        Ok(TransportResponse {
            status: self.webhook_status,
            body: String::new(),
        })
    }
}

/// Default configuration pointed at `endpoint`, with the test webhook
pub fn config_for(endpoint: &str) -> Config {
    let mut config = Config::default();
    config.probe.endpoint_url = Some(parse_url(ENDPOINT_URL_VAR, endpoint).unwrap());
    config.alerting.webhook_url = Some(WEBHOOK.to_string());
    config
}
