//! Connectivity probe
//!
//! Smoke-checks a deployment through three REST endpoints:
//!
//! | Check | Endpoint | Auth |
//! |---|---|---|
//! | Health Check | `GET /health` | no |
//! | Authentication | `GET /user` | bearer |
//! | List Resources | `GET /resources` | bearer |
//!
//! A failing check is recorded and the remaining checks still run.

use edison_core::domain::ApiKey;
use edison_core::port::TransportError;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::HttpTransportConfig;
use crate::transport::build_http_client;

/// Result of one probe check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub endpoint: &'static str,
    pub passed: bool,
    pub status: Option<u16>,
    /// Failure reason, or a warning attached to a pass
    pub detail: Option<String>,
}

/// Aggregated probe results
#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    pub checks: Vec<CheckOutcome>,
}

impl ProbeReport {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.checks.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

#[derive(Clone, Copy)]
enum Check {
    Health,
    Authentication,
    Resources,
}

impl Check {
    fn name(self) -> &'static str {
        match self {
            Check::Health => "Health Check",
            Check::Authentication => "Authentication Test",
            Check::Resources => "List Resources",
        }
    }

    fn endpoint(self) -> &'static str {
        match self {
            Check::Health => "/health",
            Check::Authentication => "/user",
            Check::Resources => "/resources",
        }
    }
}

/// Connectivity probe
pub struct ConnectivityProbe {
    anonymous: reqwest::Client,
    authenticated: reqwest::Client,
    config: HttpTransportConfig,
}

impl ConnectivityProbe {
    pub fn new(api_key: &ApiKey, config: HttpTransportConfig) -> Result<Self, TransportError> {
        Ok(Self {
            anonymous: build_http_client(None, &config)?,
            authenticated: build_http_client(Some(api_key), &config)?,
            config,
        })
    }

    /// Run every check in order
    pub async fn run(&self) -> ProbeReport {
        let mut report = ProbeReport::default();
        for check in [Check::Health, Check::Authentication, Check::Resources] {
            let outcome = self.run_check(check).await;
            if outcome.passed {
                info!(check = outcome.name, status = ?outcome.status, "Check passed");
            } else {
                warn!(check = outcome.name, status = ?outcome.status, detail = ?outcome.detail, "Check failed");
            }
            report.checks.push(outcome);
        }
        report
    }

    async fn run_check(&self, check: Check) -> CheckOutcome {
        let mut outcome = CheckOutcome {
            name: check.name(),
            endpoint: check.endpoint(),
            passed: false,
            status: None,
            detail: None,
        };

        let url = match self.config.endpoint(check.endpoint()) {
            Ok(url) => url,
            Err(e) => {
                outcome.detail = Some(e.to_string());
                return outcome;
            }
        };

        let client = match check {
            Check::Health => &self.anonymous,
            Check::Authentication | Check::Resources => &self.authenticated,
        };

        let response = match client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                outcome.detail = Some(format!("Request failed: {}", e));
                return outcome;
            }
        };

        let status = response.status().as_u16();
        outcome.status = Some(status);
        let body: Option<Value> = match response.text().await {
            Ok(text) => serde_json::from_str(&text).ok(),
            Err(_) => None,
        };

        let (passed, detail) = judge(check, status, body.as_ref());
        outcome.passed = passed;
        outcome.detail = detail;
        outcome
    }
}

fn judge(check: Check, status: u16, body: Option<&Value>) -> (bool, Option<String>) {
    match (check, status) {
        (Check::Health, 200) => match body {
            Some(_) => (true, None),
            None => (true, Some("Response not JSON".to_string())),
        },
        (Check::Health, other) => (false, Some(format!("Expected 200, got {}", other))),

        (_, 401) => (
            false,
            Some("Authentication failed - check your API key".to_string()),
        ),

        (Check::Authentication, 200) => match body {
            Some(_) => (true, None),
            None => (false, Some("Response is not valid JSON".to_string())),
        },

        (Check::Resources, 200) => match body {
            Some(value) if value.get("data").is_some() => (true, None),
            Some(_) => (true, Some("Response missing expected 'data' field".to_string())),
            None => (false, Some("Response is not valid JSON".to_string())),
        },

        (_, other) => (false, Some(format!("Unexpected status code: {}", other))),
    }
}
