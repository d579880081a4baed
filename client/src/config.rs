use std::time::Duration;
use crate::scheduler::OverlapPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: &'static str,
    pub default_contest: &'static str,
    pub results_poll_interval: Duration,
    pub request_timeout: Option<Duration>,
    pub overlap_policy: OverlapPolicy,
    pub log_filter: &'static str,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            api_base_url: "/api",
            default_contest: "costumes",
            results_poll_interval: Duration::from_secs(20),
            request_timeout: Some(Duration::from_secs(15)),
            overlap_policy: OverlapPolicy::Defer,
            log_filter: "info",
        }
    }
}

pub const CONFIG: Config = Config::new();
