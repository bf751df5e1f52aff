//! HTTP client configuration module
//!
//! Centralized timeouts and connection settings for the reqwest clients the
//! engine builds, one profile per remote concern.

use anyhow::Result;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Total request timeout
    pub timeout: Duration,
    /// Idle connections kept per host
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 2,
        }
    }
}

impl HttpConfig {
    /// Profile for the paged template-list endpoint. Page loads sit behind a
    /// scroll trigger, so they should fail fast rather than hang the screen.
    pub fn list_api() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(20),
            pool_max_idle_per_host: 2,
        }
    }

    /// Profile for the per-template bookings sub-resource. Several of these
    /// run concurrently during an aggregation pass, so keep more idle
    /// connections around.
    pub fn booking_api() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 5,
        }
    }

    /// Build a reqwest client with this configuration
    pub fn build_client(&self) -> Result<Client> {
        Ok(ClientBuilder::new()
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .user_agent("MeetingFlow/1.0")
            .build()?)
    }
}
