use std::time::Duration;

use clap::Args;

/// Recommendation service settings, read from flags or `MINDFUL_*`
/// environment variables.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the recommendation service
    #[arg(
        long = "api-url",
        env = "MINDFUL_API_URL",
        default_value = "http://localhost:5000",
        global = true,
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    pub api_base_url: String,

    /// Upper bound in seconds on one recommendation exchange before falling back
    #[arg(
        long = "api-timeout-secs",
        env = "MINDFUL_API_TIMEOUT_SECS",
        default_value_t = 10,
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Seconds between health probes in `health --watch`
    #[arg(
        long = "health-interval-secs",
        env = "MINDFUL_HEALTH_INTERVAL_SECS",
        default_value_t = 30,
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub health_interval_secs: u64,

    /// Number of activities requested from the cosine recommender
    #[arg(
        long = "top-n",
        env = "MINDFUL_TOP_N",
        default_value_t = 5,
        global = true,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub top_n: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
            health_interval_secs: 30,
            top_n: 5,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs)
    }

    pub fn top_n(&self) -> usize {
        self.top_n as usize
    }
}
