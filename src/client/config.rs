//! Endpoint configuration validated ahead of client construction.

// self
use crate::{_prelude::*, error::ConfigError};

/// Validated client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// API root every request path is joined onto; always ends with `/`.
	pub base_url: Url,
	/// Transport-level timeout applied to each request.
	pub timeout: Duration,
	/// User-agent advertised to the platform.
	pub user_agent: String,
}
impl ClientConfig {
	/// Creates a new builder for the provided API root.
	pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(base_url)
	}

	/// Joins a relative endpoint path onto the base URL.
	pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		self.base_url
			.join(path.trim_start_matches('/'))
			.map_err(|_| ConfigError::InvalidEndpoint { path: path.to_owned() })
	}
}

/// Builder for [`ClientConfig`].
#[derive(Clone, Debug)]
pub struct ClientConfigBuilder {
	base_url: String,
	timeout: Duration,
	user_agent: Option<String>,
}
impl ClientConfigBuilder {
	/// Matches the platform front-ends' request timeout.
	const DEFAULT_TIMEOUT: Duration = Duration::seconds(10);

	fn new(base_url: impl Into<String>) -> Self {
		Self { base_url: base_url.into(), timeout: Self::DEFAULT_TIMEOUT, user_agent: None }
	}

	/// Overrides the per-request timeout (defaults to 10 seconds).
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = if timeout.is_negative() { Duration::ZERO } else { timeout };

		self
	}

	/// Overrides the advertised user-agent.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Validates and produces the [`ClientConfig`].
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let mut base = self.base_url;

		// Url::join treats a base without a trailing slash as a file segment
		// and would drop it on every join.
		if !base.ends_with('/') {
			base.push('/');
		}

		let base_url = Url::parse(&base).map_err(|source| ConfigError::InvalidBaseUrl { source })?;
		let user_agent = self
			.user_agent
			.unwrap_or_else(|| concat!("vod-client/", env!("CARGO_PKG_VERSION")).to_owned());

		Ok(ClientConfig { base_url, timeout: self.timeout, user_agent })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn endpoint_join_preserves_the_api_root() {
		let config = ClientConfig::builder("http://127.0.0.1:8000/api/v1")
			.build()
			.expect("Base URL fixture should build.");
		let url = config.endpoint("film/movies/").expect("Endpoint path should join.");

		assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/v1/film/movies/");

		let led = config.endpoint("/user/refresh/").expect("Leading slash should be tolerated.");

		assert_eq!(led.as_str(), "http://127.0.0.1:8000/api/v1/user/refresh/");
	}

	#[test]
	fn invalid_base_url_is_rejected_at_build_time() {
		assert!(matches!(
			ClientConfig::builder("not a url").build(),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
	}

	#[test]
	fn negative_timeout_clamps_to_zero() {
		let config = ClientConfig::builder("http://localhost/api/")
			.timeout(Duration::seconds(-5))
			.build()
			.expect("Base URL fixture should build.");

		assert_eq!(config.timeout, Duration::ZERO);
	}
}
