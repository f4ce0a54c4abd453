//! Typed client for a VOD streaming platform's REST API—bearer-authenticated requests,
//! single-flight token refresh, and catalog/search/tracking bindings in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod store;
#[cfg(feature = "reqwest")]
pub mod _preludet {
	//! Convenience helpers shared by the crate's integration tests; not part of
	//! the supported API surface.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::{ApiClient, ClientConfig},
		http::ReqwestTransport,
		store::{CredentialStore, MemoryCredentialStore},
	};

	/// Builds a [`ClientConfig`] pointed at a local mock server.
	pub fn test_config(base_url: &str) -> ClientConfig {
		ClientConfig::builder(base_url)
			.build()
			.expect("Test base URL should be accepted by the config builder.")
	}

	/// Constructs an [`ApiClient`] over the reqwest transport with an in-memory
	/// store seeded from raw cookie values.
	pub fn build_reqwest_test_client(
		base_url: &str,
		access: &str,
		refresh: &str,
	) -> (ApiClient, Arc<MemoryCredentialStore>) {
		let config = test_config(base_url);
		let store_backend = Arc::new(MemoryCredentialStore::with_raw(access, refresh));
		let store: Arc<dyn CredentialStore> = store_backend.clone();
		let transport = ReqwestTransport::new(&config)
			.expect("Failed to build reqwest transport for tests.");
		let client = ApiClient::with_transport(config, Arc::new(transport), store);

		(client, store_backend)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use ::http as http_types;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tokio as _};
