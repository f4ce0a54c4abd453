//! Authenticated API client: credential attachment, dispatch, and the 401
//! retry path.

pub mod config;
pub mod refresh;
pub mod request;

pub use config::*;
pub use refresh::*;
pub use request::*;

// crates.io
use http::{HeaderMap, HeaderValue, StatusCode, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::{ConfigError, DecodeError, StatusError},
	http::{ApiTransport, HttpRequest, HttpResponse},
	obs::{self, RequestOutcome, RequestSpan},
	store::CredentialStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Issues authenticated platform requests through a shared transport and
/// credential store.
///
/// The client owns the transport handle, the credential store, and the refresh
/// coordination state so endpoint groups can focus on their wire shapes.
/// Cloning is cheap and every clone shares the same single-flight coordinator.
#[derive(Clone)]
pub struct ApiClient {
	/// HTTP transport used for every outbound call.
	pub transport: Arc<dyn ApiTransport>,
	/// Credential store holding the session pair.
	pub store: Arc<dyn CredentialStore>,
	/// Validated endpoint configuration.
	pub config: ClientConfig,
	/// Shared counters describing refresh coordination behavior.
	pub refresh_metrics: Arc<RefreshMetrics>,
	pub(crate) refresh_queue: Arc<AsyncMutex<()>>,
	pub(crate) refresh_ledger: Arc<Mutex<RefreshLedger>>,
}
impl ApiClient {
	/// Creates a client over a caller-provided transport and store.
	pub fn with_transport(
		config: ClientConfig,
		transport: Arc<dyn ApiTransport>,
		store: Arc<dyn CredentialStore>,
	) -> Self {
		Self {
			transport,
			store,
			config,
			refresh_metrics: Default::default(),
			refresh_queue: Default::default(),
			refresh_ledger: Default::default(),
		}
	}

	/// Creates a client backed by the crate's default reqwest transport.
	#[cfg(feature = "reqwest")]
	pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
		let transport = ReqwestTransport::new(&config)?;

		Ok(Self::with_transport(config, Arc::new(transport), store))
	}

	/// Dispatches a request with credential attachment and the single 401
	/// retry, recording the outcome for observability.
	pub async fn execute(&self, request: ApiRequest) -> Result<HttpResponse> {
		let span = RequestSpan::new(request.group, "execute");

		obs::record_request_outcome(request.group, RequestOutcome::Attempt);

		let result = span.instrument(self.execute_inner(&request)).await;

		match &result {
			Ok(_) => obs::record_request_outcome(request.group, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(request.group, RequestOutcome::Failure),
		}

		result
	}

	/// Convenience wrapper that executes and decodes a JSON response body.
	pub async fn fetch_json<T>(&self, request: ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.execute(request).await?;

		Self::decode(&response)
	}

	async fn execute_inner(&self, request: &ApiRequest) -> Result<HttpResponse> {
		// The observation must precede the token read: if a refresh settles
		// between the two, the coordinator sees it and skips a second call.
		let observed = self.refresh_observation();
		let pair = self.store.load().await?;
		let response = self.dispatch(request, pair.access.as_ref()).await?;

		if response.status != StatusCode::UNAUTHORIZED {
			return Self::accept(response);
		}

		// Single retry: one fresh credential, one replay.
		let fresh = self.fresh_access_token(observed).await?;
		let replay = self.dispatch(request, Some(&fresh)).await?;

		if replay.status == StatusCode::UNAUTHORIZED {
			return Err(Error::Unauthorized { reason: Self::server_message(&replay) });
		}

		Self::accept(replay)
	}

	pub(crate) async fn dispatch(
		&self,
		request: &ApiRequest,
		token: Option<&TokenSecret>,
	) -> Result<HttpResponse> {
		let url = request.endpoint(&self.config)?;
		let mut headers = HeaderMap::new();

		if let Some(token) = token {
			let value = HeaderValue::from_str(&token.bearer())
				.map_err(|source| ConfigError::InvalidHeader { source })?;

			headers.insert(AUTHORIZATION, value);
		}

		let wire = HttpRequest {
			method: request.method.clone(),
			url,
			headers,
			body: request.body.clone(),
		};

		self.transport.execute(wire).await.map_err(Error::from)
	}

	/// Maps non-success statuses into the error taxonomy; 401 never reaches
	/// here on the pre-retry path.
	pub(crate) fn accept(response: HttpResponse) -> Result<HttpResponse> {
		if response.status.is_success() {
			return Ok(response);
		}

		let retry_after = response.retry_after();

		Err(StatusError {
			status: response.status.as_u16(),
			message: Self::server_message(&response),
			retry_after,
		}
		.into())
	}

	/// Decodes a JSON body, reporting the offending path on mismatch.
	pub(crate) fn decode<T>(response: &HttpResponse) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

		serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
			DecodeError {
				path: source.path().to_string(),
				source,
				status: response.status.as_u16(),
			}
			.into()
		})
	}

	/// Extracts a best-effort message from an error body; the platform uses
	/// `detail`, `message`, and `error` keys interchangeably.
	pub(crate) fn server_message(response: &HttpResponse) -> String {
		#[derive(Deserialize)]
		struct Envelope {
			detail: Option<String>,
			message: Option<String>,
			error: Option<String>,
		}

		serde_json::from_slice::<Envelope>(&response.body)
			.ok()
			.and_then(|envelope| envelope.detail.or(envelope.message).or(envelope.error))
			.unwrap_or_else(|| {
				response.status.canonical_reason().unwrap_or("unknown error").to_owned()
			})
	}
}
impl Debug for ApiClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient").field("config", &self.config).finish()
	}
}

#[cfg(test)]
pub(crate) mod harness {
	//! Scripted transport used by the dispatch and refresh unit tests.

	// std
	use std::sync::atomic::{AtomicU64, Ordering};
	// crates.io
	use http::{HeaderMap, StatusCode, header::SET_COOKIE};
	// self
	use super::*;
	use crate::{http::TransportFuture, store::MemoryCredentialStore};

	/// What the scripted refresh endpoint should do.
	#[derive(Clone, Debug)]
	pub(crate) enum RefreshScript {
		/// Respond 200 with a `Set-Cookie: access_token=<token>` rotation.
		Rotate { token: String, delay_ms: u64 },
		/// Respond with the given status and JSON error body.
		Reject { status: u16, body: String, delay_ms: u64 },
	}

	/// One request observed by the scripted transport.
	#[derive(Clone, Debug)]
	pub(crate) struct Recorded {
		pub path: String,
		pub authorization: Option<String>,
	}

	/// Transport that authenticates exactly one bearer value and scripts the
	/// refresh endpoint, counting every refresh call.
	pub(crate) struct ScriptedTransport {
		accepted_bearer: RwLock<String>,
		refresh: RefreshScript,
		refresh_calls: AtomicU64,
		log: Mutex<Vec<Recorded>>,
	}
	impl ScriptedTransport {
		pub(crate) fn new(accepted_bearer: &str, refresh: RefreshScript) -> Arc<Self> {
			Arc::new(Self {
				accepted_bearer: RwLock::new(accepted_bearer.to_owned()),
				refresh,
				refresh_calls: AtomicU64::new(0),
				log: Mutex::new(Vec::new()),
			})
		}

		pub(crate) fn refresh_calls(&self) -> u64 {
			self.refresh_calls.load(Ordering::SeqCst)
		}

		pub(crate) fn recorded(&self) -> Vec<Recorded> {
			self.log.lock().clone()
		}

		fn respond(status: StatusCode, headers: HeaderMap, body: &str) -> HttpResponse {
			HttpResponse { status, headers, body: body.as_bytes().to_vec() }
		}
	}
	impl ApiTransport for ScriptedTransport {
		fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
			let path = request.url.path().to_owned();
			let authorization = request
				.headers
				.get(http::header::AUTHORIZATION)
				.and_then(|value| value.to_str().ok())
				.map(str::to_owned);

			self.log.lock().push(Recorded { path: path.clone(), authorization: authorization.clone() });

			let accepted = format!("Bearer {}", self.accepted_bearer.read());
			let refresh = self.refresh.clone();
			let is_refresh = path.ends_with("/user/refresh/");

			if is_refresh {
				self.refresh_calls.fetch_add(1, Ordering::SeqCst);
			}

			Box::pin(async move {
				if is_refresh {
					return Ok(match refresh {
						RefreshScript::Rotate { token, delay_ms } => {
							if delay_ms > 0 {
								tokio::time::sleep(std::time::Duration::from_millis(delay_ms))
									.await;
							}

							let mut headers = HeaderMap::new();

							headers.append(
								SET_COOKIE,
								format!("access_token={token}; Path=/")
									.parse()
									.expect("Cookie fixture should be a valid header value."),
							);

							Self::respond(
								StatusCode::OK,
								headers,
								"{\"message\":\"Token refreshed\"}",
							)
						},
						RefreshScript::Reject { status, body, delay_ms } => {
							if delay_ms > 0 {
								tokio::time::sleep(std::time::Duration::from_millis(delay_ms))
									.await;
							}

							Self::respond(
								StatusCode::from_u16(status)
									.expect("Status fixture should be a valid HTTP status."),
								HeaderMap::new(),
								&body,
							)
						},
					});
				}

				if authorization.as_deref() == Some(accepted.as_str()) {
					Ok(Self::respond(StatusCode::OK, HeaderMap::new(), "{\"ok\":true}"))
				} else {
					Ok(Self::respond(
						StatusCode::UNAUTHORIZED,
						HeaderMap::new(),
						"{\"detail\":\"Token expired\"}",
					))
				}
			})
		}
	}

	pub(crate) fn scripted_client(
		transport: Arc<ScriptedTransport>,
		access: &str,
		refresh: &str,
	) -> (ApiClient, Arc<MemoryCredentialStore>) {
		let config = ClientConfig::builder("http://platform.test/api/v1")
			.build()
			.expect("Test base URL should be accepted by the config builder.");
		let store = Arc::new(MemoryCredentialStore::with_raw(access, refresh));
		let client = ApiClient::with_transport(config, transport, store.clone());

		(client, store)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use http::Method;
	// self
	use super::{harness::*, *};
	use crate::obs::RequestGroup;

	fn get(path: &str) -> ApiRequest {
		ApiRequest::new(Method::GET, path).group(RequestGroup::Catalog)
	}

	#[tokio::test]
	async fn first_attempt_success_never_touches_refresh() {
		let transport = ScriptedTransport::new(
			"valid",
			RefreshScript::Rotate { token: "unused".into(), delay_ms: 0 },
		);
		let (client, _) = scripted_client(transport.clone(), "valid", "refresh-1");

		client
			.execute(get("film/movies/"))
			.await
			.expect("Request with a valid credential should succeed.");

		assert_eq!(transport.refresh_calls(), 0);
	}

	#[tokio::test]
	async fn absent_credential_attaches_no_authorization_header() {
		let transport = ScriptedTransport::new(
			"valid",
			RefreshScript::Rotate { token: "valid".into(), delay_ms: 0 },
		);
		let (client, _) = scripted_client(transport.clone(), "undefined", "refresh-1");

		// The stale dispatch carries no header; the replay after refresh does.
		client
			.execute(get("film/movies/"))
			.await
			.expect("Request should succeed after the refresh replay.");

		let recorded = transport.recorded();
		let first = recorded
			.iter()
			.find(|entry| entry.path.ends_with("/film/movies/"))
			.expect("Movie request should be recorded.");

		assert_eq!(first.authorization, None);
	}

	#[test]
	fn non_401_statuses_map_to_status_error() {
		let response = HttpResponse {
			status: http::StatusCode::SERVICE_UNAVAILABLE,
			headers: http::HeaderMap::new(),
			body: b"{\"detail\":\"maintenance window\"}".to_vec(),
		};
		let err = ApiClient::accept(response).expect_err("503 should map to a status error.");

		match err {
			Error::Status(status) => {
				assert_eq!(status.status, 503);
				assert_eq!(status.message, "maintenance window");
			},
			other => panic!("Expected a status error, got: {other:?}."),
		}
	}

	#[test]
	fn server_message_falls_back_to_canonical_reason() {
		let response = HttpResponse {
			status: http::StatusCode::BAD_GATEWAY,
			headers: http::HeaderMap::new(),
			body: b"<html>not json</html>".to_vec(),
		};

		assert_eq!(ApiClient::server_message(&response), "Bad Gateway");
	}

	#[test]
	fn decode_reports_the_offending_path() {
		#[derive(Debug, serde::Deserialize)]
		struct Payload {
			#[allow(dead_code)]
			count: u64,
		}

		let response = HttpResponse {
			status: http::StatusCode::OK,
			headers: http::HeaderMap::new(),
			body: b"{\"count\":\"not-a-number\"}".to_vec(),
		};
		let err = ApiClient::decode::<Payload>(&response)
			.expect_err("Type mismatch should surface as a decode error.");

		assert!(matches!(err, Error::Decode(_)));
		assert!(err.to_string().contains("count"));
	}
}
