//! Single-flight refresh coordination for expired access tokens.
//!
//! Every request that receives a 401 funnels through
//! [`ApiClient::fresh_access_token`]. The first caller in performs the actual
//! refresh call; callers that arrive while it is in flight queue on an async
//! admission mutex and settle with the shared outcome — the rotated token on
//! success, the recorded rejection on failure. The ledger counts *settled*
//! refresh cycles: a caller whose 401 predates the latest settlement adopts
//! that settlement instead of starting another call, so at most one upstream
//! refresh is ever in flight and a stale credential is never replayed.
//!
//! The refresh call itself goes straight to the transport: it never re-enters
//! the authenticated dispatch path and is never retry-marked.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// crates.io
use http::{HeaderMap, HeaderValue, Method, header::COOKIE};
// self
use crate::{
	_prelude::*,
	auth::{ACCESS_COOKIE, REFRESH_COOKIE, TokenSecret},
	client::ApiClient,
	error::ConfigError,
	http::{ApiTransport, HttpRequest, HttpResponse, RequestBody},
	obs::{self, RequestGroup, RequestOutcome, RequestSpan},
	store::CredentialStore,
};

/// Relative path of the platform's token refresh endpoint.
const REFRESH_PATH: &str = "user/refresh/";

/// Coordinator state observed before a request reads its credential.
///
/// The snapshot must precede the credential read: any refresh that settles
/// between the two shows up as `settled > observed.settled` and is adopted
/// instead of repeated.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RefreshObservation {
	settled: u64,
}

/// Settled-refresh ledger guarded by a sync mutex; mutations only happen while
/// the admission mutex is held, between suspension points.
#[derive(Debug, Default)]
pub(crate) struct RefreshLedger {
	/// Refresh cycles settled so far, successful or not.
	settled: u64,
	/// Rejection recorded by a failed settlement.
	last_rejection: Option<RefreshRejection>,
}

/// Cloneable record of a failed refresh, replayed to every queued caller.
#[derive(Clone, Debug)]
struct RefreshRejection {
	settled: u64,
	status: Option<u16>,
	reason: String,
}
impl RefreshRejection {
	fn to_error(&self) -> Error {
		Error::RefreshRejected { status: self.status, reason: self.reason.clone() }
	}
}

impl ApiClient {
	/// Snapshots the coordinator state; taken before the credential read that
	/// precedes a dispatch.
	pub(crate) fn refresh_observation(&self) -> RefreshObservation {
		RefreshObservation { settled: self.refresh_ledger.lock().settled }
	}

	/// Returns a fresh access token, coalescing concurrent callers onto a
	/// single upstream refresh call.
	pub(crate) async fn fresh_access_token(
		&self,
		observed: RefreshObservation,
	) -> Result<TokenSecret> {
		let span = RequestSpan::new(RequestGroup::Refresh, "fresh_access_token");

		span.instrument(self.fresh_access_token_inner(observed)).await
	}

	async fn fresh_access_token_inner(
		&self,
		observed: RefreshObservation,
	) -> Result<TokenSecret> {
		let _admission = self.refresh_queue.lock().await;

		// Holding the admission mutex means no refresh is in flight; anything
		// that settled after our observation covers our 401.
		let adopted = {
			let ledger = self.refresh_ledger.lock();

			if ledger.settled > observed.settled {
				Some(match &ledger.last_rejection {
					Some(rejection) if rejection.settled == ledger.settled =>
						Err(rejection.to_error()),
					_ => Ok(()),
				})
			} else {
				None
			}
		};

		if let Some(outcome) = adopted {
			self.refresh_metrics.record_coalesced();
			outcome?;

			let pair = self.store.load().await?;

			return pair.access.ok_or(Error::NotAuthenticated);
		}

		self.refresh_metrics.record_refresh();
		obs::record_request_outcome(RequestGroup::Refresh, RequestOutcome::Attempt);

		match self.call_refresh_endpoint().await {
			Ok(token) => {
				self.store.store_access(token.clone()).await?;

				{
					let mut ledger = self.refresh_ledger.lock();

					ledger.settled += 1;
					ledger.last_rejection = None;
				}

				self.refresh_metrics.record_success();
				obs::record_request_outcome(RequestGroup::Refresh, RequestOutcome::Success);

				Ok(token)
			},
			Err(err) => {
				{
					let mut ledger = self.refresh_ledger.lock();

					ledger.settled += 1;
					ledger.last_rejection = Some(RefreshRejection {
						settled: ledger.settled,
						status: match &err {
							Error::RefreshRejected { status, .. } => *status,
							_ => None,
						},
						reason: err.to_string(),
					});
				}

				self.refresh_metrics.record_failure();
				obs::record_request_outcome(RequestGroup::Refresh, RequestOutcome::Failure);

				Err(err)
			},
		}
	}

	/// Plain refresh call presenting the refresh token as the session cookie.
	async fn call_refresh_endpoint(&self) -> Result<TokenSecret> {
		let pair = self.store.load().await?;
		let refresh = pair.refresh.ok_or(Error::NotAuthenticated)?;
		let url = self.config.endpoint(REFRESH_PATH)?;
		let cookie = format!("{REFRESH_COOKIE}={}", refresh.expose());
		let mut headers = HeaderMap::new();

		headers.insert(
			COOKIE,
			HeaderValue::from_str(&cookie)
				.map_err(|source| ConfigError::InvalidHeader { source })?,
		);

		let response = self
			.transport
			.execute(HttpRequest {
				method: Method::POST,
				url,
				headers,
				body: RequestBody::Empty,
			})
			.await
			.map_err(Error::from)?;

		if !response.status.is_success() {
			return Err(Error::RefreshRejected {
				status: Some(response.status.as_u16()),
				reason: Self::server_message(&response),
			});
		}

		Self::harvest_access(&response).ok_or_else(|| Error::RefreshRejected {
			status: Some(response.status.as_u16()),
			reason: "Refresh response carried no access token.".into(),
		})
	}

	/// Pulls the rotated access token from `Set-Cookie`, falling back to the
	/// body's `access` field.
	fn harvest_access(response: &HttpResponse) -> Option<TokenSecret> {
		for cookie in response.set_cookies() {
			if cookie.name == ACCESS_COOKIE {
				if let Some(secret) = TokenSecret::sanitized(&cookie.value) {
					return Some(secret);
				}
			}
		}

		#[derive(Deserialize)]
		struct RefreshBody {
			access: Option<String>,
		}

		serde_json::from_slice::<RefreshBody>(&response.body)
			.ok()?
			.access
			.and_then(TokenSecret::sanitized)
	}
}

/// Thread-safe counters describing refresh coordination behavior.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	refreshes: AtomicU64,
	successes: AtomicU64,
	failures: AtomicU64,
	coalesced: AtomicU64,
}
impl RefreshMetrics {
	/// Returns the number of refresh cycles this client performed itself.
	pub fn refreshes(&self) -> u64 {
		self.refreshes.load(Ordering::Relaxed)
	}

	/// Returns the number of refresh cycles that rotated a token.
	pub fn successes(&self) -> u64 {
		self.successes.load(Ordering::Relaxed)
	}

	/// Returns the number of refresh cycles that were rejected.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	/// Returns the number of callers settled by another caller's refresh.
	pub fn coalesced(&self) -> u64 {
		self.coalesced.load(Ordering::Relaxed)
	}

	pub(crate) fn record_refresh(&self) {
		self.refreshes.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.successes.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failures.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_coalesced(&self) {
		self.coalesced.fetch_add(1, Ordering::Relaxed);
	}
}
