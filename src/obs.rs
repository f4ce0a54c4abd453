//! Optional observability helpers for client requests.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `vod_client.request` with
//!   the `group` (endpoint group) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `vod_client_request_total` counter for
//!   every attempt/success/failure, labeled by `group` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Endpoint groups observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestGroup {
	/// Login, logout, registration, staff management.
	Session,
	/// Content, movie, series, season, and episode endpoints.
	Catalog,
	/// Genre, tag, nation, and career endpoints.
	Metadata,
	/// Combined search.
	Search,
	/// Similar-title recommendations.
	Recommend,
	/// View-duration tracking.
	Tracking,
	/// Video uploads.
	Upload,
	/// Token refresh coordination.
	Refresh,
}
impl RequestGroup {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestGroup::Session => "session",
			RequestGroup::Catalog => "catalog",
			RequestGroup::Metadata => "metadata",
			RequestGroup::Search => "search",
			RequestGroup::Recommend => "recommend",
			RequestGroup::Tracking => "tracking",
			RequestGroup::Upload => "upload",
			RequestGroup::Refresh => "refresh",
		}
	}
}
impl Display for RequestGroup {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to the dispatch path.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
