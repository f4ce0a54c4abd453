//! View-tracking receipt payloads.

// self
use crate::_prelude::*;

/// Acknowledgement returned by the view-tracking endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ViewReceipt {
	/// Whether the report was accepted.
	#[serde(default)]
	pub success: bool,
	/// Whether this report crossed the counting threshold.
	#[serde(default)]
	pub view_counted: bool,
	/// Human-readable status line.
	#[serde(default)]
	pub message: Option<String>,
}
