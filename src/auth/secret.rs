//! Redacting wrapper for bearer and refresh secrets.

// self
use crate::_prelude::*;

/// Literal the browser stack writes when a cookie was serialized from a missing
/// JavaScript value. Stored credentials equal to it carry no authentication.
const UNSET_SENTINEL: &str = "undefined";

/// Opaque credential string that never renders its contents.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a raw secret without sanitization.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Interprets a stored cookie value, mapping empty strings and the
	/// `"undefined"` literal to "no credential present".
	pub fn sanitized(value: impl AsRef<str>) -> Option<Self> {
		let view = value.as_ref().trim();

		if view.is_empty() || view == UNSET_SENTINEL {
			return None;
		}

		Some(Self(view.to_owned()))
	}

	/// Returns the inner value. Callers must keep it out of logs.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Renders the `Authorization` header value for this secret.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.0)
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn formatters_redact() {
		let secret = TokenSecret::new("session-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn sanitized_rejects_absent_values() {
		assert_eq!(TokenSecret::sanitized(""), None);
		assert_eq!(TokenSecret::sanitized("   "), None);
		assert_eq!(TokenSecret::sanitized("undefined"), None);

		let secret = TokenSecret::sanitized(" jwt-value ")
			.expect("Surrounding whitespace should be trimmed, not rejected.");

		assert_eq!(secret.expose(), "jwt-value");
	}

	#[test]
	fn bearer_prefixes_the_scheme() {
		assert_eq!(TokenSecret::new("abc").bearer(), "Bearer abc");
	}
}
