//! Access/refresh credential pair and `Set-Cookie` harvesting.
//!
//! The platform delivers both session secrets as cookies on login and refresh
//! responses. [`CredentialPair`] keeps the sanitized view every consumer works
//! with, and [`SetCookie`] extracts the name/value lead of one `Set-Cookie`
//! header without interpreting its attributes.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Cookie carrying the short-lived bearer secret.
pub const ACCESS_COOKIE: &str = "access_token";
/// Cookie carrying the long-lived refresh secret.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Sanitized access/refresh pair held by a credential store.
///
/// Either side may be absent; a request with no access token is dispatched
/// without an `Authorization` header, and a refresh with no refresh token
/// fails fast as not authenticated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
	/// Short-lived bearer secret attached to outgoing requests.
	pub access: Option<TokenSecret>,
	/// Long-lived secret exchanged for a new bearer on 401.
	pub refresh: Option<TokenSecret>,
}
impl CredentialPair {
	/// Builds a pair from already-sanitized secrets.
	pub fn new(access: Option<TokenSecret>, refresh: Option<TokenSecret>) -> Self {
		Self { access, refresh }
	}

	/// Builds a pair from raw cookie values, applying sanitization to each.
	pub fn from_raw(access: impl AsRef<str>, refresh: impl AsRef<str>) -> Self {
		Self { access: TokenSecret::sanitized(access), refresh: TokenSecret::sanitized(refresh) }
	}

	/// Returns `true` when neither secret is present.
	pub fn is_empty(&self) -> bool {
		self.access.is_none() && self.refresh.is_none()
	}

	/// Merges session cookies harvested from a response into the pair.
	///
	/// Unrelated cookies are ignored; a session cookie with an absent value
	/// leaves the existing secret untouched rather than clearing it.
	pub fn absorb(&mut self, cookies: &[SetCookie]) {
		for cookie in cookies {
			match cookie.name.as_str() {
				ACCESS_COOKIE =>
					if let Some(secret) = TokenSecret::sanitized(&cookie.value) {
						self.access = Some(secret);
					},
				REFRESH_COOKIE =>
					if let Some(secret) = TokenSecret::sanitized(&cookie.value) {
						self.refresh = Some(secret);
					},
				_ => {},
			}
		}
	}
}

/// Name/value lead of one `Set-Cookie` header; attributes are not interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetCookie {
	/// Cookie name.
	pub name: String,
	/// Raw cookie value, unsanitized.
	pub value: String,
}
impl SetCookie {
	/// Parses the leading name/value pair of a `Set-Cookie` header value.
	pub fn parse(header: &str) -> Option<Self> {
		let lead = header.split(';').next()?;
		let (name, value) = lead.split_once('=')?;
		let name = name.trim();

		if name.is_empty() {
			return None;
		}

		Some(Self { name: name.to_owned(), value: value.trim().to_owned() })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn set_cookie_parses_lead_and_ignores_attributes() {
		let cookie = SetCookie::parse("access_token=abc.def.ghi; Path=/; SameSite=Lax")
			.expect("Well-formed Set-Cookie header should parse.");

		assert_eq!(cookie.name, "access_token");
		assert_eq!(cookie.value, "abc.def.ghi");
		assert_eq!(SetCookie::parse("no-equals-sign"), None);
		assert_eq!(SetCookie::parse("=value-without-name"), None);
	}

	#[test]
	fn absorb_keeps_existing_secret_on_absent_value() {
		let mut pair = CredentialPair::from_raw("old-access", "old-refresh");
		let cookies = [
			SetCookie { name: ACCESS_COOKIE.into(), value: "new-access".into() },
			SetCookie { name: REFRESH_COOKIE.into(), value: "undefined".into() },
			SetCookie { name: "csrftoken".into(), value: "ignored".into() },
		];

		pair.absorb(&cookies);

		assert_eq!(pair.access.as_ref().map(TokenSecret::expose), Some("new-access"));
		assert_eq!(pair.refresh.as_ref().map(TokenSecret::expose), Some("old-refresh"));
	}

	#[test]
	fn from_raw_sanitizes_both_sides() {
		let pair = CredentialPair::from_raw("undefined", "");

		assert!(pair.is_empty());
	}
}
