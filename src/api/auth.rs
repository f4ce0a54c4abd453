//! Session endpoints: login, logout, registration, staff management.
//!
//! The platform delivers both session secrets as cookies on successful login;
//! the client harvests them straight into its credential store so the next
//! authenticated call picks them up without caller involvement.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	http::HttpResponse,
	obs::RequestGroup,
	store::CredentialStore,
};

/// Credentials submitted to the login endpoints.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
	/// Account email address.
	pub email: String,
	/// Account password.
	pub password: String,
}
impl LoginRequest {
	/// Creates a login payload.
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self { email: email.into(), password: password.into() }
	}
}
impl Debug for LoginRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Fields accepted by the viewer registration endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
	/// Unique viewer handle.
	pub username: String,
	/// Account email address.
	pub email: String,
	/// Account password.
	pub password: String,
}

/// Fields accepted by the staff-creation endpoint (admin only).
#[derive(Clone, Debug, Serialize)]
pub struct CreateStaffRequest {
	/// Staff email address.
	pub email: String,
	/// Initial password.
	pub password: String,
}

/// Fields accepted by the password-rotation endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct ChangePasswordRequest {
	/// Current password, verified server-side.
	pub old_password: String,
	/// Replacement password.
	pub new_password: String,
}

impl ApiClient {
	/// Signs a viewer in and captures the issued cookie pair into the
	/// credential store.
	pub async fn login(&self, request: &LoginRequest) -> Result<()> {
		let response = self
			.execute(ApiRequest::post("user/login/").group(RequestGroup::Session).json(request)?)
			.await?;

		self.absorb_session(&response).await
	}

	/// Staff sign-in for the back-office.
	pub async fn admin_login(&self, request: &LoginRequest) -> Result<()> {
		let response = self
			.execute(
				ApiRequest::post("user/admin/login/").group(RequestGroup::Session).json(request)?,
			)
			.await?;

		self.absorb_session(&response).await
	}

	/// Ends the session server-side; local credentials are cleared whether or
	/// not the wire call succeeds.
	pub async fn logout(&self) -> Result<()> {
		let result = self.execute(ApiRequest::post("user/logout/").group(RequestGroup::Session)).await;

		self.store.clear().await?;
		result.map(|_| ())
	}

	/// Registers a viewer account; the account stays signed out until verified.
	pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
		self.execute(
			ApiRequest::post("user/register/").group(RequestGroup::Session).json(request)?,
		)
		.await
		.map(|_| ())
	}

	/// Creates a staff account (admin only).
	pub async fn create_staff(&self, request: &CreateStaffRequest) -> Result<()> {
		self.execute(
			ApiRequest::post("user/create-staff/").group(RequestGroup::Session).json(request)?,
		)
		.await
		.map(|_| ())
	}

	/// Rotates the signed-in account's password.
	pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
		self.execute(
			ApiRequest::post("user/change-password/").group(RequestGroup::Session).json(request)?,
		)
		.await
		.map(|_| ())
	}

	async fn absorb_session(&self, response: &HttpResponse) -> Result<()> {
		let mut pair = self.store.load().await?;

		pair.absorb(&response.set_cookies());

		if pair.is_empty() {
			return Err(Error::Unauthorized {
				reason: "Login response carried no session cookies.".into(),
			});
		}

		self.store.store_pair(pair).await?;

		Ok(())
	}
}
