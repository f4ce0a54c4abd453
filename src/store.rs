//! Storage contracts and built-in credential stores.

pub mod file;
pub mod memory;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret},
};

/// Boxed future returned by [`CredentialStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Persistence contract for the platform session credentials.
///
/// Implementations own where the pair lives (process memory, a file, a cookie
/// jar shim) and must return sanitized values: callers rely on `load` never
/// surfacing the empty string or the `"undefined"` cookie literal.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Returns the credential pair currently held.
	fn load(&self) -> StoreFuture<'_, CredentialPair>;

	/// Replaces the access token, keeping the refresh token untouched.
	fn store_access(&self, access: TokenSecret) -> StoreFuture<'_, ()>;

	/// Replaces both credentials.
	fn store_pair(&self, pair: CredentialPair) -> StoreFuture<'_, ()>;

	/// Drops both credentials.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
