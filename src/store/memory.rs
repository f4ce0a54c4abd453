//! Thread-safe in-memory [`CredentialStore`] for tests, demos, and short-lived sessions.

// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret},
	store::{CredentialStore, StoreFuture},
};

type Shared = Arc<RwLock<CredentialPair>>;

/// Keeps the credential pair in process memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryCredentialStore(Shared);
impl MemoryCredentialStore {
	/// Seeds the store with raw cookie values, applying sanitization.
	pub fn with_raw(access: impl AsRef<str>, refresh: impl AsRef<str>) -> Self {
		Self(Arc::new(RwLock::new(CredentialPair::from_raw(access, refresh))))
	}

	/// Seeds the store with an already-built pair.
	pub fn with_pair(pair: CredentialPair) -> Self {
		Self(Arc::new(RwLock::new(pair)))
	}

	/// Returns a snapshot of the current pair without going through the trait.
	pub fn snapshot(&self) -> CredentialPair {
		self.0.read().clone()
	}
}
impl CredentialStore for MemoryCredentialStore {
	fn load(&self) -> StoreFuture<'_, CredentialPair> {
		let shared = self.0.clone();

		Box::pin(async move { Ok(shared.read().clone()) })
	}

	fn store_access(&self, access: TokenSecret) -> StoreFuture<'_, ()> {
		let shared = self.0.clone();

		Box::pin(async move {
			shared.write().access = Some(access);

			Ok(())
		})
	}

	fn store_pair(&self, pair: CredentialPair) -> StoreFuture<'_, ()> {
		let shared = self.0.clone();

		Box::pin(async move {
			*shared.write() = pair;

			Ok(())
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		let shared = self.0.clone();

		Box::pin(async move {
			*shared.write() = CredentialPair::default();

			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;

	#[test]
	fn store_access_preserves_refresh() {
		let store = MemoryCredentialStore::with_raw("access-0", "refresh-0");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for memory store test.");

		rt.block_on(store.store_access(TokenSecret::new("access-1")))
			.expect("Storing a new access token should succeed.");

		let pair = store.snapshot();

		assert_eq!(pair.access.as_ref().map(TokenSecret::expose), Some("access-1"));
		assert_eq!(pair.refresh.as_ref().map(TokenSecret::expose), Some("refresh-0"));
	}

	#[test]
	fn clear_drops_both_sides() {
		let store = MemoryCredentialStore::with_raw("access", "refresh");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for memory store test.");

		rt.block_on(store.clear()).expect("Clearing the store should succeed.");

		assert!(store.snapshot().is_empty());
	}

	#[test]
	fn seeding_sanitizes_cookie_literals() {
		let store = MemoryCredentialStore::with_raw("undefined", "refresh-ok");
		let pair = store.snapshot();

		assert!(pair.access.is_none());
		assert_eq!(pair.refresh.as_ref().map(TokenSecret::expose), Some("refresh-ok"));
	}
}
