//! Simple file-backed [`CredentialStore`] for CLI tools and long-lived daemons.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret},
	store::{CredentialStore, StoreError, StoreFuture},
};

/// On-disk snapshot format; `saved_at` exists for operator inspection only.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct Snapshot {
	pair: CredentialPair,
	saved_at: OffsetDateTime,
}

/// Persists the credential pair to a JSON file after each mutation.
///
/// Writes go through a sibling temporary file and an atomic rename so a crash
/// mid-write never leaves a truncated snapshot behind.
#[derive(Clone, Debug)]
pub struct FileCredentialStore {
	path: PathBuf,
	inner: Arc<RwLock<CredentialPair>>,
}
impl FileCredentialStore {
	/// Opens (or creates) a store at the provided path, eagerly loading any
	/// existing snapshot.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let pair = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(pair)) })
	}

	fn load_snapshot(path: &Path) -> Result<CredentialPair, StoreError> {
		if !path.exists() {
			return Ok(CredentialPair::default());
		}

		let metadata = path.metadata().map_err(|e| StoreError::Backend {
			message: format!("Failed to inspect {}: {e}", path.display()),
		})?;

		if metadata.len() == 0 {
			return Ok(CredentialPair::default());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;
		let snapshot: Snapshot =
			serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
				message: format!("Failed to parse {}: {e}", path.display()),
			})?;

		Ok(snapshot.pair)
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist_locked(&self, pair: &CredentialPair) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let snapshot = Snapshot { pair: pair.clone(), saved_at: OffsetDateTime::now_utc() };
		let serialized =
			serde_json::to_vec_pretty(&snapshot).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize credential snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl CredentialStore for FileCredentialStore {
	fn load(&self) -> StoreFuture<'_, CredentialPair> {
		Box::pin(async move { Ok(self.inner.read().clone()) })
	}

	fn store_access(&self, access: TokenSecret) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			guard.access = Some(access);
			self.persist_locked(&guard)?;

			Ok(())
		})
	}

	fn store_pair(&self, pair: CredentialPair) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			*guard = pair;
			self.persist_locked(&guard)?;

			Ok(())
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			*guard = CredentialPair::default();
			self.persist_locked(&guard)?;

			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;

	fn temp_path() -> PathBuf {
		let unique = format!(
			"vod_client_file_store_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	#[test]
	fn store_and_reload_round_trip() {
		let path = temp_path();
		let store = FileCredentialStore::open(&path).expect("Failed to open file store snapshot.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		rt.block_on(store.store_pair(CredentialPair::from_raw("access-disk", "refresh-disk")))
			.expect("Failed to persist fixture pair to file store.");
		drop(store);

		let reopened =
			FileCredentialStore::open(&path).expect("Failed to reopen file store snapshot.");
		let pair = rt
			.block_on(reopened.load())
			.expect("Failed to load fixture pair from reopened file store.");

		assert_eq!(pair.access.as_ref().map(TokenSecret::expose), Some("access-disk"));
		assert_eq!(pair.refresh.as_ref().map(TokenSecret::expose), Some("refresh-disk"));

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary credential snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn clear_persists_the_empty_pair() {
		let path = temp_path();
		let store = FileCredentialStore::open(&path).expect("Failed to open file store snapshot.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		rt.block_on(store.store_pair(CredentialPair::from_raw("access", "refresh")))
			.expect("Failed to persist fixture pair to file store.");
		rt.block_on(store.clear()).expect("Failed to clear file store.");
		drop(store);

		let reopened =
			FileCredentialStore::open(&path).expect("Failed to reopen file store snapshot.");
		let pair =
			rt.block_on(reopened.load()).expect("Failed to load pair from reopened file store.");

		assert!(pair.is_empty());

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary credential snapshot {}: {e}", path.display())
		});
	}
}
