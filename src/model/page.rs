//! Paginated list envelope shared by the catalog and search endpoints.

// self
use crate::_prelude::*;

/// Offset-paginated result envelope.
///
/// List endpoints return `{count, next, previous, results}`; the hand-rolled
/// search endpoint omits the navigation links, so both are optional.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
	/// Total number of matching records across every page.
	pub count: u64,
	/// URL of the next page, when one exists.
	#[serde(default)]
	pub next: Option<String>,
	/// URL of the previous page, when one exists.
	#[serde(default)]
	pub previous: Option<String>,
	/// Records on this page.
	pub results: Vec<T>,
}
impl<T> Page<T> {
	/// Returns `true` when this page carries no records.
	pub fn is_empty(&self) -> bool {
		self.results.is_empty()
	}

	/// Returns the number of records on this page (not the total count).
	pub fn len(&self) -> usize {
		self.results.len()
	}

	/// Returns `true` when a further page exists.
	pub fn has_next(&self) -> bool {
		self.next.is_some()
	}
}
impl<T> IntoIterator for Page<T> {
	type IntoIter = std::vec::IntoIter<T>;
	type Item = T;

	fn into_iter(self) -> Self::IntoIter {
		self.results.into_iter()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn envelope_tolerates_missing_navigation_links() {
		let page: Page<u64> = serde_json::from_str("{\"count\":3,\"results\":[1,2,3]}")
			.expect("Envelope without next/previous should deserialize.");

		assert_eq!(page.count, 3);
		assert_eq!(page.len(), 3);
		assert!(!page.has_next());
	}
}
