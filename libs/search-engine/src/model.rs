//! Searchable entity models

use crate::Result;
use async_trait::async_trait;

/// An entity whose records are indexed in the search backend.
///
/// The implementor is also the record-lookup collaborator: search hits carry
/// only identifiers, and `find_by_ids` turns them back into records.
#[async_trait]
pub trait Searchable: Send + Sync + 'static {
    type Record: Send;

    /// Storage name of the entity (e.g. `"posts"`).
    fn table(&self) -> &str;

    /// Index name override. Defaults to [`Searchable::table`].
    fn searchable_as(&self) -> Option<String> {
        None
    }

    /// Identifier of a record, matching the `_id` of its search hit.
    fn record_key(record: &Self::Record) -> String;

    /// Load the records for `ids`. Order of the result is not significant;
    /// unknown ids are simply absent.
    ///
    /// A record store failure should be reported as
    /// [`Error::Lookup`](crate::Error::Lookup); it reaches the `paginate`
    /// caller unchanged.
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Self::Record>>;
}

/// Index a model's searches target by default.
pub fn index_name<M: Searchable>(model: &M) -> String {
    model
        .searchable_as()
        .unwrap_or_else(|| model.table().to_string())
}
