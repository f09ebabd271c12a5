use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// A tenant-scoped resource kept in the document store.
///
/// Serialized documents carry `organization_id` and `branch_id` as top-level
/// string fields so that scoping filters can match them.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;

    fn document_id(&self) -> Uuid;
}
