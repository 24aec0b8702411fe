//! `ProfileStore` trait: the single write the onboarding flow needs from
//! persistence.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::onboarding::model::ProfileRecord;

/// Backend-agnostic profile store.
///
/// The flow only ever creates records; reads, updates and deletes are not
/// part of this interface.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Write one new profile record.
    async fn create_profile(&self, record: &ProfileRecord) -> Result<(), StoreError>;
}
