use async_trait::async_trait;

use crate::error::Result;
use crate::models::entity::EntityKind;

/// Storage boundary for bulk removal of entity rows.
///
/// Implementations exist for PostgreSQL and for an in-memory store that enforces
/// foreign keys the same way the schema does.
#[async_trait]
pub trait PurgeStore: Send + Sync {
    /// Physical rows of `kind`, tombstoned rows included.
    async fn count(&self, kind: EntityKind) -> Result<u64>;

    /// Standard removal of every row of `kind`. For soft-deletable kinds this
    /// only sets the tombstone on live rows.
    async fn delete_all(&self, kind: EntityKind) -> Result<u64>;

    /// Permanent removal of every row of `kind`, bypassing tombstones.
    ///
    /// Fails with `UnsupportedOperation` unless
    /// [`EntityKind::supports_hard_delete`] holds for `kind`.
    async fn hard_delete_all(&self, kind: EntityKind) -> Result<u64>;

    /// Name used in logs
    fn store_name(&self) -> &'static str;
}
