//! Seeding controller.
//!
//! Populates an empty task collection from the static catalog, exactly
//! once. Concurrent initializers either both write the identical full
//! catalog (last write wins, result is convergent) or one observes a
//! non-empty collection and skips.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::TaskDocument;
use crate::store::Store;

/// Seed the collection if it is observed empty. Returns `true` if this
/// call wrote the catalog.
///
/// Never writes a partial catalog and never touches a non-empty
/// collection. Safe to retry: emptiness is re-checked every call.
pub async fn ensure_seeded<S: Store>(store: &S, catalog: &[TaskDocument]) -> Result<bool> {
    let mut sub = store.subscribe().await?;
    let first = sub
        .next()
        .await
        .ok_or_else(|| Error::Unavailable("subscription closed before first emission".to_string()))??;

    if !first.is_empty() {
        debug!(count = first.len(), "collection already seeded");
        return Ok(false);
    }

    store.batch_write(catalog).await?;
    info!(count = catalog.len(), "seeded empty task collection");
    Ok(true)
}
