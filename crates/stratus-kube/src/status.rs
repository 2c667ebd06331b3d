//! Optimistic status updates for manifest sets
//!
//! The updater owns the read-modify-write loop: it fetches the current
//! copy, runs a caller-supplied mutation against a clone of its status,
//! and writes the result back keyed on the fetched resource version. A
//! conflicting write means a concurrent writer got there first; the
//! attempt is discarded wholesale and replayed against a fresh fetch.
//! Callers see either the final status plus an "anything changed" flag or
//! one terminal error; conflicts are never surfaced.

use stratus_api::{ManifestSetStatus, StatusCondition};

use crate::conditions::set_status_condition;
use crate::error::Result;
use crate::store::ManifestSetStore;

/// Fetch, mutate, and conditionally write a manifest set's status until
/// the write lands or a terminal error occurs.
///
/// The mutation runs on a clone of the fetched status and must be
/// idempotent given the same logical inputs: on conflict it is replayed
/// against a freshly fetched copy rather than three-way merged. When the
/// mutated status equals the fetched one, no write is issued at all and
/// the call reports `updated == false`, so reconciling an
/// already-converged resource causes no resource-version churn.
///
/// Errors from the fetch, the mutation itself, or a non-conflict write are
/// fatal and surfaced immediately without retry.
///
/// The retry loop is unbounded; it terminates when contention subsides or
/// when the caller abandons it. Every iteration suspends on store I/O, so
/// dropping the returned future (through `tokio::time::timeout`, a
/// `select!` arm, or task abort) cancels the loop at the next await
/// point. The deadline belongs to the caller, not the loop.
pub async fn update_manifest_set_status<S, F>(
    store: &S,
    namespace: &str,
    name: &str,
    mut mutate: F,
) -> Result<(ManifestSetStatus, bool)>
where
    S: ManifestSetStore + ?Sized,
    F: FnMut(&mut ManifestSetStatus) -> Result<()>,
{
    loop {
        let manifest_set = store.get(namespace, name).await?;

        let mut new_status = manifest_set.status.clone();
        mutate(&mut new_status)?;

        if new_status == manifest_set.status {
            // Nothing observable changed; skip the write and the version
            // churn it would cause.
            return Ok((new_status, false));
        }

        let mut desired = manifest_set;
        desired.status = new_status;

        match store.update_status(&desired).await {
            Ok(persisted) => return Ok((persisted.status, true)),
            Err(e) if e.is_conflict() => {
                tracing::debug!(
                    namespace,
                    name,
                    "status write lost to a concurrent writer, refetching"
                );
            }
            Err(e) => return Err(e),
        }
    }
}

/// Mutation that merges one set-level condition
///
/// Convenience adapter for the common case of reporting a single condition:
/// the returned closure feeds the condition through
/// [`set_status_condition`] on every (re)play.
pub fn set_condition_fn(
    condition: StatusCondition,
) -> impl FnMut(&mut ManifestSetStatus) -> Result<()> {
    move |status| {
        set_status_condition(&mut status.conditions, condition.clone());
        Ok(())
    }
}
