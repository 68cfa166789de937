//! Snapshot/rollback helper for optimistic mutations
//!
//! The visible state is updated synchronously on the assumption the write
//! will succeed; if the authoritative write fails, the pre-mutation snapshot
//! is restored and the failure is handed back to the caller to surface.

use std::future::Future;

/// Apply `local` to `state` immediately, then run `remote`
///
/// On remote success the local state is left as mutated (optionally
/// reconciled by the caller from the returned value). On remote failure the
/// state is restored to the snapshot taken before the local mutation.
pub async fn apply<S, T, E, L, R, Fut>(state: &mut S, local: L, remote: R) -> Result<T, E>
where
    S: Clone,
    L: FnOnce(&mut S),
    R: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let snapshot = state.clone();
    local(state);

    match remote().await {
        Ok(value) => Ok(value),
        Err(e) => {
            *state = snapshot;
            Err(e)
        }
    }
}
