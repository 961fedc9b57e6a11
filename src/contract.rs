//! The election contract: five operations over a [`LedgerStore`].
//!
//! Every operation starts with the same existence guard (one ledger read)
//! and only touches the ledger again once the guard passes. The guard and
//! the follow-up write are separate ledger calls, so two concurrent
//! `create_election` calls for one id can both pass the guard, and
//! concurrent updates are last-write-wins. Isolation is the ledger's job.

use crate::election::Election;
use crate::error::{RegistryError, Result};
use crate::storage::LedgerStore;
use tracing::{debug, info};

/// True iff a non-empty value is stored at `id`.
pub async fn election_exists(store: &dyn LedgerStore, id: &str) -> Result<bool> {
    let buffer = store.get_state(id).await?;
    let exists = buffer.is_some_and(|b| !b.is_empty());
    debug!("Election {} exists: {}", id, exists);
    Ok(exists)
}

pub async fn create_election(
    store: &dyn LedgerStore,
    id: &str,
    name: &str,
    description: &str,
) -> Result<()> {
    if election_exists(store, id).await? {
        return Err(RegistryError::AlreadyExists(id.to_string()));
    }

    let election = Election::new(id, name, description);
    store.put_state(id, election.encode()?).await?;

    info!("Created election: {}", id);
    Ok(())
}

pub async fn read_election(store: &dyn LedgerStore, id: &str) -> Result<Election> {
    if !election_exists(store, id).await? {
        return Err(RegistryError::NotFound(id.to_string()));
    }

    let buffer = load(store, id).await?;
    Election::decode(id, &buffer)
}

/// Replaces `name` and `description` of an existing election.
///
/// The stored record is decoded and re-encoded rather than rebuilt, so its
/// `id` and any fields this crate does not model are kept.
pub async fn update_election(
    store: &dyn LedgerStore,
    id: &str,
    name: &str,
    description: &str,
) -> Result<()> {
    if !election_exists(store, id).await? {
        return Err(RegistryError::NotFound(id.to_string()));
    }

    let buffer = load(store, id).await?;
    let mut election = Election::decode(id, &buffer)?;
    election.name = name.to_string();
    election.description = description.to_string();
    store.put_state(id, election.encode()?).await?;

    info!("Updated election: {}", id);
    Ok(())
}

pub async fn delete_election(store: &dyn LedgerStore, id: &str) -> Result<()> {
    if !election_exists(store, id).await? {
        return Err(RegistryError::NotFound(id.to_string()));
    }

    store.delete_state(id).await?;

    info!("Deleted election: {}", id);
    Ok(())
}

// The value can vanish between the guard and this read when another caller
// deletes it; that surfaces as NotFound rather than as an empty record.
async fn load(store: &dyn LedgerStore, id: &str) -> Result<Vec<u8>> {
    match store.get_state(id).await? {
        Some(buffer) if !buffer.is_empty() => Ok(buffer),
        _ => Err(RegistryError::NotFound(id.to_string())),
    }
}
