use std::sync::Mutex;

use crate::database::DatabaseManager;
use crate::error::Result;

/// Connection state of a store
#[derive(Debug)]
pub(crate) enum Lifecycle {
    /// No connection, no schema
    Uninitialized,
    /// Connection open and schema created
    Ready(DatabaseManager),
}

/// Guards the single Uninitialized -> Ready transition.
///
/// The lock is held while the setup closure runs, so concurrent first calls
/// perform setup once and the rest observe `Ready`. A failed setup leaves the
/// state `Uninitialized` and the next call retries.
#[derive(Debug)]
pub(crate) struct LifecycleCell {
    state: Mutex<Lifecycle>,
}

impl LifecycleCell {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(Lifecycle::Uninitialized),
        }
    }

    pub(crate) fn get_or_init<F>(&self, setup: F) -> Result<DatabaseManager>
    where
        F: FnOnce() -> Result<DatabaseManager>,
    {
        let mut state = self.state.lock()?;
        if let Lifecycle::Ready(manager) = &*state {
            return Ok(manager.clone());
        }

        let manager = setup()?;
        *state = Lifecycle::Ready(manager.clone());
        Ok(manager)
    }

    /// The connection if the store is `Ready`
    pub(crate) fn ready(&self) -> Result<Option<DatabaseManager>> {
        let state = self.state.lock()?;
        Ok(match &*state {
            Lifecycle::Ready(manager) => Some(manager.clone()),
            Lifecycle::Uninitialized => None,
        })
    }
}
