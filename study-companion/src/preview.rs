//! Preview resources for selected images
//!
//! A preview is a locally constructed handle over a selected file that the
//! UI can display. Each one is registered on creation and must be released
//! exactly once: explicitly via [`PreviewHandle::release`] when a selection
//! is replaced or cleared, or by `Drop` when the owning workflow goes away.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use study_companion_sdk::FileHandle;
use tracing::{trace, warn};
use uuid::Uuid;

/// What the UI shows for a preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    pub uri: String,
    pub file_name: String,
    pub mime: String,
    pub size: usize,
}

#[derive(Debug, Default)]
struct RegistryState {
    live: HashMap<Uuid, PreviewInfo>,
    created: usize,
    released: usize,
}

/// Tracks live previews. Cloning shares the same registry.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    state: Arc<Mutex<RegistryState>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a preview for `file`
    pub fn create(&self, file: &FileHandle) -> PreviewHandle {
        let id = Uuid::new_v4();
        let info = PreviewInfo {
            uri: format!("preview://{}/{}", id, file.name()),
            file_name: file.name().to_string(),
            mime: file.mime().to_string(),
            size: file.len(),
        };

        {
            let mut state = self.lock();
            state.live.insert(id, info.clone());
            state.created += 1;
        }
        trace!(uri = %info.uri, "preview created");

        PreviewHandle {
            id,
            info,
            registry: self.clone(),
            released: false,
        }
    }

    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    pub fn is_live(&self, uri: &str) -> bool {
        self.lock().live.values().any(|info| info.uri == uri)
    }

    pub fn created_count(&self) -> usize {
        self.lock().created
    }

    pub fn released_count(&self) -> usize {
        self.lock().released
    }

    fn release(&self, id: Uuid) {
        let mut state = self.lock();
        match state.live.remove(&id) {
            Some(info) => {
                state.released += 1;
                trace!(uri = %info.uri, "preview released");
            }
            None => warn!(%id, "preview released twice"),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Owned preview resource; released at most once
#[derive(Debug)]
pub struct PreviewHandle {
    id: Uuid,
    info: PreviewInfo,
    registry: PreviewRegistry,
    released: bool,
}

impl PreviewHandle {
    pub fn uri(&self) -> &str {
        &self.info.uri
    }

    pub fn info(&self) -> &PreviewInfo {
        &self.info
    }

    /// Release the resource now
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            self.registry.release(self.id);
        }
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.release_once();
    }
}
