use futures::future::AbortHandle;

/// In-flight upstream calls issued since the last abort sweep.
///
/// Every tracked call is stamped with the generation current at the time it
/// was issued. `abort_all` aborts the handles and advances the generation, so
/// a completion that slipped past the abort still sees a stale stamp.
#[derive(Debug, Default)]
pub struct PendingRequests {
    generation: u64,
    handles: Vec<AbortHandle>,
}

impl PendingRequests {
    pub fn track(&mut self, handle: AbortHandle) -> u64 {
        self.handles.push(handle);
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn abort_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        self.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
