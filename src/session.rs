use crate::model::{ModelResult, RootConfig};
use crate::store::SnapshotSink;

/// Owns the current document. Edits replace it wholesale; each successful
/// edit is recorded for undo and handed to the snapshot sink.
pub struct Session {
    history: Vec<RootConfig>,
    history_index: usize,
    max_undo_steps: usize,
    sink: Box<dyn SnapshotSink>,
}

impl Session {
    pub fn new(initial: RootConfig, sink: Box<dyn SnapshotSink>, max_undo_steps: usize) -> Self {
        Self {
            history: vec![initial],
            history_index: 0,
            max_undo_steps,
            sink,
        }
    }

    pub fn config(&self) -> &RootConfig {
        &self.history[self.history_index]
    }

    /// Applies `edit` to the current document. On error nothing changes.
    pub fn try_edit<T>(
        &mut self,
        edit: impl FnOnce(&RootConfig) -> ModelResult<(RootConfig, T)>,
    ) -> ModelResult<T> {
        let (next, value) = edit(self.config())?;
        self.commit(next);
        Ok(value)
    }

    pub fn edit(
        &mut self,
        edit: impl FnOnce(&RootConfig) -> ModelResult<RootConfig>,
    ) -> ModelResult<()> {
        self.try_edit(|cfg| edit(cfg).map(|next| (next, ())))
    }

    /// Replaces the current document. An identical document is not recorded.
    pub fn commit(&mut self, next: RootConfig) {
        if &next == self.config() {
            return;
        }

        // Drop any redo states
        self.history.truncate(self.history_index + 1);
        self.history.push(next);
        self.history_index += 1;

        // Limit history size
        if self.history.len() > self.max_undo_steps + 1 {
            self.history.remove(0);
            self.history_index -= 1;
        }

        self.sink.submit(self.config());
    }

    pub fn can_undo(&self) -> bool {
        self.history_index > 0
    }

    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.history_index -= 1;
        self.sink.submit(self.config());
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.history_index + 1 >= self.history.len() {
            return false;
        }
        self.history_index += 1;
        self.sink.submit(self.config());
        true
    }
}
