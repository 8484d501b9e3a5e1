//! Selection / modal controller.
//!
//! Tracks which entity is focused in the detail overlay. Opening always
//! succeeds and replaces any previous selection. Closing forgets the
//! reference entirely.

use crate::store::EntityRef;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(EntityRef),
}

/// What dismissed the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseCause {
    /// Close button or an action completing
    Explicit,
    /// Click landed outside the overlay
    OutsideClick,
    /// Escape key
    Cancel,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: ModalState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, entity: EntityRef) {
        debug!(%entity, "modal opened");
        self.state = ModalState::Open(entity);
    }

    /// Returns the reference that was open, if any
    pub fn close(&mut self, cause: CloseCause) -> Option<EntityRef> {
        match std::mem::take(&mut self.state) {
            ModalState::Open(entity) => {
                debug!(%entity, ?cause, "modal closed");
                Some(entity)
            }
            ModalState::Closed => None,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn selected(&self) -> Option<&EntityRef> {
        match &self.state {
            ModalState::Open(entity) => Some(entity),
            ModalState::Closed => None,
        }
    }
}
