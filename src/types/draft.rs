use serde::{Deserialize, Serialize};

use crate::error::OutreachError;

/// Generated items the user reviews before acting on them.
pub trait Discardable {
    fn is_discarded(&self) -> bool;
    fn set_discarded(&mut self, discarded: bool);
}

/// An ordered batch of generated drafts, each individually selectable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftBatch<T> {
    items: Vec<T>,
}

impl<T> Default for DraftBatch<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Discardable> DraftBatch<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn update(&mut self, index: usize, item: T) -> Result<(), OutreachError> {
        let slot = self
            .items
            .get_mut(index)
            .ok_or(OutreachError::NotFound("draft"))?;
        *slot = item;
        Ok(())
    }

    pub fn toggle_discard(&mut self, index: usize) -> Result<bool, OutreachError> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(OutreachError::NotFound("draft"))?;
        let discarded = !item.is_discarded();
        item.set_discarded(discarded);
        Ok(discarded)
    }

    pub fn select_all(&mut self) {
        self.items.iter_mut().for_each(|i| i.set_discarded(false));
    }

    pub fn deselect_all(&mut self) {
        self.items.iter_mut().for_each(|i| i.set_discarded(true));
    }

    pub fn active(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|i| !i.is_discarded())
    }

    pub fn selected_count(&self) -> usize {
        self.active().count()
    }

    /// Drop discarded drafts, keeping order.
    pub fn into_active(self) -> Vec<T> {
        self.items
            .into_iter()
            .filter(|i| !i.is_discarded())
            .collect()
    }
}
