//! Page reordering session
//!
//! A [`PageSequenceEditor`] tracks one entry per source page in an arena
//! indexed by `source_index`. Moves shift a separate order key instead of
//! re-materializing the list, and deletions only flag entries; gaps left in
//! the key space are closed by [`PageSequenceEditor::finalize`].

use crate::types::*;
use std::collections::BTreeSet;

/// One page of the document being reorganized
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageEntry {
    /// 0-based position in the source document
    pub source_index: usize,
    /// Sort key for the output position
    pub display_order_key: usize,
    /// Extra clockwise rotation (0, 90, 180 or 270)
    pub rotation_delta: u16,
    pub deleted: bool,
    pub selected: bool,
}

impl PageEntry {
    fn new(source_index: usize) -> Self {
        Self {
            source_index,
            display_order_key: source_index,
            rotation_delta: 0,
            deleted: false,
            selected: false,
        }
    }

    fn order(&self) -> (usize, usize) {
        (self.display_order_key, self.source_index)
    }
}

/// Lifecycle of an editing session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Mutations permitted
    Editing,
    /// Output order computed; the session is read-only
    Finalized,
}

/// Working state of an organize session over a fixed set of pages.
///
/// Non-deleted entries always hold distinct order keys.
#[derive(Debug, Clone)]
pub struct PageSequenceEditor {
    entries: Vec<PageEntry>,
    finalized: Option<Vec<PageEntry>>,
}

impl PageSequenceEditor {
    /// Start a session with one entry per source page, in source order.
    pub fn load(page_count: usize) -> Result<Self> {
        if page_count == 0 {
            return Err(OrganizeError::InvalidInput(
                "page count must be positive".to_string(),
            ));
        }

        log::debug!("Loaded organize session with {} pages", page_count);

        Ok(Self {
            entries: (0..page_count).map(PageEntry::new).collect(),
            finalized: None,
        })
    }

    /// Number of source pages, deleted ones included
    pub fn page_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of pages that would survive finalization
    pub fn remaining(&self) -> usize {
        self.entries.iter().filter(|e| !e.deleted).count()
    }

    pub fn state(&self) -> SessionState {
        if self.finalized.is_some() {
            SessionState::Finalized
        } else {
            SessionState::Editing
        }
    }

    /// All entries, indexed by source index
    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    pub fn entry(&self, source_index: usize) -> Option<&PageEntry> {
        self.entries.get(source_index)
    }

    /// Current output order of the non-deleted entries
    pub fn ordered(&self) -> Vec<&PageEntry> {
        let mut live: Vec<&PageEntry> = self.entries.iter().filter(|e| !e.deleted).collect();
        live.sort_by_key(|e| e.order());
        live
    }

    /// Move `source_index` into the slot currently held by `target_source_index`.
    ///
    /// Entries between the two positions shift by one toward the vacated slot;
    /// nothing outside that range changes.
    pub fn move_to(&mut self, source_index: usize, target_source_index: usize) -> Result<()> {
        self.ensure_editing()?;
        let d = self.live_entry(source_index)?.display_order_key;
        let t = self.live_entry(target_source_index)?.display_order_key;

        if d == t {
            return Ok(());
        }

        for entry in self.entries.iter_mut().filter(|e| !e.deleted) {
            let key = entry.display_order_key;
            if d < t && key > d && key <= t {
                entry.display_order_key -= 1;
            } else if d > t && key >= t && key < d {
                entry.display_order_key += 1;
            }
        }
        self.entries[source_index].display_order_key = t;

        log::debug!(
            "Moved page {} to slot of page {} (key {} -> {})",
            source_index,
            target_source_index,
            d,
            t
        );
        Ok(())
    }

    /// Add `delta` degrees (a multiple of 90, may be negative) to one page's rotation.
    pub fn set_rotation(&mut self, source_index: usize, delta: i32) -> Result<()> {
        self.ensure_editing()?;
        let current = self.live_entry(source_index)?.rotation_delta;
        let rotation = rotate(current, delta)?;
        self.entries[source_index].rotation_delta = rotation;
        Ok(())
    }

    /// Rotate every selected, non-deleted page. Returns how many were rotated.
    pub fn rotate_selected(&mut self, delta: i32) -> Result<usize> {
        self.ensure_editing()?;
        check_quarter_turn(delta)?;

        let mut rotated = 0;
        for entry in self.entries.iter_mut().filter(|e| e.selected && !e.deleted) {
            entry.rotation_delta = rotate(entry.rotation_delta, delta)?;
            rotated += 1;
        }
        Ok(rotated)
    }

    pub fn set_selected(&mut self, source_index: usize, selected: bool) -> Result<()> {
        self.ensure_editing()?;
        self.live_entry(source_index)?;
        self.entries[source_index].selected = selected;
        Ok(())
    }

    pub fn select_all(&mut self) -> Result<()> {
        self.ensure_editing()?;
        for entry in self.entries.iter_mut().filter(|e| !e.deleted) {
            entry.selected = true;
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) -> Result<()> {
        self.ensure_editing()?;
        for entry in &mut self.entries {
            entry.selected = false;
        }
        Ok(())
    }

    /// Source indices of the selected, non-deleted pages
    pub fn selection(&self) -> BTreeSet<usize> {
        self.entries
            .iter()
            .filter(|e| e.selected && !e.deleted)
            .map(|e| e.source_index)
            .collect()
    }

    /// Soft-delete a set of pages. Either every index is deleted or none is.
    pub fn mark_deleted(&mut self, source_indices: impl IntoIterator<Item = usize>) -> Result<()> {
        self.ensure_editing()?;
        let indices: BTreeSet<usize> = source_indices.into_iter().collect();
        for &index in &indices {
            self.live_entry(index)?;
        }

        for &index in &indices {
            let entry = &mut self.entries[index];
            entry.deleted = true;
            entry.selected = false;
        }

        log::debug!("Deleted {} pages", indices.len());
        Ok(())
    }

    /// Soft-delete the current selection. Returns how many pages were deleted.
    pub fn delete_selected(&mut self) -> Result<usize> {
        let selection = self.selection();
        let count = selection.len();
        self.mark_deleted(selection)?;
        Ok(count)
    }

    /// Bring a deleted page back at the order key it had when it was deleted.
    ///
    /// Live entries at or after that key shift up by one, so live keys stay
    /// distinct.
    pub fn restore(&mut self, source_index: usize) -> Result<()> {
        self.ensure_editing()?;
        let key = match self.entries.get(source_index) {
            Some(entry) if entry.deleted => entry.display_order_key,
            Some(_) => {
                return Err(OrganizeError::InvalidInput(format!(
                    "page {} is not deleted",
                    source_index
                )));
            }
            None => return Err(OrganizeError::NotFound(source_index)),
        };

        for entry in self
            .entries
            .iter_mut()
            .filter(|e| !e.deleted && e.display_order_key >= key)
        {
            entry.display_order_key += 1;
        }
        self.entries[source_index].deleted = false;

        log::debug!("Restored page {} at key {}", source_index, key);
        Ok(())
    }

    /// Produce the output order and end the session.
    ///
    /// Calling this again returns the same order.
    pub fn finalize(&mut self) -> Result<&[PageEntry]> {
        if self.finalized.is_none() {
            let order: Vec<PageEntry> = self.ordered().into_iter().cloned().collect();
            if order.is_empty() {
                return Err(OrganizeError::EmptyResult);
            }
            log::info!(
                "Finalized {} of {} pages",
                order.len(),
                self.entries.len()
            );
            self.finalized = Some(order);
        }
        Ok(self.finalized.as_deref().unwrap_or_default())
    }

    fn ensure_editing(&self) -> Result<()> {
        match self.state() {
            SessionState::Editing => Ok(()),
            SessionState::Finalized => Err(OrganizeError::Finalized),
        }
    }

    fn live_entry(&self, source_index: usize) -> Result<&PageEntry> {
        self.entries
            .get(source_index)
            .filter(|e| !e.deleted)
            .ok_or(OrganizeError::NotFound(source_index))
    }
}

fn check_quarter_turn(delta: i32) -> Result<()> {
    if delta % 90 != 0 {
        return Err(OrganizeError::InvalidInput(format!(
            "rotation must be a multiple of 90, got {}",
            delta
        )));
    }
    Ok(())
}

fn rotate(current: u16, delta: i32) -> Result<u16> {
    check_quarter_turn(delta)?;
    Ok(((i32::from(current) + delta.rem_euclid(360)) % 360) as u16)
}
