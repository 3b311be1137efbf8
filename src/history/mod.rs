//! Image descriptors delivered by the external loader and the navigable
//! history of viewed images.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("descriptor index {index} is out of bounds for {sibling_count} sibling(s)")]
    IndexOutOfBounds { index: usize, sibling_count: usize },
}

/// A loaded image plus its position within its folder's ordered sibling list.
///
/// Immutable once pushed to history: jumps produce new descriptor values
/// rather than mutating the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub path: String,
    pub siblings: Vec<String>,
    pub index: usize,
}

impl ImageDescriptor {
    /// Validates an inbound descriptor from the external loader.
    pub fn new(
        path: String,
        siblings: Vec<String>,
        index: usize,
    ) -> Result<Self, DescriptorError> {
        if !siblings.is_empty() && index >= siblings.len() {
            return Err(DescriptorError::IndexOutOfBounds {
                index,
                sibling_count: siblings.len(),
            });
        }
        Ok(Self {
            path,
            siblings,
            index,
        })
    }

    /// Final path component, for display.
    pub fn filename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// New descriptor at `index` within the same siblings, clamped to the
    /// valid range. Returns `None` when there are no siblings or the clamped
    /// target is the current image.
    pub fn jump_to_index(&self, index: usize) -> Option<ImageDescriptor> {
        if self.siblings.is_empty() {
            return None;
        }
        let target = index.min(self.siblings.len() - 1);
        if target == self.index {
            return None;
        }
        Some(ImageDescriptor {
            path: self.siblings[target].clone(),
            siblings: self.siblings.clone(),
            index: target,
        })
    }

    /// Steps `offset` entries through the sibling list, clamping at both ends.
    pub fn sibling_jump(&self, offset: isize) -> Option<ImageDescriptor> {
        if self.siblings.is_empty() {
            return None;
        }
        let target = self
            .index
            .saturating_add_signed(offset)
            .min(self.siblings.len() - 1);
        self.jump_to_index(target)
    }
}

/// Parses a 1-based human index entry into a 0-based sibling index.
///
/// Non-numeric input is silently ignored (`None`). Entries below 1 clamp to
/// the first sibling; upper-range clamping is left to the jump itself.
pub fn parse_index_input(text: &str) -> Option<usize> {
    let entered: i64 = text.trim().parse().ok()?;
    Some(entered.saturating_sub(1).max(0) as usize)
}

/// Stack of viewed-image snapshots with a movable cursor.
///
/// Pushing from a non-terminal cursor discards the abandoned forward branch
/// first, standard undo/redo semantics.
#[derive(Debug, Default)]
pub struct NavigationHistory {
    entries: Vec<ImageDescriptor>,
    cursor: Option<usize>,
}

impl NavigationHistory {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&ImageDescriptor> {
        self.entries.get(self.cursor?)
    }

    /// Appends a value-isolated snapshot of `descriptor` and moves the cursor
    /// to it, truncating any forward branch beyond the cursor first.
    pub fn push(&mut self, descriptor: &ImageDescriptor) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push(descriptor.clone());
        self.cursor = Some(self.entries.len() - 1);
        tracing::debug!(
            path = %descriptor.path,
            entries = self.entries.len(),
            "history entry pushed"
        );
    }

    /// Moves the cursor by `direction` (-1 or +1) and returns the entry to
    /// restore. Out-of-bounds steps are silently absorbed.
    pub fn step(&mut self, direction: isize) -> Option<&ImageDescriptor> {
        let cursor = self.cursor?;
        let target = cursor.checked_add_signed(direction)?;
        if target >= self.entries.len() {
            return None;
        }
        self.cursor = Some(target);
        self.entries.get(target)
    }
}
