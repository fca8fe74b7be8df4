//! Category indices and the visibility mask.
//!
//! The 8-color palette itself belongs to the presentation layer; the core
//! only stores the integer index and filters queries by the mask.

use serde::{Deserialize, Serialize};

/// Size of the fixed category palette.
pub const CATEGORY_COUNT: u8 = 8;

/// Per-category visibility toggles used by read-only queries.
///
/// Defaults to all categories visible. Out-of-range indices are treated as
/// hidden rather than panicking, so a corrupt category can never make a
/// query fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMask([bool; CATEGORY_COUNT as usize]);

impl Default for CategoryMask {
    fn default() -> Self {
        Self([true; CATEGORY_COUNT as usize])
    }
}

impl CategoryMask {
    pub fn all_visible() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, category: u8) -> bool {
        usize::from(category) < self.0.len() && self.0[usize::from(category)]
    }

    pub fn set_visible(&mut self, category: u8, visible: bool) {
        if usize::from(category) < self.0.len() {
            self.0[usize::from(category)] = visible;
        }
    }

    /// Hides one category, returning the updated mask.
    pub fn without(mut self, category: u8) -> Self {
        self.set_visible(category, false);
        self
    }
}
