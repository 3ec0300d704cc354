//! The rendering surface the editor drives
//!
//! The editor never draws anything itself. It reports row and state changes
//! through this trait, and the front end decides how to show them.

use crate::dirty::DirtyState;
use crate::notice::Notice;
use crate::table::{BangRow, RowId};

/// Receiver of table and state changes
///
/// Every method has a no-op default so a surface implements only what it shows.
pub trait Surface {
    /// All body rows were removed (the header stays)
    fn rows_cleared(&mut self) {}

    /// A row widget should be created at the end of the table
    fn row_added(&mut self, _row: &BangRow) {}

    /// A row's text or validity flag changed
    fn row_changed(&mut self, _row: &BangRow) {}

    /// A row widget should be removed
    fn row_removed(&mut self, _id: RowId) {}

    /// The save button highlight should follow `state`
    fn dirty_changed(&mut self, _state: DirtyState) {}

    /// The error toast should show `notice`
    fn notice_raised(&mut self, _notice: &Notice) {}
}

/// A surface that shows nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {}
