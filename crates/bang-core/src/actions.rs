//! Control bindings of the options page
//!
//! Each control of the page is bound to exactly one action. The table is
//! built once when a session starts.

use crate::error::{Error, Result};
use crate::table::RowId;
use crate::transfer::ExportArtifact;
use indexmap::IndexMap;

pub const SAVE_BUTTON: &str = "saveBtn";
pub const ADD_ROW_BUTTON: &str = "addRowBtn";
pub const IMPORT_BUTTON: &str = "importBtn";
pub const EXPORT_BUTTON: &str = "exportBtn";
pub const SET_DEFAULT_BUTTON: &str = "setDefaultBtn";
pub const HELP_BUTTON: &str = "helpBtn";

/// Something a control can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Save,
    AddRow,
    Import,
    Export,
    RestoreDefaults,
    Help,
}

/// What the front end has to do after an action ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The table was saved
    Saved(SaveReport),
    /// A row was appended
    RowAdded(RowId),
    /// The front end should ask the user for a file and pass it to `import`
    PickImportFile,
    /// The front end should offer this artifact as a download
    Download(ExportArtifact),
    /// The defaults were rendered into the table
    DefaultsRestored(usize),
    /// The front end should open this URL
    OpenUrl(String),
}

/// Summary of a save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReport {
    /// Number of bangs written to the store
    pub saved: usize,
    /// Number of incomplete rows removed from the table
    pub discarded: usize,
}

/// Control identifier to action bindings
#[derive(Debug, Clone)]
pub struct ActionTable {
    bindings: IndexMap<&'static str, Action>,
}

impl Default for ActionTable {
    fn default() -> Self {
        let bindings = [
            (SAVE_BUTTON, Action::Save),
            (ADD_ROW_BUTTON, Action::AddRow),
            (IMPORT_BUTTON, Action::Import),
            (EXPORT_BUTTON, Action::Export),
            (SET_DEFAULT_BUTTON, Action::RestoreDefaults),
            (HELP_BUTTON, Action::Help),
        ]
        .into_iter()
        .collect();
        Self { bindings }
    }
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the action bound to a control
    pub fn action_for(&self, control: &str) -> Result<Action> {
        self.bindings
            .get(control)
            .copied()
            .ok_or_else(|| Error::UnknownControl(control.to_string()))
    }

    /// All bound control identifiers, in page order
    pub fn controls(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.keys().copied()
    }
}
