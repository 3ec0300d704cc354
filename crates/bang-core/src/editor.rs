//! The bang editor session
//!
//! [`BangEditor`] ties the table, the dirty tracker and the notice board to a
//! store and a defaults source. Every user action on the options page maps
//! to one method here:
//! - editing rows marks the session dirty
//! - saving derives a mapping from the table, persists it and marks it clean
//! - importing merges a validated file over the *persisted* mapping and
//!   renders the result, dropping unsaved edits
//! - exporting serializes the persisted mapping, not the table

use crate::actions::{Action, ActionTable, Effect, SaveReport};
use crate::config::EditorConfig;
use crate::defaults::DefaultsSource;
use crate::dirty::{DirtyState, DirtyTracker};
use crate::error::Result;
use crate::mapping::BangMapping;
use crate::merger::merge;
use crate::notice::{Notice, NoticeBoard, NoticeKind};
use crate::store::BangStore;
use crate::surface::{NullSurface, Surface};
use crate::table::{BangRow, BangTable, Field, RowId, RowValidity};
use crate::transfer::{ExportArtifact, ImportFile};
use crate::validator::{validate, ImportRejection};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Whether a render reflects what is already persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// The rendered rows match the store (initial load)
    Saved,
    /// The rendered rows are a draft that still needs saving
    Draft,
}

/// Result of an import attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The file was merged over the persisted mapping and rendered
    Merged {
        /// Entries in the imported file
        imported: usize,
        /// Rows in the table after the merge
        total: usize,
    },
    /// The file was rejected; nothing changed
    Rejected(ImportRejection),
}

/// An editing session over one persisted bang mapping
pub struct BangEditor<S, D, U = NullSurface> {
    config: EditorConfig,
    store: S,
    defaults: D,
    surface: U,
    table: BangTable,
    dirty: DirtyTracker,
    notices: NoticeBoard,
    actions: ActionTable,
}

impl<S, D, U> BangEditor<S, D, U>
where
    S: BangStore,
    D: DefaultsSource,
    U: Surface,
{
    /// Start a session: read the persisted mapping and render it as saved
    pub async fn load(config: EditorConfig, store: S, defaults: D, surface: U) -> Result<Self> {
        let notices = NoticeBoard::new(config.notice_duration_ms);
        let mut editor = Self {
            config,
            store,
            defaults,
            surface,
            table: BangTable::new(),
            dirty: DirtyTracker::new(),
            notices,
            actions: ActionTable::new(),
        };

        let persisted = editor.persisted().await?;
        editor.render(&persisted, RenderMode::Saved);
        info!(bangs = persisted.len(), "Loaded bang editor");
        Ok(editor)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn table(&self) -> &BangTable {
        &self.table
    }

    pub fn rows(&self) -> &[BangRow] {
        self.table.rows()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    pub fn dirty_state(&self) -> DirtyState {
        self.dirty.state()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    /// Notices still showing at `now`
    pub fn visible_notices(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notice> {
        self.notices.visible(now)
    }

    /// Rebuild the table from `mapping`
    ///
    /// A [`RenderMode::Draft`] render counts as an edit. A
    /// [`RenderMode::Saved`] render leaves the session clean.
    pub fn render(&mut self, mapping: &BangMapping, mode: RenderMode) {
        self.surface.rows_cleared();
        for row in self.table.render(mapping) {
            self.surface.row_added(row);
        }
        match mode {
            RenderMode::Saved => self.mark_clean(),
            RenderMode::Draft => self.mark_dirty(),
        }
    }

    /// Append a row holding the configured placeholder bang
    pub fn add_row(&mut self) -> RowId {
        let shortcut = self.config.new_row_shortcut.clone();
        let url = self.config.new_row_url.clone();
        self.add_row_with(shortcut, url)
    }

    /// Append a row with the given text
    pub fn add_row_with(&mut self, shortcut: impl Into<String>, url: impl Into<String>) -> RowId {
        let row = self.table.add_row(shortcut, url);
        let id = row.id;
        self.surface.row_added(row);
        self.mark_dirty();
        id
    }

    /// Change one cell of a row, returning the row's new validity
    pub fn edit_row(&mut self, id: RowId, field: Field, text: impl Into<String>) -> Result<RowValidity> {
        let row = self.table.edit_row(id, field, text)?;
        let validity = row.validity();
        self.surface.row_changed(row);
        self.mark_dirty();
        Ok(validity)
    }

    /// Remove a row from the table
    pub fn delete_row(&mut self, id: RowId) -> Result<BangRow> {
        let row = self.table.delete_row(id)?;
        self.surface.row_removed(id);
        self.mark_dirty();
        Ok(row)
    }

    /// Persist the table
    ///
    /// Incomplete rows are removed from the table before writing. The session
    /// becomes clean only once the store accepted the mapping.
    pub async fn save(&mut self) -> Result<SaveReport> {
        let extraction = self.table.extract_mapping();
        for row in &extraction.discarded {
            self.surface.row_removed(row.id);
        }

        self.store
            .set(&self.config.storage_key, &extraction.mapping)
            .await?;
        self.mark_clean();

        let report = SaveReport {
            saved: extraction.mapping.len(),
            discarded: extraction.discarded.len(),
        };
        info!(saved = report.saved, discarded = report.discarded, "Saved bangs");
        Ok(report)
    }

    /// Import a file on top of the persisted mapping
    ///
    /// A rejected file raises an [`NoticeKind::InvalidImportFile`] notice and
    /// leaves the table, the dirty state and the store untouched.
    pub async fn import(&mut self, file: &ImportFile) -> Result<ImportOutcome> {
        self.import_at(file, Utc::now()).await
    }

    /// Import a file, stamping any notice with `now`
    pub async fn import_at(&mut self, file: &ImportFile, now: DateTime<Utc>) -> Result<ImportOutcome> {
        let incoming = match validate(file) {
            Ok(mapping) => mapping,
            Err(rejection) => {
                warn!(reason = %rejection, "Rejected import file");
                let notice = self.notices.raise_at(
                    NoticeKind::InvalidImportFile,
                    format!("Invalid import file: {}", rejection),
                    now,
                );
                self.surface.notice_raised(notice);
                return Ok(ImportOutcome::Rejected(rejection));
            }
        };

        let persisted = self.persisted().await?;
        let merged = merge(&persisted, &incoming);
        self.render(&merged, RenderMode::Draft);

        info!(imported = incoming.len(), total = merged.len(), "Imported bangs");
        Ok(ImportOutcome::Merged {
            imported: incoming.len(),
            total: merged.len(),
        })
    }

    /// Serialize the persisted mapping for download
    ///
    /// Unsaved table edits are not part of the export.
    pub async fn export(&self) -> Result<ExportArtifact> {
        let persisted = self.persisted().await?;
        let artifact = ExportArtifact::from_mapping(&persisted, self.config.export_file_name.as_str())?;
        info!(bangs = persisted.len(), file = %artifact.file_name, "Exported bangs");
        Ok(artifact)
    }

    /// Replace the table with the default bangs, returning how many were rendered
    pub async fn restore_defaults(&mut self) -> Result<usize> {
        let defaults = self.defaults.fetch_defaults().await?;
        self.render(&defaults, RenderMode::Draft);
        info!(bangs = defaults.len(), "Restored default bangs");
        Ok(defaults.len())
    }

    /// Run the action bound to a control
    pub async fn dispatch(&mut self, control: &str) -> Result<Effect> {
        let action = self.actions.action_for(control)?;
        debug!(control, ?action, "Dispatching action");
        match action {
            Action::Save => self.save().await.map(Effect::Saved),
            Action::AddRow => Ok(Effect::RowAdded(self.add_row())),
            Action::Import => Ok(Effect::PickImportFile),
            Action::Export => self.export().await.map(Effect::Download),
            Action::RestoreDefaults => self.restore_defaults().await.map(Effect::DefaultsRestored),
            Action::Help => Ok(Effect::OpenUrl(self.config.help_url.clone())),
        }
    }

    async fn persisted(&self) -> Result<BangMapping> {
        match self.store.get(&self.config.storage_key).await? {
            Some(mapping) => Ok(mapping),
            None => {
                warn!(key = %self.config.storage_key, "No bangs stored, starting empty");
                Ok(BangMapping::new())
            }
        }
    }

    fn mark_dirty(&mut self) {
        if self.dirty.mark_dirty() {
            self.surface.dirty_changed(DirtyState::Dirty);
        }
    }

    fn mark_clean(&mut self) {
        if self.dirty.mark_clean() {
            self.surface.dirty_changed(DirtyState::Clean);
        }
    }
}
