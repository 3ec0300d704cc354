//! bang-core: Core library for editing custom search bangs
//!
//! This library provides functionality to:
//! - Hold an ordered mapping of bang shortcuts to URL templates
//! - Edit that mapping as a table of rows, with unsaved-change tracking
//! - Validate import files and merge them over the persisted mapping
//! - Export the persisted mapping and restore a default set
//! - Persist the mapping through an async key/value store

pub mod actions;
pub mod config;
pub mod defaults;
pub mod dirty;
pub mod editor;
pub mod error;
pub mod mapping;
pub mod merger;
pub mod notice;
pub mod store;
pub mod surface;
pub mod table;
pub mod transfer;
pub mod validator;

pub use actions::{Action, ActionTable, Effect, SaveReport};
pub use config::EditorConfig;
pub use defaults::{DefaultsSource, FileDefaults};
pub use dirty::{DirtyState, DirtyTracker};
pub use editor::{BangEditor, ImportOutcome, RenderMode};
pub use error::{Error, Result};
pub use mapping::BangMapping;
pub use merger::merge;
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use store::{BangStore, JsonFileStore, MemoryStore};
pub use surface::{NullSurface, Surface};
pub use table::{classify_row, BangRow, BangTable, Field, RowId, RowValidity};
pub use transfer::{mapping_to_csv, ExportArtifact, ImportFile};
pub use validator::{validate, ImportRejection};
