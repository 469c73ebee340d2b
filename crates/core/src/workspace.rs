//! The table being worked on: fields, the imported base and the displayed view.

use crate::error::Result;
use crate::export::{run_plan, ExportOptions, ExportPlan, ExportReport};
use crate::filter::{apply_filter, MatchMode, Predicate};
use crate::format::FileFormat;
use crate::group::{group_by, Groups};
use crate::model::{find_field, Dataset, Field};
use crate::normalize::Normalized;
use crate::persist::Snapshot;
use std::path::Path;

/// Owned pipeline state.
///
/// The view is always derived from the base, either as a copy or as the
/// result of the last search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workspace {
    fields: Vec<Field>,
    base: Dataset,
    view: Dataset,
    mode: MatchMode,
}

impl Workspace {
    /// Create an empty workspace
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty workspace searching in `mode`
    #[must_use]
    pub fn with_mode(mode: MatchMode) -> Self {
        Workspace {
            mode,
            ..Self::default()
        }
    }

    /// Replace the table with a freshly normalized import.
    pub fn load(&mut self, normalized: Normalized) {
        let Normalized { fields, dataset } = normalized;
        tracing::debug!(fields = fields.len(), rows = dataset.len(), "loaded dataset");
        self.fields = fields;
        self.view = dataset.clone();
        self.base = dataset;
    }

    /// Replace the table with a saved snapshot.
    pub fn restore(&mut self, snapshot: Snapshot) {
        tracing::debug!(time = %snapshot.time, rows = snapshot.data_source.len(), "restored snapshot");
        self.fields = snapshot.columns;
        self.view = snapshot.data_source.clone();
        self.base = snapshot.data_source;
    }

    /// Filter the base into the view.
    ///
    /// Every entry with a non-blank key and query must name a field; nothing
    /// changes otherwise.
    pub fn search(&mut self, predicate: &Predicate) -> Result<&Dataset> {
        let used = predicate
            .iter()
            .filter(|(key, query)| !key.trim().is_empty() && !query.trim().is_empty());
        for (key, _) in used {
            find_field(&self.fields, key)?;
        }
        self.view = apply_filter(&self.base, predicate, self.mode);
        Ok(&self.view)
    }

    /// Show the whole base again
    pub fn reset_search(&mut self) {
        self.view = self.base.clone();
    }

    /// Switch the match mode; the view is reset.
    pub fn set_mode(&mut self, mode: MatchMode) {
        self.mode = mode;
        self.reset_search();
    }

    /// Flip between exact and fuzzy matching; the view is reset.
    pub fn toggle_mode(&mut self) -> MatchMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    /// Partition the base by `field`.
    pub fn groups(&self, field: &str) -> Result<Groups> {
        find_field(&self.fields, field)?;
        Ok(group_by(&self.base, field))
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn base(&self) -> &Dataset {
        &self.base
    }

    #[must_use]
    pub fn view(&self) -> &Dataset {
        &self.view
    }

    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// What saving the current table stores: the fields and the view.
    #[must_use]
    pub fn snapshot_parts(&self) -> (&[Field], &Dataset) {
        (&self.fields, &self.view)
    }

    /// Run an export plan against this table.
    pub fn export(
        &self,
        plan: &ExportPlan,
        dir: &Path,
        name: Option<&str>,
        format: FileFormat,
        options: &ExportOptions,
    ) -> Result<ExportReport> {
        run_plan(
            plan,
            &self.view,
            &self.base,
            &self.fields,
            dir,
            name,
            format,
            options,
        )
    }
}
