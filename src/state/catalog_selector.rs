//! Catalog selector engine behind the repository and metadata-standard fields
//!
//! One generic state machine covers both selectors: the Selection Set, the
//! browse modal (search, filters, pagination, detail expansion) and the custom
//! entry form. Record-specific behaviour lives in [`CatalogRecord`].

use super::{
    CatalogRecord, CustomEntryForm, CustomEntryInput, ModeView, RecordId, SelectedItem,
    SelectionSet, StandardFieldId, Toggled, ValueMode,
};
use crate::catalog::{CatalogFilters, CatalogPage, CatalogQuery, CatalogSource, DEFAULT_PAGE_SIZE};
use crate::error::{FieldsError, FieldsResult};
use crate::events::{ChangeSink, FieldChange, Notification, NotificationSink};
use std::collections::HashSet;
use std::sync::Arc;

/// Handle for an outstanding page request.
///
/// Only the ticket from the most recent request, issued while the modal has
/// not since been closed, may update the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub query: CatalogQuery,
}

/// Selector state for one catalog-backed field
pub struct CatalogSelector<R: CatalogRecord> {
    field: StandardFieldId,
    mode: ValueMode,
    defaults: Vec<R>,
    selection: SelectionSet<R>,
    source: Arc<dyn CatalogSource<R>>,
    notifier: Arc<dyn NotificationSink>,
    changes: Arc<dyn ChangeSink>,

    // Browser
    modal_open: bool,
    page: CatalogPage<R>,
    page_size: usize,
    filters: CatalogFilters,
    search_term: String,
    expanded: HashSet<RecordId>,
    generation: u64,
    loading: bool,

    // Custom entry
    pub custom_form: CustomEntryForm,
    pending_input: Option<CustomEntryInput>,
}

impl<R: CatalogRecord> CatalogSelector<R> {
    pub fn new(
        field: StandardFieldId,
        source: Arc<dyn CatalogSource<R>>,
        notifier: Arc<dyn NotificationSink>,
        changes: Arc<dyn ChangeSink>,
    ) -> Self {
        Self {
            field,
            mode: ValueMode::default(),
            defaults: Vec::new(),
            selection: SelectionSet::new(),
            source,
            notifier,
            changes,
            modal_open: false,
            page: CatalogPage::empty(DEFAULT_PAGE_SIZE),
            page_size: DEFAULT_PAGE_SIZE,
            filters: CatalogFilters::default(),
            search_term: String::new(),
            expanded: HashSet::new(),
            generation: 0,
            loading: false,
            custom_form: CustomEntryForm::new(),
            pending_input: None,
        }
    }

    /// Recommended records shown read-only in defaults and merged modes
    pub fn with_defaults(mut self, defaults: Vec<R>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.page = CatalogPage::empty(self.page_size);
        self
    }

    /// Seed the Selection Set from a previously saved question
    pub fn with_selection(mut self, records: Vec<R>) -> Self {
        for record in records {
            self.selection.insert(record);
        }
        self
    }

    pub fn field(&self) -> StandardFieldId {
        self.field
    }

    pub fn kind_label(&self) -> &'static str {
        R::KIND.label()
    }

    // ----- Mode -----

    pub fn mode(&self) -> ValueMode {
        self.mode
    }

    /// Switch modes; the Selection Set is kept as-is
    pub fn set_mode(&mut self, mode: ValueMode) -> bool {
        if self.mode == mode {
            return false;
        }
        tracing::debug!(field = ?self.field, from = ?self.mode, to = ?mode, "Selector mode changed");
        self.mode = mode;
        if !mode.exposes_custom() {
            self.custom_form.cancel();
        }
        true
    }

    pub fn mode_view(&self) -> ModeView<'_, R> {
        ModeView::new(self.mode, &self.defaults, self.selection.as_slice())
    }

    pub fn defaults(&self) -> &[R] {
        &self.defaults
    }

    // ----- Selection Set -----

    pub fn selection(&self) -> &SelectionSet<R> {
        &self.selection
    }

    pub fn selected_items(&self) -> Vec<SelectedItem> {
        self.selection.to_selected_items()
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selection.contains(id)
    }

    /// Label of the per-record control in the browse modal
    pub fn action_label(&self, id: &RecordId) -> &'static str {
        if self.is_selected(id) {
            "Remove"
        } else {
            "Select"
        }
    }

    /// Add the record if absent, remove it if present
    pub fn toggle(&mut self, record: &R) -> Toggled {
        let outcome = self.selection.toggle(record);
        let message = match outcome {
            Toggled::Added => format!("{} added", record.name()),
            Toggled::Removed => format!("{} removed", record.name()),
        };
        tracing::debug!(field = ?self.field, id = %record.id(), ?outcome, "Toggled selection");
        self.notifier.notify(Notification::success(message));
        self.emit_selection();
        outcome
    }

    /// Toggle the record at `index` of the visible (search-filtered) list
    pub fn toggle_visible(&mut self, index: usize) -> Option<Toggled> {
        let record = self.visible_items().get(index).map(|r| (*r).clone())?;
        Some(self.toggle(&record))
    }

    /// Remove one record from the selected-items panel
    pub fn remove_one(&mut self, id: &RecordId) -> bool {
        match self.selection.remove(id) {
            Some(record) => {
                self.notifier
                    .notify(Notification::success(format!("{} removed", record.name())));
                self.emit_selection();
                true
            }
            None => {
                tracing::debug!(field = ?self.field, %id, "remove_one: id not selected");
                false
            }
        }
    }

    /// Confirmation text for [`Self::remove_all`]; `None` when nothing is selected
    pub fn remove_all_prompt(&self) -> Option<String> {
        (!self.selection.is_empty()).then(|| {
            format!(
                "Remove all {} selected {}?",
                self.selection.len(),
                R::KIND.plural()
            )
        })
    }

    /// Clear the Selection Set once `confirm` accepts the prompt.
    ///
    /// Returns whether anything was removed; a declined prompt changes nothing.
    pub fn remove_all<F>(&mut self, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        let Some(prompt) = self.remove_all_prompt() else {
            return false;
        };
        if !confirm(&prompt) {
            tracing::debug!(field = ?self.field, "remove_all declined");
            return false;
        }
        let removed = self.selection.clear();
        tracing::info!(field = ?self.field, removed, "Removed all selections");
        self.notifier.notify(Notification::success(format!(
            "All {} removed",
            R::KIND.plural()
        )));
        self.emit_selection();
        true
    }

    fn emit_selection(&self) {
        self.changes.on_change(FieldChange::Selection {
            field: self.field,
            items: self.selection.to_selected_items(),
        });
    }

    // ----- Browse modal -----

    pub fn is_open(&self) -> bool {
        self.modal_open
    }

    pub fn open(&mut self) {
        self.modal_open = true;
    }

    /// Close the modal; responses still in flight will be discarded
    pub fn close(&mut self) {
        self.modal_open = false;
        self.generation += 1;
        self.loading = false;
        self.custom_form.cancel();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Client-side filter over the loaded page; a blank term shows the whole page
    pub fn search(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filters(&self) -> &CatalogFilters {
        &self.filters
    }

    /// Records on the current page that match the search term
    pub fn visible_items(&self) -> Vec<&R> {
        self.page
            .items
            .iter()
            .filter(|r| r.matches_search(&self.search_term))
            .collect()
    }

    pub fn page(&self) -> &CatalogPage<R> {
        &self.page
    }

    pub fn pagination_summary(&self) -> String {
        self.page.summary()
    }

    pub fn toggle_details(&mut self, id: &RecordId) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.clone());
        }
    }

    pub fn is_expanded(&self, id: &RecordId) -> bool {
        self.expanded.contains(id)
    }

    /// Start a page request, superseding any request still outstanding.
    ///
    /// The search term stays client-side so clearing it always restores the
    /// unfiltered page.
    pub fn begin_fetch(&mut self, page: usize) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
            query: CatalogQuery {
                search_term: None,
                filters: self.filters.clone(),
                page: page.max(1),
                page_size: self.page_size,
            },
        }
    }

    /// Apply a page response. Stale responses are dropped and return false.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: anyhow::Result<CatalogPage<R>>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                field = ?self.field,
                page = ticket.query.page,
                "Discarding stale catalog response"
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                tracing::debug!(
                    field = ?self.field,
                    page = page.page,
                    items = page.items.len(),
                    total = page.total_count,
                    "Loaded catalog page"
                );
                self.page = page;
                true
            }
            Err(e) => {
                tracing::warn!(field = ?self.field, "Catalog fetch failed: {e:#}");
                self.notifier.notify(Notification::error(format!(
                    "Could not load {}: {}",
                    R::KIND.plural(),
                    e
                )));
                false
            }
        }
    }

    /// Load a page from the catalog. Never touches the Selection Set.
    pub async fn paginate(&mut self, page: usize) -> bool {
        let ticket = self.begin_fetch(page);
        let source = Arc::clone(&self.source);
        let result = source.fetch_page(&ticket.query).await;
        self.apply_fetch(ticket, result)
    }

    pub async fn next_page(&mut self) -> bool {
        if !self.page.has_next() {
            return false;
        }
        self.paginate(self.page.page + 1).await
    }

    pub async fn prev_page(&mut self) -> bool {
        if !self.page.has_prev() {
            return false;
        }
        self.paginate(self.page.page - 1).await
    }

    /// Replace the catalog filters and reload from the first page
    pub async fn set_filters(&mut self, filters: CatalogFilters) -> bool {
        self.filters = filters;
        self.paginate(1).await
    }

    // ----- Custom entries -----

    /// Show the custom entry form; only modes with a custom list allow it
    pub fn open_custom_form(&mut self) -> bool {
        if !self.mode.exposes_custom() {
            return false;
        }
        self.custom_form.open();
        true
    }

    pub fn cancel_custom_form(&mut self) {
        self.custom_form.cancel();
        self.pending_input = None;
    }

    /// Validate the form and mark a create request as outstanding
    pub fn begin_submit(&mut self) -> FieldsResult<CustomEntryInput> {
        if self.custom_form.is_submitting() {
            return Err(FieldsError::SubmitInFlight);
        }
        if !self.mode.exposes_custom() || !self.custom_form.can_submit() {
            return Err(FieldsError::FormNotOpen(self.field));
        }
        let input = match self.custom_form.validate() {
            Ok(input) => input,
            Err(e) => {
                self.notifier.notify(Notification::error(format!(
                    "Could not add custom {}: {}",
                    R::KIND,
                    e
                )));
                return Err(e.into());
            }
        };
        self.custom_form.set_submitting(true);
        self.pending_input = Some(input.clone());
        Ok(input)
    }

    /// Apply the create response; failures leave the Selection Set untouched
    pub fn finish_submit(&mut self, result: anyhow::Result<R>) -> FieldsResult<RecordId> {
        self.custom_form.set_submitting(false);
        let input = self.pending_input.take();

        let mut record = match result {
            Ok(record) => record,
            Err(source) => {
                let name = input.as_ref().map(|i| i.name.as_str()).unwrap_or("entry");
                tracing::warn!(field = ?self.field, "Custom entry create failed: {source:#}");
                self.notifier
                    .notify(Notification::error(format!("Could not add {name}: {source}")));
                self.custom_form.error = Some(source.to_string());
                return Err(FieldsError::Adapter {
                    kind: R::KIND,
                    source,
                });
            }
        };

        if self.selection.contains(record.id()) {
            if let Some(input) = input.as_ref() {
                tracing::debug!(field = ?self.field, id = %record.id(), "Re-keying colliding custom entry");
                record = R::from_custom(RecordId::new_custom(), input);
            }
        }

        let id = record.id().clone();
        let name = record.name().to_string();
        if !self.selection.insert(record) {
            return Ok(id);
        }
        self.custom_form.complete();
        tracing::info!(field = ?self.field, %id, "Added custom {}", R::KIND);
        self.notifier
            .notify(Notification::success(format!("{name} added")));
        self.emit_selection();
        Ok(id)
    }

    /// Validate, create through the catalog, and add the result to the Selection Set
    pub async fn submit_custom(&mut self) -> FieldsResult<RecordId> {
        let input = self.begin_submit()?;
        let source = Arc::clone(&self.source);
        let result = source.create_custom_entry(&input).await;
        self.finish_submit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::events::{ChangeLog, MockChangeSink, NotificationKind, NotificationQueue};
    use crate::state::{MetadataStandard, Repository};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        Source {}
        #[async_trait]
        impl CatalogSource<Repository> for Source {
            async fn fetch_page(&self, query: &CatalogQuery) -> anyhow::Result<CatalogPage<Repository>>;
            async fn create_custom_entry(&self, input: &CustomEntryInput) -> anyhow::Result<Repository>;
        }
    }

    fn repository(id: u64, name: &str, keywords: &[&str]) -> Repository {
        Repository {
            id: RecordId::Catalog(id),
            name: name.to_string(),
            description: format!("{name} description"),
            uri: format!("https://example.org/{id}"),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            repository_types: vec![],
            subject_areas: vec![],
            access: None,
            pid_types: vec![],
        }
    }

    fn zenodo() -> Repository {
        repository(1, "Zenodo", &["FAIR", "multidisciplinary"])
    }

    fn pdb() -> Repository {
        repository(2, "Protein Data Bank", &["structural biology"])
    }

    struct Harness<R: CatalogRecord> {
        selector: CatalogSelector<R>,
        notifications: Arc<NotificationQueue>,
        changes: Arc<ChangeLog>,
    }

    fn harness<R: CatalogRecord>(
        field: StandardFieldId,
        source: Arc<dyn CatalogSource<R>>,
    ) -> Harness<R> {
        let notifications = Arc::new(NotificationQueue::new());
        let changes = Arc::new(ChangeLog::new());
        let selector = CatalogSelector::new(field, source, notifications.clone(), changes.clone());
        Harness {
            selector,
            notifications,
            changes,
        }
    }

    fn repositories(records: Vec<Repository>) -> Harness<Repository> {
        harness(
            StandardFieldId::RepoSelector,
            Arc::new(InMemoryCatalog::new(records)),
        )
    }

    fn page_of(items: Vec<Repository>, page: usize) -> CatalogPage<Repository> {
        CatalogPage {
            total_count: 42,
            items,
            page,
            page_size: 10,
        }
    }

    mod browsing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_search_select_and_reopen_scenario() {
            let mut h = repositories(vec![zenodo(), pdb()]);
            h.selector.open();
            assert!(h.selector.paginate(1).await);

            h.selector.search("FAIR");
            let visible: Vec<String> = h
                .selector
                .visible_items()
                .iter()
                .map(|r| r.name.clone())
                .collect();
            assert_eq!(visible, vec!["Zenodo".to_string()]);

            assert_eq!(h.selector.toggle_visible(0), Some(Toggled::Added));
            let latest = h.notifications.latest().unwrap();
            assert_eq!(latest.message, "Zenodo added");
            assert_eq!(latest.kind, NotificationKind::Success);

            h.selector.close();
            h.selector.open();
            assert!(h.selector.is_selected(&RecordId::Catalog(1)));
            assert_eq!(h.selector.action_label(&RecordId::Catalog(1)), "Remove");
            assert_eq!(h.selector.action_label(&RecordId::Catalog(2)), "Select");
        }

        #[tokio::test]
        async fn test_empty_search_restores_page() {
            let mut h = repositories(vec![zenodo(), pdb()]);
            h.selector.open();
            h.selector.paginate(1).await;
            let before: Vec<RecordId> = h
                .selector
                .visible_items()
                .iter()
                .map(|r| r.id.clone())
                .collect();

            h.selector.search("protein");
            assert_eq!(h.selector.visible_items().len(), 1);
            h.selector.search("");

            let after: Vec<RecordId> = h
                .selector
                .visible_items()
                .iter()
                .map(|r| r.id.clone())
                .collect();
            assert_eq!(before, after);
        }

        #[tokio::test]
        async fn test_empty_result_keeps_pagination_text() {
            let mut h = repositories(vec![zenodo(), pdb()]);
            h.selector.open();
            h.selector.paginate(1).await;
            h.selector.search("nothing matches this");
            assert!(h.selector.visible_items().is_empty());
            assert_eq!(h.selector.pagination_summary(), "Page 1 of 1 (2 results)");
            assert!(h.notifications.is_empty());
        }

        #[tokio::test]
        async fn test_paginate_does_not_touch_selection() {
            let records: Vec<Repository> = (1..=25)
                .map(|i| repository(i, &format!("Repo {i}"), &[]))
                .collect();
            let mut h = repositories(records);
            h.selector.open();
            h.selector.paginate(1).await;
            h.selector.toggle_visible(0);
            let before = h.selector.selection().ids();
            let changes_before = h.changes.len();

            assert!(h.selector.next_page().await);
            assert_eq!(h.selector.page().page, 2);
            assert_eq!(h.selector.selection().ids(), before);
            assert_eq!(h.changes.len(), changes_before);
        }

        #[tokio::test]
        async fn test_prev_page_on_first_page_is_noop() {
            let mut h = repositories(vec![zenodo()]);
            h.selector.paginate(1).await;
            assert!(!h.selector.prev_page().await);
            assert!(!h.selector.next_page().await);
        }

        #[test]
        fn test_toggle_details_independent_of_selection() {
            let mut h = repositories(vec![]);
            let id = RecordId::Catalog(1);
            h.selector.toggle_details(&id);
            assert!(h.selector.is_expanded(&id));
            assert!(!h.selector.is_selected(&id));
            h.selector.toggle_details(&id);
            assert!(!h.selector.is_expanded(&id));
        }

        #[test]
        fn test_query_carries_filters_but_not_term() {
            let mut h = repositories(vec![]);
            h.selector.search("  FAIR ");
            let ticket = h.selector.begin_fetch(0);
            assert_eq!(ticket.query.search_term, None);
            assert_eq!(ticket.query.page, 1);
        }

        #[tokio::test]
        async fn test_clearing_search_after_reload_restores_page() {
            let dryad = repository(3, "Dryad", &["data"]);
            let mut h = repositories(vec![zenodo(), pdb(), dryad]);
            h.selector.open();
            h.selector.paginate(1).await;
            let baseline: Vec<String> = h
                .selector
                .visible_items()
                .iter()
                .map(|r| r.name.clone())
                .collect();

            h.selector.search("FAIR");
            assert!(h.selector.paginate(1).await);
            assert_eq!(h.selector.visible_items().len(), 1);
            h.selector.search("");

            let after: Vec<String> = h
                .selector
                .visible_items()
                .iter()
                .map(|r| r.name.clone())
                .collect();
            assert_eq!(after, baseline);
            assert_eq!(h.selector.pagination_summary(), "Page 1 of 1 (3 results)");
        }

        #[tokio::test]
        async fn test_paginate_far_past_end_is_empty() {
            let mut h = repositories(vec![zenodo(), pdb()]);
            h.selector.open();
            assert!(h.selector.paginate(usize::MAX).await);
            assert!(h.selector.visible_items().is_empty());
            assert_eq!(h.selector.page().total_count, 2);
            assert!(h.selector.prev_page().await);
        }

        #[tokio::test]
        async fn test_set_filters_reloads_first_page() {
            let mut generalist = zenodo();
            generalist.repository_types = vec!["generalist".to_string()];
            let mut h = repositories(vec![generalist, pdb()]);
            let loaded = h
                .selector
                .set_filters(CatalogFilters {
                    subject_area: None,
                    repository_type: Some("generalist".to_string()),
                })
                .await;
            assert!(loaded);
            assert_eq!(h.selector.page().total_count, 1);
            assert_eq!(h.selector.page().items[0].name, "Zenodo");
        }
    }

    mod stale_responses {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_response_after_close_is_discarded() {
            let mut h = repositories(vec![]);
            h.selector.open();
            let ticket = h.selector.begin_fetch(2);
            h.selector.close();

            let applied = h
                .selector
                .apply_fetch(ticket, Ok(page_of(vec![zenodo()], 2)));
            assert!(!applied);
            assert!(h.selector.page().items.is_empty());
            assert_eq!(h.selector.page().page, 1);
        }

        #[test]
        fn test_superseded_response_is_discarded() {
            let mut h = repositories(vec![]);
            h.selector.open();
            let first = h.selector.begin_fetch(1);
            let second = h.selector.begin_fetch(2);

            assert!(h.selector.apply_fetch(second, Ok(page_of(vec![pdb()], 2))));
            assert!(!h.selector.apply_fetch(first, Ok(page_of(vec![zenodo()], 1))));
            assert_eq!(h.selector.page().items[0].name, "Protein Data Bank");
            assert!(!h.selector.is_loading());
        }

        #[tokio::test]
        async fn test_fetch_failure_notifies_and_keeps_state() {
            let mut source = MockSource::new();
            let mut calls = 0;
            source.expect_fetch_page().returning(move |q| {
                calls += 1;
                if calls == 1 {
                    Ok(page_of(vec![zenodo()], q.page))
                } else {
                    Err(anyhow!("service unavailable"))
                }
            });
            let mut h = harness(StandardFieldId::RepoSelector, Arc::new(source));
            h.selector.open();
            assert!(h.selector.paginate(1).await);
            h.selector.toggle_visible(0);

            assert!(!h.selector.paginate(2).await);
            assert_eq!(h.selector.page().page, 1);
            assert_eq!(h.selector.selection().len(), 1);
            let latest = h.notifications.latest().unwrap();
            assert!(latest.is_error());
            assert!(latest.message.contains("service unavailable"));
        }
    }

    mod toggling {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_toggle_twice_restores_state() {
            let mut h = repositories(vec![]);
            h.selector.toggle(&pdb());
            let before = h.selector.selection().ids();

            h.selector.toggle(&zenodo());
            h.selector.toggle(&zenodo());
            assert_eq!(h.selector.selection().ids(), before);
            assert_eq!(
                h.notifications.messages(),
                vec![
                    "Protein Data Bank added".to_string(),
                    "Zenodo added".to_string(),
                    "Zenodo removed".to_string()
                ]
            );
        }

        #[test]
        fn test_toggle_emits_selection_change() {
            let mut changes = MockChangeSink::new();
            changes
                .expect_on_change()
                .withf(|change| {
                    matches!(
                        change,
                        FieldChange::Selection { field: StandardFieldId::RepoSelector, items }
                            if items.len() == 1 && items[0].name == "Zenodo"
                    )
                })
                .times(1)
                .return_const(());
            let mut selector: CatalogSelector<Repository> = CatalogSelector::new(
                StandardFieldId::RepoSelector,
                Arc::new(InMemoryCatalog::new(vec![])),
                Arc::new(NotificationQueue::new()),
                Arc::new(changes),
            );
            selector.toggle(&zenodo());
        }

        #[test]
        fn test_toggle_visible_out_of_range() {
            let mut h = repositories(vec![]);
            assert_eq!(h.selector.toggle_visible(3), None);
            assert!(h.notifications.is_empty());
        }

        #[test]
        fn test_remove_one() {
            let mut h = repositories(vec![]);
            h.selector.toggle(&zenodo());
            assert!(h.selector.remove_one(&RecordId::Catalog(1)));
            assert!(h.selector.selection().is_empty());
            assert_eq!(h.notifications.latest().unwrap().message, "Zenodo removed");
            assert!(!h.selector.remove_one(&RecordId::Catalog(1)));
        }
    }

    mod remove_all {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_decline_changes_nothing() {
            let mut h = repositories(vec![]);
            h.selector.toggle(&zenodo());
            h.selector.toggle(&pdb());
            let notified = h.notifications.len();
            let changed = h.changes.len();

            assert!(!h.selector.remove_all(|_| false));
            assert_eq!(h.selector.selection().len(), 2);
            assert_eq!(h.notifications.len(), notified);
            assert_eq!(h.changes.len(), changed);
        }

        #[test]
        fn test_accept_empties_and_notifies_once() {
            let mut h = repositories(vec![]);
            h.selector.toggle(&zenodo());
            h.selector.toggle(&pdb());
            h.notifications.drain();

            let mut prompt_seen = String::new();
            assert!(h.selector.remove_all(|prompt| {
                prompt_seen = prompt.to_string();
                true
            }));
            assert!(h.selector.selection().is_empty());
            assert_eq!(prompt_seen, "Remove all 2 selected repositories?");
            assert_eq!(
                h.notifications.messages(),
                vec!["All repositories removed".to_string()]
            );
        }

        #[test]
        fn test_empty_set_does_not_prompt() {
            let mut h = repositories(vec![]);
            let mut asked = false;
            assert!(!h.selector.remove_all(|_| {
                asked = true;
                true
            }));
            assert!(!asked);
        }
    }

    mod custom_entries {
        use super::*;
        use pretty_assertions::assert_eq;

        fn fill(form: &mut CustomEntryForm, name: &str, url: &str, description: &str) {
            form.name.set_text(name);
            form.url.set_text(url);
            form.description.set_text(description);
        }

        #[tokio::test]
        async fn test_blank_url_fails_validation() {
            let mut h: Harness<MetadataStandard> = harness(
                StandardFieldId::MetadataStandards,
                Arc::new(InMemoryCatalog::new(vec![])),
            );
            h.selector.set_mode(ValueMode::Custom);
            assert!(h.selector.open_custom_form());
            fill(&mut h.selector.custom_form, "Lab Schema", "  ", "In-house schema");

            let result = h.selector.submit_custom().await;
            assert!(matches!(result, Err(FieldsError::Validation(_))));
            assert!(h.selector.custom_form.is_open());
            assert_eq!(h.selector.custom_form.name.as_text(), "Lab Schema");
            assert!(h.selector.selection().is_empty());
            assert!(h.notifications.drain().iter().all(|n| n.is_error()));
            assert!(h.changes.is_empty());
        }

        #[tokio::test]
        async fn test_successful_submit_adds_and_closes() {
            let mut h = repositories(vec![]);
            h.selector.set_mode(ValueMode::Merged);
            h.selector.open_custom_form();
            fill(
                &mut h.selector.custom_form,
                " Lab Store ",
                "https://lab.example.org",
                "Archive",
            );

            let id = h.selector.submit_custom().await.unwrap();
            assert!(id.is_custom());
            let record = h.selector.selection().get(&id).unwrap();
            assert_eq!(record.name, "Lab Store");
            assert!(!h.selector.custom_form.is_open());
            assert!(h.selector.custom_form.name.is_blank());
            assert_eq!(h.notifications.latest().unwrap().message, "Lab Store added");
            assert_eq!(h.changes.len(), 1);
        }

        #[tokio::test]
        async fn test_identical_names_get_distinct_ids() {
            let mut h = repositories(vec![]);
            h.selector.set_mode(ValueMode::Custom);

            h.selector.open_custom_form();
            fill(&mut h.selector.custom_form, "Same", "https://a", "d");
            let first = h.selector.submit_custom().await.unwrap();

            h.selector.open_custom_form();
            fill(&mut h.selector.custom_form, "Same", "https://a", "d");
            let second = h.selector.submit_custom().await.unwrap();

            assert_ne!(first, second);
            assert_eq!(h.selector.selection().len(), 2);
        }

        #[tokio::test]
        async fn test_colliding_adapter_id_is_rekeyed() {
            let mut source = MockSource::new();
            let fixed = RecordId::new_custom();
            let returned = fixed.clone();
            source.expect_create_custom_entry().returning(move |input| {
                Ok(Repository::from_custom(returned.clone(), input))
            });
            let mut h = harness(StandardFieldId::RepoSelector, Arc::new(source));
            h.selector.set_mode(ValueMode::Custom);

            for _ in 0..2 {
                h.selector.open_custom_form();
                fill(&mut h.selector.custom_form, "Same", "https://a", "d");
                h.selector.submit_custom().await.unwrap();
            }
            assert_eq!(h.selector.selection().len(), 2);
            assert!(h.selector.is_selected(&fixed));
        }

        #[tokio::test]
        async fn test_create_failure_leaves_selection_unchanged() {
            let mut source = MockSource::new();
            source
                .expect_create_custom_entry()
                .returning(|_| Err(anyhow!("server rejected entry")));
            let mut h = harness(StandardFieldId::RepoSelector, Arc::new(source));
            h.selector.set_mode(ValueMode::Custom);
            h.selector.open_custom_form();
            fill(&mut h.selector.custom_form, "Lab Store", "https://lab", "Archive");

            let result = h.selector.submit_custom().await;
            assert!(matches!(result, Err(FieldsError::Adapter { .. })));
            assert!(h.selector.selection().is_empty());
            assert!(h.selector.custom_form.is_open());
            assert!(!h.selector.custom_form.is_submitting());
            assert!(h.notifications.latest().unwrap().is_error());
        }

        #[test]
        fn test_second_submit_while_outstanding_is_rejected() {
            let mut h = repositories(vec![]);
            h.selector.set_mode(ValueMode::Custom);
            h.selector.open_custom_form();
            fill(&mut h.selector.custom_form, "Lab Store", "https://lab", "Archive");

            assert!(h.selector.begin_submit().is_ok());
            assert!(!h.selector.custom_form.can_submit());
            assert!(matches!(
                h.selector.begin_submit(),
                Err(FieldsError::SubmitInFlight)
            ));
        }

        #[tokio::test]
        async fn test_submit_requires_open_form_in_custom_mode() {
            let mut h = repositories(vec![]);
            h.selector.custom_form.open();
            fill(&mut h.selector.custom_form, "Lab Store", "https://lab", "Archive");
            assert!(matches!(
                h.selector.submit_custom().await,
                Err(FieldsError::FormNotOpen(StandardFieldId::RepoSelector))
            ));

            h.selector.cancel_custom_form();
            h.selector.set_mode(ValueMode::Custom);
            fill(&mut h.selector.custom_form, "Lab Store", "https://lab", "Archive");
            assert!(matches!(
                h.selector.submit_custom().await,
                Err(FieldsError::FormNotOpen(_))
            ));
            assert!(h.selector.selection().is_empty());
            assert!(h.notifications.is_empty());
            assert!(h.changes.is_empty());
        }

        #[test]
        fn test_defaults_mode_hides_custom_form() {
            let mut h = repositories(vec![]);
            assert_eq!(h.selector.mode(), ValueMode::Defaults);
            assert!(!h.selector.open_custom_form());
            assert!(!h.selector.custom_form.is_open());
        }

        #[test]
        fn test_cancel_discards_without_mutation() {
            let mut h = repositories(vec![]);
            h.selector.set_mode(ValueMode::Custom);
            h.selector.open_custom_form();
            fill(&mut h.selector.custom_form, "Lab Store", "https://lab", "Archive");
            h.selector.cancel_custom_form();

            assert!(!h.selector.custom_form.is_open());
            assert!(h.selector.custom_form.name.is_blank());
            assert!(h.selector.selection().is_empty());
            assert!(h.notifications.is_empty());
        }
    }

    mod modes {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_mode_switch_keeps_selection() {
            let mut h = repositories(vec![]);
            h.selector.set_mode(ValueMode::Custom);
            h.selector.toggle(&zenodo());

            h.selector.set_mode(ValueMode::Defaults);
            assert!(h.selector.mode_view().custom().is_none());

            h.selector.set_mode(ValueMode::Custom);
            let custom = h.selector.mode_view().custom().unwrap();
            assert_eq!(custom.len(), 1);
            assert_eq!(custom[0].name, "Zenodo");
        }

        #[test]
        fn test_set_same_mode_reports_unchanged() {
            let mut h = repositories(vec![]);
            assert!(!h.selector.set_mode(ValueMode::Defaults));
            assert!(h.selector.set_mode(ValueMode::Merged));
        }

        #[test]
        fn test_defaults_shown_in_merged_mode() {
            let mut h = repositories(vec![]);
            h.selector = h.selector.with_defaults(vec![zenodo()]);
            h.selector.set_mode(ValueMode::Merged);
            let view = h.selector.mode_view();
            assert_eq!(view.defaults().unwrap().len(), 1);
            assert_eq!(view.custom().unwrap().len(), 0);
        }
    }
}
