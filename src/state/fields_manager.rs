//! Orchestrates every field of one research output question

use super::{
    defaults, AdditionalField, AdditionalFieldUpdate, CatalogSelector, DataFlags, DataFlagsMode,
    FieldSettings, FieldSnapshot, MetadataStandard, OptionList, RecordId, RecordKind, Repository,
    ResearchOutputQuestion, StandardField, StandardFieldId, ValueMode,
};
use crate::catalog::CatalogSource;
use crate::error::{FieldsError, FieldsResult};
use crate::events::{ChangeSink, FieldChange, NotificationSink};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Explanation rendered next to the disabled toggle of locked fields
pub const LOCKED_FIELD_REASON: &str = "Always included in research outputs";

/// Adapters and sinks the manager is wired to
pub struct FieldsContext {
    pub repositories: Arc<dyn CatalogSource<Repository>>,
    pub metadata_standards: Arc<dyn CatalogSource<MetadataStandard>>,
    pub notifier: Arc<dyn NotificationSink>,
    pub changes: Arc<dyn ChangeSink>,
    pub page_size: usize,
}

/// Field configuration state for the question under edit
pub struct FieldsManager {
    fields: Vec<StandardField>,
    expanded: BTreeSet<StandardFieldId>,
    additional: Vec<AdditionalField>,
    next_additional_id: u64,
    output_types: OptionList,
    licenses: OptionList,
    repositories: CatalogSelector<Repository>,
    metadata_standards: CatalogSelector<MetadataStandard>,
    data_flags: DataFlagsMode,
    changes: Arc<dyn ChangeSink>,
}

impl FieldsManager {
    pub fn new(ctx: FieldsContext) -> Self {
        let FieldsContext {
            repositories,
            metadata_standards,
            notifier,
            changes,
            page_size,
        } = ctx;

        Self {
            fields: StandardFieldId::ALL
                .iter()
                .map(|id| StandardField::new(*id))
                .collect(),
            expanded: BTreeSet::new(),
            additional: Vec::new(),
            next_additional_id: 1,
            output_types: OptionList::new(
                StandardFieldId::OutputType,
                RecordKind::OutputType,
                defaults::output_types(),
                notifier.clone(),
            ),
            licenses: OptionList::new(
                StandardFieldId::Licenses,
                RecordKind::License,
                defaults::licenses(),
                notifier.clone(),
            ),
            repositories: CatalogSelector::new(
                StandardFieldId::RepoSelector,
                repositories,
                notifier.clone(),
                changes.clone(),
            )
            .with_page_size(page_size),
            metadata_standards: CatalogSelector::new(
                StandardFieldId::MetadataStandards,
                metadata_standards,
                notifier,
                changes.clone(),
            )
            .with_page_size(page_size),
            data_flags: DataFlagsMode::default(),
            changes,
        }
    }

    // ----- Standard fields -----

    pub fn fields(&self) -> &[StandardField] {
        &self.fields
    }

    pub fn field(&self, id: StandardFieldId) -> &StandardField {
        // `fields` is built from StandardFieldId::ALL in declaration order
        &self.fields[id as usize]
    }

    fn field_mut(&mut self, id: StandardFieldId) -> &mut StandardField {
        &mut self.fields[id as usize]
    }

    pub fn is_enabled(&self, id: StandardFieldId) -> bool {
        self.field(id).enabled
    }

    pub fn is_locked(&self, id: StandardFieldId) -> bool {
        id.is_locked()
    }

    pub fn locked_reason(&self, id: StandardFieldId) -> Option<&'static str> {
        id.is_locked().then_some(LOCKED_FIELD_REASON)
    }

    /// Enable or disable a field. Disabling a locked field is a no-op.
    pub fn set_field_enabled(&mut self, id: StandardFieldId, enabled: bool) -> bool {
        if id.is_locked() && !enabled {
            tracing::debug!(field = ?id, "Ignoring attempt to disable locked field");
            return false;
        }
        let field = self.field_mut(id);
        if field.enabled == enabled {
            return false;
        }
        field.enabled = enabled;
        tracing::debug!(field = ?id, enabled, "Field enablement changed");
        self.emit_field(id);
        true
    }

    pub fn set_field_value(&mut self, id: StandardFieldId, value: impl Into<String>) {
        self.field_mut(id).value = value.into();
        self.emit_field(id);
    }

    /// Toggle a field's customization panel; any number may be open at once
    pub fn expand_field(&mut self, id: StandardFieldId) -> bool {
        let expanded = if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        };
        tracing::debug!(field = ?id, expanded, "Toggled field panel");
        expanded
    }

    pub fn is_expanded(&self, id: StandardFieldId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn expanded_fields(&self) -> impl Iterator<Item = StandardFieldId> + '_ {
        self.expanded.iter().copied()
    }

    // ----- Modes -----

    pub fn mode(&self, id: StandardFieldId) -> Option<ValueMode> {
        match id {
            StandardFieldId::OutputType => Some(self.output_types.mode()),
            StandardFieldId::Licenses => Some(self.licenses.mode()),
            StandardFieldId::RepoSelector => Some(self.repositories.mode()),
            StandardFieldId::MetadataStandards => Some(self.metadata_standards.mode()),
            _ => None,
        }
    }

    /// Switch a field's value mode, keeping every stored value
    pub fn set_mode(&mut self, id: StandardFieldId, mode: ValueMode) -> bool {
        let changed = match id {
            StandardFieldId::OutputType => self.output_types.set_mode(mode),
            StandardFieldId::Licenses => self.licenses.set_mode(mode),
            StandardFieldId::RepoSelector => self.repositories.set_mode(mode),
            StandardFieldId::MetadataStandards => self.metadata_standards.set_mode(mode),
            _ => {
                tracing::debug!(field = ?id, "Field has no value mode");
                false
            }
        };
        if changed {
            self.emit_field(id);
        }
        changed
    }

    pub fn cycle_mode(&mut self, id: StandardFieldId) -> bool {
        match self.mode(id) {
            Some(mode) => self.set_mode(id, mode.next()),
            None => false,
        }
    }

    // ----- Data flags -----

    pub fn data_flags_mode(&self) -> DataFlagsMode {
        self.data_flags
    }

    pub fn data_flags(&self) -> DataFlags {
        self.data_flags.flags()
    }

    pub fn set_data_flags_mode(&mut self, mode: DataFlagsMode) -> bool {
        if self.data_flags == mode {
            return false;
        }
        self.data_flags = mode;
        self.emit_field(StandardFieldId::DataFlags);
        true
    }

    // ----- Option lists and selectors -----

    pub fn output_types(&self) -> &OptionList {
        &self.output_types
    }

    pub fn licenses(&self) -> &OptionList {
        &self.licenses
    }

    pub fn option_list(&self, id: StandardFieldId) -> Option<&OptionList> {
        match id {
            StandardFieldId::OutputType => Some(&self.output_types),
            StandardFieldId::Licenses => Some(&self.licenses),
            _ => None,
        }
    }

    pub fn option_list_mut(&mut self, id: StandardFieldId) -> Option<&mut OptionList> {
        match id {
            StandardFieldId::OutputType => Some(&mut self.output_types),
            StandardFieldId::Licenses => Some(&mut self.licenses),
            _ => None,
        }
    }

    /// Submit the custom entry form of an output-type or license field
    pub fn submit_custom_option(&mut self, id: StandardFieldId) -> FieldsResult<RecordId> {
        let list = self
            .option_list_mut(id)
            .ok_or(FieldsError::NoCustomList(id))?;
        let entry_id = list.submit_custom()?;
        self.emit_field(id);
        Ok(entry_id)
    }

    pub fn remove_custom_option(&mut self, id: StandardFieldId, entry: &RecordId) -> bool {
        let removed = self
            .option_list_mut(id)
            .is_some_and(|list| list.remove_custom(entry));
        if removed {
            self.emit_field(id);
        }
        removed
    }

    pub fn repositories(&self) -> &CatalogSelector<Repository> {
        &self.repositories
    }

    pub fn repositories_mut(&mut self) -> &mut CatalogSelector<Repository> {
        &mut self.repositories
    }

    pub fn metadata_standards(&self) -> &CatalogSelector<MetadataStandard> {
        &self.metadata_standards
    }

    pub fn metadata_standards_mut(&mut self) -> &mut CatalogSelector<MetadataStandard> {
        &mut self.metadata_standards
    }

    // ----- Additional fields -----

    pub fn additional_fields(&self) -> &[AdditionalField] {
        &self.additional
    }

    pub fn additional_field(&self, id: &str) -> Option<&AdditionalField> {
        self.additional.iter().find(|f| f.id == id)
    }

    /// Append an empty additional field and return its id
    pub fn add_additional_field(&mut self) -> String {
        let id = format!("additional_field_{}", self.next_additional_id);
        self.next_additional_id += 1;
        self.additional.push(AdditionalField::new(id.clone()));
        tracing::debug!(%id, "Added additional field");
        self.emit_additional();
        id
    }

    pub fn delete_additional_field(&mut self, id: &str) -> bool {
        let Some(index) = self.additional.iter().position(|f| f.id == id) else {
            return false;
        };
        self.additional.remove(index);
        tracing::debug!(%id, "Deleted additional field");
        self.emit_additional();
        true
    }

    pub fn update_additional_field(&mut self, id: &str, update: AdditionalFieldUpdate) -> bool {
        let Some(field) = self.additional.iter_mut().find(|f| f.id == id) else {
            tracing::debug!(%id, "update_additional_field: unknown id");
            return false;
        };
        field.apply(update);
        self.emit_additional();
        true
    }

    // ----- Snapshots -----

    fn settings(&self, id: StandardFieldId) -> FieldSettings {
        match id {
            StandardFieldId::Title | StandardFieldId::Description => FieldSettings::Text,
            StandardFieldId::OutputType => FieldSettings::OutputTypes {
                mode: self.output_types.mode(),
                custom: self.output_types.custom().to_vec(),
            },
            StandardFieldId::RepoSelector => FieldSettings::Repositories {
                mode: self.repositories.mode(),
                selected: self.repositories.selected_items(),
            },
            StandardFieldId::MetadataStandards => FieldSettings::MetadataStandards {
                mode: self.metadata_standards.mode(),
                selected: self.metadata_standards.selected_items(),
            },
            StandardFieldId::Licenses => FieldSettings::Licenses {
                mode: self.licenses.mode(),
                custom: self.licenses.custom().to_vec(),
            },
            StandardFieldId::DataFlags => FieldSettings::DataFlags {
                mode: self.data_flags,
                flags: self.data_flags.flags(),
            },
        }
    }

    pub fn snapshot_field(&self, id: StandardFieldId) -> FieldSnapshot {
        let field = self.field(id);
        FieldSnapshot {
            id,
            enabled: field.enabled,
            value: field.value.clone(),
            settings: self.settings(id),
        }
    }

    /// The complete question configuration
    pub fn snapshot(&self) -> ResearchOutputQuestion {
        ResearchOutputQuestion {
            fields: StandardFieldId::ALL
                .iter()
                .map(|id| self.snapshot_field(*id))
                .collect(),
            additional_fields: self.additional.clone(),
        }
    }

    fn emit_field(&self, id: StandardFieldId) {
        self.changes
            .on_change(FieldChange::Field(self.snapshot_field(id)));
    }

    fn emit_additional(&self) {
        self.changes.on_change(FieldChange::AdditionalFields {
            fields: self.additional.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogData, InMemoryCatalog};
    use crate::events::{ChangeLog, MockChangeSink, NotificationQueue};

    struct Harness {
        manager: FieldsManager,
        notifications: Arc<NotificationQueue>,
        changes: Arc<ChangeLog>,
    }

    fn context(changes: Arc<dyn ChangeSink>, notifier: Arc<dyn NotificationSink>) -> FieldsContext {
        let data = CatalogData::builtin();
        FieldsContext {
            repositories: Arc::new(InMemoryCatalog::new(data.repositories)),
            metadata_standards: Arc::new(InMemoryCatalog::new(data.metadata_standards)),
            notifier,
            changes,
            page_size: 5,
        }
    }

    fn harness() -> Harness {
        let notifications = Arc::new(NotificationQueue::new());
        let changes = Arc::new(ChangeLog::new());
        let manager = FieldsManager::new(context(changes.clone(), notifications.clone()));
        Harness {
            manager,
            notifications,
            changes,
        }
    }

    mod enablement {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_field_lookup_matches_id() {
            let h = harness();
            for id in StandardFieldId::ALL {
                assert_eq!(h.manager.field(id).id, id);
            }
        }

        #[test]
        fn test_locked_fields_cannot_be_disabled() {
            let mut h = harness();
            assert!(!h.manager.set_field_enabled(StandardFieldId::Title, false));
            assert!(!h.manager.set_field_enabled(StandardFieldId::OutputType, false));
            assert!(h.manager.is_enabled(StandardFieldId::Title));
            assert!(h.manager.is_enabled(StandardFieldId::OutputType));
            assert!(h.changes.is_empty());
        }

        #[test]
        fn test_locked_reason_only_for_locked() {
            let h = harness();
            assert_eq!(
                h.manager.locked_reason(StandardFieldId::Title),
                Some(LOCKED_FIELD_REASON)
            );
            assert!(h.manager.locked_reason(StandardFieldId::Licenses).is_none());
        }

        #[test]
        fn test_enable_emits_field_snapshot() {
            let mut changes = MockChangeSink::new();
            changes
                .expect_on_change()
                .withf(|change| {
                    matches!(
                        change,
                        FieldChange::Field(FieldSnapshot {
                            id: StandardFieldId::Licenses,
                            enabled: true,
                            ..
                        })
                    )
                })
                .times(1)
                .return_const(());
            let mut manager = FieldsManager::new(context(
                Arc::new(changes),
                Arc::new(NotificationQueue::new()),
            ));
            assert!(manager.set_field_enabled(StandardFieldId::Licenses, true));
            assert!(!manager.set_field_enabled(StandardFieldId::Licenses, true));
        }

        #[test]
        fn test_set_field_value() {
            let mut h = harness();
            h.manager
                .set_field_value(StandardFieldId::Description, "Describe the output");
            assert_eq!(
                h.manager.field(StandardFieldId::Description).value,
                "Describe the output"
            );
            assert_eq!(h.changes.len(), 1);
        }
    }

    mod panels {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_multiple_panels_open() {
            let mut h = harness();
            assert!(h.manager.expand_field(StandardFieldId::Licenses));
            assert!(h.manager.expand_field(StandardFieldId::RepoSelector));
            assert!(h.manager.is_expanded(StandardFieldId::Licenses));
            assert!(h.manager.is_expanded(StandardFieldId::RepoSelector));
            assert_eq!(h.manager.expanded_fields().count(), 2);
        }

        #[test]
        fn test_expand_again_collapses() {
            let mut h = harness();
            h.manager.expand_field(StandardFieldId::Licenses);
            assert!(!h.manager.expand_field(StandardFieldId::Licenses));
            assert!(!h.manager.is_expanded(StandardFieldId::Licenses));
        }
    }

    mod modes {
        use super::*;
        use pretty_assertions::assert_eq;

        fn add_license(manager: &mut FieldsManager, name: &str) {
            let list = manager.option_list_mut(StandardFieldId::Licenses).unwrap();
            list.open_custom_form();
            list.custom_form.name.set_text(name);
            list.custom_form.url.set_text("https://example.org");
            list.custom_form.description.set_text("terms");
            manager
                .submit_custom_option(StandardFieldId::Licenses)
                .unwrap();
        }

        #[test]
        fn test_custom_defaults_custom_restores_list() {
            let mut h = harness();
            h.manager
                .set_mode(StandardFieldId::Licenses, ValueMode::Custom);
            add_license(&mut h.manager, "Campus");
            add_license(&mut h.manager, "Lab");
            let before = h.manager.licenses().custom().to_vec();

            h.manager
                .set_mode(StandardFieldId::Licenses, ValueMode::Defaults);
            h.manager
                .set_mode(StandardFieldId::Licenses, ValueMode::Custom);
            assert_eq!(h.manager.licenses().custom(), &before[..]);
        }

        #[test]
        fn test_mode_change_emits_snapshot() {
            let mut h = harness();
            assert!(h
                .manager
                .set_mode(StandardFieldId::OutputType, ValueMode::Merged));
            match h.changes.latest() {
                Some(FieldChange::Field(snapshot)) => {
                    assert_eq!(snapshot.id, StandardFieldId::OutputType);
                    assert_eq!(
                        snapshot.settings,
                        FieldSettings::OutputTypes {
                            mode: ValueMode::Merged,
                            custom: vec![]
                        }
                    );
                }
                other => panic!("unexpected change: {other:?}"),
            }
        }

        #[test]
        fn test_fields_without_modes() {
            let mut h = harness();
            assert!(h.manager.mode(StandardFieldId::Title).is_none());
            assert!(!h
                .manager
                .set_mode(StandardFieldId::DataFlags, ValueMode::Custom));
            assert!(!h.manager.cycle_mode(StandardFieldId::Description));
        }

        #[test]
        fn test_cycle_mode() {
            let mut h = harness();
            assert!(h.manager.cycle_mode(StandardFieldId::RepoSelector));
            assert_eq!(
                h.manager.mode(StandardFieldId::RepoSelector),
                Some(ValueMode::Custom)
            );
        }

        #[test]
        fn test_submit_custom_option_rejects_selector_fields() {
            let mut h = harness();
            let result = h.manager.submit_custom_option(StandardFieldId::RepoSelector);
            assert!(matches!(
                result,
                Err(FieldsError::NoCustomList(StandardFieldId::RepoSelector))
            ));
        }

        #[test]
        fn test_remove_custom_option() {
            let mut h = harness();
            h.manager
                .set_mode(StandardFieldId::Licenses, ValueMode::Custom);
            add_license(&mut h.manager, "Campus");
            let id = h.manager.licenses().custom()[0].id.clone();
            assert!(h
                .manager
                .remove_custom_option(StandardFieldId::Licenses, &id));
            assert!(h.manager.licenses().custom().is_empty());
            assert!(!h
                .manager
                .remove_custom_option(StandardFieldId::Title, &id));
        }
    }

    mod data_flags {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default_is_both() {
            let h = harness();
            assert_eq!(h.manager.data_flags_mode(), DataFlagsMode::Both);
            let flags = h.manager.data_flags();
            assert!(flags.show_sensitive_data && flags.show_personal_data);
        }

        #[test]
        fn test_personal_only() {
            let mut h = harness();
            assert!(h.manager.set_data_flags_mode(DataFlagsMode::PersonalOnly));
            let flags = h.manager.data_flags();
            assert!(!flags.show_sensitive_data);
            assert!(flags.show_personal_data);
            assert!(!h.manager.set_data_flags_mode(DataFlagsMode::PersonalOnly));
        }
    }

    mod additional_fields {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_add_appends_in_order() {
            let mut h = harness();
            let a = h.manager.add_additional_field();
            let b = h.manager.add_additional_field();
            let ids: Vec<_> = h
                .manager
                .additional_fields()
                .iter()
                .map(|f| f.id.clone())
                .collect();
            assert_eq!(ids, vec![a, b]);
            assert!(h.manager.additional_fields()[0].label.is_empty());
        }

        #[test]
        fn test_ids_not_reused_after_delete() {
            let mut h = harness();
            let a = h.manager.add_additional_field();
            assert!(h.manager.delete_additional_field(&a));
            let b = h.manager.add_additional_field();
            assert_ne!(a, b);
            assert!(!h.manager.delete_additional_field(&a));
        }

        #[test]
        fn test_update_is_targeted() {
            let mut h = harness();
            let a = h.manager.add_additional_field();
            let b = h.manager.add_additional_field();
            assert!(h
                .manager
                .update_additional_field(&a, AdditionalFieldUpdate::Label("Funding".into())));

            assert_eq!(h.manager.additional_field(&a).unwrap().label, "Funding");
            assert_eq!(h.manager.additional_field(&b).unwrap().label, "");
            assert!(matches!(
                h.changes.latest(),
                Some(FieldChange::AdditionalFields { fields }) if fields[0].label == "Funding"
            ));
        }

        #[test]
        fn test_update_unknown_id() {
            let mut h = harness();
            assert!(!h
                .manager
                .update_additional_field("missing", AdditionalFieldUpdate::Enabled(false)));
        }
    }

    mod snapshots {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_snapshot_includes_selections() {
            let mut h = harness();
            let selector = h.manager.repositories_mut();
            selector.open();
            selector.paginate(1).await;
            selector.search("zenodo");
            selector.toggle_visible(0);

            let question = h.manager.snapshot();
            assert_eq!(question.fields.len(), StandardFieldId::ALL.len());
            match &question.fields[StandardFieldId::RepoSelector as usize].settings {
                FieldSettings::Repositories { selected, .. } => {
                    assert_eq!(selected.len(), 1);
                    assert_eq!(selected[0].name, "Zenodo");
                }
                other => panic!("unexpected settings: {other:?}"),
            }
            assert_eq!(
                h.notifications.latest().unwrap().message,
                "Zenodo added"
            );
        }

        #[test]
        fn test_snapshot_serializes() {
            let mut h = harness();
            h.manager.add_additional_field();
            let json = serde_json::to_value(h.manager.snapshot()).unwrap();
            assert_eq!(json["fields"][0]["id"], "title");
            assert_eq!(json["fields"][0]["settings"]["kind"], "text");
            assert_eq!(json["additionalFields"][0]["id"], "additional_field_1");
        }
    }
}
