//! Inline editable field editor.
//!
//! The profile screens render values that swap to an input on explicit
//! activation (double-click), commit on blur/Enter when the value changed,
//! and revert on Escape. The editor tracks one field set per instance with
//! at most one field in the editing phase at a time.
//!
//! A commit is optimistic: the display immediately shows the submitted
//! value while the save round trip is outstanding. The caller reports the
//! outcome back; a failed save rolls the field back to its previous
//! committed value and records the error for inline display.

use std::collections::BTreeMap;

/// Lifecycle of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPhase {
    /// Showing the committed value.
    Display,
    /// Input active with the user's draft.
    Editing { draft: String },
    /// Save round trip outstanding; display shows `submitted`.
    Saving { submitted: String, previous: String },
}

/// A save the caller must forward to the backend, produced at most once
/// per commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub field: String,
    pub value: String,
}

#[derive(Debug)]
struct FieldSlot {
    committed: String,
    phase: FieldPhase,
    error: Option<String>,
}

/// Editor over a named set of inline-editable fields.
#[derive(Debug, Default)]
pub struct InlineFieldEditor {
    fields: BTreeMap<String, FieldSlot>,
}

impl InlineFieldEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a field with its committed value, replacing any previous
    /// registration.
    pub fn insert_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(
            name.into(),
            FieldSlot {
                committed: value.into(),
                phase: FieldPhase::Display,
                error: None,
            },
        );
    }

    /// Builder-style registration for test and setup ergonomics.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_field(name, value);
        self
    }

    /// The field currently in the editing phase, if any.
    pub fn active_field(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|(_, slot)| matches!(slot.phase, FieldPhase::Editing { .. }))
            .map(|(name, _)| name.as_str())
    }

    pub fn is_editing(&self, field: &str) -> bool {
        matches!(
            self.fields.get(field).map(|s| &s.phase),
            Some(FieldPhase::Editing { .. })
        )
    }

    pub fn is_saving(&self, field: &str) -> bool {
        matches!(
            self.fields.get(field).map(|s| &s.phase),
            Some(FieldPhase::Saving { .. })
        )
    }

    /// The value a view should render for the field: the draft while
    /// editing, the submitted value while saving, the committed value
    /// otherwise.
    pub fn display_value(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|slot| match &slot.phase {
            FieldPhase::Display => slot.committed.as_str(),
            FieldPhase::Editing { draft } => draft.as_str(),
            FieldPhase::Saving { submitted, .. } => submitted.as_str(),
        })
    }

    /// The inline error recorded for the field, if any.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|s| s.error.as_deref())
    }

    /// Activates editing on a field (double-click analog).
    ///
    /// Any other field currently editing is reverted first, preserving the
    /// one-active-field invariant. Returns false for unknown fields and
    /// for fields with an outstanding save.
    pub fn activate(&mut self, field: &str) -> bool {
        if self.is_saving(field) {
            return false;
        }
        if let Some(active) = self.active_field().map(str::to_string) {
            if active != field {
                self.cancel(&active);
            }
        }
        match self.fields.get_mut(field) {
            Some(slot) => {
                if !matches!(slot.phase, FieldPhase::Editing { .. }) {
                    slot.phase = FieldPhase::Editing {
                        draft: slot.committed.clone(),
                    };
                    slot.error = None;
                }
                true
            }
            None => false,
        }
    }

    /// Replaces the draft while editing. Ignored outside the editing phase.
    pub fn set_draft(&mut self, field: &str, draft: impl Into<String>) {
        if let Some(slot) = self.fields.get_mut(field) {
            if matches!(slot.phase, FieldPhase::Editing { .. }) {
                slot.phase = FieldPhase::Editing {
                    draft: draft.into(),
                };
            }
        }
    }

    /// Commits the draft (blur/Enter analog).
    ///
    /// Produces a `SaveRequest` exactly once when the draft differs from
    /// the committed value and moves the field to `Saving`; an unchanged
    /// draft simply leaves edit mode.
    pub fn commit(&mut self, field: &str) -> Option<SaveRequest> {
        let slot = self.fields.get_mut(field)?;
        let draft = match &slot.phase {
            FieldPhase::Editing { draft } => draft.clone(),
            _ => return None,
        };
        if draft == slot.committed {
            slot.phase = FieldPhase::Display;
            return None;
        }
        slot.phase = FieldPhase::Saving {
            submitted: draft.clone(),
            previous: slot.committed.clone(),
        };
        Some(SaveRequest {
            field: field.to_string(),
            value: draft,
        })
    }

    /// Reverts a pending edit without saving (Escape analog).
    pub fn cancel(&mut self, field: &str) {
        if let Some(slot) = self.fields.get_mut(field) {
            if matches!(slot.phase, FieldPhase::Editing { .. }) {
                slot.phase = FieldPhase::Display;
            }
        }
    }

    /// Marks an outstanding save as confirmed; the submitted value becomes
    /// the committed one.
    pub fn save_confirmed(&mut self, field: &str) {
        if let Some(slot) = self.fields.get_mut(field) {
            if let FieldPhase::Saving { submitted, .. } = &slot.phase {
                slot.committed = submitted.clone();
                slot.phase = FieldPhase::Display;
                slot.error = None;
            }
        }
    }

    /// Marks an outstanding save as failed; the field rolls back to its
    /// previous committed value and the error is recorded inline.
    pub fn save_failed(&mut self, field: &str, error: impl Into<String>) {
        if let Some(slot) = self.fields.get_mut(field) {
            if let FieldPhase::Saving { previous, .. } = &slot.phase {
                slot.committed = previous.clone();
                slot.phase = FieldPhase::Display;
                slot.error = Some(error.into());
            }
        }
    }

    /// Refreshes a field's committed value from a server fetch. Skipped
    /// while the field is editing or saving so user input is never
    /// clobbered.
    pub fn set_committed(&mut self, field: &str, value: impl Into<String>) {
        if let Some(slot) = self.fields.get_mut(field) {
            if slot.phase == FieldPhase::Display {
                slot.committed = value.into();
            }
        }
    }
}
