//! The questionnaire: static field/section declarations, the per-visitor form
//! state machine, the submission boundary and the admin aggregations.

pub mod aggregate;
pub mod answer;
pub mod catalog;
pub mod field;
pub mod payload;
pub mod registry;
pub mod section;
pub mod state;
pub mod submit;

pub use answer::{Answer, Answers};
pub use catalog::MEAL_SURVEY;
pub use field::{Field, FieldKind, FieldOption, OTHER_SENTINEL, OtherRelation};
pub use payload::SubmissionPayload;
pub use registry::FormRegistry;
pub use section::Section;
pub use state::FormState;
pub use submit::{StoreSubmissionClient, SubmissionClient, SubmissionRejected, SubmitError};

/// A complete questionnaire declaration. Lookups only, no mutation.
#[derive(Debug)]
pub struct Survey {
    pub title: &'static str,
    pub intro: &'static str,
    pub fields: &'static [Field],
    pub sections: &'static [Section],
    pub other_relations: &'static [OtherRelation],
}

impl Survey {
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn section(&self, ordinal: usize) -> Option<&Section> {
        self.sections.iter().find(|s| s.ordinal == ordinal)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Fields of one section, in the section's order.
    pub fn section_fields(&self, ordinal: usize) -> Vec<&Field> {
        self.section(ordinal)
            .map(|s| s.fields.iter().filter_map(|id| self.field(id)).collect())
            .unwrap_or_default()
    }

    /// The "Other" free-text field attached to `parent`, if any.
    pub fn other_sibling(&self, parent: &str) -> Option<&'static str> {
        self.other_relations
            .iter()
            .find(|r| r.parent == parent)
            .map(|r| r.other)
    }

    /// Required fields (consent included) whose answer is not filled.
    pub fn missing_required(&self, answers: &Answers) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required && !answers.is_filled(f.id))
            .map(|f| f.id)
            .collect()
    }

    /// Form label of a stored option value. Values the field does not
    /// declare, free text included, come back unchanged.
    pub fn option_label<'a>(&self, field_id: &str, value: &'a str) -> &'a str {
        self.field(field_id).map_or(value, |f| f.label_for(value))
    }

    /// The choice field a free-text "Other" field belongs to, if any.
    pub fn other_parent(&self, other: &str) -> Option<&'static str> {
        self.other_relations
            .iter()
            .find(|r| r.other == other)
            .map(|r| r.parent)
    }
}
