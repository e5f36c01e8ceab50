/// Option value that unlocks the free-text sibling of a choice field.
pub const OTHER_SENTINEL: &str = "Autre";

/// The answer kind of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One option among `options` (radio buttons).
    SingleChoice,
    /// Any subset of `options`, kept in the order the user picked them.
    MultiChoice,
    /// Integer scale, bounds inclusive.
    Scale { min: i64, max: i64 },
    /// Free text. Never blocks section completion.
    FreeText,
    /// Yes/no acknowledgement such as the privacy policy checkbox.
    Consent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// One question of the survey.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: FieldKind,
    pub options: &'static [FieldOption],
    pub required: bool,
    pub placeholder: Option<&'static str>,
}

impl Field {
    pub const fn single(
        id: &'static str,
        title: &'static str,
        options: &'static [FieldOption],
    ) -> Self {
        Self {
            id,
            title,
            kind: FieldKind::SingleChoice,
            options,
            required: true,
            placeholder: None,
        }
    }

    pub const fn multi(
        id: &'static str,
        title: &'static str,
        options: &'static [FieldOption],
    ) -> Self {
        Self {
            id,
            title,
            kind: FieldKind::MultiChoice,
            options,
            required: true,
            placeholder: None,
        }
    }

    pub const fn scale(id: &'static str, title: &'static str, min: i64, max: i64) -> Self {
        Self {
            id,
            title,
            kind: FieldKind::Scale { min, max },
            options: &[],
            required: true,
            placeholder: None,
        }
    }

    /// Optional free-text question.
    pub const fn text(id: &'static str, title: &'static str) -> Self {
        Self {
            id,
            title,
            kind: FieldKind::FreeText,
            options: &[],
            required: false,
            placeholder: None,
        }
    }

    /// Free-text sibling of a choice field's "Other" option.
    pub const fn other(id: &'static str, placeholder: &'static str) -> Self {
        Self {
            id,
            title: "Précisez",
            kind: FieldKind::FreeText,
            options: &[],
            required: false,
            placeholder: Some(placeholder),
        }
    }

    pub const fn consent(id: &'static str, title: &'static str) -> Self {
        Self {
            id,
            title,
            kind: FieldKind::Consent,
            options: &[],
            required: true,
            placeholder: None,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::SingleChoice | FieldKind::MultiChoice)
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Label shown for a stored option value, falling back to the value itself.
    pub fn label_for<'a>(&self, value: &'a str) -> &'a str {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label)
            .unwrap_or(value)
    }
}

/// Declared link between a choice field and the free-text field that
/// carries the "Other" answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtherRelation {
    pub parent: &'static str,
    pub other: &'static str,
}

/// Shorthand for option tables where the stored value is also the label.
#[macro_export]
macro_rules! options {
    ($($value:literal $(=> $label:literal)?),* $(,)?) => {
        &[$($crate::survey::field::FieldOption {
            value: $value,
            label: $crate::options!(@label $value $(, $label)?),
        }),*]
    };
    (@label $value:literal) => { $value };
    (@label $value:literal, $label:literal) => { $label };
}
