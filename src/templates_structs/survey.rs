use askama::Template;

use crate::auth::session::Flash;
use crate::survey::{Answer, Field, FieldKind, FormState, OTHER_SENTINEL};

use super::APP_NAME;

pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Free-text input shown under a choice field when its Other option is picked.
pub struct OtherView {
    pub id: &'static str,
    pub placeholder: &'static str,
    pub value: String,
}

pub struct FieldView {
    pub id: &'static str,
    pub title: &'static str,
    pub required: bool,
    /// One of `single`, `multi`, `scale`, `text`, `consent`.
    pub widget: &'static str,
    pub options: Vec<OptionView>,
    pub text_value: String,
    pub checked: bool,
    pub other: Option<OtherView>,
}

pub struct SectionTab {
    pub ordinal: usize,
    pub title: &'static str,
    pub complete: bool,
    pub current: bool,
}

#[derive(Template)]
#[template(path = "survey.html")]
pub struct SurveyTemplate {
    pub app_name: &'static str,
    pub title: &'static str,
    pub intro: &'static str,
    pub csrf_token: String,
    pub flash: Option<Flash>,
    pub progress: u8,
    pub current: usize,
    pub section_count: usize,
    pub section_title: &'static str,
    pub tabs: Vec<SectionTab>,
    pub fields: Vec<FieldView>,
    pub is_first: bool,
    pub is_last: bool,
    pub can_advance: bool,
}

impl SurveyTemplate {
    pub fn build(form: &FormState<'_>, flash: Option<Flash>, csrf_token: String) -> Self {
        let survey = form.survey();
        let current = form.current_section();
        let tabs = survey
            .sections()
            .map(|s| SectionTab {
                ordinal: s.ordinal,
                title: s.title,
                complete: form.is_section_complete(s.ordinal),
                current: s.ordinal == current,
            })
            .collect();
        // Other siblings are drawn under their parent, not on their own.
        let fields = survey
            .section_fields(current)
            .into_iter()
            .filter(|f| survey.other_parent(f.id).is_none())
            .map(|f| field_view(form, f))
            .collect();

        Self {
            app_name: APP_NAME,
            title: survey.title,
            intro: survey.intro,
            csrf_token,
            flash,
            progress: form.progress(),
            current,
            section_count: survey.section_count(),
            section_title: survey.section(current).map(|s| s.title).unwrap_or_default(),
            tabs,
            fields,
            is_first: current == 1,
            is_last: form.is_last_section(),
            can_advance: form.can_advance(),
        }
    }
}

fn field_view(form: &FormState<'_>, field: &Field) -> FieldView {
    let answers = form.answers();
    let selected = |value: &str| match answers.get(field.id) {
        Some(Answer::Text(s)) => s == value,
        Some(Answer::List(items)) => items.iter().any(|i| i == value),
        Some(Answer::Number(n)) => n.to_string() == value,
        _ => false,
    };

    let (widget, options) = match field.kind {
        FieldKind::SingleChoice | FieldKind::MultiChoice => {
            let widget = if field.kind == FieldKind::SingleChoice { "single" } else { "multi" };
            let options = field
                .options
                .iter()
                .map(|o| OptionView {
                    value: o.value.to_string(),
                    label: o.label.to_string(),
                    selected: selected(o.value),
                })
                .collect();
            (widget, options)
        }
        FieldKind::Scale { min, max } => {
            let options = (min..=max)
                .map(|n| {
                    let v = n.to_string();
                    OptionView { selected: selected(&v), label: v.clone(), value: v }
                })
                .collect();
            ("scale", options)
        }
        FieldKind::FreeText => ("text", Vec::new()),
        FieldKind::Consent => ("consent", Vec::new()),
    };

    let other = form.survey().other_sibling(field.id).and_then(|other_id| {
        if !selected(OTHER_SENTINEL) {
            return None;
        }
        let sibling = form.survey().field(other_id)?;
        Some(OtherView {
            id: other_id,
            placeholder: sibling.placeholder.unwrap_or_default(),
            value: answers.text(other_id).to_string(),
        })
    });

    FieldView {
        id: field.id,
        title: field.title,
        required: field.required,
        widget,
        options,
        text_value: answers.text(field.id).to_string(),
        checked: answers.flag(field.id),
        other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::MEAL_SURVEY;

    #[test]
    fn test_first_section_view() {
        let mut form = FormState::new(&MEAL_SURVEY);
        form.set_answer("ville", "Autre", Some("Lomé"));
        let view = SurveyTemplate::build(&form, None, "tok".into());

        assert_eq!(view.current, 1);
        assert!(view.is_first);
        assert!(!view.can_advance);
        assert_eq!(view.tabs.len(), 6);
        let ids: Vec<&str> = view.fields.iter().map(|f| f.id).collect();
        assert_eq!(ids, ["ville", "situationProfessionnelle"]);

        let ville = &view.fields[0];
        assert_eq!(ville.widget, "single");
        assert!(ville.options.iter().any(|o| o.value == "Autre" && o.selected));
        let other = ville.other.as_ref().unwrap();
        assert_eq!(other.id, "villeAutre");
        assert_eq!(other.value, "Lomé");
        assert!(view.fields[1].other.is_none());
    }

    #[test]
    fn test_scale_view_lists_each_position() {
        let mut form = FormState::new(&MEAL_SURVEY);
        form.go_to_section(3);
        form.set_answer("satisfactionAccesRepas", "4", None);
        let view = SurveyTemplate::build(&form, None, String::new());
        let scale = view.fields.iter().find(|f| f.widget == "scale").unwrap();
        let values: Vec<&str> = scale.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["1", "2", "3", "4", "5"]);
        assert!(scale.options[3].selected);
        assert!(view.render().unwrap().contains("satisfactionAccesRepas"));
    }
}
