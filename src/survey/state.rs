use super::answer::{Answer, Answers};
use super::field::{FieldKind, OTHER_SENTINEL};
use super::payload::SubmissionPayload;
use super::submit::{SubmissionClient, SubmitError};
use super::Survey;

/// In-progress answers of one visitor plus the section they are looking at.
///
/// Every field starts absent and the pointer starts on section 1. A
/// successful [`submit`](Self::submit) puts the form back in that shape so the
/// visitor can answer again.
#[derive(Debug, Clone)]
pub struct FormState<'s> {
    survey: &'s Survey,
    answers: Answers,
    current_section: usize,
    progress: u8,
}

impl<'s> FormState<'s> {
    pub fn new(survey: &'s Survey) -> Self {
        Self {
            survey,
            answers: Answers::default(),
            current_section: 1,
            progress: 0,
        }
    }

    pub fn survey(&self) -> &'s Survey {
        self.survey
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn current_section(&self) -> usize {
        self.current_section
    }

    /// Filled fields over required fields (consent included), as a rounded
    /// percentage capped at 100. Optional answers count towards the filled
    /// side, so the bar can reach 100 before every question is answered.
    /// Recomputed on every [`set_answer`](Self::set_answer).
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Update one field from a raw input value.
    ///
    /// - single choice: stores `value`; when the field has an Other sibling,
    ///   choosing the Other option sets the sibling to `other_value` (or `""`)
    ///   and any other option clears it.
    /// - multi choice: toggles `value` in the list (insertion order). Toggling
    ///   the Other option on sets the sibling from `other_value`, toggling it
    ///   off clears the sibling.
    /// - scale: parsed as an integer; non-numbers and out-of-range values are
    ///   ignored.
    /// - consent: `"true"`, `"on"`, `"1"` and `"yes"` mean accepted.
    /// - free text: stored verbatim.
    ///
    /// Unknown field ids are ignored.
    pub fn set_answer(&mut self, field_id: &str, value: &str, other_value: Option<&str>) {
        let Some(field) = self.survey.field(field_id) else {
            return;
        };
        let id = field.id;
        let sibling = self.survey.other_sibling(id);

        match field.kind {
            FieldKind::SingleChoice => {
                self.answers.set(id, Answer::Text(value.to_string()));
                if let Some(other) = sibling {
                    let other_text =
                        if value == OTHER_SENTINEL { other_value.unwrap_or("") } else { "" };
                    self.answers.set(other, Answer::Text(other_text.to_string()));
                }
            }
            FieldKind::MultiChoice => {
                let mut items = self.answers.list(id).to_vec();
                let removed = match items.iter().position(|v| v == value) {
                    Some(pos) => {
                        items.remove(pos);
                        true
                    }
                    None => {
                        items.push(value.to_string());
                        false
                    }
                };
                self.answers.set(id, Answer::List(items));
                if let Some(other) = sibling {
                    if value == OTHER_SENTINEL {
                        let other_text = if removed { "" } else { other_value.unwrap_or("") };
                        self.answers.set(other, Answer::Text(other_text.to_string()));
                    }
                }
            }
            FieldKind::Scale { min, max } => match value.trim().parse::<i64>() {
                Ok(n) if (min..=max).contains(&n) => self.answers.set(id, Answer::Number(n)),
                _ => {}
            },
            FieldKind::Consent => {
                let accepted = matches!(value.trim(), "true" | "on" | "1" | "yes");
                self.answers.set(id, Answer::Flag(accepted));
            }
            FieldKind::FreeText => self.answers.set(id, Answer::Text(value.to_string())),
        }

        self.progress = self.compute_progress();
    }

    /// Move to section `n`; out-of-range requests are ignored.
    pub fn go_to_section(&mut self, n: usize) {
        if (1..=self.survey.section_count()).contains(&n) {
            self.current_section = n;
        }
    }

    /// Advance one section, only when the current one is complete.
    pub fn next_section(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.go_to_section(self.current_section + 1);
        true
    }

    pub fn previous_section(&mut self) {
        if self.current_section > 1 {
            self.go_to_section(self.current_section - 1);
        }
    }

    /// Whether the "next section" control is enabled.
    pub fn can_advance(&self) -> bool {
        self.current_section < self.survey.section_count()
            && self.is_section_complete(self.current_section)
    }

    pub fn is_last_section(&self) -> bool {
        self.current_section == self.survey.section_count()
    }

    /// Every required field of section `n` is filled. Free-text fields never
    /// block; an unknown section is never complete.
    pub fn is_section_complete(&self, n: usize) -> bool {
        let Some(section) = self.survey.section(n) else {
            return false;
        };
        section.fields.iter().all(|id| match self.survey.field(id) {
            Some(f) if f.kind == FieldKind::FreeText || !f.required => true,
            Some(f) => self.answers.is_filled(f.id),
            None => true,
        })
    }

    /// Validate every required field, then hand the payload to `client`.
    ///
    /// On `Ok` the form is reset to its initial state. On any error the
    /// answers and current section are left as they were.
    pub async fn submit<C: SubmissionClient>(&mut self, client: &C) -> Result<i64, SubmitError> {
        let payload = self.prepare_submission()?;
        match client.submit_payload(&payload).await {
            Ok(id) => {
                self.reset();
                Ok(id)
            }
            Err(rejected) => Err(SubmitError::Rejected(rejected.reason)),
        }
    }

    /// The payload [`submit`](Self::submit) would send, or the validation
    /// failure that stops it.
    pub fn prepare_submission(&self) -> Result<SubmissionPayload, SubmitError> {
        if !self.survey.missing_required(&self.answers).is_empty() {
            return Err(SubmitError::Validation);
        }
        Ok(SubmissionPayload::from_answers(&self.answers))
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.survey);
    }

    fn compute_progress(&self) -> u8 {
        let required = self.survey.fields().filter(|f| f.required).count();
        if required == 0 {
            return 0;
        }
        let filled = self.survey.fields().filter(|f| self.answers.is_filled(f.id)).count();
        let percent = (filled as f64 / required as f64 * 100.0).round();
        percent.min(100.0) as u8
    }
}
