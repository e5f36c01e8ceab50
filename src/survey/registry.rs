use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::state::FormState;
use super::submit::SubmitError;
use super::Survey;

/// Forms untouched for this long are dropped on the next access.
const IDLE_TTL: Duration = Duration::from_secs(2 * 60 * 60);

struct Entry {
    form: FormState<'static>,
    submitting: bool,
    touched: Instant,
}

/// In-progress forms of every visitor, keyed by the form id stored in their
/// session cookie. Nothing here outlives the process.
#[derive(Clone)]
pub struct FormRegistry {
    survey: &'static Survey,
    forms: Arc<Mutex<HashMap<String, Entry>>>,
    idle_ttl: Duration,
}

impl FormRegistry {
    pub fn new(survey: &'static Survey) -> Self {
        Self::with_idle_ttl(survey, IDLE_TTL)
    }

    pub fn with_idle_ttl(survey: &'static Survey, idle_ttl: Duration) -> Self {
        Self {
            survey,
            forms: Arc::new(Mutex::new(HashMap::new())),
            idle_ttl,
        }
    }

    pub fn survey(&self) -> &'static Survey {
        self.survey
    }

    /// Run `f` against the visitor's form, creating an empty one if needed.
    pub fn with_form<R>(&self, form_id: &str, f: impl FnOnce(&mut FormState<'static>) -> R) -> R {
        let mut map = self.forms.lock().unwrap_or_else(|e| e.into_inner());
        self.prune(&mut map);
        let entry = map.entry(form_id.to_string()).or_insert_with(|| Entry {
            form: FormState::new(self.survey),
            submitting: false,
            touched: Instant::now(),
        });
        entry.touched = Instant::now();
        f(&mut entry.form)
    }

    /// Snapshot of the form for one submission attempt. Refuses while an
    /// earlier [`Submission`] for the same form is still alive.
    pub fn check_out(&self, form_id: &str) -> Result<Submission<'_>, SubmitError> {
        let mut map = self.forms.lock().unwrap_or_else(|e| e.into_inner());
        let entry = map.entry(form_id.to_string()).or_insert_with(|| Entry {
            form: FormState::new(self.survey),
            submitting: false,
            touched: Instant::now(),
        });
        if entry.submitting {
            return Err(SubmitError::InFlight);
        }
        entry.submitting = true;
        entry.touched = Instant::now();
        Ok(Submission {
            registry: self,
            form_id: form_id.to_string(),
            form: entry.form.clone(),
            stored: false,
        })
    }

    pub fn remove(&self, form_id: &str) {
        let mut map = self.forms.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(form_id);
    }

    pub fn len(&self) -> usize {
        self.forms.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune(&self, map: &mut HashMap<String, Entry>) {
        let ttl = self.idle_ttl;
        map.retain(|_, e| e.submitting || e.touched.elapsed() < ttl);
    }

    fn release(&self, form_id: &str, reset: bool) {
        let mut map = self.forms.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = map.get_mut(form_id) {
            if reset {
                entry.form.reset();
            }
            entry.submitting = false;
            entry.touched = Instant::now();
        }
    }
}

/// A form checked out by [`FormRegistry::check_out`].
///
/// The live form stays editable while the attempt runs. Dropping the guard
/// releases the form without touching its answers, so an attempt that fails,
/// panics or is cancelled leaves the visitor free to retry. Only
/// [`stored`](Self::stored) clears the live form.
pub struct Submission<'r> {
    registry: &'r FormRegistry,
    form_id: String,
    form: FormState<'static>,
    stored: bool,
}

impl Submission<'_> {
    pub fn form_mut(&mut self) -> &mut FormState<'static> {
        &mut self.form
    }

    /// The response was stored: reset the live form and release it.
    pub fn stored(mut self) {
        self.stored = true;
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        self.registry.release(&self.form_id, self.stored);
    }
}
