//! Parameter forms.
//!
//! When an item's path declares query parameters, the explorer collects one
//! value per name before issuing the request. Every field is required and a
//! value counts as present only if it is non-blank after trimming.

use thiserror::Error;

use crate::catalog::Item;
use crate::template::PathTemplate;

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// One or more required fields are blank.
    #[error("Please fill in all required fields.")]
    Blank {
        /// Names of the blank fields.
        fields: Vec<String>,
    },

    /// A previous submission has not settled yet.
    #[error("a request is already in flight")]
    InFlight,
}

/// Submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    /// Ready to submit.
    #[default]
    Idle,
    /// A request built from this form is outstanding.
    Submitting,
}

/// One text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamField {
    /// Parameter name.
    pub name: String,
    /// Placeholder label, `input {name}...`.
    pub label: String,
    /// Current value.
    pub value: String,
    /// Always `true`; every declared parameter is required.
    pub required: bool,
    /// Set when the last submission found this field blank.
    pub invalid: bool,
}

impl ParamField {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: format!("input {name}..."),
            value: String::new(),
            required: true,
            invalid: false,
        }
    }

    /// Whether the value is empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// The form generated for a parameterised item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamForm {
    template: PathTemplate,
    fields: Vec<ParamField>,
    inner_desc: Vec<String>,
    state: SubmitState,
    submit_enabled: bool,
}

impl ParamForm {
    /// Build the form for an item, or `None` if its path declares no parameters.
    #[must_use]
    pub fn for_item(item: &Item) -> Option<Self> {
        let template = PathTemplate::parse(&item.path);
        if !template.has_params() {
            return None;
        }

        let fields = template.params().iter().map(|p| ParamField::new(p)).collect();
        let inner_desc = item
            .inner_desc
            .as_deref()
            .map(|d| d.split('\n').map(str::to_string).collect())
            .unwrap_or_default();

        let mut form = Self {
            template,
            fields,
            inner_desc,
            state: SubmitState::Idle,
            submit_enabled: false,
        };
        form.revalidate();
        Some(form)
    }

    /// The inputs in parameter order.
    #[must_use]
    pub fn fields(&self) -> &[ParamField] {
        &self.fields
    }

    /// Help text, one entry per line.
    #[must_use]
    pub fn inner_desc(&self) -> &[String] {
        &self.inner_desc
    }

    /// Current submission state.
    #[must_use]
    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Whether the submit control is enabled.
    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled && self.state == SubmitState::Idle
    }

    /// Replace a field's value.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
        self.revalidate();
    }

    /// Append a character to a field.
    pub fn push_char(&mut self, index: usize, c: char) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value.push(c);
        }
        self.revalidate();
    }

    /// Delete the last character of a field.
    pub fn pop_char(&mut self, index: usize) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value.pop();
        }
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.submit_enabled = self.fields.iter().all(|f| !f.is_blank());
    }

    /// Validate every field and, if all are filled, return the request path
    /// built from the current trimmed values.
    ///
    /// On success the form moves to [`SubmitState::Submitting`] until
    /// [`ParamForm::finish`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Blank`] (flagging the blank fields) or
    /// [`FormError::InFlight`] if a submission is outstanding.
    pub fn submit(&mut self) -> Result<String, FormError> {
        if self.state == SubmitState::Submitting {
            return Err(FormError::InFlight);
        }

        let mut blank = Vec::new();
        for field in &mut self.fields {
            field.invalid = field.is_blank();
            if field.invalid {
                blank.push(field.name.clone());
            }
        }
        if !blank.is_empty() {
            return Err(FormError::Blank { fields: blank });
        }

        let path = self
            .template
            .resolve(self.fields.iter().map(|f| (f.name.as_str(), f.value.trim())));
        self.state = SubmitState::Submitting;
        Ok(path)
    }

    /// Mark the outstanding submission as settled.
    pub fn finish(&mut self) {
        self.state = SubmitState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(path: &str) -> Item {
        Item {
            name: "Search".to_string(),
            desc: "Find things".to_string(),
            path: path.to_string(),
            inner_desc: Some("Example:\nq=rust".to_string()),
        }
    }

    #[test]
    fn no_form_without_params() {
        assert!(ParamForm::for_item(&item("/plain")).is_none());
    }

    #[test]
    fn one_required_field_per_param() {
        let form = ParamForm::for_item(&item("/search?q=&page=2&q=")).unwrap();
        let labels: Vec<_> = form.fields().iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["input q...", "input page..."]);
        assert!(form.fields().iter().all(|f| f.required));
        assert_eq!(form.inner_desc(), ["Example:", "q=rust"]);
    }

    #[test]
    fn submit_enabled_iff_all_fields_non_blank() {
        let mut form = ParamForm::for_item(&item("/search?q=&page=")).unwrap();
        assert!(!form.submit_enabled());

        form.set_value(0, "rust");
        assert!(!form.submit_enabled());

        form.set_value(1, "   ");
        assert!(!form.submit_enabled());

        form.push_char(1, '1');
        assert!(form.submit_enabled());

        form.pop_char(1);
        assert!(!form.submit_enabled());
    }

    #[test]
    fn blank_submission_is_blocked_and_flagged() {
        let mut form = ParamForm::for_item(&item("/search?q=")).unwrap();
        form.set_value(0, "  ");

        let err = form.submit().unwrap_err();
        assert_eq!(
            err,
            FormError::Blank {
                fields: vec!["q".to_string()]
            }
        );
        assert_eq!(err.to_string(), "Please fill in all required fields.");
        assert!(form.fields()[0].invalid);
        assert_eq!(form.state(), SubmitState::Idle);
    }

    #[test]
    fn submission_uses_trimmed_current_values() {
        let mut form = ParamForm::for_item(&item("/search?q=old&page=9")).unwrap();
        form.set_value(0, "  new term ");
        form.set_value(1, "2");

        let path = form.submit().unwrap();
        assert_eq!(path, "/search?q=new+term&page=2");
        assert!(form.fields().iter().all(|f| !f.invalid));
    }

    #[test]
    fn resubmission_is_refused_while_in_flight() {
        let mut form = ParamForm::for_item(&item("/search?q=")).unwrap();
        form.set_value(0, "x");
        form.submit().unwrap();

        assert_eq!(form.state(), SubmitState::Submitting);
        assert!(!form.submit_enabled());
        assert_eq!(form.submit().unwrap_err(), FormError::InFlight);

        form.finish();
        assert!(form.submit_enabled());
        assert!(form.submit().is_ok());
    }

    #[test]
    fn fixing_a_field_clears_its_flag_on_next_submit() {
        let mut form = ParamForm::for_item(&item("/search?q=")).unwrap();
        assert!(form.submit().is_err());
        assert!(form.fields()[0].invalid);

        form.set_value(0, "ok");
        form.submit().unwrap();
        assert!(!form.fields()[0].invalid);
    }
}
