use crate::domain::model::{
    CredentialsRequest, FieldErrors, FormField, SubmissionStatus, MAGIC_LINK_SENT_MESSAGE,
};
use crate::domain::ports::MagicLinkSender;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::validate_email;

pub const SUBMIT_LABEL: &str = "Send magic link";
pub const SUBMIT_LABEL_LOADING: &str = "Sending magic link…";

/// What a single submit attempt ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; field errors are populated, status untouched.
    Invalid,
    Sent,
    Failed,
}

/// State of the passwordless sign-in form.
///
/// `on_submit` borrows the controller mutably for the whole request, so a
/// second submission cannot start while one is in flight.
pub struct AuthFormController<S: MagicLinkSender> {
    sender: S,
    values: CredentialsRequest,
    errors: FieldErrors,
    status: SubmissionStatus,
}

impl<S: MagicLinkSender> AuthFormController<S> {
    pub fn new(sender: S) -> Self {
        Self {
            sender,
            values: CredentialsRequest::default(),
            errors: FieldErrors::new(),
            status: SubmissionStatus::Idle,
        }
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn email(&self) -> &str {
        &self.values.email
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn field_error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn message(&self) -> &str {
        self.status.message()
    }

    pub fn can_submit(&self) -> bool {
        !self.status.is_loading()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.status.is_loading() {
            SUBMIT_LABEL_LOADING
        } else {
            SUBMIT_LABEL
        }
    }

    /// Store the new email value. Validation waits for the next submit.
    pub fn on_field_change(&mut self, email: impl Into<String>) {
        self.values.email = email.into();
    }

    /// Rebuild the field-error map; true when it is empty.
    pub fn validate(&mut self) -> bool {
        let mut next = FieldErrors::new();
        if let Err(AppError::ValidationError { message, .. }) =
            validate_email(FormField::Email.name(), &self.values.email)
        {
            next.insert(FormField::Email, message);
        }
        self.errors = next;
        self.errors.is_empty()
    }

    /// Validate, then request a magic link.
    ///
    /// Auth failures land in the status. Configuration errors are returned
    /// to the caller and the status goes back to what it was.
    pub async fn on_submit(&mut self) -> Result<SubmitOutcome> {
        if !self.validate() {
            tracing::debug!("Sign-in form rejected locally: {:?}", self.errors);
            return Ok(SubmitOutcome::Invalid);
        }

        let previous = std::mem::replace(&mut self.status, SubmissionStatus::Loading);

        match self.sender.send_magic_link(&self.values.email).await {
            Ok(()) => {
                self.status = SubmissionStatus::Sent(MAGIC_LINK_SENT_MESSAGE.to_string());
                Ok(SubmitOutcome::Sent)
            }
            Err(e) if e.is_configuration() => {
                tracing::error!("Magic link client is misconfigured: {}", e);
                self.status = previous;
                Err(e)
            }
            Err(e) => {
                self.status = SubmissionStatus::Error(e.user_friendly_message());
                Ok(SubmitOutcome::Failed)
            }
        }
    }
}
