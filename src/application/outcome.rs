use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::validation::FieldErrors;

/// What a form action hands back to the form that submitted it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct FormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormState {
    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors: Some(errors),
            message: Some(message.into()),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: None,
            message: Some(message.into()),
        }
    }
}

/// Drop every cached rendering of this route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revalidate(pub &'static str);

/// Send the caller to this path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing was written; show this state on the form.
    Rejected(FormState),
    /// The write went through. The caller performs the signalled side effects.
    Completed {
        revalidate: Revalidate,
        redirect: Option<Redirect>,
    },
}
