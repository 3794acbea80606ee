use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use folio_contact::{ContactFormInput, ContactSnapshot, Field, SubmitError};
use serde::Deserialize;

use crate::{
    routes::AppState,
    session,
    template::{Fragment, Template},
};

pub const DELIVERY_FAILED_MESSAGE: &str = "Your message could not be sent, please retry later";

/// Everything the contact card partial draws.
#[derive(Clone, Debug, Default)]
pub struct ContactCard {
    pub contact: ContactSnapshot,
    pub revert_after_ms: u64,
    pub failure: Option<String>,
}

impl ContactCard {
    pub fn new(contact: ContactSnapshot, state: &AppState) -> Self {
        Self {
            contact,
            revert_after_ms: state.config.contact.revert_after().as_millis() as u64,
            failure: None,
        }
    }

    pub fn for_visitor(state: &AppState, jar: &CookieJar) -> Self {
        let id = session::current(jar);

        Self::new(state.sessions.snapshot(id.as_deref()), state)
    }
}

#[derive(askama::Template)]
#[template(path = "partials/contact-card.html")]
pub struct ContactCardTemplate {
    pub card: ContactCard,
}

fn to_section() -> Response {
    Redirect::to("/#contact").into_response()
}

pub async fn card(
    template: Template,
    Fragment(fragment): Fragment,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Response {
    if !fragment {
        return to_section();
    }

    template.render(ContactCardTemplate {
        card: ContactCard::for_visitor(&state, &jar),
    })
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ActionInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub async fn action(
    template: Template,
    Fragment(fragment): Fragment,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(input): Form<ActionInput>,
) -> Response {
    let (jar, id) = session::ensure(jar, state.config.contact.cookie_secure);
    let controller = state.sessions.get_or_create(&id);

    let input = ContactFormInput {
        name: input.name,
        email: input.email,
        message: input.message,
    };

    let (status, failure) = match controller.submit_with(input).await {
        Ok(message) => {
            tracing::info!(
                session = %id,
                submitted_at = message.submitted_at,
                "contact form submitted"
            );

            (StatusCode::OK, None)
        }
        Err(SubmitError::Invalid(errors)) => {
            tracing::debug!(session = %id, fields = ?errors.fields(), "contact form rejected");

            (StatusCode::UNPROCESSABLE_ENTITY, None)
        }
        Err(SubmitError::Busy(current)) => {
            tracing::debug!(session = %id, state = %current, "contact form busy");

            (StatusCode::CONFLICT, None)
        }
        Err(err @ SubmitError::Delivery(_)) => {
            tracing::error!(session = %id, err = %err, "contact form delivery failed");

            (
                StatusCode::BAD_GATEWAY,
                Some(DELIVERY_FAILED_MESSAGE.to_owned()),
            )
        }
    };

    if !fragment {
        return (jar, to_section()).into_response();
    }

    let card = ContactCard {
        failure,
        ..ContactCard::new(controller.snapshot(), &state)
    };

    (
        jar,
        template.render_with_status(status, ContactCardTemplate { card }),
    )
        .into_response()
}

#[derive(Deserialize)]
pub struct FieldInput {
    pub field: Field,
    #[serde(default)]
    pub value: String,
}

pub async fn field(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(input): Form<FieldInput>,
) -> impl IntoResponse {
    let (jar, id) = session::ensure(jar, state.config.contact.cookie_secure);

    state
        .sessions
        .get_or_create(&id)
        .update_field(input.field, input.value);

    (jar, StatusCode::NO_CONTENT)
}

pub async fn reset(
    template: Template,
    Fragment(fragment): Fragment,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Response {
    let controller = session::current(&jar).and_then(|id| state.sessions.get(&id));

    if let Some(controller) = controller {
        controller.reset();
    }

    if !fragment {
        return to_section();
    }

    template.render(ContactCardTemplate {
        card: ContactCard::for_visitor(&state, &jar),
    })
}
