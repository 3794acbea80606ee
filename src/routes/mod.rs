use std::sync::Arc;

use axum::{
    Router,
    response::IntoResponse,
    routing::{get, post},
};
use folio_contact::ContactSessions;
use folio_content::Portfolio;

use crate::{assets::AssetsService, config::Config, template::Template};

mod contact;
mod health;
mod index;
mod projects;

pub use contact::ContactCard;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub content: Arc<Portfolio>,
    pub sessions: Arc<ContactSessions>,
}

impl AppState {
    pub fn new(config: Config, content: Portfolio, sessions: ContactSessions) -> Self {
        Self {
            config,
            content: Arc::new(content),
            sessions: Arc::new(sessions),
        }
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.not_found()
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/", get(index::page))
        .route("/projects/{id}", get(projects::page))
        .route("/contact", get(contact::card).post(contact::action))
        .route("/contact/field", post(contact::field))
        .route("/contact/reset", post(contact::reset))
        .nest_service("/static", AssetsService::new())
        .fallback(fallback)
        .with_state(app_state)
}
