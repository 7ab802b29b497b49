//! HTML back office served over HTTP.

pub mod error;
mod handlers;
pub mod views;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use hotelier::application::BackOffice;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::handlers::{clients, employees, reservations, rooms};

/// Pages only load resources served by the back office itself.
pub const CONTENT_SECURITY_POLICY: &str =
    "default-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'";

pub fn router(office: BackOffice) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/chambres", get(rooms::index))
        .route("/chambres/disponibles", get(rooms::available))
        .route("/chambres/create", get(rooms::create_form).post(rooms::create))
        .route("/chambres/:id", get(rooms::show))
        .route("/chambres/:id/edit", get(rooms::edit_form).post(rooms::update))
        .route("/chambres/:id/delete", get(rooms::delete_form).post(rooms::delete))
        .route("/clients", get(clients::index))
        .route("/clients/create", get(clients::create_form).post(clients::create))
        .route("/clients/:id", get(clients::show))
        .route("/clients/:id/edit", get(clients::edit_form).post(clients::update))
        .route("/clients/:id/delete", get(clients::delete_form).post(clients::delete))
        .route("/employes", get(employees::index))
        .route("/employes/create", get(employees::create_form).post(employees::create))
        .route("/employes/:id/edit", get(employees::edit_form).post(employees::update))
        .route(
            "/employes/:id/delete",
            get(employees::delete_form).post(employees::delete),
        )
        .route("/reservations", get(reservations::index))
        .route(
            "/reservations/create",
            get(reservations::create_form).post(reservations::create),
        )
        .route(
            "/reservations/:id/edit",
            get(reservations::edit_form).post(reservations::update),
        )
        .route(
            "/reservations/:id/delete",
            get(reservations::delete_form).post(reservations::delete),
        )
        .fallback(handlers::fallback)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(office)
}
