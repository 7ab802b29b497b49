use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use hotelier::{
    application::BackOffice,
    domain::{core::ReservationForm, ValidationErrors},
};

use super::parse_id;
use crate::{error::PageError, views};

pub async fn index(State(office): State<BackOffice>) -> Result<Html<String>, PageError> {
    let reservations = office.reservations.list().await?;
    Ok(Html(views::reservations::list(&reservations)))
}

/// Renders the form again with `errors`, reloading the select lists.
async fn redisplay(
    office: &BackOffice,
    title: &str,
    action: &str,
    form: &ReservationForm,
    errors: &ValidationErrors,
) -> Result<Response, PageError> {
    let choices = office.reservations.choices().await?;
    Ok(Html(views::reservations::edit_form(title, action, form, &choices, errors)).into_response())
}

/// The form can be prefilled from the query string, e.g. `?chambre_id=3`.
pub async fn create_form(
    State(office): State<BackOffice>,
    Query(prefill): Query<ReservationForm>,
) -> Result<Response, PageError> {
    redisplay(
        &office,
        "Nouvelle réservation",
        "/reservations/create",
        &prefill,
        &ValidationErrors::new(),
    )
    .await
}

pub async fn create(
    State(office): State<BackOffice>,
    Form(form): Form<ReservationForm>,
) -> Result<Response, PageError> {
    match office.reservations.create(&form).await {
        Ok(_) => Ok(Redirect::to("/reservations").into_response()),
        Err(e) => {
            let errors = e.into_form_errors()?;
            redisplay(
                &office,
                "Nouvelle réservation",
                "/reservations/create",
                &form,
                &errors,
            )
            .await
        }
    }
}

pub async fn edit_form(
    State(office): State<BackOffice>,
    Path(id): Path<String>,
) -> Result<Response, PageError> {
    let reservation = office.reservations.get(parse_id(&id)?).await?;
    redisplay(
        &office,
        "Modifier la réservation",
        &format!("/reservations/{id}/edit"),
        &ReservationForm::from(&reservation),
        &ValidationErrors::new(),
    )
    .await
}

pub async fn update(
    State(office): State<BackOffice>,
    Path(id): Path<String>,
    Form(form): Form<ReservationForm>,
) -> Result<Response, PageError> {
    match office.reservations.update(parse_id(&id)?, &form).await {
        Ok(_) => Ok(Redirect::to("/reservations").into_response()),
        Err(e) => {
            let errors = e.into_form_errors()?;
            redisplay(
                &office,
                "Modifier la réservation",
                &format!("/reservations/{id}/edit"),
                &form,
                &errors,
            )
            .await
        }
    }
}

pub async fn delete_form(
    State(office): State<BackOffice>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let reservation = office.reservations.get(parse_id(&id)?).await?;
    Ok(Html(views::reservations::delete(&reservation)))
}

pub async fn delete(
    State(office): State<BackOffice>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    office.reservations.delete(parse_id(&id)?).await?;
    Ok(Redirect::to("/reservations"))
}
