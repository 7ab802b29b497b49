use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use hotelier::{
    application::BackOffice,
    domain::{
        core::{AvailabilityQuery, RoomForm, RoomId},
        ValidationErrors,
    },
};

use super::parse_id;
use crate::{error::PageError, views};

pub async fn index(State(office): State<BackOffice>) -> Result<Html<String>, PageError> {
    let rooms = office.rooms.list().await?;
    Ok(Html(views::rooms::list(&rooms)))
}

pub async fn show(
    State(office): State<BackOffice>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id: RoomId = parse_id(&id)?;
    let room = office.rooms.get(id).await?;
    let reservations = office.rooms.reservations(id).await?;
    Ok(Html(views::rooms::detail(&room, &reservations)))
}

pub async fn available(
    State(office): State<BackOffice>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Html<String>, PageError> {
    if query.is_blank() {
        return Ok(Html(views::rooms::availability(
            &query,
            None,
            &ValidationErrors::new(),
        )));
    }
    let html = match office.rooms.available_rooms(&query).await {
        Ok(rooms) => {
            views::rooms::availability(&query, Some(rooms.as_slice()), &ValidationErrors::new())
        }
        Err(e) => views::rooms::availability(&query, None, &e.into_form_errors()?),
    };
    Ok(Html(html))
}

pub async fn create_form() -> Html<String> {
    Html(views::rooms::edit_form(
        "Nouvelle chambre",
        "/chambres/create",
        &RoomForm::default(),
        &ValidationErrors::new(),
    ))
}

pub async fn create(
    State(office): State<BackOffice>,
    Form(form): Form<RoomForm>,
) -> Result<Response, PageError> {
    match office.rooms.create(&form).await {
        Ok(_) => Ok(Redirect::to("/chambres").into_response()),
        Err(e) => Ok(Html(views::rooms::edit_form(
            "Nouvelle chambre",
            "/chambres/create",
            &form,
            &e.into_form_errors()?,
        ))
        .into_response()),
    }
}

pub async fn edit_form(
    State(office): State<BackOffice>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let room = office.rooms.get(parse_id(&id)?).await?;
    Ok(Html(views::rooms::edit_form(
        &format!("Modifier la chambre {}", room.number()),
        &format!("/chambres/{id}/edit"),
        &RoomForm::from(&room),
        &ValidationErrors::new(),
    )))
}

pub async fn update(
    State(office): State<BackOffice>,
    Path(id): Path<String>,
    Form(form): Form<RoomForm>,
) -> Result<Response, PageError> {
    match office.rooms.update(parse_id(&id)?, &form).await {
        Ok(_) => Ok(Redirect::to("/chambres").into_response()),
        Err(e) => Ok(Html(views::rooms::edit_form(
            "Modifier la chambre",
            &format!("/chambres/{id}/edit"),
            &form,
            &e.into_form_errors()?,
        ))
        .into_response()),
    }
}

pub async fn delete_form(
    State(office): State<BackOffice>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let room = office.rooms.get(parse_id(&id)?).await?;
    Ok(Html(views::rooms::delete(&room)))
}

pub async fn delete(
    State(office): State<BackOffice>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    office.rooms.delete(parse_id(&id)?).await?;
    Ok(Redirect::to("/chambres"))
}
