use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use hotelier::{
    application::BackOffice,
    domain::{
        core::{ClientForm, ClientId},
        ValidationErrors,
    },
};

use super::parse_id;
use crate::{error::PageError, views};

pub async fn index(State(office): State<BackOffice>) -> Result<Html<String>, PageError> {
    let clients = office.clients.list().await?;
    Ok(Html(views::clients::list(&clients)))
}

pub async fn show(
    State(office): State<BackOffice>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id: ClientId = parse_id(&id)?;
    let client = office.clients.get(id).await?;
    let reservations = office.clients.reservations(id).await?;
    Ok(Html(views::clients::detail(&client, &reservations)))
}

pub async fn create_form() -> Html<String> {
    Html(views::clients::edit_form(
        "Nouveau client",
        "/clients/create",
        &ClientForm::default(),
        &ValidationErrors::new(),
    ))
}

pub async fn create(
    State(office): State<BackOffice>,
    Form(form): Form<ClientForm>,
) -> Result<Response, PageError> {
    match office.clients.create(&form).await {
        Ok(_) => Ok(Redirect::to("/clients").into_response()),
        Err(e) => Ok(Html(views::clients::edit_form(
            "Nouveau client",
            "/clients/create",
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
    let client = office.clients.get(parse_id(&id)?).await?;
    Ok(Html(views::clients::edit_form(
        &format!("Modifier le client {}", client.name()),
        &format!("/clients/{id}/edit"),
        &ClientForm::from(&client),
        &ValidationErrors::new(),
    )))
}

pub async fn update(
    State(office): State<BackOffice>,
    Path(id): Path<String>,
    Form(form): Form<ClientForm>,
) -> Result<Response, PageError> {
    match office.clients.update(parse_id(&id)?, &form).await {
        Ok(_) => Ok(Redirect::to("/clients").into_response()),
        Err(e) => Ok(Html(views::clients::edit_form(
            "Modifier le client",
            &format!("/clients/{id}/edit"),
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
    let client = office.clients.get(parse_id(&id)?).await?;
    Ok(Html(views::clients::delete(&client)))
}

pub async fn delete(
    State(office): State<BackOffice>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    office.clients.delete(parse_id(&id)?).await?;
    Ok(Redirect::to("/clients"))
}
