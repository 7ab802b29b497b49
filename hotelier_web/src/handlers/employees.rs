use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use hotelier::{
    application::BackOffice,
    domain::{core::EmployeeForm, ValidationErrors},
};

use super::parse_id;
use crate::{error::PageError, views};

pub async fn index(State(office): State<BackOffice>) -> Result<Html<String>, PageError> {
    let employees = office.employees.list().await?;
    Ok(Html(views::employees::list(&employees)))
}

pub async fn create_form() -> Html<String> {
    Html(views::employees::edit_form(
        "Nouvel employé",
        "/employes/create",
        &EmployeeForm::default(),
        &ValidationErrors::new(),
    ))
}

pub async fn create(
    State(office): State<BackOffice>,
    Form(form): Form<EmployeeForm>,
) -> Result<Response, PageError> {
    match office.employees.create(&form).await {
        Ok(_) => Ok(Redirect::to("/employes").into_response()),
        Err(e) => Ok(Html(views::employees::edit_form(
            "Nouvel employé",
            "/employes/create",
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
    let employee = office.employees.get(parse_id(&id)?).await?;
    Ok(Html(views::employees::edit_form(
        &format!("Modifier l'employé {}", employee.name()),
        &format!("/employes/{id}/edit"),
        &EmployeeForm::from(&employee),
        &ValidationErrors::new(),
    )))
}

pub async fn update(
    State(office): State<BackOffice>,
    Path(id): Path<String>,
    Form(form): Form<EmployeeForm>,
) -> Result<Response, PageError> {
    match office.employees.update(parse_id(&id)?, &form).await {
        Ok(_) => Ok(Redirect::to("/employes").into_response()),
        Err(e) => Ok(Html(views::employees::edit_form(
            "Modifier l'employé",
            &format!("/employes/{id}/edit"),
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
    let employee = office.employees.get(parse_id(&id)?).await?;
    Ok(Html(views::employees::delete(&employee)))
}

pub async fn delete(
    State(office): State<BackOffice>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    office.employees.delete(parse_id(&id)?).await?;
    Ok(Redirect::to("/employes"))
}
