use hotelier::domain::{
    core::{Employee, EmployeeForm},
    Entity, ValidationErrors,
};

use super::{cell, checkbox, confirm_delete, error_list, form, input, page, yes_no};

pub fn list(employees: &[Employee]) -> String {
    let rows = employees
        .iter()
        .map(|employee| {
            let id = employee.id();
            format!(
                "<tr>{}{}{}{}<td><a href=\"/employes/{id}/edit\">Modifier</a> \
                <a href=\"/employes/{id}/delete\">Supprimer</a></td></tr>\n",
                cell(employee.name()),
                cell(employee.age()),
                cell(employee.hired_on()),
                cell(yes_no(employee.authorized())),
            )
        })
        .collect::<String>();
    let body = if rows.is_empty() {
        "<p>Aucun employé.</p>".to_owned()
    } else {
        format!(
            "<table>\n<tr><th>Nom</th><th>Âge</th><th>Recrutement</th>\
            <th>Autorisation</th><th></th></tr>\n{rows}</table>"
        )
    };
    page(
        "Employés",
        &format!("<p><a href=\"/employes/create\">Ajouter un employé</a></p>\n{body}"),
    )
}

pub fn edit_form(
    title: &str,
    action: &str,
    values: &EmployeeForm,
    errors: &ValidationErrors,
) -> String {
    let fields = [
        input("Nom", "nom", "text", &values.name),
        input("Âge", "age", "number", &values.age),
        input("Date de recrutement", "date_recrutement", "date", &values.hired_on),
        checkbox("Autorisation", "autorisation", values.authorized.is_some()),
    ]
    .concat();
    page(
        title,
        &format!(
            "{}{}",
            error_list(errors),
            form(action, &fields, "Enregistrer", "/employes")
        ),
    )
}

pub fn delete(employee: &Employee) -> String {
    page(
        "Supprimer un employé",
        &confirm_delete(
            &format!("Supprimer l'employé {} ?", employee.name()),
            &format!("/employes/{}/delete", employee.id()),
            "/employes",
        ),
    )
}
