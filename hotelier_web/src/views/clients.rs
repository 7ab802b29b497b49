use hotelier::domain::{
    core::{Client, ClientForm, ReservationDetails},
    Entity, ValidationErrors,
};

use super::{cell, confirm_delete, error_list, form, input, optional_cell, page};

pub fn list(clients: &[Client]) -> String {
    let body = if clients.is_empty() {
        "<p>Aucun client.</p>".to_owned()
    } else {
        let rows = clients
            .iter()
            .map(|client| {
                let id = client.id();
                format!(
                    "<tr>{}{}{}{}<td><a href=\"/clients/{id}\">Voir</a> \
                    <a href=\"/clients/{id}/edit\">Modifier</a> \
                    <a href=\"/clients/{id}/delete\">Supprimer</a></td></tr>\n",
                    cell(client.name()),
                    cell(client.email()),
                    optional_cell(client.phone()),
                    cell(client.party_size()),
                )
            })
            .collect::<String>();
        format!(
            "<table>\n<tr><th>Nom</th><th>Email</th><th>Téléphone</th>\
            <th>Personnes</th><th></th></tr>\n{rows}</table>"
        )
    };
    page(
        "Clients",
        &format!("<p><a href=\"/clients/create\">Ajouter un client</a></p>\n{body}"),
    )
}

pub fn detail(client: &Client, reservations: &[ReservationDetails]) -> String {
    let bookings = reservations
        .iter()
        .map(|details| {
            let stay = details.reservation.stay();
            format!(
                "<tr>{}{}{}{}</tr>\n",
                cell(&details.room_number),
                cell(stay.arrival()),
                cell(stay.departure()),
                cell(stay.nights()),
            )
        })
        .collect::<String>();
    let bookings = if bookings.is_empty() {
        "<p>Aucune réservation.</p>".to_owned()
    } else {
        format!(
            "<table>\n<tr><th>Chambre</th><th>Arrivée</th><th>Départ</th><th>Nuits</th></tr>\n\
            {bookings}</table>"
        )
    };
    page(
        client.name(),
        &format!(
            "<dl>\n<dt>Email</dt><dd>{}</dd>\n<dt>Téléphone</dt><dd>{}</dd>\n\
            <dt>Personnes</dt><dd>{}</dd>\n</dl>\n<h2>Réservations</h2>\n{bookings}\n\
            <p><a href=\"/clients/{}/edit\">Modifier</a> | <a href=\"/clients\">Retour</a></p>",
            super::escape(client.email()),
            super::escape(client.phone().unwrap_or("-")),
            client.party_size(),
            client.id(),
        ),
    )
}

pub fn edit_form(
    title: &str,
    action: &str,
    values: &ClientForm,
    errors: &ValidationErrors,
) -> String {
    let fields = [
        input("Nom", "nom", "text", &values.name),
        input("Email", "email", "email", &values.email),
        input("Téléphone", "telephone", "tel", &values.phone),
        input("Nombre de personnes", "nombre_personnes", "number", &values.party_size),
    ]
    .concat();
    page(
        title,
        &format!(
            "{}{}",
            error_list(errors),
            form(action, &fields, "Enregistrer", "/clients")
        ),
    )
}

pub fn delete(client: &Client) -> String {
    page(
        "Supprimer un client",
        &confirm_delete(
            &format!("Supprimer le client {} ?", client.name()),
            &format!("/clients/{}/delete", client.id()),
            "/clients",
        ),
    )
}
