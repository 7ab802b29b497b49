use hotelier::domain::{
    core::{AvailabilityQuery, ReservationDetails, Room, RoomForm},
    Entity, ValidationErrors,
};

use super::{
    cell, checkbox, confirm_delete, error_list, form, input, optional_cell, page, yes_no,
};

fn rows(rooms: &[Room], actions: bool) -> String {
    rooms
        .iter()
        .map(|room| {
            let id = room.id();
            let links = if actions {
                format!(
                    "<td><a href=\"/chambres/{id}\">Voir</a> \
                    <a href=\"/chambres/{id}/edit\">Modifier</a> \
                    <a href=\"/chambres/{id}/delete\">Supprimer</a></td>"
                )
            } else {
                format!("<td><a href=\"/reservations/create?chambre_id={id}\">Réserver</a></td>")
            };
            format!(
                "<tr>{}{}{}{}{}{links}</tr>\n",
                cell(room.number()),
                optional_cell(room.kind()),
                cell(room.capacity()),
                optional_cell(room.price()),
                cell(yes_no(room.available())),
            )
        })
        .collect()
}

fn table(rooms: &[Room], actions: bool) -> String {
    if rooms.is_empty() {
        return "<p>Aucune chambre.</p>".to_owned();
    }
    format!(
        "<table>\n<tr><th>Numéro</th><th>Type</th><th>Capacité</th><th>Prix</th>\
        <th>Disponible</th><th></th></tr>\n{}</table>",
        rows(rooms, actions)
    )
}

pub fn list(rooms: &[Room]) -> String {
    page(
        "Chambres",
        &format!(
            "<p><a href=\"/chambres/create\">Ajouter une chambre</a> | \
            <a href=\"/chambres/disponibles\">Rechercher une disponibilité</a></p>\n{}",
            table(rooms, true)
        ),
    )
}

pub fn detail(room: &Room, reservations: &[ReservationDetails]) -> String {
    let id = room.id();
    let bookings = if reservations.is_empty() {
        "<p>Aucune réservation.</p>".to_owned()
    } else {
        let rows = reservations
            .iter()
            .map(|details| {
                let stay = details.reservation.stay();
                format!(
                    "<tr>{}{}{}{}</tr>\n",
                    cell(&details.client_name),
                    cell(&details.client_email),
                    cell(stay.arrival()),
                    cell(stay.departure()),
                )
            })
            .collect::<String>();
        format!(
            "<table>\n<tr><th>Client</th><th>Email</th><th>Arrivée</th><th>Départ</th></tr>\n\
            {rows}</table>"
        )
    };
    page(
        &format!("Chambre {}", room.number()),
        &format!(
            "<table>\n<tr><th>Numéro</th><th>Type</th><th>Capacité</th><th>Prix</th>\
            <th>Disponible</th><th></th></tr>\n{}</table>\n<h2>Réservations</h2>\n{bookings}\n\
            <p><a href=\"/chambres/{id}/edit\">Modifier</a> | <a href=\"/chambres\">Retour</a></p>",
            rows(std::slice::from_ref(room), true)
        ),
    )
}

pub fn edit_form(title: &str, action: &str, values: &RoomForm, errors: &ValidationErrors) -> String {
    let fields = [
        input("Numéro", "numero", "text", &values.number),
        input("Capacité", "capacite", "number", &values.capacity),
        input("Type", "type", "text", &values.kind),
        input("Prix", "prix", "text", &values.price),
        checkbox("Disponible", "disponible", values.available.is_some()),
    ]
    .concat();
    page(
        title,
        &format!(
            "{}{}",
            error_list(errors),
            form(action, &fields, "Enregistrer", "/chambres")
        ),
    )
}

pub fn delete(room: &Room) -> String {
    page(
        "Supprimer une chambre",
        &confirm_delete(
            &format!("Supprimer la chambre {} ?", room.number()),
            &format!("/chambres/{}/delete", room.id()),
            "/chambres",
        ),
    )
}

/// Search form, followed by the matching rooms once a search was made.
pub fn availability(
    query: &AvailabilityQuery,
    rooms: Option<&[Room]>,
    errors: &ValidationErrors,
) -> String {
    let fields = [
        input("Arrivée", "date_arrivee", "date", &query.arrival),
        input("Départ", "date_depart", "date", &query.departure),
        input("Capacité minimale", "capacite_min", "number", &query.min_capacity),
    ]
    .concat();
    let results = match rooms {
        Some(rooms) => format!("<h2>Chambres libres</h2>\n{}", table(rooms, false)),
        None => String::new(),
    };
    page(
        "Disponibilités",
        &format!(
            "{}<form method=\"get\" action=\"/chambres/disponibles\">\n{fields}\
            <p><button type=\"submit\">Rechercher</button></p>\n</form>\n{results}",
            error_list(errors)
        ),
    )
}
