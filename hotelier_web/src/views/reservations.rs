use hotelier::{
    application::ReservationChoices,
    domain::{
        core::{Reservation, ReservationDetails, ReservationForm},
        Entity, ValidationErrors,
    },
};

use super::{cell, confirm_delete, error_list, escape, form, input, page};

pub fn list(reservations: &[ReservationDetails]) -> String {
    let rows = reservations
        .iter()
        .map(|details| {
            let id = details.reservation.id();
            let stay = details.reservation.stay();
            format!(
                "<tr>{}{}{}{}{}<td><a href=\"/reservations/{id}/edit\">Modifier</a> \
                <a href=\"/reservations/{id}/delete\">Supprimer</a></td></tr>\n",
                cell(&details.room_number),
                cell(&details.client_name),
                cell(&details.client_email),
                cell(stay.arrival()),
                cell(stay.departure()),
            )
        })
        .collect::<String>();
    let body = if rows.is_empty() {
        "<p>Aucune réservation.</p>".to_owned()
    } else {
        format!(
            "<table>\n<tr><th>Chambre</th><th>Client</th><th>Email</th><th>Arrivée</th>\
            <th>Départ</th><th></th></tr>\n{rows}</table>"
        )
    };
    page(
        "Réservations",
        &format!("<p><a href=\"/reservations/create\">Nouvelle réservation</a></p>\n{body}"),
    )
}

fn select<I>(label: &str, name: &str, selected: &str, options: I) -> String
where
    I: IntoIterator<Item = (String, String)>,
{
    let options = options
        .into_iter()
        .map(|(value, text)| {
            format!(
                "<option value=\"{value}\"{}>{}</option>",
                if value == selected.trim() { " selected" } else { "" },
                escape(&text)
            )
        })
        .collect::<String>();
    format!(
        "<p><label for=\"{name}\">{label}</label> <select id=\"{name}\" name=\"{name}\">\
        <option value=\"\">--</option>{options}</select></p>\n"
    )
}

pub fn edit_form(
    title: &str,
    action: &str,
    values: &ReservationForm,
    choices: &ReservationChoices,
    errors: &ValidationErrors,
) -> String {
    let clients = choices.clients.iter().map(|client| {
        (
            client.id().to_string(),
            format!("{} ({})", client.name(), client.email()),
        )
    });
    let rooms = choices.rooms.iter().map(|room| {
        (
            room.id().to_string(),
            format!("{} - {} pers.", room.number(), room.capacity()),
        )
    });
    let fields = [
        select("Client", "client_id", &values.client_id, clients),
        select("Chambre", "chambre_id", &values.room_id, rooms),
        input("Arrivée", "date_arrivee", "date", &values.arrival),
        input("Départ", "date_depart", "date", &values.departure),
    ]
    .concat();
    page(
        title,
        &format!(
            "{}{}",
            error_list(errors),
            form(action, &fields, "Enregistrer", "/reservations")
        ),
    )
}

pub fn delete(reservation: &Reservation) -> String {
    let stay = reservation.stay();
    page(
        "Supprimer une réservation",
        &confirm_delete(
            &format!(
                "Supprimer la réservation {} du {} au {} ?",
                reservation.id(),
                stay.arrival(),
                stay.departure()
            ),
            &format!("/reservations/{}/delete", reservation.id()),
            "/reservations",
        ),
    )
}
