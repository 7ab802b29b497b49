//! HTML pages of the back office.

pub mod clients;
pub mod employees;
pub mod reservations;
pub mod rooms;

use std::fmt::Display;

use hotelier::domain::ValidationErrors;

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Wraps `body` in the common layout.
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
<meta charset="utf-8">
<title>{title} - Hôtel</title>
</head>
<body>
<nav>
<a href="/">Accueil</a> |
<a href="/chambres">Chambres</a> |
<a href="/clients">Clients</a> |
<a href="/employes">Employés</a> |
<a href="/reservations">Réservations</a>
</nav>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

pub fn home() -> String {
    page(
        "Gestion de l'hôtel",
        r#"<ul>
<li><a href="/chambres">Chambres</a> (<a href="/chambres/disponibles">disponibilités</a>)</li>
<li><a href="/clients">Clients</a></li>
<li><a href="/employes">Employés</a></li>
<li><a href="/reservations">Réservations</a></li>
</ul>"#,
    )
}

pub fn error(title: &str, message: &str) -> String {
    page(title, &format!("<p class=\"error\">{}</p>", escape(message)))
}

fn error_list(errors: &ValidationErrors) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items = errors
        .messages()
        .iter()
        .map(|message| format!("<li>{}</li>", escape(message)))
        .collect::<String>();
    format!("<ul class=\"errors\">{items}</ul>\n")
}

fn input(label: &str, name: &str, kind: &str, value: &str) -> String {
    format!(
        "<p><label for=\"{name}\">{label}</label> \
        <input type=\"{kind}\" id=\"{name}\" name=\"{name}\" value=\"{}\"></p>\n",
        escape(value)
    )
}

fn checkbox(label: &str, name: &str, checked: bool) -> String {
    format!(
        "<p><label><input type=\"checkbox\" name=\"{name}\" value=\"on\"{}> {label}</label></p>\n",
        if checked { " checked" } else { "" }
    )
}

fn form(action: &str, fields: &str, submit: &str, cancel: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\n{fields}\
        <p><button type=\"submit\">{submit}</button> <a href=\"{cancel}\">Annuler</a></p>\n</form>"
    )
}

fn confirm_delete(question: &str, action: &str, cancel: &str) -> String {
    format!(
        "<p>{}</p>\n{}",
        escape(question),
        form(action, "", "Supprimer", cancel)
    )
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "oui"
    } else {
        "non"
    }
}

fn cell<T: Display>(value: T) -> String {
    format!("<td>{}</td>", escape(&value.to_string()))
}

fn optional_cell<T: Display>(value: Option<T>) -> String {
    value.map(cell).unwrap_or_else(|| "<td>-</td>".to_owned())
}
