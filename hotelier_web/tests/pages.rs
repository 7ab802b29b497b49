use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use hotelier::{
    application::BackOffice,
    domain::{
        core::{ClientForm, ReservationForm, RoomForm},
        Entity,
    },
    infrastructure::memory::MemoryStore,
};
use tower::ServiceExt;

fn app() -> (Router, BackOffice) {
    let office = MemoryStore::new().back_office();
    (hotelier_web::router(office.clone()), office)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, uri: &str, form: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_owned()))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_owned());
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    match location {
        Some(location) => (status, location),
        None => (status, String::from_utf8(body.to_vec()).unwrap()),
    }
}

async fn seed(office: &BackOffice) -> (u64, u64) {
    let room = office
        .rooms
        .create(&RoomForm {
            number: "7".to_owned(),
            capacity: "2".to_owned(),
            ..RoomForm::default()
        })
        .await
        .unwrap();
    let client = office
        .clients
        .create(&ClientForm {
            name: "Dupont".to_owned(),
            email: "dupont@example.com".to_owned(),
            party_size: "2".to_owned(),
            ..ClientForm::default()
        })
        .await
        .unwrap();
    (*room.id(), *client.id())
}

#[tokio::test]
async fn test_home_and_unknown_path() {
    let (app, _) = app();
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("href=\"/chambres\""));

    let (status, body) = get(&app, "/piscine").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page introuvable"));
}

#[tokio::test]
async fn test_create_room_redirects_to_list() {
    let (app, _) = app();
    let (status, location) = post(
        &app,
        "/chambres/create",
        "numero=101&capacite=2&type=Double&prix=89%2C90&disponible=on",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/chambres");

    let (status, body) = get(&app, "/chambres").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<td>101</td>"));
    assert!(body.contains("<td>Double</td>"));
}

#[tokio::test]
async fn test_invalid_form_is_redisplayed() {
    let (app, _) = app();
    let (status, body) = post(&app, "/chambres/create", "numero=&capacite=0&type=%3Cb%3E").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("class=\"errors\""));
    assert!(body.contains("Le numéro de chambre est requis"));
    assert!(body.contains("value=\"&lt;b&gt;\""));
}

#[tokio::test]
async fn test_duplicate_email_is_shown_on_the_form() {
    let (app, office) = app();
    seed(&office).await;
    let (status, body) = post(
        &app,
        "/clients/create",
        "nom=Autre&email=DUPONT%40example.com&nombre_personnes=1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Un client utilise déjà cet email"));
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let (app, _) = app();
    for uri in [
        "/chambres/42",
        "/chambres/42/edit",
        "/clients/42/delete",
        "/employes/42/edit",
        "/reservations/42/edit",
        "/chambres/abc",
    ] {
        let (status, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
    let (status, _) = post(&app, "/reservations/42/delete", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_flow() {
    let (app, office) = app();
    let (room, client) = seed(&office).await;

    let (status, body) = get(&app, &format!("/reservations/create?chambre_id={room}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&format!("<option value=\"{room}\" selected>")));

    let form = format!(
        "client_id={client}&chambre_id={room}&date_arrivee=2024-06-01&date_depart=2024-06-05"
    );
    let (status, location) = post(&app, "/reservations/create", &form).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/reservations");

    let overlapping = format!(
        "client_id={client}&chambre_id={room}&date_arrivee=2024-06-03&date_depart=2024-06-08"
    );
    let (status, body) = post(&app, "/reservations/create", &overlapping).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("La chambre n&#39;est plus disponible pour ces dates"));

    let (status, body) = get(&app, &format!("/chambres/{room}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("dupont@example.com"));
    assert!(body.contains("2024-06-01"));
}

#[tokio::test]
async fn test_delete_referenced_room_is_a_conflict() {
    let (app, office) = app();
    let (room, client) = seed(&office).await;
    let reservation = office
        .reservations
        .create(&ReservationForm {
            client_id: client.to_string(),
            room_id: room.to_string(),
            arrival: "2024-06-01".to_owned(),
            departure: "2024-06-05".to_owned(),
        })
        .await
        .unwrap();

    let (status, body) = post(&app, &format!("/chambres/{room}/delete"), "").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("1 réservation(s)"));

    let (status, _) = post(
        &app,
        &format!("/reservations/{}/delete", reservation.id()),
        "",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let (status, location) = post(&app, &format!("/chambres/{room}/delete"), "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/chambres");
}

#[tokio::test]
async fn test_availability_search() {
    let (app, office) = app();
    seed(&office).await;

    let (status, body) = get(&app, "/chambres/disponibles").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Chambres libres"));

    let (status, body) = get(
        &app,
        "/chambres/disponibles?date_arrivee=2024-06-01&date_depart=2024-06-03&capacite_min=",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Chambres libres"));
    assert!(body.contains("<td>7</td>"));

    let (status, body) = get(
        &app,
        "/chambres/disponibles?date_arrivee=2024-06-03&date_depart=2024-06-01",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("postérieure à la date d&#39;arrivée"));
}

#[tokio::test]
async fn test_create_employee() {
    let (app, _) = app();
    let (status, _) = post(
        &app,
        "/employes/create",
        "nom=Martin&age=34&date_recrutement=2021-09-01",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, body) = get(&app, "/employes").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<td>Martin</td>"));
    assert!(body.contains("<td>non</td>"));
}

#[tokio::test]
async fn test_every_response_carries_a_content_security_policy() {
    let (app, _) = app();
    for uri in ["/", "/chambres", "/piscine"] {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_SECURITY_POLICY).unwrap(),
            hotelier_web::CONTENT_SECURITY_POLICY
        );
    }
}

#[tokio::test]
async fn test_values_wider_than_their_columns_are_form_errors() {
    let (app, _) = app();
    let (status, body) = post(&app, "/chambres/create", "numero=12&capacite=2&prix=100000000").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Le prix ne doit pas dépasser"));

    let form = format!(
        "nom=Dupont&email={}%40example.com&telephone=%2B33123456789012345678&nombre_personnes=2",
        "a".repeat(250)
    );
    let (status, body) = post(&app, "/clients/create", &form).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("L&#39;email ne doit pas dépasser 255 caractères"));
    assert!(body.contains("Le numéro de téléphone n&#39;est pas valide"));

    let form = format!("nom={}&age=30&date_recrutement=2022-01-10", "m".repeat(101));
    let (status, body) = post(&app, "/employes/create", &form).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Le nom ne doit pas dépasser 100 caractères"));
}
