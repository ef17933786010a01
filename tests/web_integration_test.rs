use axum_test::TestServer;
use invitaciones::{
    router, AppState, ConfirmationStore, GuestGroup, GuestIndex, LocalFileStore, Suggestion,
};
use serde::Serialize;
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Serialize)]
struct ConfirmForm<'a> {
    nombre: &'a str,
    asistentes: u32,
}

fn test_server(temp_dir: &TempDir) -> TestServer {
    let index = GuestIndex::from_groups(vec![
        GuestGroup::new("Familia Pérez", 4),
        GuestGroup::new("Familia Gómez", 2),
    ]);
    let store: Arc<dyn ConfirmationStore> =
        Arc::new(LocalFileStore::csv(temp_dir.path().join("confirmaciones.csv")));
    let state = AppState::new(index, store, "2025-11-15");
    TestServer::new(router(state)).unwrap()
}

#[tokio::test]
async fn test_home_page_lists_groups_and_date() {
    let temp_dir = TempDir::new().unwrap();
    let server = test_server(&temp_dir);

    let response = server.get("/").await;
    response.assert_status_ok();

    let page = response.text();
    assert!(page.contains("Familia Pérez"));
    assert!(page.contains("Familia Gómez"));
    assert!(page.contains("2025-11-15"));
}

#[tokio::test]
async fn test_suggestions_ranked_with_ceilings() {
    let temp_dir = TempDir::new().unwrap();
    let server = test_server(&temp_dir);

    let response = server.get("/sugerencias").add_query_param("q", "perez").await;
    response.assert_status_ok();

    let suggestions: Vec<Suggestion> = response.json();
    assert!(!suggestions.is_empty());
    assert_eq!(suggestions[0].nombre, "Familia Pérez");
    assert_eq!(suggestions[0].max_boletos, 4);
}

#[tokio::test]
async fn test_short_suggestion_query_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let server = test_server(&temp_dir);

    let response = server.get("/sugerencias").add_query_param("q", "p").await;
    response.assert_status_ok();

    let suggestions: Vec<Suggestion> = response.json();
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn test_confirm_at_ceiling_then_admin_report() {
    let temp_dir = TempDir::new().unwrap();
    let server = test_server(&temp_dir);

    let response = server
        .post("/confirmar")
        .form(&ConfirmForm {
            nombre: "Familia Gómez",
            asistentes: 2,
        })
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Familia Gómez"));

    let report = server.get("/admin").await;
    report.assert_status_ok();
    let page = report.text();
    assert!(page.contains("Familia Gómez"));
    assert!(page.contains("<strong>1</strong> confirmaciones"));
    assert!(page.contains("<strong>2</strong> asistentes"));
}

#[tokio::test]
async fn test_confirm_over_ceiling_rejected_with_ceiling_in_message() {
    let temp_dir = TempDir::new().unwrap();
    let server = test_server(&temp_dir);

    let response = server
        .post("/confirmar")
        .form(&ConfirmForm {
            nombre: "Familia Gómez",
            asistentes: 3,
        })
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    assert!(response
        .text()
        .contains("El máximo permitido para Familia Gómez es 2."));

    // The rejection must not have stored anything.
    let report = server.get("/admin").await;
    assert!(report.text().contains("<strong>0</strong> confirmaciones"));
}

#[tokio::test]
async fn test_unknown_group_has_ceiling_zero() {
    let temp_dir = TempDir::new().unwrap();
    let server = test_server(&temp_dir);

    let response = server
        .post("/confirmar")
        .form(&ConfirmForm {
            nombre: "Los Desconocidos",
            asistentes: 1,
        })
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    assert!(response
        .text()
        .contains("El máximo permitido para Los Desconocidos es 0."));
}

#[tokio::test]
async fn test_export_formats() {
    let temp_dir = TempDir::new().unwrap();
    let server = test_server(&temp_dir);

    server
        .post("/confirmar")
        .form(&ConfirmForm {
            nombre: "Familia Pérez",
            asistentes: 4,
        })
        .await
        .assert_status_ok();

    let csv_response = server
        .get("/admin/export")
        .add_query_param("formato", "csv")
        .await;
    csv_response.assert_status_ok();
    assert!(csv_response
        .header("content-disposition")
        .to_str()
        .unwrap()
        .contains("confirmaciones.csv"));
    let csv_text = csv_response.text();
    assert!(csv_text.starts_with("Nombre,Asistentes,Fecha Confirmación"));
    assert!(csv_text.contains("Familia Pérez,4,"));

    let tsv_response = server
        .get("/admin/export")
        .add_query_param("formato", "tsv")
        .await;
    tsv_response.assert_status_ok();
    assert!(tsv_response.text().contains("Familia Pérez\t4\t"));
}

#[tokio::test]
async fn test_export_unknown_format_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let server = test_server(&temp_dir);

    let response = server
        .get("/admin/export")
        .add_query_param("formato", "xlsx")
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let temp_dir = TempDir::new().unwrap();
    let server = test_server(&temp_dir);

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "ok");
}
