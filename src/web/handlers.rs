use crate::adapters::local_store::CONFIRMATION_HEADERS;
use crate::core::quota;
use crate::core::suggest::suggest;
use crate::domain::model::{Confirmation, ReportSummary, Suggestion};
use crate::utils::error::{Result, RsvpError};
use crate::web::error::WebError;
use crate::web::render::{self, RejectedSubmission};
use crate::web::AppState;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmForm {
    pub nombre: String,
    pub asistentes: u32,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default = "default_format")]
    pub formato: String,
}

fn default_format() -> String {
    "csv".to_string()
}

pub async fn home(State(state): State<Arc<AppState>>) -> std::result::Result<Html<String>, WebError> {
    let limits_json = state.index.limits_json()?;
    Ok(Html(render::home_page(
        state.index.names(),
        &limits_json,
        &state.event_date,
        None,
    )))
}

pub async fn suggestions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuggestQuery>,
) -> Json<Vec<Suggestion>> {
    let suggestions = suggest(&query.q, &state.index);
    tracing::debug!(
        "Suggestion query {:?} matched {} groups",
        query.q,
        suggestions.len()
    );
    Json(suggestions)
}

pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    if let Err(error) = quota::check(&state.index, &form.nombre, form.asistentes) {
        let RsvpError::QuotaExceeded { ceiling, .. } = &error else {
            return WebError(error).into_response();
        };
        tracing::info!(
            "Rejected confirmation for '{}': requested {}, ceiling {}",
            form.nombre,
            form.asistentes,
            ceiling
        );

        let message = error.to_string();
        let rejected = RejectedSubmission {
            message: &message,
            nombre: &form.nombre,
            // Echo the ceiling back so the guest can resubmit at the limit.
            asistentes: *ceiling,
        };
        let limits_json = match state.index.limits_json() {
            Ok(json) => json,
            Err(e) => return WebError(e).into_response(),
        };
        let page = render::home_page(
            state.index.names(),
            &limits_json,
            &state.event_date,
            Some(&rejected),
        );
        return (StatusCode::BAD_REQUEST, Html(page)).into_response();
    }

    let confirmation = Confirmation::new(form.nombre.clone(), form.asistentes);
    match state.store.append(&confirmation).await {
        Ok(()) => {
            tracing::info!(
                "Confirmation stored: '{}', {} attendees",
                confirmation.name,
                confirmation.attendee_count
            );
            Html(render::thanks_page(&confirmation.name)).into_response()
        }
        Err(error) => WebError(error).into_response(),
    }
}

pub async fn admin_report(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Html<String>, WebError> {
    let confirmations = state.store.read_all().await?;
    let summary = ReportSummary::from_confirmations(&confirmations);
    Ok(Html(render::admin_page(&confirmations, summary)))
}

pub async fn admin_export(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> std::result::Result<Response, WebError> {
    let (delimiter, content_type) = match query.formato.as_str() {
        "csv" => (b',', "text/csv; charset=utf-8"),
        "tsv" => (b'\t', "text/tab-separated-values; charset=utf-8"),
        other => {
            return Ok((
                StatusCode::BAD_REQUEST,
                format!("Formato no soportado: {}. Use csv o tsv.", other),
            )
                .into_response());
        }
    };

    let confirmations = state.store.read_all().await?;
    let data = export_bytes(&confirmations, delimiter)?;

    let headers = [
        (header::CONTENT_TYPE, content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"confirmaciones.{}\"", query.formato),
        ),
    ];
    Ok((headers, data).into_response())
}

pub async fn health() -> &'static str {
    "ok"
}

fn export_bytes(confirmations: &[Confirmation], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(CONFIRMATION_HEADERS)?;
    for confirmation in confirmations {
        writer.write_record([
            confirmation.name.as_str(),
            &confirmation.attendee_count.to_string(),
            confirmation.confirmed_at.as_str(),
        ])?;
    }

    writer.into_inner().map_err(|e| RsvpError::StorageError {
        backend: "export",
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_bytes_csv() {
        let confirmations = vec![Confirmation::with_timestamp(
            "Familia Pérez",
            4,
            "2025-11-01 10:00:00",
        )];
        let data = export_bytes(&confirmations, b',').unwrap();
        let text = String::from_utf8(data).unwrap();

        assert!(text.starts_with("Nombre,Asistentes,Fecha Confirmación"));
        assert!(text.contains("Familia Pérez,4,2025-11-01 10:00:00"));
    }

    #[test]
    fn test_export_bytes_tsv() {
        let confirmations = vec![Confirmation::with_timestamp(
            "Familia Gómez",
            2,
            "2025-11-01 11:00:00",
        )];
        let data = export_bytes(&confirmations, b'\t').unwrap();
        let text = String::from_utf8(data).unwrap();

        assert!(text.contains("Familia Gómez\t2\t2025-11-01 11:00:00"));
    }
}
