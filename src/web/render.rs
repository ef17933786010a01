use crate::domain::model::{Confirmation, ReportSummary};
use html_escape::{encode_double_quoted_attribute, encode_text};

const PAGE_STYLE: &str = "\
body { font-family: Georgia, serif; max-width: 640px; margin: 2rem auto; padding: 0 1rem; color: #333; }\
h1 { text-align: center; }\
form { display: flex; flex-direction: column; gap: 0.75rem; }\
input, button { padding: 0.5rem; font-size: 1rem; }\
.error { color: #a40000; border: 1px solid #a40000; padding: 0.5rem; }\
table { border-collapse: collapse; width: 100%; }\
th, td { border: 1px solid #999; padding: 0.4rem 0.6rem; text-align: left; }";

/// A rejected submission echoed back into the form.
pub struct RejectedSubmission<'a> {
    pub message: &'a str,
    pub nombre: &'a str,
    pub asistentes: u32,
}

/// The invitation page: group lookup with suggestions and the RSVP form.
pub fn home_page(
    names: &[String],
    limits_json: &str,
    event_date: &str,
    rejected: Option<&RejectedSubmission<'_>>,
) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<title>Confirmación de asistencia</title>\n");
    page.push_str(&format!("<style>{}</style>\n", PAGE_STYLE));
    page.push_str("</head>\n<body>\n");
    page.push_str("<h1>Confirmación de asistencia</h1>\n");
    page.push_str(&format!(
        "<p>Nos encantaría contar contigo el <strong>{}</strong>.</p>\n",
        encode_text(event_date)
    ));

    if let Some(rejected) = rejected {
        page.push_str(&format!(
            "<p class=\"error\">{}</p>\n",
            encode_text(rejected.message)
        ));
    }

    let (nombre_value, asistentes_value) = match rejected {
        Some(r) => (r.nombre, r.asistentes.to_string()),
        None => ("", String::new()),
    };

    page.push_str("<form method=\"post\" action=\"/confirmar\">\n");
    page.push_str("<label for=\"nombre\">Invitación dirigida a</label>\n");
    page.push_str(&format!(
        "<input id=\"nombre\" name=\"nombre\" list=\"grupos\" required value=\"{}\">\n",
        encode_double_quoted_attribute(nombre_value)
    ));
    page.push_str("<datalist id=\"grupos\">\n");
    for name in names {
        page.push_str(&format!(
            "<option value=\"{}\"></option>\n",
            encode_double_quoted_attribute(name)
        ));
    }
    page.push_str("</datalist>\n");
    page.push_str("<label for=\"asistentes\">Número de asistentes</label>\n");
    page.push_str(&format!(
        "<input id=\"asistentes\" name=\"asistentes\" type=\"number\" min=\"0\" required value=\"{}\">\n",
        encode_double_quoted_attribute(&asistentes_value)
    ));
    page.push_str("<button type=\"submit\">Confirmar</button>\n");
    page.push_str("</form>\n");

    // Per-group limits for client-side hints. "<" is escaped so the JSON can
    // never terminate the script element early.
    page.push_str(&format!(
        "<script>const LIMITES = {};</script>\n",
        limits_json.replace('<', "\\u003c")
    ));
    page.push_str("</body>\n</html>\n");
    page
}

/// Shown after a confirmation is stored.
pub fn thanks_page(nombre: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>¡Gracias!</title>\n<style>{}</style>\n</head>\n<body>\n\
         <h1>¡Gracias, {}!</h1>\n\
         <p>Tu confirmación ha sido registrada. ¡Nos vemos pronto!</p>\n\
         </body>\n</html>\n",
        PAGE_STYLE,
        encode_text(nombre)
    )
}

/// Admin report: totals plus the full confirmation table.
pub fn admin_page(confirmations: &[Confirmation], summary: ReportSummary) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<title>Confirmaciones</title>\n");
    page.push_str(&format!("<style>{}</style>\n", PAGE_STYLE));
    page.push_str("</head>\n<body>\n");
    page.push_str("<h1>Confirmaciones</h1>\n");
    page.push_str(&format!(
        "<p><strong>{}</strong> confirmaciones, <strong>{}</strong> asistentes en total.</p>\n",
        summary.total_confirmations, summary.total_attendees
    ));
    page.push_str(
        "<p><a href=\"/admin/export?formato=csv\">Descargar CSV</a> · \
         <a href=\"/admin/export?formato=tsv\">Descargar TSV</a></p>\n",
    );
    page.push_str("<table>\n<tr><th>Nombre</th><th>Asistentes</th><th>Fecha Confirmación</th></tr>\n");
    for confirmation in confirmations {
        page.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            encode_text(&confirmation.name),
            confirmation.attendee_count,
            encode_text(&confirmation.confirmed_at)
        ));
    }
    page.push_str("</table>\n</body>\n</html>\n");
    page
}
