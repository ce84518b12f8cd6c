use crate::data_models::SearchRequest;
use crate::form::FormState;

/// Pretty JSON of the request, two-space indented, fields in wire order.
pub fn render_preview(request: &SearchRequest) -> String {
    serde_json::to_string_pretty(request).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not serialize request preview");
        String::new()
    })
}

pub fn preview_form(form: &FormState) -> String {
    render_preview(&form.build_request())
}
