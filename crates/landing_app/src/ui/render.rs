use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use landing_core::{AppViewModel, ResultView, Status};

/// Text rendering of the form and, when present, the result card.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    out.push_str("Landing page generator\n");
    out.push_str(&format!("  Theme:  {}\n", field_value(&view.theme)));
    out.push_str(&format!("  Geo:    {}\n", field_value(&view.geo)));
    out.push_str(&format!("  Domain: {}\n", field_value(&view.domain)));
    out.push_str(&format!("Status: {}", view.status.label()));
    if let (Status::Failed, Some(message)) = (view.status, view.last_error.as_deref()) {
        out.push_str(&format!(" ({message})"));
    }
    out.push('\n');

    if let Some(result) = &view.result {
        out.push_str(&format!("Landing page created for {}\n", result.domain));
        out.push_str(&result_table(result).to_string());
        out.push('\n');
    }
    out
}

fn field_value(value: &str) -> &str {
    if value.trim().is_empty() {
        "<empty>"
    } else {
        value
    }
}

fn result_table(result: &ResultView) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Landing ID", "Preview URL"])
        .add_row(vec![result.landing_id.as_str(), result.preview_url.as_str()]);
    table
}
