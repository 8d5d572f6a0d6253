use shared::types::ServiceRecord;
use super::text::wrap_labeled;

/// Text shown when nothing is selected
pub const EMPTY_DETAIL: &str = "No service selected.";

/// Render a record's fields as wrapped "Label: value" rows for the detail pane,
/// as `(gutter, text)` pairs. Empty fields are left out.
pub fn detail_lines(record: &ServiceRecord) -> Vec<(String, String)> {
    let mut fields: Vec<(&str, String)> = vec![
        ("Name: ", record.name.clone()),
        ("Host: ", record.host.clone()),
        ("IPv4: ", record.address_v4.clone()),
        ("IPv6: ", record.address_v6.clone()),
    ];
    if record.port != 0 {
        fields.push(("Port: ", record.port.to_string()));
    }
    // Info is usually the TXT fields joined up; only show it when it says something else
    if record.info_text != record.info_fields.join("|") {
        fields.push(("Info: ", record.info_text.clone()));
    }
    for field in &record.info_fields {
        fields.push(("TXT:  ", field.clone()));
    }

    fields
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .flat_map(|(label, value)| wrap_labeled(label, &value, record.detail_width))
        .collect()
}
