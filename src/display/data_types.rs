//! Data type display formatting
//!
//! Formats the registry and selection lists for terminal output.

use crate::models::{DataTypeGroup, DataTypeSelection};
use crate::registry;

/// Format the full registry as one table per group
pub fn format_data_type_list() -> String {
    let name_width = registry::all_descriptors()
        .iter()
        .map(|d| d.display_name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let file_width = registry::all_descriptors()
        .iter()
        .map(|d| d.file_name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();

    for group in DataTypeGroup::ALL {
        output.push_str(&format!("{}\n", group));
        output.push_str(&format!(
            "  {:<name_width$}  {:<file_width$}  {}\n",
            "Name",
            "File",
            "Items",
            name_width = name_width,
            file_width = file_width,
        ));
        output.push_str(&format!(
            "  {:-<name_width$}  {:-<file_width$}  {:-<10}\n",
            "",
            "",
            "",
            name_width = name_width,
            file_width = file_width,
        ));

        for descriptor in registry::by_group(group) {
            let items = if descriptor.allows_item_selection() {
                "selective"
            } else if descriptor.is_enumerable {
                "listed"
            } else {
                ""
            };

            output.push_str(&format!(
                "  {:<name_width$}  {:<file_width$}  {}\n",
                descriptor.display_name,
                descriptor.file_name,
                items,
                name_width = name_width,
                file_width = file_width,
            ));
        }

        output.push('\n');
    }

    output.push_str(&format!(
        "Total: {} data type(s)\n",
        registry::all_descriptors().len()
    ));
    output
}

/// Format the selections that a copy will process
pub fn format_selection_list(selections: &[DataTypeSelection]) -> String {
    if selections.is_empty() {
        return "No data types selected.".to_string();
    }

    let name_width = selections
        .iter()
        .map(|s| s.descriptor().display_name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    for selection in selections {
        let state = if !selection.is_available {
            "not in source"
        } else if !selection.is_selected {
            "skipped"
        } else {
            ""
        };

        output.push_str(&format!(
            "  [{}] {:<name_width$}  {:<8}  {}\n",
            if selection.is_effective() { "x" } else { " " },
            selection.descriptor().display_name,
            selection.selection_indicator(),
            state,
            name_width = name_width,
        ));
    }

    output
}
