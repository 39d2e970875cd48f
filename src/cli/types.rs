//! Data type listing command

use crate::display::format_data_type_list;

/// Print the registry grouped by data type group
pub fn handle_types_command() {
    print!("{}", format_data_type_list());
}
