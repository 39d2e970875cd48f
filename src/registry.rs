//! Data type registry
//!
//! Fixed catalog of every copyable data type. Catalog order is the default
//! display grouping; it does not dictate copy order, which always follows the
//! caller's selection.

use crate::models::data_type::{DataType, DataTypeDescriptor, DataTypeGroup};

use crate::models::data_type::DataTypeGroup::{Other, PriceAndLabor, Primary, Secondary};

static CATALOG: [DataTypeDescriptor; 36] = [
    // Price & Labor
    DataTypeDescriptor::plain(DataType::PriceList, "PRICE.DAT", "Price List", PriceAndLabor)
        .selective("prices"),
    DataTypeDescriptor::plain(DataType::LaborRates, "LABOR.DAT", "Labor Rates", PriceAndLabor)
        .selective("labor_rates"),
    DataTypeDescriptor::plain(DataType::LaborCodes, "LABCODE.DAT", "Labor Codes", PriceAndLabor)
        .enumerable(),
    DataTypeDescriptor::plain(
        DataType::MaterialPrices,
        "MATPRICE.DAT",
        "Material Prices",
        PriceAndLabor,
    )
    .selective("material_prices"),
    DataTypeDescriptor::plain(DataType::Markups, "MARKUP.DAT", "Markups", PriceAndLabor)
        .selective("markups"),
    DataTypeDescriptor::plain(DataType::TaxRates, "TAXRATE.DAT", "Tax Rates", PriceAndLabor)
        .enumerable(),
    DataTypeDescriptor::plain(DataType::Discounts, "DISCOUNT.DAT", "Discounts", PriceAndLabor),
    DataTypeDescriptor::plain(DataType::PriceLevels, "PRCLEVEL.DAT", "Price Levels", PriceAndLabor),
    // Primary
    DataTypeDescriptor::plain(DataType::Assemblies, "ASSEMBLY.DAT", "Assemblies", Primary)
        .selective("assemblies"),
    DataTypeDescriptor::plain(DataType::Items, "ITEMS.DAT", "Items", Primary).selective("items"),
    DataTypeDescriptor::plain(DataType::Vendors, "VENDOR.DAT", "Vendors", Primary)
        .selective("vendors"),
    DataTypeDescriptor::plain(DataType::Customers, "CUSTOMER.DAT", "Customers", Primary)
        .selective("customers"),
    DataTypeDescriptor::plain(DataType::Employees, "EMPLOYEE.DAT", "Employees", Primary)
        .enumerable(),
    DataTypeDescriptor::plain(DataType::Crews, "CREW.DAT", "Crews", Primary).selective("crews"),
    DataTypeDescriptor::plain(DataType::Equipment, "EQUIP.DAT", "Equipment", Primary)
        .selective("equipment"),
    DataTypeDescriptor::plain(DataType::Templates, "TEMPLATE.DAT", "Templates", Primary)
        .selective("templates"),
    DataTypeDescriptor::plain(DataType::Categories, "CATEGORY.DAT", "Categories", Primary)
        .enumerable(),
    DataTypeDescriptor::plain(DataType::Phases, "PHASE.DAT", "Phases", Primary).enumerable(),
    // Secondary
    DataTypeDescriptor::plain(DataType::Units, "UNITS.DAT", "Units", Secondary),
    DataTypeDescriptor::plain(DataType::Conditions, "COND.DAT", "Conditions", Secondary)
        .selective("conditions"),
    DataTypeDescriptor::plain(DataType::AttributeMap, "A.MAP", "Attribute Map", Secondary),
    DataTypeDescriptor::plain(DataType::LayerMap, "L.MAP", "Layer Map", Secondary),
    DataTypeDescriptor::plain(DataType::SymbolMap, "S.MAP", "Symbol Map", Secondary),
    DataTypeDescriptor::plain(DataType::CostCodes, "COSTCODE.DAT", "Cost Codes", Secondary)
        .enumerable(),
    DataTypeDescriptor::plain(DataType::WorkTypes, "WORKTYPE.DAT", "Work Types", Secondary)
        .enumerable(),
    DataTypeDescriptor::plain(DataType::Zones, "ZONE.DAT", "Zones", Secondary).enumerable(),
    DataTypeDescriptor::plain(DataType::Notes, "NOTES.DAT", "Notes", Secondary).selective("notes"),
    DataTypeDescriptor::plain(DataType::Formulas, "FORMULA.DAT", "Formulas", Secondary)
        .selective("formulas"),
    // Other
    DataTypeDescriptor::plain(DataType::ReportLayouts, "REPORTS.DAT", "Report Layouts", Other)
        .selective("report_layouts"),
    DataTypeDescriptor::plain(DataType::PrintSettings, "PRINT.INI", "Print Settings", Other),
    DataTypeDescriptor::plain(DataType::UserPreferences, "PREFS.INI", "User Preferences", Other),
    DataTypeDescriptor::plain(DataType::Shortcuts, "SHORTCUT.DAT", "Shortcuts", Other),
    DataTypeDescriptor::plain(DataType::ColorSchemes, "COLORS.DAT", "Color Schemes", Other),
    DataTypeDescriptor::plain(DataType::ExportFormats, "EXPORT.DAT", "Export Formats", Other)
        .enumerable(),
    DataTypeDescriptor::plain(DataType::ImportMappings, "IMPMAP.DAT", "Import Mappings", Other)
        .enumerable(),
    DataTypeDescriptor::plain(DataType::Toolbars, "TOOLBAR.DAT", "Toolbars", Other),
];

/// Every registered descriptor, in catalog order
pub fn all_descriptors() -> &'static [DataTypeDescriptor] {
    &CATALOG
}

/// Registry entry for a data type
pub fn descriptor(data_type: DataType) -> &'static DataTypeDescriptor {
    // Catalog order mirrors enum declaration order
    &CATALOG[data_type as usize]
}

/// Descriptors belonging to one display group, in catalog order
pub fn by_group(group: DataTypeGroup) -> impl Iterator<Item = &'static DataTypeDescriptor> {
    CATALOG.iter().filter(move |d| d.group == group)
}

/// Descriptor whose manifest key matches
pub fn by_manifest_key(key: &str) -> Option<&'static DataTypeDescriptor> {
    CATALOG.iter().find(|d| d.manifest_key == Some(key))
}

/// Find a descriptor by variant name, file name, or display name
///
/// Matching is case-insensitive and ignores `_`, `-` and spaces, so
/// `price_list`, `PRICE.DAT` and `Price List` all resolve to the same entry.
pub fn find(query: &str) -> Option<&'static DataTypeDescriptor> {
    let wanted = normalize(query);
    if wanted.is_empty() {
        return None;
    }

    CATALOG.iter().find(|d| {
        normalize(d.file_name) == wanted
            || normalize(d.display_name) == wanted
            || d.manifest_key.map(normalize).as_deref() == Some(wanted.as_str())
            || normalize(&variant_name(d.data_type)) == wanted
    })
}

fn variant_name(data_type: DataType) -> String {
    serde_json::to_value(data_type)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
