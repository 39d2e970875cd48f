//! Data type model
//!
//! A data type is a named category of configuration data stored in exactly
//! one file of a profile's database directory.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a copyable data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    // Price & Labor
    PriceList,
    LaborRates,
    LaborCodes,
    MaterialPrices,
    Markups,
    TaxRates,
    Discounts,
    PriceLevels,
    // Primary
    Assemblies,
    Items,
    Vendors,
    Customers,
    Employees,
    Crews,
    Equipment,
    Templates,
    Categories,
    Phases,
    // Secondary
    Units,
    Conditions,
    AttributeMap,
    LayerMap,
    SymbolMap,
    CostCodes,
    WorkTypes,
    Zones,
    Notes,
    Formulas,
    // Other
    ReportLayouts,
    PrintSettings,
    UserPreferences,
    Shortcuts,
    ColorSchemes,
    ExportFormats,
    ImportMappings,
    Toolbars,
}

impl DataType {
    /// Look up the registry entry for this data type
    pub fn descriptor(&self) -> &'static DataTypeDescriptor {
        crate::registry::descriptor(*self)
    }

    /// On-disk file name for this data type
    pub fn file_name(&self) -> &'static str {
        self.descriptor().file_name
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor().display_name)
    }
}

/// Display grouping of data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataTypeGroup {
    /// Pricing and labor tables
    PriceAndLabor,
    /// Core catalog data
    Primary,
    /// Supporting lookup tables and maps
    Secondary,
    /// Layouts and user preferences
    Other,
}

impl DataTypeGroup {
    /// All groups in display order
    pub const ALL: [DataTypeGroup; 4] = [
        DataTypeGroup::PriceAndLabor,
        DataTypeGroup::Primary,
        DataTypeGroup::Secondary,
        DataTypeGroup::Other,
    ];
}

impl fmt::Display for DataTypeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PriceAndLabor => write!(f, "Price & Labor"),
            Self::Primary => write!(f, "Primary"),
            Self::Secondary => write!(f, "Secondary"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Immutable catalog entry describing one data type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataTypeDescriptor {
    /// Identity
    pub data_type: DataType,

    /// Exact on-disk file name, case as registered
    pub file_name: &'static str,

    /// Human-readable name
    pub display_name: &'static str,

    /// Display grouping
    pub group: DataTypeGroup,

    /// Whether the host exposes an item collection for this data type
    pub is_enumerable: bool,

    /// Whether individual items can be deleted after a copy
    pub supports_selective_cleanup: bool,

    /// Key correlating this descriptor with manifest entries
    pub manifest_key: Option<&'static str>,
}

impl DataTypeDescriptor {
    /// A descriptor with neither enumeration nor selective cleanup
    pub const fn plain(
        data_type: DataType,
        file_name: &'static str,
        display_name: &'static str,
        group: DataTypeGroup,
    ) -> Self {
        Self {
            data_type,
            file_name,
            display_name,
            group,
            is_enumerable: false,
            supports_selective_cleanup: false,
            manifest_key: None,
        }
    }

    /// Mark the host item collection as enumerable
    pub const fn enumerable(self) -> Self {
        Self {
            is_enumerable: true,
            ..self
        }
    }

    /// Enable selective cleanup under the given manifest key
    pub const fn selective(self, manifest_key: &'static str) -> Self {
        Self {
            is_enumerable: true,
            supports_selective_cleanup: true,
            manifest_key: Some(manifest_key),
            ..self
        }
    }

    /// Whether a selective item list can be honoured for this data type
    pub fn allows_item_selection(&self) -> bool {
        self.supports_selective_cleanup && self.manifest_key.is_some()
    }
}
