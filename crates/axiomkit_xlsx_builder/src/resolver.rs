//! Style-name and type-tag resolution against the active style table.

use std::collections::BTreeMap;

use crate::conf::C_STYLE_NAME_DEFAULT;
use crate::spec::{EnumCellType, SpecCellOptions, SpecCellStyle};

/// Normalize a type tag against the whitelist. Absent or unknown tags become `string`.
pub fn resolve_type(tag: Option<&str>) -> EnumCellType {
    tag.and_then(EnumCellType::from_tag).unwrap_or_default()
}

/// Style table of one sheet: shared base handles plus that sheet's custom handles.
///
/// Custom names shadow base names. Unknown, absent or empty names resolve to
/// the `default` handle; resolution never fails.
#[derive(Debug, Clone)]
pub struct SpecStyleTable<'a, H> {
    dict_base: &'a BTreeMap<String, H>,
    dict_sheet: BTreeMap<String, H>,
    handle_default: H,
}

impl<'a, H: Clone> SpecStyleTable<'a, H> {
    /// Build a sheet table over `dict_base`.
    ///
    /// `handle_default` is taken from the sheet styles first, then the base,
    /// and finally `handle_fallback` when neither declares `default`.
    pub fn new(
        dict_base: &'a BTreeMap<String, H>,
        dict_sheet: BTreeMap<String, H>,
        handle_fallback: H,
    ) -> Self {
        let handle_default = dict_sheet
            .get(C_STYLE_NAME_DEFAULT)
            .or_else(|| dict_base.get(C_STYLE_NAME_DEFAULT))
            .cloned()
            .unwrap_or(handle_fallback);
        Self {
            dict_base,
            dict_sheet,
            handle_default,
        }
    }

    /// Handle of the `default` style.
    pub fn handle_default(&self) -> H {
        self.handle_default.clone()
    }

    /// Handle registered under `name`, without falling back.
    pub fn get(&self, name: &str) -> Option<H> {
        self.dict_sheet
            .get(name)
            .or_else(|| self.dict_base.get(name))
            .cloned()
    }

    /// Resolve a style name to a handle, falling back to `default`.
    pub fn resolve_style(&self, name: Option<&str>) -> H {
        match name {
            None | Some("") => self.handle_default(),
            Some(c_name) => self.get(c_name).unwrap_or_else(|| {
                log::debug!("Unknown style {c_name:?}, using {C_STYLE_NAME_DEFAULT:?}");
                self.handle_default()
            }),
        }
    }

    /// Resolve per-cell options for one row, in column order.
    pub fn derive_cell_options(&self, cell_styles: &[SpecCellStyle]) -> Vec<SpecCellOptions<H>> {
        cell_styles
            .iter()
            .map(|cell| SpecCellOptions {
                style: self.resolve_style(cell.style.as_deref()),
                cell_type: resolve_type(cell.type_tag.as_deref()),
            })
            .collect()
    }
}
