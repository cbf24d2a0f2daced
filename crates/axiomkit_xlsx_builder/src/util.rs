//! Stateless helper utilities used by the builder and the XLSX sink.

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::{EnumCellValue, SpecCellOptions, SpecRowCellOptions};

////////////////////////////////////////////////////////////////////////////////
// #region RowOptions

/// Transpose per-cell options into the parallel arrays used for row emission.
pub fn transpose_cell_options<H>(cell_options: Vec<SpecCellOptions<H>>) -> SpecRowCellOptions<H> {
    let (styles, types) = cell_options
        .into_iter()
        .map(|cell| (cell.style, cell.cell_type))
        .unzip();
    SpecRowCellOptions { styles, types }
}

/// Whether a row carries nothing to emit: no cells, or only blank cells.
pub fn is_row_empty(row: &[EnumCellValue]) -> bool {
    row.iter().all(EnumCellValue::is_none)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Convert `NaN`/`Inf` to display text; `None` for finite values.
pub fn convert_nan_inf_to_str(x: f64) -> Option<&'static str> {
    if x.is_nan() {
        return Some("NaN");
    }
    if x.is_infinite() {
        return Some(if x.is_sign_positive() { "Inf" } else { "-Inf" });
    }
    None
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
