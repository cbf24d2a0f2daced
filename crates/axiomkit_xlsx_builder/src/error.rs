//! Builder error types.

use thiserror::Error;

/// Boxed failure raised by user-supplied value/style/type/footer closures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type returned by user-supplied closures.
pub type CellResult<T> = std::result::Result<T, BoxError>;

/// Result type for build operations.
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// Errors surfaced to the caller of a build.
///
/// Only row-assembly and cell-resolution failures (under
/// [`crate::spec::EnumFailurePolicy::Propagate`]) and sink failures reach this
/// type. Footer failures and unknown style/type names are recovered internally.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Value producer of one column failed.
    #[error("sheet {sheet_name:?}, column {col_idx} ({header:?}): cell value failed: {source}")]
    CellValue {
        sheet_name: String,
        col_idx: usize,
        header: String,
        #[source]
        source: BoxError,
    },

    /// Computed style rule failed.
    #[error("cell style resolution failed: {0}")]
    CellStyle(#[source] BoxError),

    /// Computed type rule failed.
    #[error("cell type resolution failed: {0}")]
    CellType(#[source] BoxError),

    /// Row was emitted before any sheet was added to the sink.
    #[error("no active sheet: add_sheet() must precede add_row()")]
    NoActiveSheet,

    /// Style handle does not belong to the sink.
    #[error("unknown style handle: {0}")]
    UnknownStyleHandle(usize),

    /// Per-cell option arrays do not match the row width.
    #[error("row options width mismatch: {n_values} values, {n_styles} styles, {n_types} types")]
    RowOptionsMismatch {
        n_values: usize,
        n_styles: usize,
        n_types: usize,
    },

    /// Row index does not fit the worksheet row type.
    #[error("row index overflow: {0}")]
    RowOverflow(usize),

    /// Column index does not fit the worksheet column type.
    #[error("column index overflow: {0}")]
    ColumnOverflow(usize),

    /// Underlying workbook writer error.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
