//! `axiomkit_xlsx_builder` v1:
//! Declarative multi-sheet XLSX builder over in-memory records.
//!
//! Module layout:
//! - `conf`     : constants and default style presets
//! - `spec`     : specs/models/options
//! - `error`    : build error type
//! - `cell`     : static or computed cell rules
//! - `sheet`    : column declarations, row assembly, footers
//! - `resolver` : style-name and type-tag resolution
//! - `util`     : pure helper functions
//! - `writer`   : workbook sink and `rust_xlsxwriter` kernel
//! - `builder`  : orchestration over all sheets
pub mod builder;
pub mod cell;
pub mod conf;
pub mod error;
pub mod resolver;
pub mod sheet;
pub mod spec;
pub mod util;
pub mod writer;

pub use builder::XlsxBuilder;
pub use cell::{EnumRule, RuleFn, SpecCellRule};
pub use conf::{
    C_STYLE_NAME_DEFAULT, C_STYLE_NAME_FOOTER, C_STYLE_NAME_HEADER, N_LEN_EXCEL_SHEET_NAME_MAX,
    TUP_EXCEL_ILLEGAL, derive_default_builder_options, derive_default_builder_styles,
};
pub use error::{BoxError, BuildError, BuildResult, CellResult};
pub use resolver::{SpecStyleTable, resolve_type};
pub use sheet::{FooterRule, SpecColumn, SpecFooterRow, SpecSheet};
pub use spec::{
    EnumCellType, EnumCellValue, EnumFailurePolicy, EnumRowFormat, SpecBuilderOptions,
    SpecCellFormat, SpecCellOptions, SpecCellStyle, SpecRowCellOptions, SpecSheetReport,
};
pub use util::{convert_nan_inf_to_str, is_row_empty, sanitize_sheet_name, transpose_cell_options};
pub use writer::{WorkbookSink, XlsxDocument};
