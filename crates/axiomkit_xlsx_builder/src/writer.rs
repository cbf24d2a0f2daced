//! Output sink boundary and the `rust_xlsxwriter`-backed XLSX document.

use std::path::Path;

use rust_xlsxwriter::{
    DocProperties, ExcelDateTime, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
};

use crate::error::{BuildError, BuildResult};
use crate::spec::{EnumCellType, EnumCellValue, EnumRowFormat, SpecCellFormat, SpecSheetReport};
use crate::util::convert_nan_inf_to_str;

////////////////////////////////////////////////////////////////////////////////
// #region SinkBoundary

/// In-memory document the builder emits into.
///
/// Rows are appended to the most recently added sheet, top to bottom.
pub trait WorkbookSink {
    /// Opaque style handle returned by [`WorkbookSink::register_style`].
    type Handle: Clone;

    /// Register a style description, returning a handle usable in later rows.
    fn register_style(&mut self, format: &SpecCellFormat) -> BuildResult<Self::Handle>;

    /// Add a sheet and make it the target of subsequent rows.
    fn add_sheet(&mut self, name: &str) -> BuildResult<()>;

    /// Append one row to the current sheet.
    fn add_row(
        &mut self,
        values: &[EnumCellValue],
        format: &EnumRowFormat<Self::Handle>,
    ) -> BuildResult<()>;
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region XlsxDocument

/// XLSX workbook buffered in memory until saved.
pub struct XlsxDocument {
    workbook: Workbook,
    l_formats: Vec<Format>,
    n_idx_sheet_current: Option<usize>,
    n_sheets: usize,
    n_row_cursor: usize,
    l_reports: Vec<SpecSheetReport>,
}

impl XlsxDocument {
    /// Create an empty document.
    ///
    /// `date_created` pins the creation timestamp so identical content
    /// serializes to identical bytes.
    pub fn new(date_created: Option<(u16, u8, u8)>) -> BuildResult<Self> {
        let mut workbook = Workbook::new();
        if let Some((n_year, n_month, n_day)) = date_created {
            let datetime = ExcelDateTime::from_ymd(n_year, n_month, n_day)?;
            let properties = DocProperties::new().set_creation_datetime(&datetime);
            workbook.set_properties(&properties);
        }

        Ok(Self {
            workbook,
            l_formats: Vec::new(),
            n_idx_sheet_current: None,
            n_sheets: 0,
            n_row_cursor: 0,
            l_reports: Vec::new(),
        })
    }

    /// Return immutable snapshot of per-sheet build reports.
    pub fn reports(&self) -> Vec<SpecSheetReport> {
        self.l_reports.clone()
    }

    pub(crate) fn push_report(&mut self, report: SpecSheetReport) {
        self.l_reports.push(report);
    }

    /// Number of sheets added so far.
    pub fn sheet_count(&self) -> usize {
        self.n_sheets
    }

    /// Serialize the workbook to XLSX bytes.
    pub fn save_to_buffer(&mut self) -> BuildResult<Vec<u8>> {
        Ok(self.workbook.save_to_buffer()?)
    }

    /// Serialize the workbook to a file.
    pub fn save(&mut self, path: impl AsRef<Path>) -> BuildResult<()> {
        self.workbook.save(path.as_ref())?;
        Ok(())
    }
}

impl WorkbookSink for XlsxDocument {
    type Handle = usize;

    fn register_style(&mut self, format: &SpecCellFormat) -> BuildResult<usize> {
        self.l_formats.push(derive_rust_xlsx_format(format));
        Ok(self.l_formats.len() - 1)
    }

    fn add_sheet(&mut self, name: &str) -> BuildResult<()> {
        // Rejected names must not leave a stray sheet behind.
        let mut worksheet = Worksheet::new();
        worksheet.set_name(name)?;
        self.workbook.push_worksheet(worksheet);
        self.n_idx_sheet_current = Some(self.n_sheets);
        self.n_sheets += 1;
        self.n_row_cursor = 0;
        Ok(())
    }

    fn add_row(
        &mut self,
        values: &[EnumCellValue],
        format: &EnumRowFormat<usize>,
    ) -> BuildResult<()> {
        if let EnumRowFormat::PerCell(options) = format
            && (options.styles.len() != values.len() || options.types.len() != values.len())
        {
            return Err(BuildError::RowOptionsMismatch {
                n_values: values.len(),
                n_styles: options.styles.len(),
                n_types: options.types.len(),
            });
        }

        let n_row = self.n_row_cursor;
        let n_idx = self.n_idx_sheet_current.ok_or(BuildError::NoActiveSheet)?;
        let worksheet = self.workbook.worksheet_from_index(n_idx)?;

        for (n_idx_col, value) in values.iter().enumerate() {
            let (n_handle, cell_type) = match format {
                EnumRowFormat::Uniform(n_handle) => (*n_handle, None),
                EnumRowFormat::PerCell(options) => {
                    (options.styles[n_idx_col], Some(options.types[n_idx_col]))
                }
            };
            let fmt = self
                .l_formats
                .get(n_handle)
                .ok_or(BuildError::UnknownStyleHandle(n_handle))?;
            write_cell_with_type(worksheet, n_row, n_idx_col, value, cell_type, fmt)?;
        }

        self.n_row_cursor += 1;
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellWriting

/// Write one value, coerced according to its declared cell type.
///
/// `None` type keeps the value's natural representation (header/footer rows).
fn write_cell_with_type(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    cell_type: Option<EnumCellType>,
    format: &Format,
) -> BuildResult<()> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;

    match (value, cell_type) {
        (EnumCellValue::None, _) => {
            worksheet.write_blank(n_row, n_col, format)?;
        }

        (EnumCellValue::String(s), Some(EnumCellType::Float | EnumCellType::Integer)) => {
            match s.trim().parse::<f64>() {
                Ok(n) => {
                    let n = if cell_type == Some(EnumCellType::Integer) {
                        n.trunc()
                    } else {
                        n
                    };
                    write_number(worksheet, n_row, n_col, n, format)?;
                }
                Err(_) => {
                    worksheet.write_string_with_format(n_row, n_col, s, format)?;
                }
            }
        }
        (EnumCellValue::String(s), Some(EnumCellType::Boolean)) => {
            match s.trim().to_ascii_lowercase().as_str() {
                "true" => {
                    worksheet.write_boolean_with_format(n_row, n_col, true, format)?;
                }
                "false" => {
                    worksheet.write_boolean_with_format(n_row, n_col, false, format)?;
                }
                _ => {
                    worksheet.write_string_with_format(n_row, n_col, s, format)?;
                }
            }
        }
        (
            EnumCellValue::String(s),
            Some(EnumCellType::Date | EnumCellType::Time | EnumCellType::Iso8601),
        ) => match ExcelDateTime::parse_from_str(s.trim()) {
            Ok(datetime) => {
                worksheet.write_datetime_with_format(n_row, n_col, &datetime, format)?;
            }
            Err(_) => {
                worksheet.write_string_with_format(n_row, n_col, s, format)?;
            }
        },
        (EnumCellValue::String(s), _) => {
            worksheet.write_string_with_format(n_row, n_col, s, format)?;
        }

        (
            EnumCellValue::Number(n),
            Some(EnumCellType::String | EnumCellType::Text | EnumCellType::Richtext),
        ) => {
            worksheet.write_string_with_format(n_row, n_col, n.to_string(), format)?;
        }
        (EnumCellValue::Number(n), Some(EnumCellType::Integer)) => {
            write_number(worksheet, n_row, n_col, n.trunc(), format)?;
        }
        (EnumCellValue::Number(n), Some(EnumCellType::Boolean)) => {
            worksheet.write_boolean_with_format(n_row, n_col, *n != 0.0, format)?;
        }
        (EnumCellValue::Number(n), _) => {
            write_number(worksheet, n_row, n_col, *n, format)?;
        }

        (
            EnumCellValue::Boolean(b),
            Some(EnumCellType::String | EnumCellType::Text | EnumCellType::Richtext),
        ) => {
            worksheet.write_string_with_format(n_row, n_col, b.to_string(), format)?;
        }
        (EnumCellValue::Boolean(b), Some(EnumCellType::Float | EnumCellType::Integer)) => {
            write_number(worksheet, n_row, n_col, if *b { 1.0 } else { 0.0 }, format)?;
        }
        (EnumCellValue::Boolean(b), _) => {
            worksheet.write_boolean_with_format(n_row, n_col, *b, format)?;
        }
    }
    Ok(())
}

fn write_number(
    worksheet: &mut Worksheet,
    n_row: u32,
    n_col: u16,
    value: f64,
    format: &Format,
) -> BuildResult<()> {
    match convert_nan_inf_to_str(value) {
        Some(c_text) => {
            worksheet.write_string_with_format(n_row, n_col, c_text, format)?;
        }
        None => {
            worksheet.write_number_with_format(n_row, n_col, value, format)?;
        }
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FormatConversion

/// Translate a style description into a `rust_xlsxwriter` format.
///
/// Unrecognized alignment or border names are ignored.
fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(c_font) = &spec.font_name {
        format = format.set_font_name(c_font.as_str());
    }
    if let Some(n_size) = spec.font_size {
        format = format.set_font_size(n_size as f64);
    }
    if spec.bold == Some(true) {
        format = format.set_bold();
    }
    if spec.italic == Some(true) {
        format = format.set_italic();
    }
    if let Some(c_color) = &spec.font_color {
        format = format.set_font_color(c_color.as_str());
    }
    if let Some(c_color) = &spec.bg_color {
        format = format.set_background_color(c_color.as_str());
    }

    for align in [
        spec.align.as_deref().and_then(derive_format_align_horizontal),
        spec.valign.as_deref().and_then(derive_format_align_vertical),
    ]
    .into_iter()
    .flatten()
    {
        format = format.set_align(align);
    }
    if spec.text_wrap == Some(true) {
        format = format.set_text_wrap();
    }

    if let Some(border) = spec.border.as_deref().and_then(derive_format_border) {
        format = format.set_border(border);
    }
    if let Some(c_code) = &spec.num_format {
        format = format.set_num_format(c_code.as_str());
    }

    format
}

fn derive_format_border(name: &str) -> Option<FormatBorder> {
    match name.trim().to_ascii_lowercase().as_str() {
        "none" => Some(FormatBorder::None),
        "thin" => Some(FormatBorder::Thin),
        "medium" => Some(FormatBorder::Medium),
        "thick" => Some(FormatBorder::Thick),
        "dashed" => Some(FormatBorder::Dashed),
        "dotted" => Some(FormatBorder::Dotted),
        "double" => Some(FormatBorder::Double),
        "hair" => Some(FormatBorder::Hair),
        _ => None,
    }
}

fn derive_format_align_horizontal(name: &str) -> Option<FormatAlign> {
    match name.trim().to_ascii_lowercase().as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "fill" => Some(FormatAlign::Fill),
        "justify" => Some(FormatAlign::Justify),
        "distributed" => Some(FormatAlign::Distributed),
        _ => None,
    }
}

fn derive_format_align_vertical(name: &str) -> Option<FormatAlign> {
    match name.trim().to_ascii_lowercase().as_str() {
        "top" => Some(FormatAlign::Top),
        "center" => Some(FormatAlign::VerticalCenter),
        "bottom" => Some(FormatAlign::Bottom),
        "justify" => Some(FormatAlign::VerticalJustify),
        "distributed" => Some(FormatAlign::VerticalDistributed),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> BuildResult<u32> {
    u32::try_from(value).map_err(|_| BuildError::RowOverflow(value))
}

fn cast_col_num(value: usize) -> BuildResult<u16> {
    u16::try_from(value).map_err(|_| BuildError::ColumnOverflow(value))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
