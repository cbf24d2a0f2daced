//! Shared builder specification models.

use std::collections::BTreeMap;

use crate::conf::{
    C_STYLE_NAME_DEFAULT, C_STYLE_NAME_FOOTER, C_STYLE_NAME_HEADER, derive_default_builder_styles,
};

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Style description registered into the output workbook.
///
/// The build engine never inspects these fields; only the sink turns them into
/// a concrete workbook format. Unset fields keep the workbook default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    /// Font color, e.g. `#FFFFFF`.
    pub font_color: Option<String>,
    /// Background fill color.
    pub bg_color: Option<String>,

    /// Horizontal alignment: `left`, `center`, `right`, `fill`, `justify`, `distributed`.
    pub align: Option<String>,
    /// Vertical alignment: `top`, `center`, `bottom`, `justify`, `distributed`.
    pub valign: Option<String>,
    pub text_wrap: Option<bool>,

    /// Border style on all four sides: `thin`, `medium`, `thick`, `dashed`, `dotted`, `double`, `hair`.
    pub border: Option<String>,
    /// Number format code, e.g. `dd/mm/yyyy`.
    pub num_format: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Field-wise overlay: every field set on `other` wins.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        fn overlay<T: Clone>(base: &Option<T>, top: &Option<T>) -> Option<T> {
            top.as_ref().or(base.as_ref()).cloned()
        }

        SpecCellFormat {
            font_name: overlay(&self.font_name, &other.font_name),
            font_size: overlay(&self.font_size, &other.font_size),
            bold: overlay(&self.bold, &other.bold),
            italic: overlay(&self.italic, &other.italic),
            font_color: overlay(&self.font_color, &other.font_color),
            bg_color: overlay(&self.bg_color, &other.bg_color),
            align: overlay(&self.align, &other.align),
            valign: overlay(&self.valign, &other.valign),
            text_wrap: overlay(&self.text_wrap, &other.text_wrap),
            border: overlay(&self.border, &other.border),
            num_format: overlay(&self.num_format, &other.num_format),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellValueSpecification

/// Raw cell value produced by a column's value producer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
}

impl EnumCellValue {
    /// Whether the value is missing.
    pub fn is_none(&self) -> bool {
        matches!(self, EnumCellValue::None)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            EnumCellValue::Number(n) => Some(*n),
            EnumCellValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            EnumCellValue::String(s) => s.trim().parse::<f64>().ok(),
            EnumCellValue::None => None,
        }
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        EnumCellValue::String(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        EnumCellValue::String(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        EnumCellValue::Number(value)
    }
}

impl From<f32> for EnumCellValue {
    fn from(value: f32) -> Self {
        EnumCellValue::Number(value as f64)
    }
}

impl From<i32> for EnumCellValue {
    fn from(value: i32) -> Self {
        EnumCellValue::Number(value as f64)
    }
}

impl From<i64> for EnumCellValue {
    fn from(value: i64) -> Self {
        EnumCellValue::Number(value as f64)
    }
}

impl From<u32> for EnumCellValue {
    fn from(value: u32) -> Self {
        EnumCellValue::Number(value as f64)
    }
}

impl From<usize> for EnumCellValue {
    fn from(value: usize) -> Self {
        EnumCellValue::Number(value as f64)
    }
}

impl From<bool> for EnumCellValue {
    fn from(value: bool) -> Self {
        EnumCellValue::Boolean(value)
    }
}

impl<T: Into<EnumCellValue>> From<Option<T>> for EnumCellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(EnumCellValue::None, Into::into)
    }
}

/// Closed set of cell data types accepted by the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnumCellType {
    Date,
    Time,
    Float,
    Integer,
    Richtext,
    /// Fallback for absent or unknown type tags.
    #[default]
    String,
    Boolean,
    Iso8601,
    Text,
}

impl EnumCellType {
    /// Whitelist of accepted type tags.
    pub const ALL: [EnumCellType; 9] = [
        EnumCellType::Date,
        EnumCellType::Time,
        EnumCellType::Float,
        EnumCellType::Integer,
        EnumCellType::Richtext,
        EnumCellType::String,
        EnumCellType::Boolean,
        EnumCellType::Iso8601,
        EnumCellType::Text,
    ];

    /// Canonical tag of this type.
    pub fn as_tag(self) -> &'static str {
        match self {
            EnumCellType::Date => "date",
            EnumCellType::Time => "time",
            EnumCellType::Float => "float",
            EnumCellType::Integer => "integer",
            EnumCellType::Richtext => "richtext",
            EnumCellType::String => "string",
            EnumCellType::Boolean => "boolean",
            EnumCellType::Iso8601 => "iso_8601",
            EnumCellType::Text => "text",
        }
    }

    /// Parse a whitelisted tag. Exact match only.
    pub fn from_tag(tag: &str) -> Option<EnumCellType> {
        EnumCellType::ALL
            .into_iter()
            .find(|enum_type| enum_type.as_tag() == tag)
    }
}

impl From<EnumCellType> for String {
    fn from(value: EnumCellType) -> Self {
        value.as_tag().to_string()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellOptionsSpecification

/// Raw style/type names resolved for one cell, before table lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecCellStyle {
    /// Style name as returned by the rule (may be absent or empty).
    pub style: Option<String>,
    /// Type tag as returned by the rule (may be absent or unknown).
    pub type_tag: Option<String>,
}

/// Resolved per-cell options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCellOptions<H> {
    /// Registered style handle.
    pub style: H,
    /// Whitelisted cell type.
    pub cell_type: EnumCellType,
}

/// Per-row parallel option arrays, one entry per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRowCellOptions<H> {
    /// Style handle per column.
    pub styles: Vec<H>,
    /// Cell type per column.
    pub types: Vec<EnumCellType>,
}

/// Formatting of one emitted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumRowFormat<H> {
    /// Same style for every cell; values keep their natural type.
    Uniform(H),
    /// Per-cell style and type.
    PerCell(SpecRowCellOptions<H>),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region BuildOptions

/// What to do when a user closure fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumFailurePolicy {
    /// Surface the failure and abort the build (default).
    #[default]
    Propagate,
    /// Recover: drop the row, or substitute the documented fallback.
    Rescue,
}

/// Build-wide options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecBuilderOptions {
    /// Policy for value-producer failures during row assembly.
    pub policy_row_failure: EnumFailurePolicy,
    /// Policy for style/type rule failures during cell resolution.
    pub policy_cell_failure: EnumFailurePolicy,
    /// Base style palette shared by every sheet of the build.
    pub dict_styles_base: BTreeMap<String, SpecCellFormat>,
    /// Replace illegal characters and trim sheet names to Excel limits.
    pub if_sanitize_sheet_names: bool,
    /// Pinned document creation date `(year, month, day)`.
    ///
    /// `None` stamps the current time, which makes output non-reproducible.
    pub date_created: Option<(u16, u8, u8)>,
}

impl Default for SpecBuilderOptions {
    fn default() -> Self {
        Self {
            policy_row_failure: EnumFailurePolicy::Propagate,
            policy_cell_failure: EnumFailurePolicy::Propagate,
            dict_styles_base: derive_default_builder_styles(),
            if_sanitize_sheet_names: false,
            date_created: Some((2000, 1, 1)),
        }
    }
}

impl SpecBuilderOptions {
    /// Base palette with the required `default`/`header`/`footer` entries backfilled.
    pub fn derive_styles_base(&self) -> BTreeMap<String, SpecCellFormat> {
        let mut dict_styles = self.dict_styles_base.clone();
        for c_name in [
            C_STYLE_NAME_DEFAULT,
            C_STYLE_NAME_HEADER,
            C_STYLE_NAME_FOOTER,
        ] {
            dict_styles.entry(c_name.to_string()).or_default();
        }
        dict_styles
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-sheet build report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecSheetReport {
    /// Sheet name as written to the workbook.
    pub sheet_name: String,
    /// Data rows written.
    pub n_rows_emitted: usize,
    /// Assembled rows skipped because every cell was empty.
    pub n_rows_suppressed: usize,
    /// Records dropped because a value producer failed.
    pub n_rows_failed: usize,
    /// Whether a footer row was written.
    pub if_footer_emitted: bool,
    /// Footer cells replaced by blank after a rule failure.
    pub n_footer_cells_failed: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecSheetReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_type_tags_round_trip_through_whitelist() {
        for enum_type in EnumCellType::ALL {
            assert_eq!(EnumCellType::from_tag(enum_type.as_tag()), Some(enum_type));
        }
        assert_eq!(EnumCellType::Iso8601.as_tag(), "iso_8601");
        assert_eq!(EnumCellType::from_tag("Float"), None);
        assert_eq!(EnumCellType::from_tag("currency"), None);
    }

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(EnumCellValue::from("a"), EnumCellValue::String("a".to_string()));
        assert_eq!(EnumCellValue::from(3_i64), EnumCellValue::Number(3.0));
        assert_eq!(EnumCellValue::from(None::<f64>), EnumCellValue::None);
        assert_eq!(EnumCellValue::from(Some(true)), EnumCellValue::Boolean(true));
        assert_eq!(EnumCellValue::from(" 2.5 ").as_f64(), Some(2.5));
        assert!(EnumCellValue::default().is_none());
    }

    #[test]
    fn test_styles_base_backfills_required_names() {
        let options = SpecBuilderOptions {
            dict_styles_base: BTreeMap::new(),
            ..Default::default()
        };
        let dict_styles = options.derive_styles_base();
        assert_eq!(
            dict_styles.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["default", "footer", "header"]
        );
    }

    #[test]
    fn test_format_merge_overwrites_with_right_side() {
        let fmt_base = SpecCellFormat {
            font_size: Some(12),
            bold: Some(false),
            ..Default::default()
        };
        let fmt = fmt_base.with_(SpecCellFormat {
            bold: Some(true),
            bg_color: Some("#FF0000".to_string()),
            ..Default::default()
        });
        assert_eq!(fmt.font_size, Some(12));
        assert_eq!(fmt.bold, Some(true));
        assert_eq!(fmt.bg_color.as_deref(), Some("#FF0000"));
    }
}
