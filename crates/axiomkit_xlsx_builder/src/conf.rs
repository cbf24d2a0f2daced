//! Builder constants and default preset factories.

use std::collections::BTreeMap;

use crate::spec::{SpecBuilderOptions, SpecCellFormat};

/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Fallback style for data cells.
pub const C_STYLE_NAME_DEFAULT: &str = "default";
/// Uniform style of the header row.
pub const C_STYLE_NAME_HEADER: &str = "header";
/// Uniform style of the footer row.
pub const C_STYLE_NAME_FOOTER: &str = "footer";

/// Build default named style palette used by [`crate::builder::XlsxBuilder`].
pub fn derive_default_builder_styles() -> BTreeMap<String, SpecCellFormat> {
    let fmt_default = SpecCellFormat {
        font_size: Some(12),
        ..Default::default()
    };
    let fmt_header = fmt_default.with_(SpecCellFormat {
        bold: Some(true),
        font_size: Some(16),
        ..Default::default()
    });
    let fmt_footer = fmt_default.with_(SpecCellFormat {
        font_size: Some(16),
        ..Default::default()
    });

    let mut dict_fmt = BTreeMap::new();
    dict_fmt.insert(C_STYLE_NAME_DEFAULT.to_string(), fmt_default);
    dict_fmt.insert(C_STYLE_NAME_HEADER.to_string(), fmt_header);
    dict_fmt.insert(C_STYLE_NAME_FOOTER.to_string(), fmt_footer);
    dict_fmt.insert(
        "currency".to_string(),
        SpecCellFormat {
            num_format: Some("#.00 \"€\"".to_string()),
            ..Default::default()
        },
    );
    dict_fmt.insert(
        "date".to_string(),
        SpecCellFormat {
            num_format: Some("dd/mm/yyyy".to_string()),
            ..Default::default()
        },
    );
    dict_fmt.insert(
        "wrapped".to_string(),
        SpecCellFormat {
            text_wrap: Some(true),
            ..Default::default()
        },
    );

    dict_fmt
}

/// Build default builder options.
pub fn derive_default_builder_options() -> SpecBuilderOptions {
    SpecBuilderOptions::default()
}
