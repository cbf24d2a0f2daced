//! Build orchestration: configure, register styles, then emit header, data and footer rows.

use std::collections::BTreeMap;

use crate::conf::{
    C_STYLE_NAME_DEFAULT, C_STYLE_NAME_FOOTER, C_STYLE_NAME_HEADER, derive_default_builder_options,
};
use crate::error::BuildResult;
use crate::resolver::SpecStyleTable;
use crate::sheet::SpecSheet;
use crate::spec::{EnumCellValue, EnumRowFormat, SpecBuilderOptions, SpecCellFormat, SpecSheetReport};
use crate::util::{is_row_empty, sanitize_sheet_name, transpose_cell_options};
use crate::writer::{WorkbookSink, XlsxDocument};

/// Declarative multi-sheet XLSX builder.
///
/// `configure` runs once per sheet, in declaration order, with a fresh
/// [`SpecSheet`] to declare columns, footers and custom styles on.
///
/// ```
/// use axiomkit_xlsx_builder::{EnumCellType, XlsxBuilder};
///
/// type Price = (&'static str, f64);
///
/// let mut builder = XlsxBuilder::new(
///     vec![("Prices", vec![("a", 1.99), ("b", 2.02)])],
///     |sheet| {
///         sheet.column("Letter", |r: &Price| Ok(r.0));
///         sheet
///             .column("Price", |r: &Price| Ok(r.1))
///             .with_type(EnumCellType::Float)
///             .with_footer_fn(|cells| Ok(cells.iter().filter_map(|c| c.as_f64()).sum::<f64>()));
///     },
/// );
/// let bytes = builder.build()?.save_to_buffer()?;
/// assert!(bytes.starts_with(b"PK"));
/// # Ok::<(), axiomkit_xlsx_builder::BuildError>(())
/// ```
pub struct XlsxBuilder<R, F>
where
    F: FnMut(&mut SpecSheet<R>),
{
    l_sheets: Vec<(String, Vec<R>)>,
    configure: F,
    options: SpecBuilderOptions,
}

impl<R, F> XlsxBuilder<R, F>
where
    F: FnMut(&mut SpecSheet<R>),
{
    /// Create a builder over named record collections.
    pub fn new<S, I>(sheets: I, configure: F) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Vec<R>)>,
    {
        Self {
            l_sheets: sheets
                .into_iter()
                .map(|(name, records)| (name.into(), records))
                .collect(),
            configure,
            options: derive_default_builder_options(),
        }
    }

    /// Replace build options.
    pub fn with_options(mut self, options: SpecBuilderOptions) -> Self {
        self.options = options;
        self
    }

    /// Append another named record collection after the existing ones.
    pub fn add_sheet(
        &mut self,
        name: impl Into<String>,
        records: impl IntoIterator<Item = R>,
    ) -> &mut Self {
        self.l_sheets
            .push((name.into(), records.into_iter().collect()));
        self
    }

    /// Current build options.
    pub fn options(&self) -> &SpecBuilderOptions {
        &self.options
    }

    /// Build an in-memory XLSX document.
    pub fn build(&mut self) -> BuildResult<XlsxDocument> {
        let mut document = XlsxDocument::new(self.options.date_created)?;
        for report in self.build_into(&mut document)? {
            document.push_report(report);
        }
        Ok(document)
    }

    /// Emit every sheet into `sink`, returning one report per sheet.
    pub fn build_into<S: WorkbookSink>(&mut self, sink: &mut S) -> BuildResult<Vec<SpecSheetReport>> {
        let mut dict_handles_base = BTreeMap::new();
        for (c_name, fmt) in self.options.derive_styles_base() {
            dict_handles_base.insert(c_name, sink.register_style(&fmt)?);
        }
        let handle_fallback = match dict_handles_base.get(C_STYLE_NAME_DEFAULT) {
            Some(handle) => handle.clone(),
            None => sink.register_style(&SpecCellFormat::default())?,
        };

        let mut l_reports = Vec::with_capacity(self.l_sheets.len());
        for (c_sheet_name, l_records) in &self.l_sheets {
            let report = build_sheet(
                sink,
                c_sheet_name,
                l_records,
                &mut self.configure,
                &dict_handles_base,
                &handle_fallback,
                &self.options,
            )?;
            l_reports.push(report);
        }

        log::debug!("Built {} sheet(s)", l_reports.len());
        Ok(l_reports)
    }
}

fn build_sheet<R, F, S>(
    sink: &mut S,
    sheet_name: &str,
    records: &[R],
    configure: &mut F,
    dict_handles_base: &BTreeMap<String, S::Handle>,
    handle_fallback: &S::Handle,
    options: &SpecBuilderOptions,
) -> BuildResult<SpecSheetReport>
where
    F: FnMut(&mut SpecSheet<R>),
    S: WorkbookSink,
{
    // Configure
    let mut sheet = SpecSheet::new(sheet_name);
    configure(&mut sheet);

    let mut report = SpecSheetReport {
        sheet_name: if options.if_sanitize_sheet_names {
            sanitize_sheet_name(sheet_name, "_")
        } else {
            sheet_name.to_string()
        },
        ..Default::default()
    };
    if report.sheet_name != sheet_name {
        report.warn(format!(
            "Sheet name {sheet_name:?} written as {:?}.",
            report.sheet_name
        ));
    }
    log::debug!(
        "Sheet {:?}: {} column(s), {} custom style(s), {} record(s)",
        report.sheet_name,
        sheet.columns().len(),
        sheet.styles().len(),
        records.len()
    );

    // RegisterStyles
    let mut dict_handles_sheet = BTreeMap::new();
    for (c_name, fmt) in sheet.styles() {
        dict_handles_sheet.insert(c_name.clone(), sink.register_style(fmt)?);
    }
    let table = SpecStyleTable::new(dict_handles_base, dict_handles_sheet, handle_fallback.clone());

    // EmitHeader
    sink.add_sheet(&report.sheet_name)?;
    let l_header: Vec<EnumCellValue> = sheet
        .headers()
        .into_iter()
        .map(EnumCellValue::String)
        .collect();
    sink.add_row(
        &l_header,
        &EnumRowFormat::Uniform(table.resolve_style(Some(C_STYLE_NAME_HEADER))),
    )?;

    // EmitDataRows
    for record in records {
        let Some(l_row) = sheet.make_row(record, options.policy_row_failure)? else {
            report.n_rows_failed += 1;
            continue;
        };
        if is_row_empty(&l_row) {
            report.n_rows_suppressed += 1;
            continue;
        }

        let l_cell_styles = sheet.resolve_cell_styles(record, options.policy_cell_failure)?;
        let row_options = transpose_cell_options(table.derive_cell_options(&l_cell_styles));
        sink.add_row(&l_row, &EnumRowFormat::PerCell(row_options))?;
        report.n_rows_emitted += 1;
    }
    if report.n_rows_failed > 0 {
        report.warn(format!(
            "{} record(s) dropped after a value producer failed.",
            report.n_rows_failed
        ));
    }

    // EmitFooter
    if let Some(footer) = sheet.make_footer() {
        sink.add_row(
            &footer.values,
            &EnumRowFormat::Uniform(table.resolve_style(Some(C_STYLE_NAME_FOOTER))),
        )?;
        report.if_footer_emitted = true;
        report.n_footer_cells_failed = footer.n_cells_failed;
        if footer.n_cells_failed > 0 {
            report.warn(format!(
                "{} footer cell(s) left blank after a footer rule failed.",
                footer.n_cells_failed
            ));
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::derive_default_builder_styles;
    use crate::error::{BuildError, CellResult};
    use crate::spec::{EnumCellType, EnumFailurePolicy};

    type Rec = (&'static str, f64);

    /// Sink that records every emitted row.
    #[derive(Default)]
    struct RecordingSink {
        l_formats: Vec<SpecCellFormat>,
        l_sheets: Vec<(String, Vec<(Vec<EnumCellValue>, EnumRowFormat<usize>)>)>,
    }

    impl RecordingSink {
        fn rows(&self, n_idx_sheet: usize) -> &[(Vec<EnumCellValue>, EnumRowFormat<usize>)] {
            &self.l_sheets[n_idx_sheet].1
        }

        fn uniform_format(&self, format: &EnumRowFormat<usize>) -> &SpecCellFormat {
            match format {
                EnumRowFormat::Uniform(n_handle) => &self.l_formats[*n_handle],
                other => panic!("expected uniform row, got {other:?}"),
            }
        }

        fn cell_formats(&self, format: &EnumRowFormat<usize>) -> Vec<&SpecCellFormat> {
            match format {
                EnumRowFormat::PerCell(options) => options
                    .styles
                    .iter()
                    .map(|n_handle| &self.l_formats[*n_handle])
                    .collect(),
                other => panic!("expected per-cell row, got {other:?}"),
            }
        }
    }

    impl WorkbookSink for RecordingSink {
        type Handle = usize;

        fn register_style(&mut self, format: &SpecCellFormat) -> BuildResult<usize> {
            self.l_formats.push(format.clone());
            Ok(self.l_formats.len() - 1)
        }

        fn add_sheet(&mut self, name: &str) -> BuildResult<()> {
            self.l_sheets.push((name.to_string(), Vec::new()));
            Ok(())
        }

        fn add_row(
            &mut self,
            values: &[EnumCellValue],
            format: &EnumRowFormat<usize>,
        ) -> BuildResult<()> {
            self.l_sheets
                .last_mut()
                .ok_or(BuildError::NoActiveSheet)?
                .1
                .push((values.to_vec(), format.clone()));
            Ok(())
        }
    }

    fn palette(name: &str) -> SpecCellFormat {
        derive_default_builder_styles()[name].clone()
    }

    fn sum_cells(cells: &[EnumCellValue]) -> CellResult<f64> {
        Ok(cells.iter().filter_map(EnumCellValue::as_f64).sum())
    }

    fn records_ab() -> Vec<Rec> {
        vec![("a", 1.99), ("b", 2.02)]
    }

    #[test]
    fn test_scenario_static_float_column_without_footer() {
        let mut builder = XlsxBuilder::new(vec![("Sheet1", records_ab())], |sheet| {
            sheet
                .column("H", |r: &Rec| Ok(r.1))
                .with_type(EnumCellType::Float);
        });
        let mut sink = RecordingSink::default();
        let l_reports = builder.build_into(&mut sink).unwrap();

        assert_eq!(sink.l_sheets.len(), 1);
        assert_eq!(sink.l_sheets[0].0, "Sheet1");
        let rows = sink.rows(0);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].0, vec![EnumCellValue::from("H")]);
        assert_eq!(sink.uniform_format(&rows[0].1), &palette("header"));
        assert_eq!(rows[1].0, vec![EnumCellValue::Number(1.99)]);
        assert_eq!(rows[2].0, vec![EnumCellValue::Number(2.02)]);
        match &rows[1].1 {
            EnumRowFormat::PerCell(options) => {
                assert_eq!(options.types, vec![EnumCellType::Float]);
            }
            other => panic!("expected per-cell row, got {other:?}"),
        }

        assert_eq!(l_reports[0].n_rows_emitted, 2);
        assert!(!l_reports[0].if_footer_emitted);
    }

    #[test]
    fn test_scenario_dynamic_style_and_summed_footer() {
        let mut builder = XlsxBuilder::new(vec![("Sheet1", records_ab())], |sheet| {
            sheet
                .column("H", |r: &Rec| Ok(r.1))
                .with_style_fn(|r: &Rec| Ok(if r.1 > 2.0 { "header" } else { "default" }))
                .with_type("float")
                .with_footer_fn(sum_cells);
        });
        let mut sink = RecordingSink::default();
        let l_reports = builder.build_into(&mut sink).unwrap();

        let rows = sink.rows(0);
        assert_eq!(rows.len(), 4);
        assert_eq!(sink.cell_formats(&rows[1].1), vec![&palette("default")]);
        assert_eq!(sink.cell_formats(&rows[2].1), vec![&palette("header")]);
        assert_eq!(rows[3].0, vec![EnumCellValue::Number(1.99 + 2.02)]);
        assert_eq!(sink.uniform_format(&rows[3].1), &palette("footer"));
        assert!(l_reports[0].if_footer_emitted);
    }

    #[test]
    fn test_scenario_failed_record_is_dropped_under_rescue() {
        let records = vec![("a", 1.0), ("boom", 2.0), ("c", 3.0)];
        let configure = |sheet: &mut SpecSheet<Rec>| {
            sheet.column("Letter", |r: &Rec| {
                if r.0 == "boom" {
                    Err("cannot read record".into())
                } else {
                    Ok(r.0)
                }
            });
            sheet
                .column("Count", |r: &Rec| Ok(r.1))
                .with_footer_fn(|cells: &[EnumCellValue]| Ok(cells.len()));
        };

        let mut builder = XlsxBuilder::new(vec![("S", records.clone())], configure).with_options(
            SpecBuilderOptions {
                policy_row_failure: EnumFailurePolicy::Rescue,
                ..Default::default()
            },
        );
        let mut sink = RecordingSink::default();
        let l_reports = builder.build_into(&mut sink).unwrap();

        let rows = sink.rows(0);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].0[0], EnumCellValue::from("a"));
        assert_eq!(rows[2].0[0], EnumCellValue::from("c"));
        assert_eq!(rows[3].0, vec![EnumCellValue::None, EnumCellValue::Number(2.0)]);
        assert_eq!(l_reports[0].n_rows_failed, 1);
        assert_eq!(l_reports[0].n_rows_emitted, 2);
        assert_eq!(l_reports[0].warnings.len(), 1);

        let mut builder = XlsxBuilder::new(vec![("S", records)], configure);
        let err = builder
            .build_into(&mut RecordingSink::default())
            .unwrap_err();
        assert!(matches!(err, BuildError::CellValue { col_idx: 0, .. }));
    }

    #[test]
    fn test_scenario_custom_styles_do_not_leak_across_sheets() {
        let fmt_a = SpecCellFormat {
            bg_color: Some("#FF0000".to_string()),
            font_color: Some("#0000FF".to_string()),
            ..Default::default()
        };
        let fmt_b = SpecCellFormat {
            bg_color: Some("#936E00".to_string()),
            font_color: Some("#FFFFFF".to_string()),
            ..Default::default()
        };
        let (fmt_a_cfg, fmt_b_cfg) = (fmt_a.clone(), fmt_b.clone());

        let mut builder = XlsxBuilder::new(
            vec![("A", vec![("a", 1.0)]), ("B", vec![("b", 2.0)]), ("C", vec![("c", 3.0)])],
            move |sheet| {
                let c_name = sheet.name().to_string();
                match c_name.as_str() {
                    "A" => sheet.add_style("specific", fmt_a_cfg.clone()),
                    "B" => sheet.add_style("specific", fmt_b_cfg.clone()),
                    _ => {}
                }
                sheet
                    .column("Letters", |r: &Rec| Ok(r.0))
                    .with_style("specific");
            },
        );
        let mut sink = RecordingSink::default();
        builder.build_into(&mut sink).unwrap();

        assert_eq!(sink.cell_formats(&sink.rows(0)[1].1), vec![&fmt_a]);
        assert_eq!(sink.cell_formats(&sink.rows(1)[1].1), vec![&fmt_b]);
        assert_eq!(sink.cell_formats(&sink.rows(2)[1].1), vec![&palette("default")]);
    }

    #[test]
    fn test_blank_static_footer_emits_no_footer_row() {
        let mut builder = XlsxBuilder::new(vec![("S", vec![1.0, 2.0])], |sheet| {
            sheet.column("A", |r: &f64| Ok(*r)).with_footer(None::<f64>);
        });
        let mut sink = RecordingSink::default();
        let l_reports = builder.build_into(&mut sink).unwrap();

        let rows = sink.rows(0);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].0, vec![EnumCellValue::Number(2.0)]);
        assert!(!l_reports[0].if_footer_emitted);
    }

    #[test]
    fn test_style_fn_returning_nothing_uses_default_style() {
        let mut builder = XlsxBuilder::new(vec![("S", records_ab())], |sheet| {
            sheet
                .column("A", |r: &Rec| Ok(r.1))
                .with_style_opt_fn(|r: &Rec| Ok((r.1 > 2.0).then_some("header")))
                .with_type_opt_fn(|_: &Rec| Ok(None::<&str>));
        });
        let mut sink = RecordingSink::default();
        builder.build_into(&mut sink).unwrap();

        let rows = sink.rows(0);
        assert_eq!(sink.cell_formats(&rows[1].1), vec![&palette("default")]);
        assert_eq!(sink.cell_formats(&rows[2].1), vec![&palette("header")]);
        match &rows[1].1 {
            EnumRowFormat::PerCell(options) => {
                assert_eq!(options.types, vec![EnumCellType::String]);
            }
            other => panic!("expected per-cell row, got {other:?}"),
        }
    }

    #[test]
    fn test_options_default_and_override() {
        let builder = XlsxBuilder::new(vec![("S", records_ab())], |_: &mut SpecSheet<Rec>| {});
        assert_eq!(builder.options(), &derive_default_builder_options());
        assert_eq!(builder.options().policy_row_failure, EnumFailurePolicy::Propagate);

        let builder = builder.with_options(SpecBuilderOptions {
            policy_cell_failure: EnumFailurePolicy::Rescue,
            date_created: None,
            ..Default::default()
        });
        assert_eq!(builder.options().policy_cell_failure, EnumFailurePolicy::Rescue);
        assert_eq!(builder.options().date_created, None);
    }

    #[test]
    fn test_header_row_matches_declared_columns() {
        let mut builder = XlsxBuilder::new(vec![("S", records_ab())], |sheet| {
            sheet.column("Letters", |r: &Rec| Ok(r.0));
            sheet.column("Numbers", |r: &Rec| Ok(r.1));
            sheet.column("Empty", |_: &Rec| Ok(None::<f64>));
        });
        let mut sink = RecordingSink::default();
        builder.build_into(&mut sink).unwrap();

        let (l_header, format) = &sink.rows(0)[0];
        assert_eq!(
            l_header,
            &vec![
                EnumCellValue::from("Letters"),
                EnumCellValue::from("Numbers"),
                EnumCellValue::from("Empty"),
            ]
        );
        assert!(matches!(format, EnumRowFormat::Uniform(_)));
        assert_eq!(sink.uniform_format(format), &palette("header"));
    }

    #[test]
    fn test_blank_rows_are_suppressed_but_partial_rows_kept() {
        let records: Vec<(Option<&'static str>, Option<f64>)> =
            vec![(None, None), (Some("x"), None), (None, Some(3.0))];
        let mut builder = XlsxBuilder::new(vec![("S", records)], |sheet| {
            sheet.column("A", |r: &(Option<&'static str>, Option<f64>)| Ok(r.0));
            sheet
                .column("B", |r: &(Option<&'static str>, Option<f64>)| Ok(r.1))
                .with_footer_fn(|cells: &[EnumCellValue]| Ok(cells.len()));
        });
        let mut sink = RecordingSink::default();
        let l_reports = builder.build_into(&mut sink).unwrap();

        let rows = sink.rows(0);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].0, vec![EnumCellValue::from("x"), EnumCellValue::None]);
        assert_eq!(rows[2].0, vec![EnumCellValue::None, EnumCellValue::Number(3.0)]);
        // Suppressed rows stay in the row cache read by footer rules.
        assert_eq!(rows[3].0, vec![EnumCellValue::None, EnumCellValue::Number(3.0)]);
        assert_eq!(l_reports[0].n_rows_suppressed, 1);
    }

    #[test]
    fn test_footer_failure_keeps_other_cells() {
        let mut builder = XlsxBuilder::new(vec![("S", records_ab())], |sheet| {
            sheet
                .column("A", |r: &Rec| Ok(r.0))
                .with_footer_fn(|_: &[EnumCellValue]| -> CellResult<f64> {
                    Err("no total".into())
                });
            sheet.column("B", |r: &Rec| Ok(r.1)).with_footer_fn(sum_cells);
            sheet.column("C", |r: &Rec| Ok(r.1));
        });
        let mut sink = RecordingSink::default();
        let l_reports = builder.build_into(&mut sink).unwrap();

        let rows = sink.rows(0);
        assert_eq!(
            rows[3].0,
            vec![
                EnumCellValue::None,
                EnumCellValue::Number(1.99 + 2.02),
                EnumCellValue::None
            ]
        );
        assert_eq!(l_reports[0].n_footer_cells_failed, 1);
    }

    #[test]
    fn test_cell_failure_policy_for_style_rules() {
        let configure = |sheet: &mut SpecSheet<Rec>| {
            sheet
                .column("A", |r: &Rec| Ok(r.1))
                .with_style_fn(|r: &Rec| -> CellResult<&str> {
                    if r.1 > 2.0 {
                        Err("no style".into())
                    } else {
                        Ok("header")
                    }
                })
                .with_type_fn(|_: &Rec| Ok("integer"));
        };

        let mut builder = XlsxBuilder::new(vec![("S", records_ab())], configure).with_options(
            SpecBuilderOptions {
                policy_cell_failure: EnumFailurePolicy::Rescue,
                ..Default::default()
            },
        );
        let mut sink = RecordingSink::default();
        builder.build_into(&mut sink).unwrap();
        let rows = sink.rows(0);
        assert_eq!(sink.cell_formats(&rows[1].1), vec![&palette("header")]);
        assert_eq!(sink.cell_formats(&rows[2].1), vec![&palette("default")]);
        match &rows[2].1 {
            EnumRowFormat::PerCell(options) => {
                assert_eq!(options.types, vec![EnumCellType::Integer]);
            }
            other => panic!("expected per-cell row, got {other:?}"),
        }

        let mut builder = XlsxBuilder::new(vec![("S", records_ab())], configure);
        let err = builder
            .build_into(&mut RecordingSink::default())
            .unwrap_err();
        assert!(matches!(err, BuildError::CellStyle(_)));
    }

    #[test]
    fn test_unknown_style_and_type_fall_back() {
        let mut builder = XlsxBuilder::new(vec![("S", records_ab())], |sheet| {
            sheet
                .column("A", |r: &Rec| Ok(r.0))
                .with_style("no_such_style")
                .with_type("currency");
            sheet.column("B", |r: &Rec| Ok(r.0)).with_style_fn(|_: &Rec| Ok(""));
        });
        let mut sink = RecordingSink::default();
        builder.build_into(&mut sink).unwrap();

        match &sink.rows(0)[1].1 {
            EnumRowFormat::PerCell(options) => {
                assert_eq!(options.styles[0], options.styles[1]);
                assert_eq!(sink.l_formats[options.styles[0]], palette("default"));
                assert_eq!(options.types, vec![EnumCellType::String, EnumCellType::String]);
            }
            other => panic!("expected per-cell row, got {other:?}"),
        }
    }

    #[test]
    fn test_style_declared_after_column_resolves_late() {
        let fmt = SpecCellFormat {
            italic: Some(true),
            ..Default::default()
        };
        let fmt_cfg = fmt.clone();
        let mut builder = XlsxBuilder::new(vec![("S", records_ab())], move |sheet| {
            sheet.column("A", |r: &Rec| Ok(r.0)).with_style("late");
            sheet.add_style("late", fmt_cfg.clone());
        });
        let mut sink = RecordingSink::default();
        builder.build_into(&mut sink).unwrap();
        assert_eq!(sink.cell_formats(&sink.rows(0)[1].1), vec![&fmt]);
    }

    #[test]
    fn test_configure_runs_once_per_sheet_in_order() {
        let mut l_seen = Vec::new();
        {
            let mut builder = XlsxBuilder::new(
                vec![("First", records_ab()), ("Second", vec![])],
                |sheet: &mut SpecSheet<Rec>| {
                    l_seen.push(sheet.name().to_string());
                    sheet.column("A", |r: &Rec| Ok(r.0));
                },
            );
            builder.add_sheet("Third", vec![("z", 0.0)]);
            let mut sink = RecordingSink::default();
            let l_reports = builder.build_into(&mut sink).unwrap();

            let l_names: Vec<_> = sink.l_sheets.iter().map(|(name, _)| name.as_str()).collect();
            assert_eq!(l_names, vec!["First", "Second", "Third"]);
            assert_eq!(sink.rows(1).len(), 1);
            assert_eq!(l_reports[1].n_rows_emitted, 0);
        }
        assert_eq!(l_seen, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_sanitized_sheet_name_is_reported() {
        let mut builder = XlsxBuilder::new(vec![("Q1/Q2", records_ab())], |sheet| {
            assert_eq!(sheet.name(), "Q1/Q2");
            sheet.column("A", |r: &Rec| Ok(r.0));
        })
        .with_options(SpecBuilderOptions {
            if_sanitize_sheet_names: true,
            ..Default::default()
        });
        let mut sink = RecordingSink::default();
        let l_reports = builder.build_into(&mut sink).unwrap();
        assert_eq!(sink.l_sheets[0].0, "Q1_Q2");
        assert_eq!(l_reports[0].sheet_name, "Q1_Q2");
        assert_eq!(l_reports[0].warnings.len(), 1);
    }

    #[test]
    fn test_build_produces_document_with_reports() {
        let mut builder = XlsxBuilder::new(vec![("S", records_ab())], |sheet| {
            sheet.column("A", |r: &Rec| Ok(r.1)).with_type("float");
        });
        let mut document = builder.build().unwrap();
        assert_eq!(document.sheet_count(), 1);
        assert_eq!(document.reports()[0].n_rows_emitted, 2);
        assert!(document.save_to_buffer().unwrap().starts_with(b"PK"));
    }
}
