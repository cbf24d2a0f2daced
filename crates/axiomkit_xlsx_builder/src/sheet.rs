//! Sheet specification: column declarations, row assembly and footer computation.

use std::collections::BTreeMap;

use crate::cell::{EnumRule, RuleFn, SpecCellRule};
use crate::error::{BuildError, BuildResult, CellResult};
use crate::spec::{EnumCellValue, EnumFailurePolicy, SpecCellFormat, SpecCellStyle};

/// Footer rule over all values previously assembled for one column.
pub type FooterRule = EnumRule<[EnumCellValue], EnumCellValue>;

////////////////////////////////////////////////////////////////////////////////
// #region Column

/// One declared column: header label, style/type rules, value producer, footer.
pub struct SpecColumn<R> {
    header: String,
    cell_rule: SpecCellRule<R>,
    producer: RuleFn<R, EnumCellValue>,
    footer: Option<FooterRule>,
}

impl<R> SpecColumn<R> {
    /// Header label.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Style/type rules.
    pub fn cell_rule(&self) -> &SpecCellRule<R> {
        &self.cell_rule
    }

    /// Footer rule, if declared.
    pub fn footer(&self) -> Option<&FooterRule> {
        self.footer.as_ref()
    }

    /// Use a fixed style name.
    pub fn with_style(&mut self, name: impl Into<String>) -> &mut Self {
        self.cell_rule.style = EnumRule::Static(Some(name.into()));
        self
    }

    /// Compute the style name from the record. An empty name means "default".
    pub fn with_style_fn<S, F>(&mut self, f: F) -> &mut Self
    where
        S: Into<String>,
        F: Fn(&R) -> CellResult<S> + 'static,
    {
        self.cell_rule.style =
            EnumRule::computed(move |record: &R| f(record).map(|s| Some(s.into())));
        self
    }

    /// Use a fixed type tag, e.g. `"float"` or [`crate::spec::EnumCellType::Float`].
    pub fn with_type(&mut self, tag: impl Into<String>) -> &mut Self {
        self.cell_rule.type_tag = EnumRule::Static(Some(tag.into()));
        self
    }

    /// Like [`SpecColumn::with_style_fn`], but `None` selects the default style.
    pub fn with_style_opt_fn<S, F>(&mut self, f: F) -> &mut Self
    where
        S: Into<String>,
        F: Fn(&R) -> CellResult<Option<S>> + 'static,
    {
        self.cell_rule.style =
            EnumRule::computed(move |record: &R| f(record).map(|s| s.map(Into::into)));
        self
    }

    /// Compute the type tag from the record.
    pub fn with_type_fn<S, F>(&mut self, f: F) -> &mut Self
    where
        S: Into<String>,
        F: Fn(&R) -> CellResult<S> + 'static,
    {
        self.cell_rule.type_tag =
            EnumRule::computed(move |record: &R| f(record).map(|s| Some(s.into())));
        self
    }

    /// Like [`SpecColumn::with_type_fn`], but `None` selects `string`.
    pub fn with_type_opt_fn<S, F>(&mut self, f: F) -> &mut Self
    where
        S: Into<String>,
        F: Fn(&R) -> CellResult<Option<S>> + 'static,
    {
        self.cell_rule.type_tag =
            EnumRule::computed(move |record: &R| f(record).map(|s| s.map(Into::into)));
        self
    }

    /// Use a fixed footer cell. A blank value removes the footer rule.
    pub fn with_footer(&mut self, value: impl Into<EnumCellValue>) -> &mut Self {
        let value = value.into();
        self.footer = if value.is_none() {
            None
        } else {
            Some(EnumRule::Static(value))
        };
        self
    }

    /// Compute the footer cell from every value assembled for this column.
    pub fn with_footer_fn<V, F>(&mut self, f: F) -> &mut Self
    where
        V: Into<EnumCellValue>,
        F: Fn(&[EnumCellValue]) -> CellResult<V> + 'static,
    {
        self.footer = Some(EnumRule::computed(move |cells: &[EnumCellValue]| {
            f(cells).map(Into::<EnumCellValue>::into)
        }));
        self
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Sheet

/// Result of footer computation for one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecFooterRow {
    /// One value per column; blank where no rule exists or the rule failed.
    pub values: Vec<EnumCellValue>,
    /// Number of computed rules that failed.
    pub n_cells_failed: usize,
}

/// Mutable sheet handle passed to the configuration callback.
///
/// Owns the append-only row cache read by footer rules.
pub struct SpecSheet<R> {
    name: String,
    l_columns: Vec<SpecColumn<R>>,
    dict_styles: BTreeMap<String, SpecCellFormat>,
    l_rows_cached: Vec<Vec<EnumCellValue>>,
}

impl<R> SpecSheet<R> {
    /// Create an empty sheet spec.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            l_columns: Vec::new(),
            dict_styles: BTreeMap::new(),
            l_rows_cached: Vec::new(),
        }
    }

    /// Sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a column. Returns the column for style/type/footer chaining.
    ///
    /// Defaults: style `default`, type `string`, no footer.
    pub fn column<V, F>(&mut self, header: impl Into<String>, producer: F) -> &mut SpecColumn<R>
    where
        V: Into<EnumCellValue>,
        F: Fn(&R) -> CellResult<V> + 'static,
    {
        let n_idx = self.l_columns.len();
        self.l_columns.push(SpecColumn {
            header: header.into(),
            cell_rule: SpecCellRule::default(),
            producer: Box::new(move |record: &R| {
                producer(record).map(Into::<EnumCellValue>::into)
            }),
            footer: None,
        });
        &mut self.l_columns[n_idx]
    }

    /// Register a custom style for this sheet. Re-declaring a name replaces it.
    pub fn add_style(&mut self, name: impl Into<String>, format: SpecCellFormat) {
        self.dict_styles.insert(name.into(), format);
    }

    /// Declared columns in output order.
    pub fn columns(&self) -> &[SpecColumn<R>] {
        &self.l_columns
    }

    /// Header labels in column order.
    pub fn headers(&self) -> Vec<String> {
        self.l_columns
            .iter()
            .map(|col| col.header.clone())
            .collect()
    }

    /// Custom styles declared for this sheet.
    pub fn styles(&self) -> &BTreeMap<String, SpecCellFormat> {
        &self.dict_styles
    }

    /// Rows assembled so far, in assembly order.
    pub fn rows_cached(&self) -> &[Vec<EnumCellValue>] {
        &self.l_rows_cached
    }

    /// Assemble one row from `record`.
    ///
    /// Any producer failure aborts the whole row: `Rescue` yields `Ok(None)`,
    /// `Propagate` yields the error. Successful rows are appended to the cache,
    /// including rows whose cells are all blank.
    pub fn make_row(
        &mut self,
        record: &R,
        policy: EnumFailurePolicy,
    ) -> BuildResult<Option<Vec<EnumCellValue>>> {
        let mut l_row = Vec::with_capacity(self.l_columns.len());
        for (n_idx_col, col) in self.l_columns.iter().enumerate() {
            match (col.producer)(record) {
                Ok(value) => l_row.push(value),
                Err(err) => {
                    if policy == EnumFailurePolicy::Rescue {
                        log::warn!(
                            "Sheet {:?}: dropping row, column {n_idx_col} ({:?}) failed: {err}",
                            self.name,
                            col.header
                        );
                        return Ok(None);
                    }
                    return Err(BuildError::CellValue {
                        sheet_name: self.name.clone(),
                        col_idx: n_idx_col,
                        header: col.header.clone(),
                        source: err,
                    });
                }
            }
        }

        self.l_rows_cached.push(l_row.clone());
        Ok(Some(l_row))
    }

    /// Resolve raw style/type names of every column for `record`.
    pub fn resolve_cell_styles(
        &self,
        record: &R,
        policy: EnumFailurePolicy,
    ) -> BuildResult<Vec<SpecCellStyle>> {
        self.l_columns
            .iter()
            .map(|col| col.cell_rule.resolve(record, policy))
            .collect()
    }

    /// All values assembled so far for column `col_idx`, in row order.
    pub fn column_values(&self, col_idx: usize) -> Vec<EnumCellValue> {
        self.l_rows_cached
            .iter()
            .map(|row| row.get(col_idx).cloned().unwrap_or_default())
            .collect()
    }

    /// Whether at least one column declares a footer rule.
    pub fn has_footer(&self) -> bool {
        self.l_columns.iter().any(|col| col.footer.is_some())
    }

    /// Compute the footer row, or `None` when no column declares a footer.
    ///
    /// Computed rule failures never propagate: the failing cell becomes blank.
    pub fn make_footer(&self) -> Option<SpecFooterRow> {
        if !self.has_footer() {
            return None;
        }

        let mut n_cells_failed = 0;
        let values = self
            .l_columns
            .iter()
            .enumerate()
            .map(|(n_idx_col, col)| match &col.footer {
                None => EnumCellValue::None,
                Some(EnumRule::Static(value)) => value.clone(),
                Some(rule) => match rule.evaluate(&self.column_values(n_idx_col)) {
                    Ok(value) => value,
                    Err(err) => {
                        log::warn!(
                            "Sheet {:?}: footer of column {n_idx_col} ({:?}) failed: {err}",
                            self.name,
                            col.header
                        );
                        n_cells_failed += 1;
                        EnumCellValue::None
                    }
                },
            })
            .collect();

        Some(SpecFooterRow {
            values,
            n_cells_failed,
        })
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
