//! Static-or-computed rules and per-column style/type resolution.

use std::fmt;

use crate::conf::C_STYLE_NAME_DEFAULT;
use crate::error::{BoxError, BuildError, BuildResult, CellResult};
use crate::spec::{EnumCellType, EnumFailurePolicy, SpecCellStyle};

////////////////////////////////////////////////////////////////////////////////
// #region Rule

/// Boxed rule closure over input `I`.
pub type RuleFn<I, T> = Box<dyn Fn(&I) -> CellResult<T>>;

/// A value that is either fixed or computed from an input.
pub enum EnumRule<I: ?Sized, T> {
    /// Fixed value, returned as-is.
    Static(T),
    /// Value computed from the input on every evaluation.
    Computed(RuleFn<I, T>),
}

impl<I: ?Sized, T: Clone> EnumRule<I, T> {
    /// Wrap a closure as a computed rule.
    pub fn computed(f: impl Fn(&I) -> CellResult<T> + 'static) -> Self {
        EnumRule::Computed(Box::new(f))
    }

    /// Evaluate the rule against `input`.
    pub fn evaluate(&self, input: &I) -> CellResult<T> {
        match self {
            EnumRule::Static(value) => Ok(value.clone()),
            EnumRule::Computed(f) => f(input),
        }
    }

    /// Whether the rule calls user code.
    pub fn is_computed(&self) -> bool {
        matches!(self, EnumRule::Computed(_))
    }
}

impl<I: ?Sized, T: fmt::Debug> fmt::Debug for EnumRule<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumRule::Static(value) => f.debug_tuple("Static").field(value).finish(),
            EnumRule::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellRule

/// Style and type rules of one column.
#[derive(Debug)]
pub struct SpecCellRule<R> {
    /// Style name rule. `None`/empty resolves to the default style later on.
    pub style: EnumRule<R, Option<String>>,
    /// Type tag rule. Unknown tags resolve to `string` later on.
    pub type_tag: EnumRule<R, Option<String>>,
}

impl<R> Default for SpecCellRule<R> {
    fn default() -> Self {
        Self {
            style: EnumRule::Static(Some(C_STYLE_NAME_DEFAULT.to_string())),
            type_tag: EnumRule::Static(Some(EnumCellType::String.into())),
        }
    }
}

impl<R> SpecCellRule<R> {
    /// Resolve raw style/type names for `record`.
    ///
    /// Style and type are handled independently: a failing style rule never
    /// affects the type, and vice versa. Returned names are not validated.
    pub fn resolve(&self, record: &R, policy: EnumFailurePolicy) -> BuildResult<SpecCellStyle> {
        let style = apply_failure_policy(
            self.style.evaluate(record),
            policy,
            || Some(C_STYLE_NAME_DEFAULT.to_string()),
            BuildError::CellStyle,
        )?;
        let type_tag = apply_failure_policy(
            self.type_tag.evaluate(record),
            policy,
            || Some(EnumCellType::String.into()),
            BuildError::CellType,
        )?;

        Ok(SpecCellStyle { style, type_tag })
    }
}

fn apply_failure_policy<T>(
    result: CellResult<T>,
    policy: EnumFailurePolicy,
    fallback: impl FnOnce() -> T,
    wrap_err: impl FnOnce(BoxError) -> BuildError,
) -> BuildResult<T> {
    match (result, policy) {
        (Ok(value), _) => Ok(value),
        (Err(err), EnumFailurePolicy::Rescue) => {
            log::debug!("Cell rule failed, using fallback: {err}");
            Ok(fallback())
        }
        (Err(err), EnumFailurePolicy::Propagate) => Err(wrap_err(err)),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
