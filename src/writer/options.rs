//! Writer options.

use crate::error::ConfigError;
use crate::ordering::{ColumnOrder, FileDeterminism, RowOrder};
use crate::symbol::{Labeler, NumericLabeler, TextLabeler};

/// Options controlling a single write. Options are passed explicitly to each call; there is no
/// global writer state.
///
/// ```
/// use probwriter::*;
/// let opts = WriterOptions::new()
///     .with_symbolic_solver_labels(true)
///     .with_file_determinism(FileDeterminism::SortNames);
/// assert!(opts.symbolic_solver_labels);
/// ```
pub struct WriterOptions {
    /// Drop constraints whose body is constant instead of writing a degenerate row.
    pub skip_trivial_constraints     : bool,
    /// Label entities by their names instead of sequential codes.
    pub symbolic_solver_labels       : bool,
    /// Write fixed variables as fixed bounds instead of failing.
    pub output_fixed_variable_bounds : bool,
    /// Write bounds also for variables that appear in no row.
    pub include_all_variable_bounds  : bool,
    pub labeler                      : Option<Box<dyn Labeler>>,
    pub file_determinism             : FileDeterminism,
    pub row_order                    : Option<RowOrder>,
    pub column_order                 : Option<ColumnOrder>,
    /// Always write the objective constant column, also when the constant is zero.
    pub force_objective_constant     : bool,
}

/// A value in a string-keyed option list, see [WriterOptions::from_pairs].
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Labeler(Box<dyn Labeler>),
    RowOrder(RowOrder),
    ColumnOrder(ColumnOrder),
}

impl OptionValue {
    fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "boolean",
            OptionValue::Int(_) => "integer",
            OptionValue::Labeler(_) => "labeler",
            OptionValue::RowOrder(_) => "row order",
            OptionValue::ColumnOrder(_) => "column order",
        }
    }
}

impl From<bool> for OptionValue { fn from(v : bool) -> OptionValue { OptionValue::Bool(v) } }
impl From<i64> for OptionValue { fn from(v : i64) -> OptionValue { OptionValue::Int(v) } }
impl From<RowOrder> for OptionValue { fn from(v : RowOrder) -> OptionValue { OptionValue::RowOrder(v) } }
impl From<ColumnOrder> for OptionValue { fn from(v : ColumnOrder) -> OptionValue { OptionValue::ColumnOrder(v) } }

impl Default for WriterOptions {
    fn default() -> WriterOptions {
        WriterOptions{
            skip_trivial_constraints     : false,
            symbolic_solver_labels       : false,
            output_fixed_variable_bounds : false,
            include_all_variable_bounds  : false,
            labeler                      : None,
            file_determinism             : FileDeterminism::default(),
            row_order                    : None,
            column_order                 : None,
            force_objective_constant     : false,
        }
    }
}

impl std::fmt::Debug for WriterOptions {
    fn fmt(&self, f : &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterOptions")
            .field("skip_trivial_constraints",&self.skip_trivial_constraints)
            .field("symbolic_solver_labels",&self.symbolic_solver_labels)
            .field("output_fixed_variable_bounds",&self.output_fixed_variable_bounds)
            .field("include_all_variable_bounds",&self.include_all_variable_bounds)
            .field("labeler",&self.labeler.as_ref().map(|_| "<labeler>"))
            .field("file_determinism",&self.file_determinism)
            .field("row_order",&self.row_order.as_ref().map(|o| o.len()))
            .field("column_order",&self.column_order.as_ref().map(|o| o.len()))
            .field("force_objective_constant",&self.force_objective_constant)
            .finish()
    }
}

impl WriterOptions {
    pub fn new() -> WriterOptions { Default::default() }

    pub fn with_skip_trivial_constraints(self, v : bool) -> WriterOptions { WriterOptions{ skip_trivial_constraints : v, ..self } }
    pub fn with_symbolic_solver_labels(self, v : bool) -> WriterOptions { WriterOptions{ symbolic_solver_labels : v, ..self } }
    pub fn with_output_fixed_variable_bounds(self, v : bool) -> WriterOptions { WriterOptions{ output_fixed_variable_bounds : v, ..self } }
    pub fn with_include_all_variable_bounds(self, v : bool) -> WriterOptions { WriterOptions{ include_all_variable_bounds : v, ..self } }
    pub fn with_labeler<L>(self, l : L) -> WriterOptions where L : Labeler+'static { WriterOptions{ labeler : Some(Box::new(l)), ..self } }
    pub fn with_file_determinism(self, v : FileDeterminism) -> WriterOptions { WriterOptions{ file_determinism : v, ..self } }
    pub fn with_row_order(self, v : RowOrder) -> WriterOptions { WriterOptions{ row_order : Some(v), ..self } }
    pub fn with_column_order(self, v : ColumnOrder) -> WriterOptions { WriterOptions{ column_order : Some(v), ..self } }
    pub fn with_force_objective_constant(self, v : bool) -> WriterOptions { WriterOptions{ force_objective_constant : v, ..self } }

    /// Build options from a string-keyed list.
    ///
    /// # Arguments
    /// - `pairs` Option name and value pairs. Recognized names are the field names of
    ///   [WriterOptions]. `file_determinism` takes an integer 0, 1 or 2.
    ///
    /// # Returns
    /// The options, or a [ConfigError] if any key is unknown (all unknown keys are reported
    /// together) or a value has the wrong type.
    pub fn from_pairs<I,S>(pairs : I) -> Result<WriterOptions,ConfigError>
        where
            I : IntoIterator<Item = (S,OptionValue)>,
            S : AsRef<str>
    {
        let mut res = WriterOptions::default();
        let mut unknown = Vec::new();
        for (k,v) in pairs {
            let key = k.as_ref();
            let invalid = |expected : &'static str| ConfigError::InvalidValue{ key : key.to_string(), expected };
            match (key,v) {
                ("skip_trivial_constraints",OptionValue::Bool(b))     => res.skip_trivial_constraints = b,
                ("symbolic_solver_labels",OptionValue::Bool(b))       => res.symbolic_solver_labels = b,
                ("output_fixed_variable_bounds",OptionValue::Bool(b)) => res.output_fixed_variable_bounds = b,
                ("include_all_variable_bounds",OptionValue::Bool(b))  => res.include_all_variable_bounds = b,
                ("force_objective_constant",OptionValue::Bool(b))     => res.force_objective_constant = b,
                ("file_determinism",OptionValue::Int(i))              => res.file_determinism = FileDeterminism::try_from(i)?,
                ("labeler",OptionValue::Labeler(l))                   => res.labeler = Some(l),
                ("row_order",OptionValue::RowOrder(o))                => res.row_order = Some(o),
                ("column_order",OptionValue::ColumnOrder(o))          => res.column_order = Some(o),
                ("skip_trivial_constraints"|"symbolic_solver_labels"|"output_fixed_variable_bounds"|
                 "include_all_variable_bounds"|"force_objective_constant",v) => {
                    tracing::debug!(component = "writer", option = key, got = v.type_name(), "ill-typed option");
                    return Err(invalid("boolean"));
                },
                ("file_determinism",_) => return Err(invalid("integer")),
                ("labeler",_)          => return Err(invalid("labeler")),
                ("row_order",_)        => return Err(invalid("row order")),
                ("column_order",_)     => return Err(invalid("column order")),
                (other,_) => unknown.push(other.to_string()),
            }
        }
        if ! unknown.is_empty() {
            unknown.sort();
            return Err(ConfigError::UnrecognizedOptions(unknown));
        }
        Ok(res)
    }

    /// Take the labeler out of the options, resolving `symbolic_solver_labels`. The default is
    /// a [NumericLabeler] with prefix `x`.
    pub(crate) fn take_labeler(&mut self) -> Result<Box<dyn Labeler>,ConfigError> {
        match (self.symbolic_solver_labels,self.labeler.take()) {
            (true,Some(_)) => Err(ConfigError::ConflictingLabelers),
            (true,None)    => Ok(Box::new(TextLabeler::new())),
            (false,Some(l)) => Ok(l),
            (false,None)   => Ok(Box::new(NumericLabeler::new("x"))),
        }
    }
}
