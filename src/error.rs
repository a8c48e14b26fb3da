//! Error types for model construction, labeling and problem writing.

use thiserror::Error;

/// Errors raised while building or mutating a [crate::Model].
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid bounds for `{name}`: lb={lb} > ub={ub}")]
    InvalidBounds { name : String, lb : f64, ub : f64 },
    #[error("unknown variable id {0}")]
    UnknownVar(usize),
    #[error("unknown constraint id {0}")]
    UnknownConstraint(usize),
    #[error("unknown objective id {0}")]
    UnknownObjective(usize),
    #[error("unknown SOS constraint id {0}")]
    UnknownSos(usize),
    #[error("unknown block id {0}")]
    UnknownBlock(usize),
    #[error("non-finite bound on constraint `{0}`")]
    NonFiniteBound(String),
}

/// Errors raised by the [crate::symbol::SymbolMap].
#[derive(Debug, Error)]
pub enum SymbolError {
    #[error("label `{label}` is already used by another entity")]
    AliasClash { label : String },
}

/// Classification failure for contexts that only accept linear forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DegreeError {
    #[error("expression has quadratic terms")]
    Quadratic,
    #[error("expression has nonlinear terms")]
    Nonlinear,
}

/// Option errors. These are always raised before any output is produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unrecognized writer options: {}", .0.join(", "))]
    UnrecognizedOptions(Vec<String>),
    #[error("option `{key}` expects a {expected} value")]
    InvalidValue { key : String, expected : &'static str },
    #[error("using both the 'symbolic_solver_labels' and 'labeler' options is forbidden")]
    ConflictingLabelers,
    #[error("invalid file determinism level {0}, expected 0, 1 or 2")]
    InvalidDeterminism(i64),
    #[error("unknown problem format `{0}`")]
    UnknownFormat(String),
    #[error("{axis} order does not rank `{name}`")]
    MissingOrder { axis : &'static str, name : String },
}

/// Errors produced while writing a problem file.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot write legal {format} file: no objective defined for model `{model}`")]
    NoObjective { format : &'static str, model : String },
    #[error("more than one active objective defined for model `{model}`; cannot write legal {format} file\nObjectives: {}", .objectives.join(" "))]
    MultipleObjectives { format : &'static str, model : String, objectives : Vec<String> },
    #[error("cannot write legal {format} file: {kind} `{name}` has quadratic terms")]
    Quadratic { format : &'static str, kind : &'static str, name : String },
    #[error("cannot write legal {format} file: {kind} `{name}` has nonlinear terms")]
    Nonlinear { format : &'static str, kind : &'static str, name : String },
    #[error("SOS constraint `{sos}` includes a fixed variable `{var}`; deactivate the constraint in order to proceed")]
    FixedVariableInSos { sos : String, var : String },
    #[error("solver does not support SOS level {level} constraints (`{sos}`)")]
    UnsupportedSosLevel { sos : String, level : u32 },
    #[error("binary variable `{name}` has bounds that are not 0 and 1: (lb={lb}, ub={ub})")]
    InvalidBinaryBounds { name : String, lb : f64, ub : f64 },
    #[error("encountered a fixed variable `{var}` inside an active objective or constraint expression on model `{model}`; use the 'output_fixed_variable_bounds' option to write its fixed bounds")]
    FixedVariable { var : String, model : String },
    #[error("variable `{0}` is fixed but has no value")]
    FixedWithoutValue(String),
    #[error("variable `{var}` appears in `{row}` but is not declared on an active block")]
    UndeclaredVariable { var : String, row : String },
    #[error("variable label `{0}` cannot be written in LP format, it is ambiguous with exponent notation")]
    AmbiguousLabel(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Symbol(#[from] SymbolError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
