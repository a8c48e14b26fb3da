//! Compile linear optimization models into MPS and CPLEX LP problem files.
//!
//! A [Model] is a tree of blocks holding variables, constraints, objectives and SOS constraints.
//! Constraint and objective bodies are symbolic expressions ([Expr]) that are brought into a
//! canonical sparse form ([CanonicalRepn]) when a problem file is written. The writers
//! ([MpsWriter], [LpWriter]) label every entity through a [SymbolMap], assemble the sparse
//! coefficient matrix and serialize it.
//!
//! ```
//! use probwriter::*;
//! let mut m = Model::new("diet");
//! let bread = m.var("bread", nonnegative()).unwrap();
//! let milk  = m.var("milk", bounded(0.0, 10.0)).unwrap();
//! let calories = m.constraint("calories", 300.0 * bread + 150.0 * milk, Relation::Ge(2000.0)).unwrap();
//! m.objective("cost", Sense::Minimize, 2.0 * bread + 3.5 * milk).unwrap();
//!
//! let mut out = Vec::new();
//! let opts = WriterOptions::new().with_symbolic_solver_labels(true);
//! let symbols = MpsWriter::new().write_to(&mut m, &mut out, &LinearOnly, opts).unwrap();
//! assert_eq!(symbols.get_object("c_l_calories_"), Some(calories.into()));
//! assert!(String::from_utf8(out).unwrap().contains(" G  c_l_calories_\n"));
//! ```

pub mod domain;
pub mod error;
pub mod expr;
pub mod model;
pub mod ordering;
pub mod symbol;
pub mod utils;
pub mod writer;

pub use domain::*;
pub use error::*;
pub use expr::*;
pub use model::*;
pub use ordering::{ColumnOrder, FileDeterminism, Ranking, RowOrder};
pub use symbol::*;
pub use writer::*;
