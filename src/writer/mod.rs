//! Problem writers.
//!
//! A [ProblemWriter] compiles a [Model] into a problem file. Two writers are provided,
//! [MpsWriter] for the free-name MPS grammar and [LpWriter] for the CPLEX LP format. Both share one
//! compile pipeline: variables are labeled in block order, the single active objective and the
//! active constraints are canonicalized and classified, constraint bodies are split into rows and
//! the returned [SymbolMap] is restricted to the variables that were actually written.
//!
//! ```
//! use probwriter::*;
//! let mut m = Model::new("small");
//! let x = m.var("x", nonnegative()).unwrap();
//! let y = m.var("y", nonnegative()).unwrap();
//! m.constraint("c", x + y, Relation::Ge(1.0)).unwrap();
//! m.objective("o", Sense::Minimize, x + 2.0 * y).unwrap();
//!
//! let mut out = Vec::new();
//! let symbols = MpsWriter::new().write_to(&mut m, &mut out, &AllCapabilities, WriterOptions::default()).unwrap();
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.starts_with("* Source: probwriter MPS Writer\nNAME small\n"));
//! assert_eq!(symbols.get_symbol(x.into()), Some("x1"));
//! ```

mod columns;
mod lp;
mod mps;
mod options;
mod pipeline;

pub use lp::LpWriter;
pub use mps::MpsWriter;
pub use options::*;

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, WriteError};
use crate::model::Model;
use crate::symbol::SymbolMap;

/// Name of the synthetic column carrying the objective constant.
pub const ONE_VAR_CONSTANT : &str = "ONE_VAR_CONSTANT";

/// Features a target solver may or may not support.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub enum Capability {
    Sos1,
    Sos2,
    QuadraticObjective,
    QuadraticConstraint,
}

/// Query interface for the features of the solver a problem file is written for.
pub trait SolverCapability {
    fn supports(&self, c : Capability) -> bool;
}

/// A solver that supports every [Capability].
#[derive(Clone,Copy,Debug,Default)]
pub struct AllCapabilities;

/// A solver for linear and mixed-integer problems with SOS constraints, but without quadratic
/// terms.
#[derive(Clone,Copy,Debug,Default)]
pub struct LinearOnly;

impl SolverCapability for AllCapabilities {
    fn supports(&self, _c : Capability) -> bool { true }
}

impl SolverCapability for LinearOnly {
    fn supports(&self, c : Capability) -> bool {
        matches!(c, Capability::Sos1 | Capability::Sos2)
    }
}

impl<F> SolverCapability for F where F : Fn(Capability) -> bool {
    fn supports(&self, c : Capability) -> bool { self(c) }
}

/// Output file formats.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum ProblemFormat {
    Mps,
    CpxLp,
}

impl ProblemFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ProblemFormat::Mps   => "mps",
            ProblemFormat::CpxLp => "lp",
        }
    }

    /// Name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ProblemFormat::Mps   => "MPS",
            ProblemFormat::CpxLp => "LP",
        }
    }
}

/// A writer that compiles a model into a problem file.
pub trait ProblemWriter {
    fn format(&self) -> ProblemFormat;

    /// Compile `model` and write the problem to `out`.
    ///
    /// The document is assembled completely before anything is written, so on error nothing
    /// reaches `out`.
    ///
    /// # Arguments
    /// - `model` The model. It is mutable only because canonical representations are cached on
    ///   its blocks.
    /// - `out` Destination.
    /// - `solver` Capabilities of the target solver.
    /// - `options` Writer options.
    ///
    /// # Returns
    /// The symbol map from entities to the labels used in the file. Variables that do not
    /// appear in the written problem are not in the map.
    fn write_to(&self, model : &mut Model, out : &mut dyn Write, solver : &dyn SolverCapability, options : WriterOptions) -> Result<SymbolMap,WriteError>;

    /// Compile `model` and write the problem to a file.
    ///
    /// # Arguments
    /// - `filename` Output file. If `None`, `<model name>.<extension>` in the current directory
    ///   is used.
    ///
    /// # Returns
    /// The path written and the symbol map, see [ProblemWriter::write_to].
    fn write(&self, model : &mut Model, filename : Option<&Path>, solver : &dyn SolverCapability, options : WriterOptions) -> Result<(PathBuf,SymbolMap),WriteError> {
        let path = match filename {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(format!("{}.{}",model.name(),self.format().extension()))
        };
        let mut buf = Vec::new();
        let symbols = self.write_to(model,&mut buf,solver,options)?;
        let mut f = std::io::BufWriter::new(std::fs::File::create(&path)?);
        f.write_all(buf.as_slice())?;
        f.flush()?;
        tracing::debug!(component = "writer", operation = "write", path = %path.display(), bytes = buf.len(), "Wrote problem file");
        Ok((path,symbols))
    }
}

/// Constructor of a boxed writer.
pub type WriterFactory = fn() -> Box<dyn ProblemWriter>;

/// Explicit registry mapping format names to writers.
///
/// ```
/// use probwriter::*;
/// let reg = WriterRegistry::with_defaults();
/// assert_eq!(reg.get("cpxlp").unwrap().format(), ProblemFormat::CpxLp);
/// assert!(reg.get("nl").is_err());
/// ```
#[derive(Clone,Default)]
pub struct WriterRegistry {
    writers : HashMap<String,WriterFactory>
}

impl WriterRegistry {
    pub fn new() -> WriterRegistry { Default::default() }

    /// Registry with the `mps`, `lp` and `cpxlp` writers.
    pub fn with_defaults() -> WriterRegistry {
        let mut r = WriterRegistry::new();
        r.register("mps",|| Box::new(MpsWriter::new()));
        r.register("lp",|| Box::new(LpWriter::new()));
        r.register("cpxlp",|| Box::new(LpWriter::new()));
        r
    }

    /// Register a writer under `name`, replacing any writer registered under the same name.
    pub fn register(&mut self, name : &str, f : WriterFactory) {
        self.writers.insert(name.to_string(),f);
    }

    pub fn get(&self, name : &str) -> Result<Box<dyn ProblemWriter>,ConfigError> {
        self.writers.get(name).map(|f| f()).ok_or_else(|| ConfigError::UnknownFormat(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut res : Vec<&str> = self.writers.keys().map(|k| k.as_str()).collect();
        res.sort();
        res
    }
}
