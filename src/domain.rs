//! Variable domains and bounds.
//!
//! A variable has a domain type ([VarDomain]) and a pair of bounds ([Bounds]). Unbounded sides
//! are represented by `f64::NEG_INFINITY` and `f64::INFINITY`. Domains are created with a
//! builder-like logic:
//! ```
//! use probwriter::*;
//! let d = nonnegative().integer();
//! assert_eq!(d.domain, VarDomain::Integer);
//! assert_eq!(d.bounds.lower(), Some(0.0));
//! assert_eq!(d.bounds.upper(), None);
//! ```

/// Domain type of a variable.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum VarDomain {
    Continuous,
    Integer,
    Binary
}

#[derive(Clone,Copy,Debug,PartialEq)]
pub struct Bounds {
    pub lb : f64,
    pub ub : f64
}

impl Bounds {
    pub fn new(lb : f64, ub : f64) -> Bounds { Bounds{ lb, ub } }
    pub fn free() -> Bounds { Bounds{ lb : f64::NEG_INFINITY, ub : f64::INFINITY } }

    /// Return the bounds with `-0.0` replaced by `0.0` on both sides.
    pub fn normalized(&self) -> Bounds {
        Bounds{ lb : normalize_zero(self.lb), ub : normalize_zero(self.ub) }
    }

    /// Finite lower bound, `None` if unbounded below.
    pub fn lower(&self) -> Option<f64> { if self.lb.is_finite() { Some(self.lb) } else { None } }
    /// Finite upper bound, `None` if unbounded above.
    pub fn upper(&self) -> Option<f64> { if self.ub.is_finite() { Some(self.ub) } else { None } }

    pub fn is_free(&self) -> bool { self.lower().is_none() && self.upper().is_none() }
    pub fn is_valid(&self) -> bool { !(self.lb > self.ub) && !self.lb.is_nan() && !self.ub.is_nan() }
}

pub(crate) fn normalize_zero(v : f64) -> f64 { if v == 0.0 { 0.0 } else { v } }

/// A domain prototype: domain type plus bounds. Passed to [crate::Model::var].
#[derive(Clone,Copy,Debug,PartialEq)]
pub struct Domain {
    pub domain : VarDomain,
    pub bounds : Bounds
}

impl Domain {
    /// Make the domain integer, keeping the bounds.
    pub fn integer(self) -> Domain { Domain{ domain : VarDomain::Integer, ..self } }
    /// Make the domain continuous, keeping the bounds.
    pub fn continuous(self) -> Domain { Domain{ domain : VarDomain::Continuous, ..self } }
    pub fn with_bounds(self, lb : f64, ub : f64) -> Domain { Domain{ bounds : Bounds::new(lb,ub), ..self } }
}

/// Free continuous domain.
pub fn unbounded() -> Domain { Domain{ domain : VarDomain::Continuous, bounds : Bounds::free() } }
/// Continuous domain `[0,inf)`.
pub fn nonnegative() -> Domain { greater_than(0.0) }
/// Continuous domain `(-inf,0]`.
pub fn nonpositive() -> Domain { less_than(0.0) }
/// Continuous domain `[lb,inf)`.
pub fn greater_than(lb : f64) -> Domain { Domain{ domain : VarDomain::Continuous, bounds : Bounds::new(lb,f64::INFINITY) } }
/// Continuous domain `(-inf,ub]`.
pub fn less_than(ub : f64) -> Domain { Domain{ domain : VarDomain::Continuous, bounds : Bounds::new(f64::NEG_INFINITY,ub) } }
/// Continuous domain `[lb,ub]`.
pub fn bounded(lb : f64, ub : f64) -> Domain { Domain{ domain : VarDomain::Continuous, bounds : Bounds::new(lb,ub) } }
/// Binary domain, bounds `[0,1]`.
pub fn binary() -> Domain { Domain{ domain : VarDomain::Binary, bounds : Bounds::new(0.0,1.0) } }
/// Free integer domain.
pub fn integer() -> Domain { unbounded().integer() }
