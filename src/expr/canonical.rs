//! Canonical (sparse polynomial) representation of expressions.

use std::collections::HashMap;

use crate::error::DegreeError;
use crate::model::VarId;
use super::Expr;

/// Algebraic degree of an expression.
#[derive(Clone,Copy,Debug,PartialEq,Eq,PartialOrd,Ord)]
pub enum Degree {
    Constant,
    Linear,
    Quadratic,
    Nonlinear
}

/// Sparse canonical form of an expression: `constant + sum linear + sum quadratic`.
///
/// Linear terms keep the order in which the variables first appear in the expression.
/// Quadratic terms are keyed by an ordered pair `(i,j)` with `i <= j`. For
/// [Degree::Nonlinear] the term lists carry no meaning and are left empty.
#[derive(Clone,Debug,PartialEq)]
pub struct CanonicalRepn {
    pub constant  : f64,
    pub linear    : Vec<(VarId,f64)>,
    pub quadratic : Vec<((VarId,VarId),f64)>,
    pub degree    : Degree
}

impl CanonicalRepn {
    pub fn constant(c : f64) -> CanonicalRepn {
        CanonicalRepn{ constant : c, linear : Vec::new(), quadratic : Vec::new(), degree : Degree::Constant }
    }

    fn nonlinear() -> CanonicalRepn {
        CanonicalRepn{ constant : 0.0, linear : Vec::new(), quadratic : Vec::new(), degree : Degree::Nonlinear }
    }

    /// Return `self` if the expression is at most linear, otherwise classify why it is not.
    pub fn linear_only(&self) -> Result<&CanonicalRepn,DegreeError> {
        match self.degree {
            Degree::Constant | Degree::Linear => Ok(self),
            Degree::Quadratic => Err(DegreeError::Quadratic),
            Degree::Nonlinear => Err(DegreeError::Nonlinear),
        }
    }
}

/// Working polynomial of degree at most 2.
#[derive(Clone,Default)]
struct Poly {
    constant : f64,
    linear   : Vec<(VarId,f64)>,
    linpos   : HashMap<VarId,usize>,
    quad     : Vec<((VarId,VarId),f64)>,
    quadpos  : HashMap<(VarId,VarId),usize>,
}

impl Poly {
    fn constant(c : f64) -> Poly { Poly{ constant : c, ..Default::default() } }

    fn degree(&self) -> usize {
        if self.quad.iter().any(|t| t.1 != 0.0) { 2 }
        else if self.linear.iter().any(|t| t.1 != 0.0) { 1 }
        else { 0 }
    }

    fn add_linear(&mut self, v : VarId, c : f64) {
        if let Some(&p) = self.linpos.get(&v) {
            self.linear[p].1 += c;
        }
        else {
            self.linpos.insert(v,self.linear.len());
            self.linear.push((v,c));
        }
    }

    fn add_quad(&mut self, i : VarId, j : VarId, c : f64) {
        let key = if i <= j { (i,j) } else { (j,i) };
        if let Some(&p) = self.quadpos.get(&key) {
            self.quad[p].1 += c;
        }
        else {
            self.quadpos.insert(key,self.quad.len());
            self.quad.push((key,c));
        }
    }

    fn add_scaled(&mut self, other : &Poly, s : f64) {
        self.constant += s * other.constant;
        for &(v,c) in other.linear.iter() { self.add_linear(v,s*c); }
        for &((i,j),c) in other.quad.iter() { self.add_quad(i,j,s*c); }
    }

    /// Product of two polynomials, `None` if the result has degree above 2.
    fn mul(&self, other : &Poly) -> Option<Poly> {
        if self.degree() + other.degree() > 2 {
            return None;
        }
        let mut r = Poly::constant(self.constant * other.constant);
        for &(v,c) in self.linear.iter()  { r.add_linear(v,c*other.constant); }
        for &(v,c) in other.linear.iter() { r.add_linear(v,c*self.constant); }
        for &((i,j),c) in self.quad.iter()  { r.add_quad(i,j,c*other.constant); }
        for &((i,j),c) in other.quad.iter() { r.add_quad(i,j,c*self.constant); }
        for &(vi,ci) in self.linear.iter() {
            for &(vj,cj) in other.linear.iter() {
                r.add_quad(vi,vj,ci*cj);
            }
        }
        Some(r)
    }

    fn finish(self) -> CanonicalRepn {
        let linear : Vec<(VarId,f64)> = self.linear.into_iter().filter(|t| t.1 != 0.0).collect();
        let quadratic : Vec<((VarId,VarId),f64)> = self.quad.into_iter().filter(|t| t.1 != 0.0).collect();
        let degree =
            if ! quadratic.is_empty() { Degree::Quadratic }
            else if ! linear.is_empty() { Degree::Linear }
            else { Degree::Constant };
        CanonicalRepn{ constant : self.constant, linear, quadratic, degree }
    }
}

fn eval_poly(e : &Expr) -> Option<Poly> {
    match e {
        Expr::Const(c) => Some(Poly::constant(*c)),
        Expr::Var(v) => {
            let mut p = Poly::default();
            p.add_linear(*v,1.0);
            Some(p)
        },
        Expr::Sum(items) => {
            let mut r = Poly::default();
            for item in items.iter() {
                r.add_scaled(&eval_poly(item)?,1.0);
            }
            Some(r)
        },
        Expr::Product(items) => {
            let mut r = Poly::constant(1.0);
            for item in items.iter() {
                r = r.mul(&eval_poly(item)?)?;
            }
            Some(r)
        },
        Expr::Pow(base,p) => {
            let b = eval_poly(base)?;
            if *p == 0.0 {
                Some(Poly::constant(1.0))
            }
            else if b.degree() == 0 {
                Some(Poly::constant(b.constant.powf(*p)))
            }
            else if *p == 1.0 {
                Some(b)
            }
            else if *p == 2.0 {
                b.mul(&b)
            }
            else {
                None
            }
        },
        Expr::Func(f,arg) => {
            let a = eval_poly(arg)?;
            if a.degree() == 0 { Some(Poly::constant(f.apply(a.constant))) }
            else { None }
        }
    }
}

/// Compute the canonical representation of an expression.
///
/// This is a total function: expressions that are not polynomials of degree at most 2 are
/// classified as [Degree::Nonlinear] rather than rejected. Variables are never replaced by their
/// values, also when they are fixed.
pub fn canonicalize(e : &Expr) -> CanonicalRepn {
    match eval_poly(e) {
        Some(p) => p.finish(),
        None => CanonicalRepn::nonlinear()
    }
}

/// Compute the canonical representation and require it to be at most linear.
pub fn canonicalize_linear(e : &Expr) -> Result<CanonicalRepn,DegreeError> {
    let r = canonicalize(e);
    r.linear_only()?;
    Ok(r)
}
