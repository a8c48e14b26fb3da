//! Symbolic expressions.
//!
//! An [Expr] is a tree over a closed set of node kinds: constants, variable references, sums,
//! products, powers and intrinsic functions. Expressions are built with the operator overloads or
//! with the helper functions in this module:
//!
//! ```
//! use probwriter::*;
//! let mut m = Model::new("M");
//! let x = m.var("x", nonnegative()).unwrap();
//! let y = m.var("y", unbounded()).unwrap();
//! let e = 2.0 * x + y - 1.0;
//! let r = canonicalize(&e);
//! assert_eq!(r.degree, Degree::Linear);
//! assert_eq!(r.constant, -1.0);
//! ```
//!
//! Expressions are turned into a [CanonicalRepn] by [canonicalize], which classifies the degree
//! and collects the sparse coefficients.

mod canonical;

pub use canonical::*;

use crate::model::VarId;

/// Intrinsic nonlinear functions.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum Func {
    Exp,
    Log,
    Sin,
    Cos,
    Sqrt,
    Abs
}

impl Func {
    pub fn apply(&self, v : f64) -> f64 {
        match self {
            Func::Exp  => v.exp(),
            Func::Log  => v.ln(),
            Func::Sin  => v.sin(),
            Func::Cos  => v.cos(),
            Func::Sqrt => v.sqrt(),
            Func::Abs  => v.abs(),
        }
    }
}

/// A symbolic expression node.
#[derive(Clone,Debug,PartialEq)]
pub enum Expr {
    Const(f64),
    Var(VarId),
    Sum(Vec<Expr>),
    Product(Vec<Expr>),
    Pow(Box<Expr>,f64),
    Func(Func,Box<Expr>)
}

/// Anything that can be turned into an [Expr].
pub trait IntoExpr {
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr   { fn into_expr(self) -> Expr { self } }
impl IntoExpr for &Expr  { fn into_expr(self) -> Expr { self.clone() } }
impl IntoExpr for VarId  { fn into_expr(self) -> Expr { Expr::Var(self) } }
impl IntoExpr for &VarId { fn into_expr(self) -> Expr { Expr::Var(*self) } }
impl IntoExpr for f64    { fn into_expr(self) -> Expr { Expr::Const(self) } }

impl From<VarId> for Expr { fn from(v : VarId) -> Expr { Expr::Var(v) } }
impl From<f64> for Expr { fn from(v : f64) -> Expr { Expr::Const(v) } }

impl Expr {
    /// Add two expressions. Nested sums are flattened.
    pub fn add<E>(self, rhs : E) -> Expr where E : IntoExpr {
        let rhs = rhs.into_expr();
        match (self,rhs) {
            (Expr::Sum(mut l),Expr::Sum(r)) => { l.extend(r); Expr::Sum(l) },
            (Expr::Sum(mut l),r) => { l.push(r); Expr::Sum(l) },
            (l,Expr::Sum(mut r)) => { r.insert(0,l); Expr::Sum(r) },
            (l,r) => Expr::Sum(vec![l,r])
        }
    }

    /// Multiply two expressions. Nested products are flattened.
    pub fn mul<E>(self, rhs : E) -> Expr where E : IntoExpr {
        let rhs = rhs.into_expr();
        match (self,rhs) {
            (Expr::Product(mut l),Expr::Product(r)) => { l.extend(r); Expr::Product(l) },
            (Expr::Product(mut l),r) => { l.push(r); Expr::Product(l) },
            (l,Expr::Product(mut r)) => { r.insert(0,l); Expr::Product(r) },
            (l,r) => Expr::Product(vec![l,r])
        }
    }

    pub fn sub<E>(self, rhs : E) -> Expr where E : IntoExpr {
        self.add(rhs.into_expr().neg())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn neg(self) -> Expr {
        match self {
            Expr::Const(c) => Expr::Const(-c),
            e => Expr::Const(-1.0).mul(e)
        }
    }

    pub fn pow(self, p : f64) -> Expr { Expr::Pow(Box::new(self),p) }

    pub fn apply(self, f : Func) -> Expr { Expr::Func(f,Box::new(self)) }
}

/// Constant expression.
pub fn constant(v : f64) -> Expr { Expr::Const(v) }

/// Sum of a sequence of expressions. The empty sum is the constant 0.
pub fn sum<I,E>(items : I) -> Expr where I : IntoIterator<Item = E>, E : IntoExpr {
    Expr::Sum(items.into_iter().map(|e| e.into_expr()).collect())
}

/// Inner product of variables and coefficients, `sum_i cof[i]*x[i]`.
pub fn dot(vars : &[VarId], cof : &[f64]) -> Expr {
    Expr::Sum(vars.iter().zip(cof.iter()).map(|(&v,&c)| Expr::Product(vec![Expr::Const(c),Expr::Var(v)])).collect())
}

pub fn exp<E>(e : E) -> Expr where E : IntoExpr { e.into_expr().apply(Func::Exp) }
pub fn log<E>(e : E) -> Expr where E : IntoExpr { e.into_expr().apply(Func::Log) }
pub fn sin<E>(e : E) -> Expr where E : IntoExpr { e.into_expr().apply(Func::Sin) }
pub fn cos<E>(e : E) -> Expr where E : IntoExpr { e.into_expr().apply(Func::Cos) }
pub fn sqrt<E>(e : E) -> Expr where E : IntoExpr { e.into_expr().apply(Func::Sqrt) }
pub fn abs<E>(e : E) -> Expr where E : IntoExpr { e.into_expr().apply(Func::Abs) }

macro_rules! impl_binop {
    ($tr:ident, $f:ident, $lhs:ty) => {
        impl<R> std::ops::$tr<R> for $lhs where R : IntoExpr {
            type Output = Expr;
            fn $f(self, rhs : R) -> Expr { self.into_expr().$f(rhs) }
        }
    }
}

impl_binop!(Add,add,Expr);
impl_binop!(Sub,sub,Expr);
impl_binop!(Mul,mul,Expr);
impl_binop!(Add,add,VarId);
impl_binop!(Sub,sub,VarId);
impl_binop!(Mul,mul,VarId);

impl std::ops::Add<Expr> for f64 { type Output = Expr; fn add(self, rhs : Expr) -> Expr { Expr::Const(self).add(rhs) } }
impl std::ops::Sub<Expr> for f64 { type Output = Expr; fn sub(self, rhs : Expr) -> Expr { Expr::Const(self).sub(rhs) } }
impl std::ops::Mul<Expr> for f64 { type Output = Expr; fn mul(self, rhs : Expr) -> Expr { Expr::Const(self).mul(rhs) } }
impl std::ops::Add<VarId> for f64 { type Output = Expr; fn add(self, rhs : VarId) -> Expr { Expr::Const(self).add(rhs) } }
impl std::ops::Sub<VarId> for f64 { type Output = Expr; fn sub(self, rhs : VarId) -> Expr { Expr::Const(self).sub(rhs) } }
impl std::ops::Mul<VarId> for f64 { type Output = Expr; fn mul(self, rhs : VarId) -> Expr { Expr::Const(self).mul(rhs) } }

impl std::ops::Neg for Expr { type Output = Expr; fn neg(self) -> Expr { Expr::neg(self) } }
impl std::ops::Neg for VarId { type Output = Expr; fn neg(self) -> Expr { Expr::Var(self).neg() } }
