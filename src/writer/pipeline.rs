//! Compile pass shared by the writers: ordering, objective validation, canonicalization, row
//! classification, labeling and symbol map pruning.

use crate::error::{DegreeError, WriteError};
use crate::expr::{CanonicalRepn, Degree};
use crate::model::{ComponentId, ConId, ConstraintData, Model, ObjId, SosId, VarId};
use crate::ordering::{apply_order, block_order, order_data};
use crate::symbol::{Labeler, SymbolMap, DEFAULT_OBJECTIVE};
use crate::writer::{Capability, SolverCapability, WriterOptions};
use super::columns::ColumnAccumulator;

/// Everything the serializers need, in output order.
pub(crate) struct Prepared {
    /// Variables in block order. Labels are created in this order.
    pub variables   : Vec<VarId>,
    /// Variables in column order.
    pub columns     : Vec<VarId>,
    pub objective   : ObjId,
    pub obj_repn    : CanonicalRepn,
    /// Constraints in row order. Constraints with constant bodies are already removed if they
    /// are to be skipped.
    pub constraints : Vec<(ConId,CanonicalRepn)>,
    pub sos         : Vec<SosId>,
}

/// Collect and canonicalize everything that is written, and validate the objective count.
///
/// Nothing is labeled here; a failure leaves no trace except refreshed repn caches.
pub(crate) fn prepare(model : &mut Model, options : &WriterOptions, format : &'static str) -> Result<Prepared,WriteError> {
    let det = options.file_determinism;
    let blocks = block_order(model,det);

    let mut variables = Vec::new();
    let mut objectives = Vec::new();
    let mut cons = Vec::new();
    let mut sos = Vec::new();
    for &b in blocks.iter() {
        let blk = model.block(b)?;
        variables.extend(order_data(model,blk.variables(),det));
        objectives.extend(order_data(model,&model.active_objectives_of(b).collect::<Vec<ObjId>>(),det));
        cons.extend(order_data(model,&model.active_constraints_of(b).collect::<Vec<ConId>>(),det));
        sos.extend(order_data(model,&model.active_sos_of(b).collect::<Vec<SosId>>(),det));
    }

    let objective = match objectives.as_slice() {
        [] => return Err(WriteError::NoObjective{ format, model : model.name().to_string() }),
        [o] => *o,
        _ => return Err(WriteError::MultipleObjectives{
            format,
            model : model.name().to_string(),
            objectives : objectives.iter().map(|o| model.display_name((*o).into())).collect() })
    };

    let mut columns = variables.clone();
    if let Some(order) = &options.column_order {
        apply_order(model,columns.as_mut_slice(),order,"column")?;
    }
    if let Some(order) = &options.row_order {
        apply_order(model,cons.as_mut_slice(),order,"row")?;
    }

    let obj_repn = model.canonical_repn(objective.into())?;
    let mut constraints = Vec::with_capacity(cons.len());
    let mut skipped = 0usize;
    for c in cons {
        let repn = model.canonical_repn(c.into())?;
        if repn.degree == Degree::Constant && options.skip_trivial_constraints {
            skipped += 1;
            continue;
        }
        constraints.push((c,repn));
    }

    tracing::debug!(
        component = "writer",
        operation = "prepare",
        format,
        blocks = blocks.len(),
        variables = variables.len(),
        constraints = constraints.len(),
        skipped_trivial = skipped,
        sos = sos.len(),
        "Prepared model");

    Ok(Prepared{ variables, columns, objective, obj_repn, constraints, sos })
}

/// Fail unless `repn` has a degree the target accepts. Quadratic terms are accepted only when
/// `quadratic` is given and the solver supports it.
pub(crate) fn check_degree(model : &Model,
                           id : ComponentId,
                           repn : &CanonicalRepn,
                           format : &'static str,
                           solver : &dyn SolverCapability,
                           quadratic : Option<Capability>) -> Result<(),WriteError> {
    let kind = match id { ComponentId::Objective(_) => "objective", _ => "constraint" };
    match repn.linear_only() {
        Ok(_) => Ok(()),
        Err(DegreeError::Quadratic) if quadratic.map(|c| solver.supports(c)).unwrap_or(false) => Ok(()),
        Err(DegreeError::Quadratic) => Err(WriteError::Quadratic{ format, kind, name : model.display_name(id) }),
        Err(DegreeError::Nonlinear) => Err(WriteError::Nonlinear{ format, kind, name : model.display_name(id) }),
    }
}

/// Row sense
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub(crate) enum RowKind {
    Equal,
    Greater,
    Less,
}

impl RowKind {
    pub fn mps_marker(&self) -> &'static str {
        match self {
            RowKind::Equal   => "E",
            RowKind::Greater => "G",
            RowKind::Less    => "L",
        }
    }
}

/// One output row derived from a constraint.
#[derive(Clone,Debug,PartialEq)]
pub(crate) struct RowSpec {
    pub label : String,
    pub kind  : RowKind,
    /// The bound of the row, not yet net of the body constant.
    pub bound : f64,
}

/// Split a constraint into rows: one row for an equality or a one-sided constraint, a lower and
/// an upper row for a ranged constraint.
pub(crate) fn constraint_rows(cd : &ConstraintData, symbol : &str) -> Vec<RowSpec> {
    if cd.equality {
        let bound = cd.lower.or(cd.upper).unwrap_or(0.0);
        return vec![RowSpec{ label : format!("c_e_{}_",symbol), kind : RowKind::Equal, bound }];
    }
    let ranged = cd.lower.is_some() && cd.upper.is_some();
    let mut res = Vec::with_capacity(2);
    if let Some(lb) = cd.lower {
        let label = if ranged { format!("r_l_{}_",symbol) } else { format!("c_l_{}_",symbol) };
        res.push(RowSpec{ label, kind : RowKind::Greater, bound : lb });
    }
    if let Some(ub) = cd.upper {
        let label = if ranged { format!("r_u_{}_",symbol) } else { format!("c_u_{}_",symbol) };
        res.push(RowSpec{ label, kind : RowKind::Less, bound : ub });
    }
    res
}

/// Create symbols for all variables, in block order.
pub(crate) fn label_variables(model : &Model, prep : &Prepared, symbols : &mut SymbolMap, labeler : &mut dyn Labeler) {
    for v in prep.variables.iter() {
        symbols.create_symbol((*v).into(),model,labeler);
    }
}

/// Create the objective symbol and its default alias.
pub(crate) fn label_objective(model : &Model, prep : &Prepared, symbols : &mut SymbolMap, labeler : &mut dyn Labeler) -> Result<String,WriteError> {
    let label = symbols.create_symbol(prep.objective.into(),model,labeler);
    symbols.alias(prep.objective.into(),DEFAULT_OBJECTIVE)?;
    Ok(label)
}

/// Symbol of a variable that was labeled by [label_variables].
pub(crate) fn var_symbol<'a>(symbols : &'a SymbolMap, model : &Model, v : VarId, row : &str) -> Result<&'a str,WriteError> {
    symbols.get_symbol(v.into())
        .ok_or_else(|| WriteError::UndeclaredVariable{ var : model.display_name(v.into()), row : row.to_string() })
}

/// Append the terms of `repn` to the accumulator under `row` and return the constant.
pub(crate) fn extract_row(model : &Model, acc : &mut ColumnAccumulator, id : ComponentId, row : &str, repn : &CanonicalRepn) -> Result<f64,WriteError> {
    acc.extract(row,repn)
        .map_err(|v| WriteError::UndeclaredVariable{ var : model.display_name(v.into()), row : model.display_name(id) })
}

/// Remove every variable not accepted by `referenced` from the symbol map.
pub(crate) fn prune_unreferenced<F>(symbols : &mut SymbolMap, variables : &[VarId], referenced : F) -> usize where F : Fn(VarId) -> bool {
    let mut n = 0;
    for v in variables.iter().filter(|v| ! referenced(**v)) {
        if symbols.remove((*v).into()).is_some() { n += 1; }
    }
    n
}
