//! CPLEX LP writer.
//!
//! Objective and constraint rows are written term by term, linear terms sorted by label (or by
//! column order, if one is given). Quadratic terms are accepted when the solver supports them and
//! are written in bracket form. The objective constant is carried by the `ONE_VAR_CONSTANT`
//! variable, which is pinned to 1 by a dedicated equality row.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use itertools::Itertools;

use crate::domain::{normalize_zero, VarDomain};
use crate::error::WriteError;
use crate::expr::{CanonicalRepn, Degree};
use crate::model::{ComponentId, Model, Sense, VarId};
use crate::symbol::{Labeler, SymbolMap};
use crate::utils::fmt::{g17, g17_signed};
use super::pipeline::*;
use super::{Capability, ProblemFormat, ProblemWriter, SolverCapability, WriterOptions, ONE_VAR_CONSTANT};

const FORMAT : &str = "LP";

/// Writer for CPLEX LP files.
#[derive(Clone,Copy,Debug,Default)]
pub struct LpWriter;

impl LpWriter {
    pub fn new() -> LpWriter { LpWriter }
}

impl ProblemWriter for LpWriter {
    fn format(&self) -> ProblemFormat { ProblemFormat::CpxLp }

    fn write_to(&self, model : &mut Model, out : &mut dyn Write, solver : &dyn SolverCapability, options : WriterOptions) -> Result<SymbolMap,WriteError> {
        let mut options = options;
        let mut labeler = options.take_labeler()?;
        let prep = prepare(model,&options,FORMAT)?;
        let (doc,symbols) = compile(model,&prep,solver,&options,labeler.as_mut())?;
        out.write_all(doc.as_slice())?;
        Ok(symbols)
    }
}

/// Writes the terms of one expression and tracks referenced variables.
struct TermWriter<'a> {
    model      : &'a Model,
    symbols    : &'a SymbolMap,
    /// Column positions, present only if an explicit column order is used.
    column_pos : Option<HashMap<VarId,usize>>,
    referenced : HashSet<VarId>,
}

impl TermWriter<'_> {
    fn label(&self, v : VarId, owner : ComponentId) -> Result<&str,WriteError> {
        self.symbols.get_symbol(v.into())
            .ok_or_else(|| WriteError::UndeclaredVariable{ var : self.model.display_name(v.into()), row : self.model.display_name(owner) })
    }

    /// Sort key of a variable: its column position if a column order is given, otherwise its
    /// label.
    fn key(&self, v : VarId, owner : ComponentId) -> Result<(usize,String),WriteError> {
        match &self.column_pos {
            Some(pos) => Ok((pos.get(&v).copied().unwrap_or(usize::MAX),String::new())),
            None => Ok((0,self.label(v,owner)?.to_string()))
        }
    }

    /// Write linear and quadratic terms. Quadratic coefficients of objectives are doubled and
    /// the bracket is divided by 2.
    fn write(&mut self, doc : &mut Vec<u8>, repn : &CanonicalRepn, owner : ComponentId, is_objective : bool) -> Result<(),WriteError> {
        let mut linear = Vec::with_capacity(repn.linear.len());
        for (v,c) in repn.linear.iter() {
            self.referenced.insert(*v);
            linear.push((self.key(*v,owner)?,*v,*c));
        }
        for (_,v,c) in linear.into_iter().sorted_by(|a,b| a.0.cmp(&b.0)) {
            writeln!(doc,"{} {}",g17_signed(c),self.label(v,owner)?)?;
        }
        if repn.linear.is_empty() && repn.quadratic.is_empty() && ! is_objective {
            writeln!(doc,"{} {}",g17_signed(0.0),ONE_VAR_CONSTANT)?;
        }

        if repn.degree == Degree::Quadratic {
            let mut quad = Vec::with_capacity(repn.quadratic.len());
            for ((i,j),c) in repn.quadratic.iter() {
                self.referenced.insert(*i);
                self.referenced.insert(*j);
                quad.push(((self.key(*i,owner)?,self.key(*j,owner)?),*i,*j,*c));
            }
            writeln!(doc,"+ [")?;
            for (_,i,j,c) in quad.into_iter().sorted_by(|a,b| a.0.cmp(&b.0)) {
                let c = if is_objective { 2.0 * c } else { c };
                if i == j {
                    writeln!(doc,"{} {} ^ 2",g17_signed(c),self.label(i,owner)?)?;
                }
                else {
                    writeln!(doc,"{} {} * {}",g17_signed(c),self.label(i,owner)?,self.label(j,owner)?)?;
                }
            }
            if is_objective { writeln!(doc,"] / 2")?; }
            else { writeln!(doc,"]")?; }
        }
        Ok(())
    }
}

fn compile(model : &Model,
           prep : &Prepared,
           solver : &dyn SolverCapability,
           options : &WriterOptions,
           labeler : &mut dyn Labeler) -> Result<(Vec<u8>,SymbolMap),WriteError> {
    let mut symbols = SymbolMap::new();
    label_variables(model,prep,&mut symbols,labeler);
    let objective = model.objective_data(prep.objective)?;
    let obj_label = label_objective(model,prep,&mut symbols,labeler)?;
    check_degree(model,prep.objective.into(),&prep.obj_repn,FORMAT,solver,Some(Capability::QuadraticObjective))?;

    // Constraint symbols are created up front so that the term writer can borrow the map.
    let mut rows = Vec::with_capacity(prep.constraints.len());
    for (c,repn) in prep.constraints.iter() {
        check_degree(model,(*c).into(),repn,FORMAT,solver,Some(Capability::QuadraticConstraint))?;
        let con_symbol = symbols.create_symbol((*c).into(),model,labeler);
        let mut specs = constraint_rows(model.constraint_data(*c)?,con_symbol.as_str());
        for r in specs.iter_mut() {
            r.label = symbols.alias_unique((*c).into(),r.label.as_str());
        }
        rows.push((*c,repn,specs));
    }
    let mut sos_labels = Vec::with_capacity(prep.sos.len());
    for s in prep.sos.iter() {
        sos_labels.push(symbols.create_symbol((*s).into(),model,labeler));
    }

    let mut terms = TermWriter{
        model,
        symbols : &symbols,
        column_pos : options.column_order.as_ref().map(|_| prep.columns.iter().enumerate().map(|(i,v)| (*v,i)).collect()),
        referenced : HashSet::new(),
    };

    let mut doc = Vec::new();
    writeln!(doc,"\\* Source probwriter model name={} *\\",model.name())?;
    writeln!(doc)?;
    writeln!(doc,"{} ",match objective.sense { Sense::Minimize => "min", Sense::Maximize => "max" })?;
    writeln!(doc,"{}:",obj_label)?;
    terms.write(&mut doc,&prep.obj_repn,prep.objective.into(),true)?;
    if prep.obj_repn.degree == Degree::Constant {
        tracing::warn!(
            component = "lp",
            objective = %model.display_name(prep.objective.into()),
            "Constant objective detected, replacing with a placeholder to prevent solver failure");
    }
    if options.force_objective_constant || prep.obj_repn.degree == Degree::Constant || prep.obj_repn.constant != 0.0 {
        writeln!(doc,"{} {}",g17_signed(prep.obj_repn.constant),ONE_VAR_CONSTANT)?;
    }

    writeln!(doc)?;
    writeln!(doc,"s.t.")?;
    writeln!(doc)?;
    if rows.is_empty() {
        tracing::warn!(component = "lp", model = model.name(), "Empty constraint block written in LP format, solver may error");
    }
    for (c,repn,specs) in rows.iter() {
        for r in specs.iter() {
            writeln!(doc,"{}:",r.label)?;
            terms.write(&mut doc,repn,(*c).into(),false)?;
            let rhs = g17(normalize_zero(r.bound - repn.constant));
            tracing::trace!(component = "lp", row = r.label.as_str(), rhs = r.bound - repn.constant, "Row");
            match r.kind {
                RowKind::Equal   => { writeln!(doc,"= {}",rhs)?; writeln!(doc)?; },
                RowKind::Greater => { writeln!(doc,">= {}",rhs)?; writeln!(doc)?; },
                RowKind::Less    => { writeln!(doc,"<= {}",rhs)?; writeln!(doc)?; },
            }
        }
    }
    writeln!(doc,"c_e_{}: ",ONE_VAR_CONSTANT)?;
    writeln!(doc,"{} = 1.0",ONE_VAR_CONSTANT)?;
    writeln!(doc)?;

    let mut referenced = terms.referenced;

    let mut sos_doc = Vec::new();
    for (s,label) in prep.sos.iter().zip(sos_labels.iter()) {
        let sd = model.sos_data(*s)?;
        let supported = match sd.level {
            1 => solver.supports(Capability::Sos1),
            2 => solver.supports(Capability::Sos2),
            _ => false
        };
        if ! supported {
            return Err(WriteError::UnsupportedSosLevel{ sos : model.display_name((*s).into()), level : sd.level });
        }
        if sd.items.is_empty() { continue; }
        if sos_doc.is_empty() {
            writeln!(sos_doc,"SOS")?;
        }
        writeln!(sos_doc,"{}: S{}::",label,sd.level)?;
        for (v,w) in sd.items.iter() {
            if model.var_data(*v)?.fixed {
                return Err(WriteError::FixedVariableInSos{ sos : model.display_name((*s).into()), var : model.display_name((*v).into()) });
            }
            referenced.insert(*v);
            writeln!(sos_doc,"{}:{}",var_symbol(&symbols,model,*v,label.as_str())?,g17(*w))?;
        }
    }

    writeln!(doc,"bounds")?;
    let mut general = Vec::new();
    let mut binary = Vec::new();
    for v in prep.columns.iter() {
        if ! (options.include_all_variable_bounds || referenced.contains(v)) {
            continue;
        }
        let vd = model.var_data(*v)?;
        let label = var_symbol(&symbols,model,*v,"bounds")?;
        let (lb,ub) =
            if vd.fixed {
                if ! options.output_fixed_variable_bounds {
                    return Err(WriteError::FixedVariable{ var : model.display_name((*v).into()), model : model.name().to_string() });
                }
                let value = vd.value.ok_or_else(|| WriteError::FixedWithoutValue(model.display_name((*v).into())))?;
                (Some(normalize_zero(value)),Some(normalize_zero(value)))
            }
            else {
                let b = vd.bounds.normalized();
                (b.lower(),b.upper())
            };
        match vd.domain {
            VarDomain::Integer    => general.push(label),
            VarDomain::Binary     => binary.push(label),
            VarDomain::Continuous => {}
        }
        if label == "e" {
            return Err(WriteError::AmbiguousLabel(label.to_string()));
        }
        write!(doc,"   ")?;
        match lb {
            Some(lb) => write!(doc,"{} <= ",g17(lb))?,
            None => write!(doc," -inf <= ")?
        }
        write!(doc,"{}",label)?;
        match ub {
            Some(ub) => writeln!(doc," <= {}",g17(ub))?,
            None => writeln!(doc," <= +inf")?
        }
    }
    if ! general.is_empty() {
        writeln!(doc,"general")?;
        for l in general.iter() { writeln!(doc,"  {}",l)?; }
    }
    if ! binary.is_empty() {
        writeln!(doc,"binary")?;
        for l in binary.iter() { writeln!(doc,"  {}",l)?; }
    }
    doc.extend_from_slice(sos_doc.as_slice());
    writeln!(doc,"end")?;

    let pruned = prune_unreferenced(&mut symbols,prep.variables.as_slice(),|v| referenced.contains(&v));
    tracing::debug!(
        component = "lp",
        operation = "compile",
        rows = rows.iter().map(|r| r.2.len()).sum::<usize>(),
        columns = prep.columns.len(),
        referenced = referenced.len(),
        pruned,
        bytes = doc.len(),
        "Compiled LP document");

    Ok((doc,symbols))
}
