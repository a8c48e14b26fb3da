//! MPS writer.
//!
//! Writes the free-name MPS grammar: `NAME`, `OBJSENSE`, `OBJNAME`, `ROWS`, `COLUMNS`, `RHS`,
//! an optional `SOS` section, `BOUNDS` and `ENDATA`. Numbers are written with 17 significant
//! digits so that they read back exactly.

use std::io::Write;

use itertools::Itertools;

use crate::domain::{normalize_zero, VarDomain};
use crate::error::WriteError;
use crate::expr::Degree;
use crate::model::{Model, Sense};
use crate::symbol::{Labeler, SymbolMap};
use crate::utils::fmt::g17;
use super::columns::ColumnAccumulator;
use super::pipeline::*;
use super::{Capability, ProblemFormat, ProblemWriter, SolverCapability, WriterOptions, ONE_VAR_CONSTANT};

const FORMAT : &str = "MPS";
const CONSTANT_ROW : &str = "c_e_ONE_VAR_CONSTANT";
/// Integer bound sentinels used in place of infinite bounds.
const INT_LOWER_SENTINEL : &str = "-10E20";
const INT_UPPER_SENTINEL : &str = "10E20";

/// Writer for MPS files.
#[derive(Clone,Copy,Debug,Default)]
pub struct MpsWriter;

impl MpsWriter {
    pub fn new() -> MpsWriter { MpsWriter }
}

impl ProblemWriter for MpsWriter {
    fn format(&self) -> ProblemFormat { ProblemFormat::Mps }

    fn write_to(&self, model : &mut Model, out : &mut dyn Write, solver : &dyn SolverCapability, options : WriterOptions) -> Result<SymbolMap,WriteError> {
        let mut options = options;
        let mut labeler = options.take_labeler()?;
        let prep = prepare(model,&options,FORMAT)?;
        let (doc,symbols) = compile(model,&prep,solver,&options,labeler.as_mut())?;
        out.write_all(doc.as_slice())?;
        Ok(symbols)
    }
}

/// Write `<head> <row> <value>` entries packed two per line.
fn write_packed<'a,I>(doc : &mut Vec<u8>, head : &str, entries : I) -> std::io::Result<()> where I : IntoIterator<Item = (&'a str,f64)> {
    for chunk in &entries.into_iter().chunks(2) {
        write!(doc,"    {}",head)?;
        for (row,v) in chunk {
            write!(doc," {} {}",row,g17(v))?;
        }
        writeln!(doc)?;
    }
    Ok(())
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
    check_degree(model,prep.objective.into(),&prep.obj_repn,FORMAT,solver,None)?;

    let mut acc = ColumnAccumulator::new(prep.columns.as_slice());
    let mut rows : Vec<(RowKind,String)> = Vec::new();
    let mut rhs  : Vec<(String,f64)> = Vec::new();

    let mut force_constant = options.force_objective_constant;
    if prep.obj_repn.degree == Degree::Constant {
        tracing::warn!(
            component = "mps",
            objective = %model.display_name(prep.objective.into()),
            "Constant objective detected, replacing with a placeholder to prevent solver failure");
        force_constant = true;
    }
    let obj_constant = extract_row(model,&mut acc,prep.objective.into(),obj_label.as_str(),&prep.obj_repn)?;
    if force_constant || obj_constant != 0.0 {
        acc.push_constant(obj_label.as_str(),obj_constant);
    }

    for (c,repn) in prep.constraints.iter() {
        check_degree(model,(*c).into(),repn,FORMAT,solver,None)?;
        let cd = model.constraint_data(*c)?;
        let con_symbol = symbols.create_symbol((*c).into(),model,labeler);
        for mut row in constraint_rows(cd,con_symbol.as_str()) {
            row.label = symbols.alias_unique((*c).into(),row.label.as_str());
            let offset = extract_row(model,&mut acc,(*c).into(),row.label.as_str(),repn)?;
            tracing::trace!(component = "mps", row = row.label.as_str(), sense = row.kind.mps_marker(), rhs = row.bound - offset, "Row");
            rhs.push((row.label.clone(),row.bound - offset));
            rows.push((row.kind,row.label));
        }
    }

    if acc.has_constant() {
        rows.push((RowKind::Equal,CONSTANT_ROW.to_string()));
        acc.push_constant(CONSTANT_ROW,1.0);
        rhs.push((CONSTANT_ROW.to_string(),1.0));
    }

    // SOS sets are processed before bounds: their variables count as referenced.
    let mut sos_sets : Vec<(u32,String,Vec<(String,f64)>)> = Vec::new();
    for s in prep.sos.iter() {
        let sd = model.sos_data(*s)?;
        let label = symbols.create_symbol((*s).into(),model,labeler);
        let supported = match sd.level {
            1 => solver.supports(Capability::Sos1),
            2 => solver.supports(Capability::Sos2),
            _ => false
        };
        if ! supported {
            return Err(WriteError::UnsupportedSosLevel{ sos : model.display_name((*s).into()), level : sd.level });
        }
        if sd.items.is_empty() { continue; }
        let mut items = Vec::with_capacity(sd.items.len());
        for (v,w) in sd.items.iter() {
            if model.var_data(*v)?.fixed {
                return Err(WriteError::FixedVariableInSos{ sos : model.display_name((*s).into()), var : model.display_name((*v).into()) });
            }
            acc.mark_referenced(*v);
            items.push((var_symbol(&symbols,model,*v,label.as_str())?.to_string(),*w));
        }
        sos_sets.push((sd.level,label,items));
    }

    let mut bounds : Vec<String> = Vec::new();
    for v in prep.columns.iter() {
        if ! (options.include_all_variable_bounds || acc.is_referenced(*v)) {
            continue;
        }
        let vd = model.var_data(*v)?;
        let label = var_symbol(&symbols,model,*v,"BOUNDS")?;
        if vd.fixed {
            if ! options.output_fixed_variable_bounds {
                return Err(WriteError::FixedVariable{ var : model.display_name((*v).into()), model : model.name().to_string() });
            }
            let value = vd.value.ok_or_else(|| WriteError::FixedWithoutValue(model.display_name((*v).into())))?;
            bounds.push(format!(" FX BOUND {} {}",label,g17(normalize_zero(value))));
            continue;
        }
        let b = vd.bounds.normalized();
        match vd.domain {
            VarDomain::Binary => {
                if b.lb == 0.0 && b.ub == 1.0 {
                    bounds.push(format!(" BV BOUND {}",label));
                }
                else {
                    return Err(WriteError::InvalidBinaryBounds{ name : model.display_name((*v).into()), lb : b.lb, ub : b.ub });
                }
            },
            VarDomain::Integer => {
                bounds.push(format!(" LI BOUND {} {}",label,b.lower().map(g17).unwrap_or_else(|| INT_LOWER_SENTINEL.to_string())));
                bounds.push(format!(" UI BOUND {} {}",label,b.upper().map(g17).unwrap_or_else(|| INT_UPPER_SENTINEL.to_string())));
            },
            VarDomain::Continuous => {
                if b.is_free() {
                    bounds.push(format!(" FR BOUND {}",label));
                }
                else {
                    match b.lower() {
                        Some(lb) => bounds.push(format!(" LO BOUND {} {}",label,g17(lb))),
                        None => bounds.push(format!(" MI BOUND {}",label))
                    }
                    if let Some(ub) = b.upper() {
                        bounds.push(format!(" UP BOUND {} {}",label,g17(ub)));
                    }
                }
            }
        }
    }

    let mut doc = Vec::new();
    writeln!(doc,"* Source: probwriter MPS Writer")?;
    writeln!(doc,"NAME {}",model.name())?;
    writeln!(doc,"OBJSENSE")?;
    writeln!(doc," {}",match objective.sense { Sense::Minimize => "MIN", Sense::Maximize => "MAX" })?;
    writeln!(doc,"OBJNAME")?;
    writeln!(doc," {}",obj_label)?;
    writeln!(doc,"ROWS")?;
    writeln!(doc," N  {}",obj_label)?;
    for (kind,label) in rows.iter() {
        writeln!(doc," {}  {}",kind.mps_marker(),label)?;
    }

    writeln!(doc,"COLUMNS")?;
    for (j,v) in prep.columns.iter().enumerate() {
        if acc.column(j).next().is_none() { continue; }
        let label = var_symbol(&symbols,model,*v,"COLUMNS")?;
        write_packed(&mut doc,label,acc.column(j))?;
    }
    if acc.has_constant() {
        write_packed(&mut doc,ONE_VAR_CONSTANT,acc.constant_column())?;
    }

    writeln!(doc,"RHS")?;
    write_packed(&mut doc,"RHS",rhs.iter().map(|(r,v)| (r.as_str(),*v)))?;

    if ! sos_sets.is_empty() {
        writeln!(doc,"SOS")?;
        for (level,label,items) in sos_sets.iter() {
            writeln!(doc," S{} SET {}",level,label)?;
            for (var,w) in items.iter() {
                writeln!(doc,"    SET {} {}",var,g17(*w))?;
            }
        }
    }

    writeln!(doc,"BOUNDS")?;
    for line in bounds.iter() {
        writeln!(doc,"{}",line)?;
    }
    writeln!(doc,"ENDATA")?;

    let pruned = prune_unreferenced(&mut symbols,prep.variables.as_slice(),|v| acc.is_referenced(v));
    tracing::debug!(
        component = "mps",
        operation = "compile",
        rows = rows.len(),
        columns = prep.columns.len(),
        nonzeros = acc.nonzeros(),
        referenced = acc.num_referenced(),
        pruned,
        bytes = doc.len(),
        "Compiled MPS document");

    Ok((doc,symbols))
}
