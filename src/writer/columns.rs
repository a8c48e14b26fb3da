//! Sparse column accumulation.

use std::collections::{HashMap, HashSet};

use crate::expr::CanonicalRepn;
use crate::model::VarId;

/// Per-column lists of `(row, coefficient)` entries, plus a trailing slot for the synthetic
/// objective constant column.
///
/// Row labels are interned; entries refer to them by position.
pub(crate) struct ColumnAccumulator {
    position   : HashMap<VarId,usize>,
    rows       : Vec<String>,
    entries    : Vec<Vec<(usize,f64)>>,
    referenced : HashSet<VarId>,
}

impl ColumnAccumulator {
    /// Create an accumulator with one column per variable in `columns`, in that order.
    pub fn new(columns : &[VarId]) -> ColumnAccumulator {
        ColumnAccumulator{
            position   : columns.iter().enumerate().map(|(i,v)| (*v,i)).collect(),
            rows       : Vec::new(),
            entries    : vec![Vec::new(); columns.len()+1],
            referenced : HashSet::new(),
        }
    }

    fn intern(&mut self, row : &str) -> usize {
        match self.rows.last() {
            Some(last) if last == row => self.rows.len()-1,
            _ => {
                self.rows.push(row.to_string());
                self.rows.len()-1
            }
        }
    }

    /// Append the linear terms of `repn` to their columns under `row`, in term order, and mark
    /// the variables referenced.
    ///
    /// # Returns
    /// The constant of `repn`, or the first variable that has no column.
    pub fn extract(&mut self, row : &str, repn : &CanonicalRepn) -> Result<f64,VarId> {
        if let Some((v,_)) = repn.linear.iter().find(|(v,_)| ! self.position.contains_key(v)) {
            return Err(*v);
        }
        if ! repn.linear.is_empty() {
            let r = self.intern(row);
            for (v,c) in repn.linear.iter() {
                if let Some(&j) = self.position.get(v) {
                    self.entries[j].push((r,*c));
                    self.referenced.insert(*v);
                }
            }
        }
        Ok(repn.constant)
    }

    /// Append an entry to the objective constant column.
    pub fn push_constant(&mut self, row : &str, c : f64) {
        let r = self.intern(row);
        if let Some(col) = self.entries.last_mut() {
            col.push((r,c));
        }
    }

    pub fn mark_referenced(&mut self, v : VarId) { self.referenced.insert(v); }
    pub fn is_referenced(&self, v : VarId) -> bool { self.referenced.contains(&v) }
    pub fn num_referenced(&self) -> usize { self.referenced.len() }

    /// Entries of column `j` as `(row label, coefficient)`.
    pub fn column(&self, j : usize) -> impl Iterator<Item = (&str,f64)> + '_ {
        self.entries.get(j).into_iter().flatten().map(|(r,c)| (self.rows[*r].as_str(),*c))
    }

    pub fn constant_column(&self) -> impl Iterator<Item = (&str,f64)> + '_ {
        self.column(self.entries.len()-1)
    }

    pub fn has_constant(&self) -> bool {
        self.entries.last().map(|c| ! c.is_empty()).unwrap_or(false)
    }

    pub fn nonzeros(&self) -> usize { self.entries.iter().map(|c| c.len()).sum() }
}
