//! Symbol maps and labelers.
//!
//! A [SymbolMap] associates model entities with the short textual labels written to a problem
//! file. Labels are produced by a [Labeler]: [TextLabeler] derives them from the entity's name,
//! [NumericLabeler] hands out sequential codes. Columns (variables) and rows (objectives,
//! constraints and SOS constraints) have separate label namespaces. Within a namespace labels are
//! unique, collisions are disambiguated by appending `_<n>`.

mod labeler;

pub use labeler::*;

use std::collections::HashMap;

use crate::error::SymbolError;
use crate::model::{ComponentId, Model};

/// Alias registered for the single active objective of a written problem.
pub const DEFAULT_OBJECTIVE : &str = "__default_objective__";

/// Label namespace of an entity.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub enum Namespace {
    /// Variables
    Column,
    /// Objectives, constraints and everything else
    Row,
}

impl Namespace {
    pub fn of(id : ComponentId) -> Namespace {
        match id {
            ComponentId::Var(_) => Namespace::Column,
            _ => Namespace::Row,
        }
    }
}

#[derive(Clone,Debug,Default)]
struct Names {
    symbols : HashMap<String,ComponentId>,
    aliases : HashMap<String,ComponentId>,
}

impl Names {
    fn get(&self, label : &str) -> Option<ComponentId> {
        self.symbols.get(label).or_else(|| self.aliases.get(label)).copied()
    }

    fn is_taken(&self, label : &str) -> bool { self.get(label).is_some() }

    /// `base` if it is free, otherwise `base_<n>` for the smallest free `n >= 1`. A label already
    /// held by `owner` counts as free.
    fn unique(&self, base : &str, owner : Option<ComponentId>) -> String {
        let free = |l : &str| match self.get(l) { None => true, Some(o) => Some(o) == owner };
        if free(base) { return base.to_string(); }
        let mut n = 1usize;
        loop {
            let l = format!("{}_{}",base,n);
            if free(l.as_str()) { break l; }
            n += 1;
        }
    }
}

#[derive(Clone,Debug,Default)]
pub struct SymbolMap {
    by_object : HashMap<ComponentId,String>,
    columns   : Names,
    rows      : Names,
}

impl SymbolMap {
    pub fn new() -> SymbolMap { Default::default() }

    fn names(&self, ns : Namespace) -> &Names {
        match ns { Namespace::Column => &self.columns, Namespace::Row => &self.rows }
    }

    fn names_mut(&mut self, ns : Namespace) -> &mut Names {
        match ns { Namespace::Column => &mut self.columns, Namespace::Row => &mut self.rows }
    }

    /// Create a symbol for `id` using `labeler`. If `id` already has a symbol, that symbol is
    /// returned and the labeler is not called.
    pub fn create_symbol(&mut self, id : ComponentId, model : &Model, labeler : &mut dyn Labeler) -> String {
        if let Some(s) = self.by_object.get(&id) {
            return s.clone();
        }
        let base = labeler.label(id,model);
        let names = self.names_mut(Namespace::of(id));
        let label = names.unique(base.as_str(),None);
        names.symbols.insert(label.clone(),id);
        self.by_object.insert(id,label.clone());
        label
    }

    /// Register an additional label for an entity.
    ///
    /// Re-registering the same alias for the same entity is a no-op; a label that is used by
    /// another entity of the same namespace is an error.
    pub fn alias(&mut self, id : ComponentId, label : &str) -> Result<(),SymbolError> {
        let names = self.names_mut(Namespace::of(id));
        match names.get(label) {
            Some(other) if other == id => Ok(()),
            Some(_) => Err(SymbolError::AliasClash{ label : label.to_string() }),
            None => {
                names.aliases.insert(label.to_string(),id);
                Ok(())
            }
        }
    }

    /// Register an alias derived from `label`, disambiguated with `_<n>` if another entity of
    /// the same namespace already uses it. Returns the registered alias.
    pub fn alias_unique(&mut self, id : ComponentId, label : &str) -> String {
        let names = self.names_mut(Namespace::of(id));
        let l = names.unique(label,Some(id));
        if !names.is_taken(l.as_str()) {
            names.aliases.insert(l.clone(),id);
        }
        l
    }

    /// Primary symbol of an entity. Never creates a symbol.
    pub fn get_symbol(&self, id : ComponentId) -> Option<&str> {
        self.by_object.get(&id).map(|s| s.as_str())
    }

    /// Look up the entity of a primary symbol or an alias. Row labels take precedence over
    /// column labels.
    pub fn get_object(&self, label : &str) -> Option<ComponentId> {
        self.rows.get(label).or_else(|| self.columns.get(label))
    }

    /// Look up a label in one namespace.
    pub fn get_object_in(&self, ns : Namespace, label : &str) -> Option<ComponentId> {
        self.names(ns).get(label)
    }

    /// All aliases of an entity, sorted.
    pub fn aliases_of(&self, id : ComponentId) -> Vec<&str> {
        let mut res : Vec<&str> = self.names(Namespace::of(id)).aliases.iter().filter(|(_,v)| **v == id).map(|(k,_)| k.as_str()).collect();
        res.sort();
        res
    }

    /// Remove an entity: its primary symbol and all its aliases. Returns the primary symbol.
    pub fn remove(&mut self, id : ComponentId) -> Option<String> {
        let s = self.by_object.remove(&id)?;
        let names = self.names_mut(Namespace::of(id));
        names.symbols.remove(&s);
        names.aliases.retain(|_,v| *v != id);
        Some(s)
    }

    pub fn contains(&self, id : ComponentId) -> bool { self.by_object.contains_key(&id) }
    pub fn len(&self) -> usize { self.by_object.len() }
    pub fn is_empty(&self) -> bool { self.by_object.is_empty() }

    /// Iterate over `(entity, primary symbol)` in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId,&str)> {
        self.by_object.iter().map(|(k,v)| (*k,v.as_str()))
    }
}
