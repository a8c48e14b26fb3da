//! The compiled model graph consumed by the problem writers.
//!
//! A [Model] owns a tree of [Block]s. Each block owns, in declaration order, lists of variables,
//! constraints, objectives and SOS constraints. Components are identified by typed ids
//! ([VarId], [ConId], [ObjId], [SosId], [BlockId]), and each component data object carries the
//! name of the component it belongs to plus an optional index, so that `x[1]` and `x[2]` are two
//! data objects of the component `x`.
//!
//! ```
//! use probwriter::*;
//! let mut m = Model::new("knapsack");
//! let x = m.indexed_var("x", vec![1.into()], binary()).unwrap();
//! let y = m.indexed_var("x", vec![2.into()], binary()).unwrap();
//! m.constraint("cap", 3.0 * x + 4.0 * y, Relation::Le(5.0)).unwrap();
//! m.objective("value", Sense::Maximize, 2.0 * x + 3.0 * y).unwrap();
//! assert_eq!(m.display_name(x.into()), "x[1]");
//! ```

mod index;

pub use index::*;

use std::collections::HashMap;

use crate::domain::*;
use crate::error::ModelError;
use crate::expr::{canonicalize, CanonicalRepn, Expr};
use crate::utils::NameAppender;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(Clone,Copy,Debug,PartialEq,Eq,Hash,PartialOrd,Ord)]
        pub struct $name(pub(crate) usize);
        impl $name {
            /// Position of the entity in the owning model's table.
            pub fn index(&self) -> usize { self.0 }
        }
    }
}

id_type!(VarId);
id_type!(ConId);
id_type!(ObjId);
id_type!(SosId);
id_type!(BlockId);

/// Identity of any model entity.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub enum ComponentId {
    Var(VarId),
    Constraint(ConId),
    Objective(ObjId),
    Sos(SosId),
    Block(BlockId)
}

impl From<VarId>   for ComponentId { fn from(v : VarId)   -> ComponentId { ComponentId::Var(v) } }
impl From<ConId>   for ComponentId { fn from(v : ConId)   -> ComponentId { ComponentId::Constraint(v) } }
impl From<ObjId>   for ComponentId { fn from(v : ObjId)   -> ComponentId { ComponentId::Objective(v) } }
impl From<SosId>   for ComponentId { fn from(v : SosId)   -> ComponentId { ComponentId::Sos(v) } }
impl From<BlockId> for ComponentId { fn from(v : BlockId) -> ComponentId { ComponentId::Block(v) } }

/// Objective sense
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum Sense {
    Maximize,
    Minimize
}

/// Relational shape of a constraint: `body == v`, `body >= v`, `body <= v` or `lo <= body <= hi`.
#[derive(Clone,Copy,Debug,PartialEq)]
pub enum Relation {
    Eq(f64),
    Ge(f64),
    Le(f64),
    Range(f64,f64)
}

#[derive(Clone,Debug)]
pub struct VarData {
    pub(crate) component : String,
    pub(crate) index     : Option<Index>,
    pub(crate) block     : BlockId,
    pub domain           : VarDomain,
    pub bounds           : Bounds,
    pub fixed            : bool,
    pub value            : Option<f64>,
}

#[derive(Clone,Debug)]
pub struct ConstraintData {
    pub(crate) component : String,
    pub(crate) index     : Option<Index>,
    pub(crate) block     : BlockId,
    pub body             : Expr,
    pub lower            : Option<f64>,
    pub upper            : Option<f64>,
    pub equality         : bool,
    pub active           : bool,
}

#[derive(Clone,Debug)]
pub struct ObjectiveData {
    pub(crate) component : String,
    pub(crate) index     : Option<Index>,
    pub(crate) block     : BlockId,
    pub sense            : Sense,
    pub expr             : Expr,
    pub active           : bool,
}

/// Special ordered set constraint: at most one (level 1) or two consecutive (level 2) of the
/// variables may be nonzero.
#[derive(Clone,Debug)]
pub struct SosConstraintData {
    pub(crate) component : String,
    pub(crate) index     : Option<Index>,
    pub(crate) block     : BlockId,
    pub level            : u32,
    pub items            : Vec<(VarId,f64)>,
    pub active           : bool,
}

/// A structural block. Blocks own their components and may contain sub-blocks.
#[derive(Clone,Debug)]
pub struct Block {
    pub(crate) name     : String,
    pub(crate) index    : Option<Index>,
    pub(crate) parent   : Option<BlockId>,
    pub(crate) children : Vec<BlockId>,
    pub(crate) vars     : Vec<VarId>,
    pub(crate) cons     : Vec<ConId>,
    pub(crate) objs     : Vec<ObjId>,
    pub(crate) sos      : Vec<SosId>,
    pub active          : bool,
    /// Recompute canonical representations of objectives on each write. If `false`, a
    /// representation cached by an earlier write is reused.
    pub gen_obj_canonical_repn : bool,
    /// As `gen_obj_canonical_repn`, for constraints.
    pub gen_con_canonical_repn : bool,
    repn_cache : HashMap<ComponentId,CanonicalRepn>,
}

impl Block {
    fn new(name : &str, index : Option<Index>, parent : Option<BlockId>) -> Block {
        Block {
            name : name.to_string(),
            index,
            parent,
            children : Vec::new(),
            vars     : Vec::new(),
            cons     : Vec::new(),
            objs     : Vec::new(),
            sos      : Vec::new(),
            active   : true,
            gen_obj_canonical_repn : true,
            gen_con_canonical_repn : true,
            repn_cache : HashMap::new()
        }
    }

    pub fn name(&self) -> &str { self.name.as_str() }
    pub fn index(&self) -> Option<&Index> { self.index.as_ref() }
    pub fn parent(&self) -> Option<BlockId> { self.parent }
    pub fn children(&self) -> &[BlockId] { self.children.as_slice() }
    pub fn variables(&self) -> &[VarId] { self.vars.as_slice() }
    pub fn constraints(&self) -> &[ConId] { self.cons.as_slice() }
    pub fn objectives(&self) -> &[ObjId] { self.objs.as_slice() }
    pub fn sos_constraints(&self) -> &[SosId] { self.sos.as_slice() }

    /// Cached canonical representation of a component of this block, if any.
    pub fn cached_repn(&self, id : ComponentId) -> Option<&CanonicalRepn> { self.repn_cache.get(&id) }
}

pub struct Model {
    name   : String,
    blocks : Vec<Block>,
    vars   : Vec<VarData>,
    cons   : Vec<ConstraintData>,
    objs   : Vec<ObjectiveData>,
    sos    : Vec<SosConstraintData>,
}

impl Model {
    pub fn new(name : &str) -> Model {
        Model {
            name   : name.to_string(),
            blocks : vec![Block::new(name,None,None)],
            vars   : Vec::new(),
            cons   : Vec::new(),
            objs   : Vec::new(),
            sos    : Vec::new(),
        }
    }

    pub fn name(&self) -> &str { self.name.as_str() }
    pub fn root(&self) -> BlockId { BlockId(0) }

    pub fn block(&self, b : BlockId) -> Result<&Block,ModelError> { self.blocks.get(b.0).ok_or(ModelError::UnknownBlock(b.0)) }
    pub fn block_mut(&mut self, b : BlockId) -> Result<&mut Block,ModelError> { self.blocks.get_mut(b.0).ok_or(ModelError::UnknownBlock(b.0)) }
    pub fn var_data(&self, v : VarId) -> Result<&VarData,ModelError> { self.vars.get(v.0).ok_or(ModelError::UnknownVar(v.0)) }
    pub fn var_data_mut(&mut self, v : VarId) -> Result<&mut VarData,ModelError> { self.vars.get_mut(v.0).ok_or(ModelError::UnknownVar(v.0)) }
    pub fn constraint_data(&self, c : ConId) -> Result<&ConstraintData,ModelError> { self.cons.get(c.0).ok_or(ModelError::UnknownConstraint(c.0)) }
    pub fn constraint_data_mut(&mut self, c : ConId) -> Result<&mut ConstraintData,ModelError> { self.cons.get_mut(c.0).ok_or(ModelError::UnknownConstraint(c.0)) }
    pub fn objective_data(&self, o : ObjId) -> Result<&ObjectiveData,ModelError> { self.objs.get(o.0).ok_or(ModelError::UnknownObjective(o.0)) }
    pub fn objective_data_mut(&mut self, o : ObjId) -> Result<&mut ObjectiveData,ModelError> { self.objs.get_mut(o.0).ok_or(ModelError::UnknownObjective(o.0)) }
    pub fn sos_data(&self, s : SosId) -> Result<&SosConstraintData,ModelError> { self.sos.get(s.0).ok_or(ModelError::UnknownSos(s.0)) }

    /// Add a sub-block to `parent`.
    pub fn add_block(&mut self, parent : BlockId, name : &str, index : Option<Index>) -> Result<BlockId,ModelError> {
        self.block(parent)?;
        let id = BlockId(self.blocks.len());
        self.blocks.push(Block::new(name,index,Some(parent)));
        self.blocks[parent.0].children.push(id);
        Ok(id)
    }

    /// Add a scalar variable to the root block.
    pub fn var(&mut self, name : &str, dom : Domain) -> Result<VarId,ModelError> {
        self.var_in(self.root(),name,None,dom)
    }

    /// Add an indexed variable data object to the root block.
    pub fn indexed_var(&mut self, name : &str, index : Index, dom : Domain) -> Result<VarId,ModelError> {
        self.var_in(self.root(),name,Some(index),dom)
    }

    /// Add a variable to a block.
    pub fn var_in(&mut self, block : BlockId, name : &str, index : Option<Index>, dom : Domain) -> Result<VarId,ModelError> {
        self.block(block)?;
        if ! dom.bounds.is_valid() {
            return Err(ModelError::InvalidBounds{ name : compose_name(name,index.as_ref()), lb : dom.bounds.lb, ub : dom.bounds.ub });
        }
        let id = VarId(self.vars.len());
        self.vars.push(VarData{
            component : name.to_string(),
            index,
            block,
            domain : dom.domain,
            bounds : dom.bounds,
            fixed  : false,
            value  : None });
        self.blocks[block.0].vars.push(id);
        Ok(id)
    }

    /// Add a constraint to the root block.
    pub fn constraint<E>(&mut self, name : &str, body : E, rel : Relation) -> Result<ConId,ModelError> where E : Into<Expr> {
        self.constraint_in(self.root(),name,None,body,rel)
    }

    /// Add an indexed constraint data object to the root block.
    pub fn indexed_constraint<E>(&mut self, name : &str, index : Index, body : E, rel : Relation) -> Result<ConId,ModelError> where E : Into<Expr> {
        self.constraint_in(self.root(),name,Some(index),body,rel)
    }

    /// Add a constraint to a block.
    ///
    /// A [Relation::Range] with equal bounds is stored as an equality.
    pub fn constraint_in<E>(&mut self, block : BlockId, name : &str, index : Option<Index>, body : E, rel : Relation) -> Result<ConId,ModelError> where E : Into<Expr> {
        self.block(block)?;
        let (lower,upper,equality) = match rel {
            Relation::Eq(v)       => (Some(v),Some(v),true),
            Relation::Ge(v)       => (Some(v),None,false),
            Relation::Le(v)       => (None,Some(v),false),
            Relation::Range(l,u)  => (Some(l),Some(u),l == u),
        };
        let fullname = compose_name(name,index.as_ref());
        if lower.iter().chain(upper.iter()).any(|v| ! v.is_finite()) {
            return Err(ModelError::NonFiniteBound(fullname));
        }
        if let (Some(l),Some(u)) = (lower,upper) {
            if l > u { return Err(ModelError::InvalidBounds{ name : fullname, lb : l, ub : u }); }
        }

        let id = ConId(self.cons.len());
        self.cons.push(ConstraintData{
            component : name.to_string(),
            index,
            block,
            body : body.into(),
            lower,
            upper,
            equality,
            active : true });
        self.blocks[block.0].cons.push(id);
        Ok(id)
    }

    /// Add an objective to the root block.
    pub fn objective<E>(&mut self, name : &str, sense : Sense, expr : E) -> Result<ObjId,ModelError> where E : Into<Expr> {
        self.objective_in(self.root(),name,None,sense,expr)
    }

    pub fn objective_in<E>(&mut self, block : BlockId, name : &str, index : Option<Index>, sense : Sense, expr : E) -> Result<ObjId,ModelError> where E : Into<Expr> {
        self.block(block)?;
        let id = ObjId(self.objs.len());
        self.objs.push(ObjectiveData{
            component : name.to_string(),
            index,
            block,
            sense,
            expr : expr.into(),
            active : true });
        self.blocks[block.0].objs.push(id);
        Ok(id)
    }

    /// Add an SOS constraint to the root block.
    pub fn sos(&mut self, name : &str, level : u32, items : Vec<(VarId,f64)>) -> Result<SosId,ModelError> {
        self.sos_in(self.root(),name,None,level,items)
    }

    pub fn sos_in(&mut self, block : BlockId, name : &str, index : Option<Index>, level : u32, items : Vec<(VarId,f64)>) -> Result<SosId,ModelError> {
        self.block(block)?;
        for (v,_) in items.iter() { self.var_data(*v)?; }
        let id = SosId(self.sos.len());
        self.sos.push(SosConstraintData{
            component : name.to_string(),
            index,
            block,
            level,
            items,
            active : true });
        self.blocks[block.0].sos.push(id);
        Ok(id)
    }

    /// Fix a variable to a value.
    pub fn fix(&mut self, v : VarId, value : f64) -> Result<(),ModelError> {
        let vd = self.var_data_mut(v)?;
        vd.fixed = true;
        vd.value = Some(value);
        Ok(())
    }

    pub fn unfix(&mut self, v : VarId) -> Result<(),ModelError> {
        self.var_data_mut(v)?.fixed = false;
        Ok(())
    }

    pub fn set_value(&mut self, v : VarId, value : Option<f64>) -> Result<(),ModelError> {
        self.var_data_mut(v)?.value = value;
        Ok(())
    }

    /// Set the active flag of a constraint, objective, SOS constraint or block. Variables are
    /// always active; passing one is a no-op.
    pub fn set_active(&mut self, id : ComponentId, active : bool) -> Result<(),ModelError> {
        match id {
            ComponentId::Var(v)        => { self.var_data(v)?; },
            ComponentId::Constraint(c) => self.constraint_data_mut(c)?.active = active,
            ComponentId::Objective(o)  => self.objective_data_mut(o)?.active = active,
            ComponentId::Sos(s)        => self.sos.get_mut(s.0).ok_or(ModelError::UnknownSos(s.0))?.active = active,
            ComponentId::Block(b)      => self.block_mut(b)?.active = active,
        }
        Ok(())
    }

    pub fn deactivate<I>(&mut self, id : I) -> Result<(),ModelError> where I : Into<ComponentId> {
        self.set_active(id.into(),false)
    }

    /// Component name and index of an entity. Unknown ids yield an empty name.
    pub(crate) fn component_key(&self, id : ComponentId) -> (&str,Option<&Index>) {
        match id {
            ComponentId::Var(v)        => self.vars.get(v.0).map(|d| (d.component.as_str(),d.index.as_ref())),
            ComponentId::Constraint(c) => self.cons.get(c.0).map(|d| (d.component.as_str(),d.index.as_ref())),
            ComponentId::Objective(o)  => self.objs.get(o.0).map(|d| (d.component.as_str(),d.index.as_ref())),
            ComponentId::Sos(s)        => self.sos.get(s.0).map(|d| (d.component.as_str(),d.index.as_ref())),
            ComponentId::Block(b)      => self.blocks.get(b.0).map(|d| (d.name.as_str(),d.index.as_ref())),
        }.unwrap_or(("",None))
    }

    fn owning_block(&self, id : ComponentId) -> Option<BlockId> {
        match id {
            ComponentId::Var(v)        => self.vars.get(v.0).map(|d| d.block),
            ComponentId::Constraint(c) => self.cons.get(c.0).map(|d| d.block),
            ComponentId::Objective(o)  => self.objs.get(o.0).map(|d| d.block),
            ComponentId::Sos(s)        => self.sos.get(s.0).map(|d| d.block),
            ComponentId::Block(b)      => self.blocks.get(b.0).and_then(|d| d.parent),
        }
    }

    /// Fully qualified name of an entity, e.g. `stage[2].x[1,a]`. The root block is not part of
    /// the name.
    pub fn display_name(&self, id : ComponentId) -> String {
        let mut res = String::new();
        let mut path = Vec::new();
        let mut b = self.owning_block(id);
        while let Some(bi) = b {
            if bi.0 == 0 { break; }
            path.push(bi);
            b = self.blocks[bi.0].parent;
        }
        for bi in path.iter().rev() {
            let blk = &self.blocks[bi.0];
            res.push_str(blk.name.as_str());
            if let Some(idx) = &blk.index { idx.append_to_string(&mut res); }
            res.push('.');
        }
        let (name,index) = self.component_key(id);
        res.push_str(name);
        if let Some(idx) = index { idx.append_to_string(&mut res); }
        res
    }

    /// Canonical representation of an objective or constraint body, using the owning block's
    /// cache according to its `gen_*_canonical_repn` flags.
    pub(crate) fn canonical_repn(&mut self, id : ComponentId) -> Result<CanonicalRepn,ModelError> {
        let (block,expr,regenerate) = match id {
            ComponentId::Constraint(c) => {
                let d = self.constraint_data(c)?;
                (d.block,&d.body,self.blocks[d.block.0].gen_con_canonical_repn)
            },
            ComponentId::Objective(o) => {
                let d = self.objective_data(o)?;
                (d.block,&d.expr,self.blocks[d.block.0].gen_obj_canonical_repn)
            },
            ComponentId::Var(v) => return Err(ModelError::UnknownConstraint(v.0)),
            ComponentId::Sos(s) => return Err(ModelError::UnknownConstraint(s.0)),
            ComponentId::Block(b) => return Err(ModelError::UnknownConstraint(b.0)),
        };
        if ! regenerate {
            if let Some(r) = self.blocks[block.0].repn_cache.get(&id) {
                return Ok(r.clone());
            }
        }
        let r = canonicalize(expr);
        self.blocks[block.0].repn_cache.insert(id,r.clone());
        Ok(r)
    }

    pub(crate) fn active_objectives_of(&self, b : BlockId) -> impl Iterator<Item = ObjId> + '_ {
        self.blocks[b.0].objs.iter().copied().filter(|o| self.objs[o.0].active)
    }
    pub(crate) fn active_constraints_of(&self, b : BlockId) -> impl Iterator<Item = ConId> + '_ {
        self.blocks[b.0].cons.iter().copied().filter(|c| self.cons[c.0].active)
    }
    pub(crate) fn active_sos_of(&self, b : BlockId) -> impl Iterator<Item = SosId> + '_ {
        self.blocks[b.0].sos.iter().copied().filter(|s| self.sos[s.0].active)
    }
}

fn compose_name(name : &str, index : Option<&Index>) -> String {
    let mut s = name.to_string();
    if let Some(idx) = index { idx.append_to_string(&mut s); }
    s
}
