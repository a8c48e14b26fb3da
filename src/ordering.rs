//! Iteration order over blocks, variables, constraints, objectives and SOS constraints.
//!
//! The order is derived from a [FileDeterminism] level, or, for rows and columns, from an
//! explicit [RowOrder] or [ColumnOrder] that overrides it.

use std::collections::HashMap;
use std::hash::Hash;

use itertools::Itertools;

use crate::error::ConfigError;
use crate::model::{BlockId, ComponentId, ConId, Model, VarId};

/// How hard the writers try to make output independent of declaration order.
#[derive(Clone,Copy,Debug,PartialEq,Eq,PartialOrd,Ord,Default)]
pub enum FileDeterminism {
    /// Declaration order.
    None = 0,
    /// Components in declaration order, data objects of one component sorted by index.
    #[default]
    SortIndices = 1,
    /// Components sorted by name, data objects sorted by index.
    SortNames = 2,
}

impl TryFrom<i64> for FileDeterminism {
    type Error = ConfigError;
    fn try_from(v : i64) -> Result<FileDeterminism,ConfigError> {
        match v {
            0 => Ok(FileDeterminism::None),
            1 => Ok(FileDeterminism::SortIndices),
            2 => Ok(FileDeterminism::SortNames),
            _ => Err(ConfigError::InvalidDeterminism(v))
        }
    }
}

/// An explicit total order on entities of one kind, given as a rank per entity.
#[derive(Clone,Debug)]
pub struct Ranking<K> {
    rank : HashMap<K,usize>
}

/// Explicit order of constraint rows.
pub type RowOrder = Ranking<ConId>;
/// Explicit order of variable columns.
pub type ColumnOrder = Ranking<VarId>;

impl<K> Default for Ranking<K> {
    fn default() -> Self { Ranking{ rank : HashMap::new() } }
}

impl<K> Ranking<K> where K : Copy+Eq+Hash {
    pub fn new() -> Self { Default::default() }

    /// Rank the entities by their position in `items`.
    pub fn from_sequence<I>(items : I) -> Self where I : IntoIterator<Item = K> {
        Ranking{ rank : items.into_iter().enumerate().map(|(i,k)| (k,i)).collect() }
    }

    pub fn insert(&mut self, k : K, rank : usize) { self.rank.insert(k,rank); }
    pub fn rank(&self, k : K) -> Option<usize> { self.rank.get(&k).copied() }
    pub fn len(&self) -> usize { self.rank.len() }
    pub fn is_empty(&self) -> bool { self.rank.is_empty() }
}

impl<K> FromIterator<(K,usize)> for Ranking<K> where K : Copy+Eq+Hash {
    fn from_iter<I : IntoIterator<Item = (K,usize)>>(iter : I) -> Self {
        Ranking{ rank : iter.into_iter().collect() }
    }
}

/// Stably sort `items` by their rank in `order`. Every item must be ranked.
pub(crate) fn apply_order<K>(model : &Model, items : &mut [K], order : &Ranking<K>, axis : &'static str) -> Result<(),ConfigError>
    where K : Copy+Eq+Hash+Into<ComponentId>
{
    if let Some(missing) = items.iter().find(|k| order.rank(**k).is_none()) {
        return Err(ConfigError::MissingOrder{ axis, name : model.display_name((*missing).into()) });
    }
    items.sort_by_key(|k| order.rank(*k).unwrap_or(usize::MAX));
    Ok(())
}

/// Order the data objects of one block according to `det`.
pub(crate) fn order_data<K>(model : &Model, items : &[K], det : FileDeterminism) -> Vec<K>
    where K : Copy+Into<ComponentId>
{
    match det {
        FileDeterminism::None => items.to_vec(),
        FileDeterminism::SortIndices => {
            // rank components by first appearance
            let mut first : HashMap<&str,usize> = HashMap::new();
            for k in items.iter() {
                let n = first.len();
                first.entry(model.component_key((*k).into()).0).or_insert(n);
            }
            items.iter().copied()
                .sorted_by_key(|k| {
                    let (name,index) = model.component_key((*k).into());
                    (first.get(name).copied().unwrap_or(0),index)
                })
                .collect()
        },
        FileDeterminism::SortNames =>
            items.iter().copied()
                .sorted_by_key(|k| model.component_key((*k).into()))
                .collect()
    }
}

/// Active blocks in preorder, starting with the root. Sub-blocks of an inactive block are
/// skipped.
pub(crate) fn block_order(model : &Model, det : FileDeterminism) -> Vec<BlockId> {
    let mut res = Vec::new();
    let mut stack = vec![model.root()];
    while let Some(b) = stack.pop() {
        let Ok(blk) = model.block(b) else { continue };
        if ! blk.active { continue; }
        res.push(b);
        stack.extend(order_data(model,blk.children(),det).into_iter().rev());
    }
    res
}
