//! Index values of indexed components.

use crate::utils::NameAppender;

/// One coordinate of an index. Integers order before strings.
#[derive(Clone,Debug,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub enum IndexValue {
    Int(i64),
    Str(String)
}

/// A (possibly multi-dimensional) index, e.g. `[1,"a"]`.
pub type Index = Vec<IndexValue>;

impl From<i64>   for IndexValue { fn from(v : i64)   -> IndexValue { IndexValue::Int(v) } }
impl From<i32>   for IndexValue { fn from(v : i32)   -> IndexValue { IndexValue::Int(v as i64) } }
impl From<usize> for IndexValue { fn from(v : usize) -> IndexValue { IndexValue::Int(v as i64) } }
impl From<&str>  for IndexValue { fn from(v : &str)  -> IndexValue { IndexValue::Str(v.to_string()) } }
impl From<String> for IndexValue { fn from(v : String) -> IndexValue { IndexValue::Str(v) } }

impl NameAppender for IndexValue {
    fn append_to_string(&self, s : & mut String) {
        match self {
            IndexValue::Int(i) => i.append_to_string(s),
            IndexValue::Str(v) => s.push_str(v.as_str())
        }
    }
}
