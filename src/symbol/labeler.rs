use crate::model::{ComponentId, Model};

/// Strategy producing a label for a model entity.
pub trait Labeler {
    fn label(&mut self, id : ComponentId, model : &Model) -> String;
}

impl<F> Labeler for F where F : FnMut(ComponentId,&Model) -> String {
    fn label(&mut self, id : ComponentId, model : &Model) -> String { self(id,model) }
}

/// Labels entities by their fully qualified name, with characters that problem file formats
/// cannot carry replaced: brackets become parentheses, separators and operators become `_`.
#[derive(Clone,Copy,Debug,Default)]
pub struct TextLabeler;

impl TextLabeler {
    pub fn new() -> TextLabeler { TextLabeler }
}

/// Translate a name into a label that is legal in MPS and LP files.
pub fn text_label(name : &str) -> String {
    name.chars()
        .map(|c| match c {
            '[' | '{' => '(',
            ']' | '}' => ')',
            ' ' | '-' | '#' | '$' | '%' | '&' | '*' | '+' | '.' | ',' | '/' | ';' | '<' | '=' | '>' |
            '?' | '@' | '^' | '!' | '~' | '\'' | '"' | ':' | '\\' | '|' | '\t' => '_',
            c => c
        })
        .collect()
}

impl Labeler for TextLabeler {
    fn label(&mut self, id : ComponentId, model : &Model) -> String {
        text_label(model.display_name(id).as_str())
    }
}

/// Labels entities `<prefix>1`, `<prefix>2`, ... in the order they are labeled.
#[derive(Clone,Debug)]
pub struct NumericLabeler {
    prefix : String,
    next   : usize
}

impl NumericLabeler {
    pub fn new(prefix : &str) -> NumericLabeler { NumericLabeler{ prefix : prefix.to_string(), next : 1 } }
}

impl Default for NumericLabeler {
    fn default() -> NumericLabeler { NumericLabeler::new("x") }
}

impl Labeler for NumericLabeler {
    fn label(&mut self, _id : ComponentId, _model : &Model) -> String {
        let r = format!("{}{}",self.prefix,self.next);
        self.next += 1;
        r
    }
}
