//! Small helpers shared by the model and the writers.

pub mod fmt;

/// A trait that supplies functionality for appending self to a string.
pub trait NameAppender {
    /// Append self to a string
    fn append_to_string(&self, s : & mut String);
}

impl<T> NameAppender for [T] where T : NameAppender {
    fn append_to_string(&self, s : & mut String) {
        s.push('[');
        if let Some((first,rest)) = self.split_first() {
            first.append_to_string(s);
            for i in rest.iter() { s.push(','); i.append_to_string(s) }
        }
        s.push(']');
    }
}

impl<T> NameAppender for Vec<T> where T : NameAppender {
    fn append_to_string(&self, s : & mut String) { self.as_slice().append_to_string(s) }
}

impl NameAppender for i64 {
    fn append_to_string(&self, s : & mut String) {
        if *self < 0 { s.push('-'); }
        let mut v = self.unsigned_abs();
        if v == 0 {
            s.push('0');
        }
        else {
            let mut buf = [0u8; 20];
            let mut n = 0;
            while v > 0 { buf[19-n] = (v % 10) as u8 + b'0'; v /= 10; n += 1; }
            for c in &buf[20-n..] {
                s.push(*c as char);
            }
        }
    }
}
