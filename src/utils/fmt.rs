//! Number formatting compatible with C's `%.17g`.
//!
//! 17 significant digits guarantee that every `f64` survives a write/read round trip.

/// Format `v` as C `printf("%.*g",prec,v)` does.
pub fn format_g(v : f64, prec : usize) -> String {
    if v.is_nan() { return "nan".to_string(); }
    if v.is_infinite() { return if v > 0.0 { "inf".to_string() } else { "-inf".to_string() }; }
    if v == 0.0 { return if v.is_sign_negative() { "-0".to_string() } else { "0".to_string() }; }

    let p = prec.max(1);
    let e = format!("{:.*e}",p-1,v);
    let (mant,exp) = match e.split_once('e') {
        Some((m,x)) => (m,x.parse::<i32>().unwrap_or(0)),
        None => (e.as_str(),0)
    };

    if exp < -4 || exp >= p as i32 {
        let mant = trim_fraction(mant);
        format!("{}e{}{:02}",mant,if exp < 0 { '-' } else { '+' },exp.abs())
    }
    else {
        let decimals = (p as i32 - 1 - exp) as usize;
        trim_fraction(format!("{:.*}",decimals,v).as_str()).to_string()
    }
}

fn trim_fraction(s : &str) -> &str {
    if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') }
    else { s }
}

/// `%.17g`
pub fn g17(v : f64) -> String { format_g(v,17) }

/// `%+.17g`
pub fn g17_signed(v : f64) -> String {
    let s = g17(v);
    if s.starts_with('-') { s } else { format!("+{}",s) }
}
