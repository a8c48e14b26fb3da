//! A minimal free-format MPS reader used to check what the writer produced.

#![allow(dead_code)]

use std::collections::HashMap;

#[derive(Debug,Default)]
pub struct MpsProblem {
    pub name      : String,
    pub sense     : String,
    pub objective : String,
    /// Rows in file order, with sense marker.
    pub rows      : Vec<(String,String)>,
    /// `(column,row) -> coefficient`
    pub coefs     : HashMap<(String,String),f64>,
    /// Columns in file order, without repetitions.
    pub columns   : Vec<String>,
    pub rhs       : HashMap<String,f64>,
    /// `(kind,column,value)`
    pub bounds    : Vec<(String,String,Option<String>)>,
    /// `(level,label,[(column,weight)])`
    pub sos       : Vec<(String,String,Vec<(String,f64)>)>,
    /// Section headers in file order.
    pub sections  : Vec<String>,
}

impl MpsProblem {
    pub fn row_sense(&self, row : &str) -> Option<&str> {
        self.rows.iter().find(|r| r.1 == row).map(|r| r.0.as_str())
    }

    pub fn bounds_of(&self, col : &str) -> Vec<(&str,Option<&str>)> {
        self.bounds.iter().filter(|b| b.1 == col).map(|b| (b.0.as_str(),b.2.as_deref())).collect()
    }
}

pub fn read_mps(text : &str) -> MpsProblem {
    let mut p = MpsProblem::default();
    let mut section = String::new();
    for line in text.lines() {
        if line.starts_with('*') || line.is_empty() { continue; }
        if ! line.starts_with(' ') {
            let mut it = line.split_whitespace();
            section = it.next().unwrap().to_string();
            if section == "NAME" {
                p.name = it.next().unwrap_or("").to_string();
            }
            p.sections.push(section.clone());
            continue;
        }
        let f : Vec<&str> = line.split_whitespace().collect();
        match section.as_str() {
            "OBJSENSE" => p.sense = f[0].to_string(),
            "OBJNAME"  => p.objective = f[0].to_string(),
            "ROWS"     => p.rows.push((f[0].to_string(),f[1].to_string())),
            "COLUMNS"  => {
                if p.columns.last().map(|c| c != f[0]).unwrap_or(true) {
                    p.columns.push(f[0].to_string());
                }
                for pair in f[1..].chunks(2) {
                    let prev = p.coefs.insert((f[0].to_string(),pair[0].to_string()),pair[1].parse().unwrap());
                    assert!(prev.is_none(),"duplicate entry {} {}",f[0],pair[0]);
                }
            },
            "RHS" => {
                assert_eq!(f[0],"RHS");
                for pair in f[1..].chunks(2) {
                    p.rhs.insert(pair[0].to_string(),pair[1].parse().unwrap());
                }
            },
            "SOS" => {
                if f[0].starts_with('S') && f.len() == 3 && f[1] == "SET" {
                    p.sos.push((f[0].to_string(),f[2].to_string(),Vec::new()));
                }
                else {
                    assert_eq!(f[0],"SET");
                    p.sos.last_mut().unwrap().2.push((f[1].to_string(),f[2].parse().unwrap()));
                }
            },
            "BOUNDS" => {
                assert_eq!(f[1],"BOUND");
                p.bounds.push((f[0].to_string(),f[2].to_string(),f.get(3).map(|s| s.to_string())));
            },
            s => panic!("unexpected data line in section {}: {}",s,line)
        }
    }
    p
}
