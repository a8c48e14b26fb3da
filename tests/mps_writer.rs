extern crate probwriter;

mod common;

use std::collections::HashMap;

use probwriter::*;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use common::*;

fn write_mps(m : &mut Model, opts : WriterOptions) -> Result<(String,SymbolMap),WriteError> {
    let mut out = Vec::new();
    let sm = MpsWriter::new().write_to(m,&mut out,&AllCapabilities,opts)?;
    Ok((String::from_utf8(out).unwrap(),sm))
}

/// A random linear model with `n` variables and `ncon` constraints of mixed shapes. If `shuffle`
/// is given, variables and constraints are declared in a permuted order.
fn random_model(seed : u64, n : usize, ncon : usize, shuffle : Option<u64>) -> Model {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut var_order : Vec<usize> = (0..n).collect();
    let mut con_order : Vec<usize> = (0..ncon).collect();
    if let Some(s) = shuffle {
        let mut r2 = StdRng::seed_from_u64(s);
        var_order.shuffle(&mut r2);
        con_order.shuffle(&mut r2);
    }

    let domains : Vec<Domain> = (0..n).map(|_| match rng.gen_range(0..4) {
        0 => nonnegative(),
        1 => bounded(-(rng.gen_range(1..10) as f64),rng.gen_range(1..10) as f64),
        2 => bounded(0.0,rng.gen_range(1..20) as f64).integer(),
        _ => unbounded()
    }).collect();
    let rows : Vec<(Vec<(usize,f64)>,Relation)> = (0..ncon).map(|_| {
        let mut terms : Vec<(usize,f64)> = (0..n)
            .filter_map(|j| if rng.gen_bool(0.3) { Some((j,rng.gen_range(-5.0..5.0))) } else { None })
            .collect();
        if terms.is_empty() { terms.push((rng.gen_range(0..n),1.0)); }
        let rel = match rng.gen_range(0..4) {
            0 => Relation::Eq(rng.gen_range(-3.0..3.0)),
            1 => Relation::Ge(rng.gen_range(-3.0..3.0)),
            2 => Relation::Le(rng.gen_range(-3.0..3.0)),
            _ => Relation::Range(-1.0,rng.gen_range(0.0..4.0)),
        };
        (terms,rel)
    }).collect();
    let obj : Vec<f64> = (0..n).map(|_| rng.gen_range(-2.0..2.0)).collect();

    let mut m = Model::new("random");
    let mut vars = vec![None; n];
    for &j in var_order.iter() {
        vars[j] = Some(m.indexed_var("x",vec![j.into()],domains[j]).unwrap());
    }
    let vars : Vec<VarId> = vars.into_iter().map(|v| v.unwrap()).collect();
    for &i in con_order.iter() {
        let (terms,rel) = &rows[i];
        let body = sum(terms.iter().map(|&(j,c)| c * vars[j]));
        m.indexed_constraint("c",vec![i.into()],body,*rel).unwrap();
    }
    m.objective("cost",Sense::Minimize,dot(vars.as_slice(),obj.as_slice()) + 1.5).unwrap();
    m
}

#[test]
fn round_trip_recovers_coefficients() {
    let mut m = random_model(17,12,9,None);
    let (text,sm) = write_mps(&mut m,WriterOptions::default()).unwrap();
    let p = read_mps(text.as_str());

    assert_eq!(p.name, "random");
    assert_eq!(p.sense, "MIN");
    assert_eq!(p.row_sense(p.objective.as_str()), Some("N"));

    // expected coefficients from the model, keyed by written labels
    let mut expected : HashMap<(String,String),f64> = HashMap::new();
    let mut expected_rhs : HashMap<String,f64> = HashMap::new();
    for (cid,label) in sm.iter() {
        let ComponentId::Constraint(c) = cid else { continue };
        let cd = m.constraint_data(c).unwrap();
        let repn = canonicalize(&cd.body);
        let mut rows = Vec::new();
        if cd.equality { rows.push((format!("c_e_{}_",label),cd.lower.unwrap())); }
        else {
            let ranged = cd.lower.is_some() && cd.upper.is_some();
            if let Some(l) = cd.lower { rows.push((format!("{}_{}_",if ranged { "r_l" } else { "c_l" },label),l)); }
            if let Some(u) = cd.upper { rows.push((format!("{}_{}_",if ranged { "r_u" } else { "c_u" },label),u)); }
        }
        for (row,b) in rows {
            assert_eq!(sm.get_object(row.as_str()), Some(cid));
            for (v,coef) in repn.linear.iter() {
                expected.insert((sm.get_symbol((*v).into()).unwrap().to_string(),row.clone()),*coef);
            }
            expected_rhs.insert(row,b - repn.constant);
        }
    }
    let Some(ComponentId::Objective(o)) = sm.get_object(DEFAULT_OBJECTIVE) else { panic!("objective alias missing") };
    let obj = m.objective_data(o).unwrap();
    for (v,coef) in canonicalize(&obj.expr).linear.iter() {
        expected.insert((sm.get_symbol((*v).into()).unwrap().to_string(),p.objective.clone()),*coef);
    }

    let written : HashMap<(String,String),f64> = p.coefs.iter()
        .filter(|((col,_),_)| col != ONE_VAR_CONSTANT)
        .map(|(k,v)| (k.clone(),*v))
        .collect();
    assert_eq!(written, expected);
    for (row,v) in expected_rhs.iter() {
        assert_eq!(p.rhs.get(row), Some(v), "rhs of {}",row);
    }
    // objective constant through the synthetic column
    assert_eq!(p.coefs.get(&(ONE_VAR_CONSTANT.to_string(),p.objective.clone())), Some(&1.5));
    assert_eq!(p.rhs.get("c_e_ONE_VAR_CONSTANT"), Some(&1.0));
    assert_eq!(p.sections, vec!["NAME","OBJSENSE","OBJNAME","ROWS","COLUMNS","RHS","BOUNDS","ENDATA"]);
}

#[test]
fn objective_count_is_checked_before_output() {
    let mut m = Model::new("noobj");
    let x = m.var("x",nonnegative()).unwrap();
    m.constraint("c",x,Relation::Ge(1.0)).unwrap();

    let mut out = Vec::new();
    let r = MpsWriter::new().write_to(&mut m,&mut out,&AllCapabilities,WriterOptions::default());
    assert!(matches!(r, Err(WriteError::NoObjective{ format : "MPS", .. })));
    assert!(out.is_empty());

    m.objective("a",Sense::Minimize,x).unwrap();
    m.objective("b",Sense::Maximize,2.0 * x).unwrap();
    let r = MpsWriter::new().write_to(&mut m,&mut out,&AllCapabilities,WriterOptions::default());
    match r {
        Err(e @ WriteError::MultipleObjectives{ .. }) => {
            let msg = e.to_string();
            assert!(msg.contains("Objectives: a b"), "{}", msg);
        },
        _ => panic!("expected multiple objectives error")
    }
    assert!(out.is_empty());
}

#[test]
fn ranged_constraint_emits_two_rows() {
    let mut m = Model::new("ranged");
    let x = m.var("x",unbounded()).unwrap();
    let c = m.constraint("r",x,Relation::Range(2.0,5.0)).unwrap();
    m.objective("o",Sense::Minimize,x).unwrap();
    let (text,sm) = write_mps(&mut m,WriterOptions::new().with_symbolic_solver_labels(true)).unwrap();
    let p = read_mps(text.as_str());

    assert_eq!(p.row_sense("r_l_r_"), Some("G"));
    assert_eq!(p.row_sense("r_u_r_"), Some("L"));
    assert_eq!(p.rows.len(), 3);
    assert_eq!(p.coefs.get(&("x".to_string(),"r_l_r_".to_string())), Some(&1.0));
    assert_eq!(p.coefs.get(&("x".to_string(),"r_u_r_".to_string())), Some(&1.0));
    assert_eq!(p.rhs.get("r_l_r_"), Some(&2.0));
    assert_eq!(p.rhs.get("r_u_r_"), Some(&5.0));
    assert_eq!(sm.get_object("r_l_r_"), Some(c.into()));
    assert_eq!(sm.get_object("r_u_r_"), Some(c.into()));
    assert_eq!(sm.get_symbol(c.into()), Some("r"));
}

#[test]
fn row_labels_do_not_clash_with_column_names() {
    let mut m = Model::new("M");
    let v = m.var("c_u_cap_",nonnegative()).unwrap();
    let c = m.constraint("cap",2.0 * v,Relation::Le(4.0)).unwrap();
    m.objective("o",Sense::Maximize,v).unwrap();
    let (text,sm) = write_mps(&mut m,WriterOptions::new().with_symbolic_solver_labels(true)).unwrap();
    let p = read_mps(text.as_str());

    assert_eq!(p.row_sense("c_u_cap_"), Some("L"));
    assert_eq!(p.columns, vec!["c_u_cap_"]);
    assert_eq!(p.coefs.get(&("c_u_cap_".to_string(),"c_u_cap_".to_string())), Some(&2.0));
    assert_eq!(p.rhs.get("c_u_cap_"), Some(&4.0));
    assert_eq!(sm.get_object("c_u_cap_"), Some(c.into()));
    assert_eq!(sm.get_object_in(Namespace::Column,"c_u_cap_"), Some(v.into()));
    assert_eq!(sm.get_symbol(v.into()), Some("c_u_cap_"));
}

#[test]
fn taken_row_labels_are_disambiguated() {
    let mut m = Model::new("M");
    let x = m.var("x",nonnegative()).unwrap();
    let first = m.constraint("c_l_d_",x,Relation::Ge(0.0)).unwrap();
    let d = m.constraint("d",x,Relation::Ge(1.0)).unwrap();
    m.objective("o",Sense::Minimize,x).unwrap();
    let (text,sm) = write_mps(&mut m,WriterOptions::new().with_symbolic_solver_labels(true)).unwrap();
    let p = read_mps(text.as_str());

    assert_eq!(p.row_sense("c_l_c_l_d__"), Some("G"));
    assert_eq!(p.row_sense("c_l_d__1"), Some("G"));
    assert_eq!(p.row_sense("c_l_d_"), None);
    assert_eq!(p.rhs.get("c_l_d__1"), Some(&1.0));
    assert_eq!(p.coefs.get(&("x".to_string(),"c_l_d__1".to_string())), Some(&1.0));
    assert_eq!(sm.get_object("c_l_d_"), Some(first.into()));
    assert_eq!(sm.get_object("c_l_d__1"), Some(d.into()));
    assert_eq!(sm.aliases_of(d.into()), vec!["c_l_d__1"]);
}

#[test]
fn rhs_is_net_of_body_constant() {
    let mut m = Model::new("M");
    let x = m.var("x",unbounded()).unwrap();
    m.constraint("e",x + 4.0,Relation::Eq(10.0)).unwrap();
    m.constraint("u",3.0 - x,Relation::Le(1.0)).unwrap();
    m.objective("o",Sense::Minimize,x).unwrap();
    let (text,_) = write_mps(&mut m,WriterOptions::new().with_symbolic_solver_labels(true)).unwrap();
    let p = read_mps(text.as_str());
    assert_eq!(p.rhs.get("c_e_e_"), Some(&6.0));
    assert_eq!(p.rhs.get("c_u_u_"), Some(&-2.0));
    assert_eq!(p.coefs.get(&("x".to_string(),"c_u_u_".to_string())), Some(&-1.0));
}

#[test]
fn binary_bounds() {
    let mut m = Model::new("bin");
    let b = m.var("b",binary()).unwrap();
    m.objective("o",Sense::Maximize,b).unwrap();
    let (text,_) = write_mps(&mut m,WriterOptions::default()).unwrap();
    let p = read_mps(text.as_str());
    assert_eq!(p.bounds_of("x1"), vec![("BV",None)]);

    m.var_data_mut(b).unwrap().bounds = Bounds::new(0.0,2.0);
    match write_mps(&mut m,WriterOptions::default()) {
        Err(WriteError::InvalidBinaryBounds{ name, lb, ub }) => {
            assert_eq!(name,"b");
            assert_eq!((lb,ub),(0.0,2.0));
        },
        _ => panic!("expected binary bounds error")
    }
}

#[test]
fn unreferenced_variables_are_pruned() {
    let mut m = Model::new("M");
    let x = m.var("x",nonnegative()).unwrap();
    let unused = m.var("unused",bounded(1.0,2.0)).unwrap();
    m.objective("o",Sense::Minimize,x).unwrap();

    let (text,sm) = write_mps(&mut m,WriterOptions::new().with_symbolic_solver_labels(true)).unwrap();
    let p = read_mps(text.as_str());
    assert!(p.bounds_of("unused").is_empty());
    assert_eq!(sm.get_symbol(unused.into()), None);
    assert_eq!(sm.get_object("unused"), None);
    assert_eq!(sm.get_symbol(x.into()), Some("x"));

    let opts = WriterOptions::new().with_symbolic_solver_labels(true).with_include_all_variable_bounds(true);
    let (text,sm) = write_mps(&mut m,opts).unwrap();
    let p = read_mps(text.as_str());
    assert_eq!(p.bounds_of("unused"), vec![("LO",Some("1")),("UP",Some("2"))]);
    assert_eq!(sm.get_symbol(unused.into()), None);
}

#[test]
fn constant_objective_uses_placeholder_column() {
    let mut m = Model::new("M");
    let x = m.var("x",nonnegative()).unwrap();
    m.constraint("c",x,Relation::Le(4.0)).unwrap();
    m.objective("o",Sense::Minimize,constant(0.0)).unwrap();

    let (text,_) = write_mps(&mut m,WriterOptions::default().with_force_objective_constant(true)).unwrap();
    let p = read_mps(text.as_str());
    assert_eq!(p.row_sense("c_e_ONE_VAR_CONSTANT"), Some("E"));
    assert_eq!(p.coefs.get(&(ONE_VAR_CONSTANT.to_string(),p.objective.clone())), Some(&0.0));
    assert_eq!(p.coefs.get(&(ONE_VAR_CONSTANT.to_string(),"c_e_ONE_VAR_CONSTANT".to_string())), Some(&1.0));
    assert_eq!(p.columns.last().map(|s| s.as_str()), Some(ONE_VAR_CONSTANT));

    // the constant row is added for a constant objective also without the option
    let (text2,_) = write_mps(&mut m,WriterOptions::default()).unwrap();
    assert_eq!(text, text2);
}

#[test]
fn zero_constant_is_omitted_unless_forced() {
    let mut m = Model::new("M");
    let x = m.var("x",nonnegative()).unwrap();
    m.objective("o",Sense::Minimize,x).unwrap();
    let (text,_) = write_mps(&mut m,WriterOptions::default()).unwrap();
    assert!(!text.contains(ONE_VAR_CONSTANT));
    let (text,_) = write_mps(&mut m,WriterOptions::default().with_force_objective_constant(true)).unwrap();
    assert!(text.contains("    ONE_VAR_CONSTANT x2 0 c_e_ONE_VAR_CONSTANT 1\n"));
}

#[test]
fn determinism_level_two_is_byte_identical() {
    let opts = || WriterOptions::new().with_file_determinism(FileDeterminism::SortNames);
    let mut m = random_model(5,15,10,None);
    let (a,_) = write_mps(&mut m,opts()).unwrap();
    let (b,_) = write_mps(&mut m,opts()).unwrap();
    assert_eq!(a, b);

    // declaration order does not matter when names and indices are sorted
    let mut shuffled = random_model(5,15,10,Some(99));
    let (c,_) = write_mps(&mut shuffled,opts()).unwrap();
    assert_eq!(a, c);

    let mut shuffled = random_model(5,15,10,Some(99));
    let (d,_) = write_mps(&mut shuffled,WriterOptions::new().with_file_determinism(FileDeterminism::None)).unwrap();
    assert_ne!(a, d);
}

#[test]
fn fixed_variables() {
    let mut m = Model::new("fixed");
    let x = m.var("x",nonnegative()).unwrap();
    let y = m.var("y",nonnegative()).unwrap();
    m.constraint("c",x + y,Relation::Ge(1.0)).unwrap();
    m.objective("o",Sense::Minimize,x + y).unwrap();
    m.fix(y,2.5).unwrap();

    let mut out = Vec::new();
    let r = MpsWriter::new().write_to(&mut m,&mut out,&AllCapabilities,WriterOptions::default());
    match r {
        Err(WriteError::FixedVariable{ var, model }) => { assert_eq!(var,"y"); assert_eq!(model,"fixed"); },
        _ => panic!("expected fixed variable error")
    }
    assert!(out.is_empty());

    let opts = || WriterOptions::new().with_output_fixed_variable_bounds(true);
    let (text,_) = write_mps(&mut m,opts()).unwrap();
    let p = read_mps(text.as_str());
    assert_eq!(p.bounds_of("x2"), vec![("FX",Some("2.5"))]);
    assert_eq!(p.bounds_of("x1"), vec![("LO",Some("0"))]);

    m.set_value(y,None).unwrap();
    assert!(matches!(write_mps(&mut m,opts()), Err(WriteError::FixedWithoutValue(_))));
}

#[test]
fn sos_constraints() {
    let mut m = Model::new("sos");
    let xs : Vec<VarId> = (0..3).map(|i| m.indexed_var("x",vec![i.into()],bounded(0.0,1.0)).unwrap()).collect();
    let s = m.sos("s",2,vec![(xs[0],1.0),(xs[1],2.0),(xs[2],3.0)]).unwrap();
    m.objective("o",Sense::Maximize,constant(1.0)).unwrap();
    let (text,sm) = write_mps(&mut m,WriterOptions::new().with_symbolic_solver_labels(true)).unwrap();
    let p = read_mps(text.as_str());
    assert_eq!(p.sos, vec![("S2".to_string(),"s".to_string(),vec![("x(0)".to_string(),1.0),("x(1)".to_string(),2.0),("x(2)".to_string(),3.0)])]);
    assert_eq!(p.sections, vec!["NAME","OBJSENSE","OBJNAME","ROWS","COLUMNS","RHS","SOS","BOUNDS","ENDATA"]);
    // SOS membership counts as a reference
    assert_eq!(p.bounds_of("x(1)"), vec![("LO",Some("0")),("UP",Some("1"))]);
    assert_eq!(sm.get_symbol(xs[2].into()), Some("x(2)"));
    assert_eq!(sm.get_symbol(s.into()), Some("s"));

    let mut out = Vec::new();
    let r = MpsWriter::new().write_to(&mut m,&mut out,&LinearOnly,WriterOptions::default());
    assert!(r.is_ok());
    let r = MpsWriter::new().write_to(&mut m,&mut out,&|c : Capability| c != Capability::Sos2,WriterOptions::default());
    assert!(matches!(r, Err(WriteError::UnsupportedSosLevel{ level : 2, .. })));
}

#[test]
fn option_errors_precede_output() {
    let mut m = Model::new("M");
    let x = m.var("x",nonnegative()).unwrap();
    m.objective("o",Sense::Minimize,x).unwrap();

    let mut out = Vec::new();
    let opts = WriterOptions::new().with_symbolic_solver_labels(true).with_labeler(NumericLabeler::new("v"));
    let r = MpsWriter::new().write_to(&mut m,&mut out,&AllCapabilities,opts);
    assert!(matches!(r, Err(WriteError::Config(ConfigError::ConflictingLabelers))));
    assert!(out.is_empty());

    let r = WriterOptions::from_pairs(vec![("symbolic_solver_labels",OptionValue::Bool(true)),("bogus",OptionValue::Int(3))]);
    assert!(matches!(r, Err(ConfigError::UnrecognizedOptions(ref k)) if k == &vec!["bogus".to_string()]));

    let opts = WriterOptions::from_pairs(vec![("labeler",OptionValue::Labeler(Box::new(NumericLabeler::new("v"))))]).unwrap();
    let (text,_) = write_mps(&mut m,opts).unwrap();
    assert!(text.contains("OBJNAME\n v2\n"));
}

#[test]
fn explicit_row_and_column_order() {
    let mut m = Model::new("M");
    let x = m.var("x",nonnegative()).unwrap();
    let y = m.var("y",nonnegative()).unwrap();
    let c1 = m.constraint("c1",x + y,Relation::Ge(1.0)).unwrap();
    let c2 = m.constraint("c2",x - y,Relation::Le(1.0)).unwrap();
    m.objective("o",Sense::Minimize,x + y).unwrap();

    let opts = WriterOptions::new()
        .with_symbolic_solver_labels(true)
        .with_row_order(RowOrder::from_sequence(vec![c2,c1]))
        .with_column_order(ColumnOrder::from_sequence(vec![y,x]));
    let (text,_) = write_mps(&mut m,opts).unwrap();
    let p = read_mps(text.as_str());
    let rows : Vec<&str> = p.rows.iter().map(|r| r.1.as_str()).collect();
    assert_eq!(rows, vec!["o","c_u_c2_","c_l_c1_"]);
    assert_eq!(p.columns, vec!["y","x"]);
    assert!(text.contains("BOUNDS\n LO BOUND y 0\n LO BOUND x 0\n"));

    let opts = WriterOptions::new().with_row_order(RowOrder::from_sequence(vec![c1]));
    assert!(matches!(write_mps(&mut m,opts), Err(WriteError::Config(ConfigError::MissingOrder{ axis : "row", .. }))));
}

#[test]
fn trivial_constraint_policy() {
    let mut m = Model::new("M");
    let x = m.var("x",nonnegative()).unwrap();
    m.constraint("t",constant(2.0),Relation::Le(5.0)).unwrap();
    m.constraint("c",x,Relation::Le(5.0)).unwrap();
    m.objective("o",Sense::Minimize,x).unwrap();

    let sym = || WriterOptions::new().with_symbolic_solver_labels(true);
    let (text,_) = write_mps(&mut m,sym()).unwrap();
    let p = read_mps(text.as_str());
    assert_eq!(p.row_sense("c_u_t_"), Some("L"));
    assert_eq!(p.rhs.get("c_u_t_"), Some(&3.0));
    assert!(p.coefs.keys().all(|(_,r)| r != "c_u_t_"));

    let (text,sm) = write_mps(&mut m,sym().with_skip_trivial_constraints(true)).unwrap();
    let p = read_mps(text.as_str());
    assert_eq!(p.row_sense("c_u_t_"), None);
    assert_eq!(sm.get_object("t"), None);
}

#[test]
fn nonlinear_constraint_is_rejected() {
    let mut m = Model::new("M");
    let x = m.var("x",nonnegative()).unwrap();
    m.constraint("nl",exp(x),Relation::Le(5.0)).unwrap();
    m.objective("o",Sense::Minimize,x).unwrap();
    match write_mps(&mut m,WriterOptions::default()) {
        Err(e @ WriteError::Nonlinear{ .. }) => assert!(e.to_string().contains("constraint `nl` has nonlinear terms")),
        _ => panic!("expected nonlinear error")
    }
}

#[test]
fn colliding_symbolic_labels_are_unique() {
    let mut m = Model::new("M");
    let a = m.indexed_var("x",vec!["a b".into()],nonnegative()).unwrap();
    let b = m.indexed_var("x",vec!["a.b".into()],nonnegative()).unwrap();
    m.objective("o",Sense::Minimize,a + b).unwrap();
    let (text,sm) = write_mps(&mut m,WriterOptions::new().with_symbolic_solver_labels(true)).unwrap();
    let p = read_mps(text.as_str());
    assert_eq!(p.columns, vec!["x(a_b)","x(a_b)_1"]);
    assert_eq!(sm.get_symbol(b.into()), Some("x(a_b)_1"));
}

#[test]
fn cached_representations_are_reused() {
    let mut m = Model::new("M");
    let x = m.var("x",nonnegative()).unwrap();
    let c = m.constraint("c",2.0 * x,Relation::Ge(1.0)).unwrap();
    m.objective("o",Sense::Minimize,x).unwrap();
    let sym = || WriterOptions::new().with_symbolic_solver_labels(true);
    write_mps(&mut m,sym()).unwrap();

    let root = m.root();
    m.block_mut(root).unwrap().gen_con_canonical_repn = false;
    m.constraint_data_mut(c).unwrap().body = 7.0 * x;
    let (text,_) = write_mps(&mut m,sym()).unwrap();
    assert!(text.contains("    x o 1 c_l_c_ 2\n"));

    m.block_mut(root).unwrap().gen_con_canonical_repn = true;
    let (text,_) = write_mps(&mut m,sym()).unwrap();
    assert!(text.contains("    x o 1 c_l_c_ 7\n"));
}

#[test]
fn sub_blocks_and_inactive_components() {
    let mut m = Model::new("M");
    let x = m.var("x",nonnegative()).unwrap();
    let b = m.add_block(m.root(),"stage",Some(vec![1.into()])).unwrap();
    let y = m.var_in(b,"y",None,nonnegative()).unwrap();
    m.constraint_in(b,"link",None,x - y,Relation::Eq(0.0)).unwrap();
    let off = m.constraint("off",x,Relation::Ge(3.0)).unwrap();
    m.deactivate(off).unwrap();
    m.objective("o",Sense::Minimize,x + y).unwrap();

    let (text,sm) = write_mps(&mut m,WriterOptions::new().with_symbolic_solver_labels(true)).unwrap();
    let p = read_mps(text.as_str());
    assert_eq!(p.row_sense("c_e_stage(1)_link_"), Some("E"));
    assert_eq!(p.row_sense("c_l_off_"), None);
    assert_eq!(sm.get_symbol(y.into()), Some("stage(1)_y"));

    // a constraint of an active block referencing a variable of an inactive block
    m.deactivate(b).unwrap();
    m.constraint("uses_y",y,Relation::Le(1.0)).unwrap();
    assert!(matches!(write_mps(&mut m,WriterOptions::default()), Err(WriteError::UndeclaredVariable{ .. })));
}

#[test]
fn write_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.mps");
    let mut m = random_model(3,5,4,None);
    let (written,sm) = MpsWriter::new().write(&mut m,Some(path.as_path()),&AllCapabilities,WriterOptions::default()).unwrap();
    assert_eq!(written, path);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.ends_with("ENDATA\n"));
    assert!(!sm.is_empty());

    let bad = dir.path().join("missing").join("model.mps");
    let r = MpsWriter::new().write(&mut m,Some(bad.as_path()),&AllCapabilities,WriterOptions::default());
    assert!(matches!(r, Err(WriteError::Io(_))));
}

#[test]
fn registry_dispatch() {
    let reg = WriterRegistry::with_defaults();
    let mut m = random_model(11,4,3,None);
    let w = reg.get("mps").unwrap();
    let mut out = Vec::new();
    w.write_to(&mut m,&mut out,&AllCapabilities,WriterOptions::default()).unwrap();
    assert!(String::from_utf8(out).unwrap().starts_with("* Source: probwriter MPS Writer\nNAME random\n"));
    assert!(matches!(reg.get("nl"), Err(ConfigError::UnknownFormat(_))));
}
