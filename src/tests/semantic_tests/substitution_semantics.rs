use super::*;

// =============================================================================
// SUBSTITUTION SEMANTIC PROPERTIES
// =============================================================================
//
// A substitution is observed only in its fully composed form: no self
// bindings, no cycles, and no bound variable inside any value. Every growth
// operation returns a new substitution.

// -------------------------------------------------------------------------
// Construction
// -------------------------------------------------------------------------
#[test]
fn self_binding_is_elided() {
    let a = Var::new("a");
    let s = Substitution::new([(a.clone(), v(&a))]).unwrap();
    assert_eq!(s, Substitution::empty());
    assert!(s.is_empty());
}

#[test]
fn chains_resolve_at_construction() {
    let (a, b, c) = (Var::new("a"), Var::new("b"), Var::new("c"));
    let s = subst(&[(&a, v(&b)), (&b, v(&c))]);
    assert_eq!(s.lookup(&a), v(&c));
    assert_eq!(s.lookup(&b), v(&c));
    assert!(s.is_idempotent());
}

#[test]
fn renaming_loop_collapses_to_one_binding() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let s = subst(&[(&a, v(&b)), (&b, v(&a))]);
    assert_eq!(s.len(), 1);
    assert_eq!(s.apply_to_term(&v(&a)), s.apply_to_term(&v(&b)));
}

#[test]
fn nested_values_are_composed() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let s = subst(&[(&a, f("F", vec![v(&b)])), (&b, c("x"))]);
    let expected = subst(&[(&a, f("F", vec![c("x")])), (&b, c("x"))]);
    assert_eq!(s, expected);
}

#[test]
fn direct_cycle_is_rejected() {
    let a = Var::new("a");
    let err = Substitution::new([(a.clone(), f("F", vec![v(&a)]))]).unwrap_err();
    assert!(matches!(err, FolError::CircularSubstitution { var, .. } if var == a));
}

#[test]
fn cycle_through_nesting_is_rejected() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let result = Substitution::new([
        (a.clone(), f("F", vec![v(&b)])),
        (b.clone(), f("F", vec![v(&a)])),
    ]);
    assert!(matches!(result, Err(FolError::CircularSubstitution { .. })));
}

#[test]
fn repeated_key_with_different_values_conflicts() {
    let a = Var::new("a");
    let result = Substitution::new([(a.clone(), c("x")), (a.clone(), c("y"))]);
    assert!(matches!(result, Err(FolError::SubstitutionConflict { .. })));
}

#[test]
fn repeated_key_with_same_value_is_accepted() {
    let a = Var::new("a");
    let s = Substitution::new([(a.clone(), c("x")), (a.clone(), c("x"))]).unwrap();
    assert_eq!(s.len(), 1);
}

// -------------------------------------------------------------------------
// Lookup is the identity outside the domain
// -------------------------------------------------------------------------
#[test]
fn lookup_outside_domain_is_identity() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let s = subst(&[(&a, c("x"))]);
    assert_eq!(s.lookup(&b), v(&b));
    assert_eq!(s.get(&b), None);
    assert!(s.binds(&a));
    assert!(!s.binds(&b));
}

// -------------------------------------------------------------------------
// Bind
// -------------------------------------------------------------------------
#[test]
fn bind_composes_into_existing_values() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let s = subst(&[(&a, f("G", vec![v(&b)]))]);
    let extended = s.bind(b.clone(), c("k")).unwrap();
    assert_eq!(extended.lookup(&a), f("G", vec![c("k")]));
    assert_eq!(extended.lookup(&b), c("k"));
}

#[test]
fn bind_resolves_incoming_value() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let s = subst(&[(&a, c("x"))]);
    let extended = s.bind(b.clone(), f("F", vec![v(&a)])).unwrap();
    assert_eq!(extended.lookup(&b), f("F", vec![c("x")]));
}

#[test]
fn bind_to_same_value_is_noop() {
    let a = Var::new("a");
    let s = subst(&[(&a, c("x"))]);
    assert_eq!(s.bind(a.clone(), c("x")).unwrap(), s);
    assert_eq!(s.bind(a.clone(), v(&a)).unwrap(), s);
}

#[test]
fn bind_back_onto_renamed_variable_is_noop() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let s = subst(&[(&a, v(&b))]);
    assert_eq!(s.bind(b.clone(), v(&a)).unwrap(), s);
}

#[test]
fn bind_to_different_value_conflicts() {
    let a = Var::new("a");
    let s = subst(&[(&a, c("x"))]);
    assert_eq!(
        s.bind(a.clone(), c("y")),
        Err(FolError::SubstitutionConflict {
            var: a.clone(),
            existing: c("x"),
            incoming: c("y"),
        })
    );
}

#[test]
fn failed_bind_leaves_receiver_untouched() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let s = subst(&[(&a, f("F", vec![v(&b)]))]);
    let before = s.clone();
    assert!(s.bind(b.clone(), f("G", vec![v(&a)])).is_err());
    assert_eq!(s, before);
}

#[test]
fn successful_bind_leaves_receiver_untouched() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let s = subst(&[(&a, v(&b))]);
    let extended = s.bind(b.clone(), c("x")).unwrap();
    assert_eq!(s.len(), 1);
    assert_eq!(s.lookup(&a), v(&b));
    assert_eq!(extended.lookup(&a), c("x"));
}

// -------------------------------------------------------------------------
// Merge
// -------------------------------------------------------------------------
#[test]
fn merge_with_empty_is_identity() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let s = subst(&[(&a, f("F", vec![v(&b)]))]);
    assert_eq!(s.merge(&Substitution::empty()), Some(s.clone()));
    assert_eq!(Substitution::empty().merge(&s), Some(s));
}

#[test]
fn merge_propagates_bindings() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let left = subst(&[(&a, f("F", vec![v(&b)]))]);
    let right = subst(&[(&b, c("x"))]);
    let merged = left.merge(&right).unwrap();
    assert_eq!(merged, subst(&[(&a, f("F", vec![c("x")])), (&b, c("x"))]));
}

#[test]
fn merge_conflicting_values_is_none() {
    let (a, b, c_) = (Var::new("a"), Var::new("b"), Var::new("c"));
    let left = subst(&[(&a, v(&b))]);
    let right = subst(&[(&a, v(&c_))]);
    assert_eq!(left.merge(&right), None);
    assert!(matches!(
        left.try_merge(&right),
        Err(FolError::SubstitutionConflict { .. })
    ));
}

#[test]
fn merge_renaming_cycle_is_none() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let left = subst(&[(&a, v(&b))]);
    let right = subst(&[(&b, v(&a))]);
    assert_eq!(left.merge(&right), None);
    assert!(matches!(
        left.try_merge(&right),
        Err(FolError::CircularSubstitution { .. })
    ));
}

#[test]
fn merge_cycle_through_nesting_is_none() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let left = subst(&[(&a, f("F", vec![v(&b)]))]);
    let right = subst(&[(&b, f("G", vec![v(&a)]))]);
    assert_eq!(left.merge(&right), None);
}

#[test]
fn merge_agreement_is_checked_after_resolution() {
    // {a ↦ b} and {a ↦ c, b ↦ c} agree once b is known to be c.
    let (a, b, c_) = (Var::new("a"), Var::new("b"), Var::new("c"));
    let left = subst(&[(&a, v(&b))]);
    let right = subst(&[(&a, v(&c_)), (&b, v(&c_))]);
    let expected = subst(&[(&a, v(&c_)), (&b, v(&c_))]);
    assert_eq!(left.merge(&right), Some(expected.clone()));
    assert_eq!(right.merge(&left), Some(expected));
}

#[test]
fn merge_is_symmetric_on_disjoint_domains() {
    let (a, b, x) = (Var::new("a"), Var::new("b"), Var::new("x"));
    let left = subst(&[(&a, f("F", vec![v(&x)]))]);
    let right = subst(&[(&b, v(&x)), (&x, c("k"))]);
    assert_eq!(left.merge(&right), right.merge(&left));
}

#[test]
fn merge_is_associative_along_a_chain() {
    let (a, b, c_, d) = (Var::new("a"), Var::new("b"), Var::new("c"), Var::new("d"));
    let s1 = subst(&[(&a, v(&b))]);
    let s2 = subst(&[(&b, v(&c_))]);
    let s3 = subst(&[(&c_, v(&d))]);
    let left_first = s1.merge(&s2).and_then(|s| s.merge(&s3));
    let right_first = s2.merge(&s3).and_then(|s| s1.merge(&s));
    assert_eq!(left_first, right_first);
    let merged = left_first.unwrap();
    for var in [&a, &b, &c_] {
        assert_eq!(merged.lookup(var), v(&d));
    }
}

#[test]
fn merge_leaves_both_sides_untouched() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let left = subst(&[(&a, f("F", vec![v(&b)]))]);
    let right = subst(&[(&b, c("x"))]);
    let (left_before, right_before) = (left.clone(), right.clone());
    let _ = left.merge(&right);
    assert_eq!(left, left_before);
    assert_eq!(right, right_before);
}

// -------------------------------------------------------------------------
// Application and inspection
// -------------------------------------------------------------------------
#[test]
fn application_reaches_nested_arguments() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let s = subst(&[(&a, c("x"))]);
    let term = f("F", vec![f("G", vec![v(&a)]), v(&b)]);
    assert_eq!(
        s.apply_to_term(&term),
        f("F", vec![f("G", vec![c("x")]), v(&b)])
    );
    let p = Predicate::new("P", vec![v(&a), v(&b)]);
    assert_eq!(
        s.apply_to_predicate(&p),
        Predicate::new("P", vec![c("x"), v(&b)])
    );
}

#[test]
fn renaming_detection() {
    let (a, b, c_, d) = (Var::new("a"), Var::new("b"), Var::new("c"), Var::new("d"));
    assert!(subst(&[(&a, v(&b)), (&c_, v(&d))]).is_renaming());
    assert!(!subst(&[(&a, v(&b)), (&c_, v(&b))]).is_renaming());
    assert!(!subst(&[(&a, c("x"))]).is_renaming());
}

#[test]
fn domain_lists_bound_variables() {
    let (a, b) = (Var::new("a"), Var::new("b"));
    let s = subst(&[(&a, v(&b))]);
    let domain = s.domain();
    assert_eq!(domain.len(), 1);
    assert!(domain.contains(&a));
    assert_eq!(s.bindings().count(), 1);
}

#[test]
fn equivalence_ignores_variable_direction() {
    let (x, y) = (Var::new("x"), Var::new("y"));
    let forward = subst(&[(&x, v(&y))]);
    let backward = subst(&[(&y, v(&x))]);
    assert!(forward.is_equivalent(&backward));
    assert!(!subst(&[(&x, c("a"))]).is_equivalent(&subst(&[(&x, c("b"))])));
    assert!(!forward.is_equivalent(&Substitution::empty()));
}
