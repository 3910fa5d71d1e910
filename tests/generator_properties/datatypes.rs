//! Datatype generation properties

use crate::*;
use proptest::prelude::*;
use voltest_gen::ScriptedDraw;

// =============================================================================
// TERMINATION
// =============================================================================

#[test]
fn test_ten_thousand_generations_terminate() {
    let mut src = source(0x5eed, Limits::default());
    let limits = src.limits().clone();
    for i in 0..10_000 {
        let ty = src
            .generate_type(None)
            .unwrap_or_else(|e| panic!("generation {} failed: {}", i, e));
        assert_legal(&ty, &limits);
    }
}

#[test]
fn test_array_parent_terminates() {
    let mut src = source(17, Limits::default());
    for _ in 0..1_000 {
        let ty = src.generate_type(Some(TypeCategory::Array)).unwrap();
        assert_eq!(ty.depth(), 0);
    }
}

// =============================================================================
// DEPTH AND NESTING
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_depth_bounded(seed in any::<u64>(), depth in 0usize..=5) {
        let limits = Limits::default().with_recursion_max_depth(depth);
        let mut src = source(seed, limits.clone());
        for _ in 0..20 {
            let ty = src.generate_type(None).unwrap();
            prop_assert!(ty.depth() <= depth, "{} deeper than {}", ty, depth);
        }
    }

    #[test]
    fn prop_no_illegal_nesting(seed in any::<u64>()) {
        let limits = Limits::stress();
        let mut src = source(seed, limits.clone());
        for _ in 0..10 {
            let ty = src.generate_type(None).unwrap();
            assert_legal(&ty, &limits);
        }
    }

    #[test]
    fn prop_compound_offset_law(seed in any::<u64>()) {
        let mut src = source(seed, Limits::default());
        for _ in 0..20 {
            let ty = src.generate_type(None).unwrap();
            walk(&ty, &mut |t| {
                if let TypeClass::Compound(c) = t {
                    let mut offset = 0;
                    for m in &c.members {
                        assert_eq!(m.offset, offset, "{}", t);
                        offset += m.ty.size();
                    }
                    assert_eq!(c.size, offset, "{}", t);
                }
            });
        }
    }

    #[test]
    fn prop_counts_within_limits(seed in any::<u64>()) {
        let limits = Limits::shallow();
        let mut src = source(seed, limits.clone());
        for _ in 0..20 {
            let ty = src.generate_type(None).unwrap();
            walk(&ty, &mut |t| match t {
                TypeClass::Compound(c) => {
                    assert!((1..=limits.compound_max_members).contains(&c.members.len()));
                }
                TypeClass::Enum(e) => {
                    assert!((1..=limits.enum_max_members).contains(&e.members.len()));
                }
                TypeClass::Array(a) => {
                    assert!((1..=limits.array_max_dims).contains(&a.dims.len()));
                    let max = limits.max_dim_size as u64;
                    assert!(a.dims.iter().all(|d| (1..=max).contains(d)));
                }
                _ => {}
            });
        }
    }
}

// =============================================================================
// EXTREME LIMITS
// =============================================================================

fn huge_dim_size() -> impl Strategy<Value = usize> {
    prop_oneof![
        Just(1usize << 20),
        Just(1usize << 31),
        Just(u32::MAX as usize),
        (1usize << 16)..=(u32::MAX as usize),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_huge_extents_never_panic(
        seed in any::<u64>(),
        dim in huge_dim_size(),
        dims in 1usize..=32,
    ) {
        let limits = Limits::stress()
            .with_max_dim_size(dim)
            .with_array_max_dims(dims);
        let mut src = source(seed, limits.clone());
        for _ in 0..20 {
            match src.generate_type(None) {
                Ok(ty) => {
                    prop_assert!(ty.checked_size().is_some(), "{} has no exact size", ty);
                    assert_legal(&ty, &limits);
                }
                Err(e) => prop_assert!(e.is_construction(), "unexpected error: {}", e),
            }
        }
    }
}

#[test]
fn test_huge_extents_surface_as_construction_errors() {
    let limits = Limits::default().with_max_dim_size(1 << 20);
    let mut construction = 0;
    for seed in 0..200 {
        let mut src = source(seed, limits.clone());
        match src.generate_type(None) {
            Ok(ty) => assert_eq!(ty.checked_size(), Some(ty.size())),
            Err(e) => {
                assert!(e.is_construction(), "seed {}: {}", seed, e);
                construction += 1;
            }
        }
    }
    // rank-4 arrays of 2^20-wide extents are common enough to hit
    assert!(construction > 0);
}

// =============================================================================
// SCRIPTED SCENARIOS
// =============================================================================

#[test]
fn test_two_member_compound_scenario() {
    let mut gen = voltest::TypeGenerator::native(Limits::default()).unwrap();
    let mut draw = ScriptedDraw::new([idx::COMPOUND, 1, idx::INTEGER, 4, idx::FLOAT, 1]);
    let ty = gen.generate_type(&mut draw, None).unwrap();

    let TypeClass::Compound(c) = &ty else {
        panic!("expected a compound, got {}", ty);
    };
    assert_eq!(c.size, 8);
    assert_eq!(c.members[0].offset, 0);
    assert_eq!(c.members[0].ty.size(), 4);
    assert_eq!(c.members[1].offset, 4);
    assert_eq!(c.members[1].ty.size(), 4);
    assert_eq!(draw.remaining(), 0);
}

#[test]
fn test_rejected_draws_consume_no_payload() {
    // time, region reference, enum-in-array are all rejected before payload draws
    let mut gen = voltest::TypeGenerator::native(Limits::default()).unwrap();
    let mut draw = ScriptedDraw::new([idx::TIME, idx::ENUM, idx::REFERENCE, idx::STRING, 1]);
    let ty = gen
        .generate_type(&mut draw, Some(TypeCategory::Array))
        .unwrap();
    assert_eq!(ty.to_string(), "string[*] nullterm ascii");
    assert_eq!(draw.consumed(), 5);
}
