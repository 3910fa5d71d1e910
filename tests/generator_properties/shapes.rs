//! Shape generation properties

use crate::*;
use proptest::prelude::*;
use voltest::MaxExtent;

proptest! {
    #[test]
    fn prop_shape_bounds(seed in any::<u64>(), rank in 0usize..=32, dim in 1usize..=64) {
        let limits = Limits::default().with_max_dim_size(dim);
        let mut src = source(seed, limits);
        let shape = src.generate_shape(rank, None).unwrap();
        prop_assert_eq!(shape.extents.len(), rank);
        prop_assert!(shape.extents.iter().all(|&e| e >= 1 && e <= dim as u64));
        prop_assert!(shape.max_extents.is_none());
    }

    #[test]
    fn prop_max_extents_unchanged(seed in any::<u64>(), bounds in proptest::collection::vec(any::<Option<u64>>(), 0..8)) {
        let max: Vec<MaxExtent> = bounds
            .iter()
            .map(|b| b.map_or(MaxExtent::Unlimited, MaxExtent::Bounded))
            .collect();
        let mut src = source(seed, Limits::default());
        let shape = src.generate_shape(max.len(), Some(&max)).unwrap();
        prop_assert_eq!(shape.max_extents, Some(max));
    }
}

#[test]
fn test_scalar_shape() {
    let shape = source(1, Limits::default()).generate_shape(0, None).unwrap();
    assert!(shape.is_scalar());
    assert_eq!(shape.to_string(), "()");
}

#[test]
fn test_bad_arguments() {
    let mut src = source(1, Limits::default().with_max_rank(3));
    let err = src.generate_shape(4, None).unwrap_err();
    assert!(err.is_invalid_argument());

    let err = src
        .generate_shape(2, Some(&[MaxExtent::Unlimited; 3]))
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_full_rank_counts_do_not_panic() {
    for seed in 0..50 {
        let mut src = source(seed, Limits::default());
        let shape = src.generate_shape(32, None).unwrap();
        assert_eq!(shape.rank(), 32);
        if let Some(n) = shape.element_count() {
            assert!(n >= 1);
        }
    }
    assert_eq!(voltest::ShapeDescriptor::new(vec![16; 32]).element_count(), None);
}

#[test]
fn test_empty_extent_range_rejected_at_build() {
    let built = SchemaSource::builder()
        .seed(1)
        .limits(Limits::default().with_max_dim_size(0))
        .build();
    assert!(built.is_err());
    assert!(voltest::ShapeGenerator::new(Limits::default().with_max_dim_size(0)).is_err());
}
