//! Release of partially built datatypes
//!
//! A backend that counts live handles fails on a chosen leaf. After the
//! failing call returns, nothing it built may still be alive.

use crate::*;
use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use voltest::TypeGenerator;
use voltest_core::{FloatType, IntegerType, ReferenceType, StringType};
use voltest_gen::{BackendError, RngDraw, ScriptedDraw, TypeBackend};

#[derive(Default)]
struct Counters {
    live: Cell<i64>,
    created: Cell<u64>,
    released: Cell<u64>,
}

struct Handle {
    size: usize,
    children: Vec<Handle>,
    counters: Rc<Counters>,
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.counters.live.set(self.counters.live.get() - 1);
        self.counters.released.set(self.counters.released.get() + 1);
    }
}

struct FailingBackend {
    counters: Rc<Counters>,
    leaves: usize,
    fail_at: usize,
}

impl FailingBackend {
    fn new(fail_at: usize) -> Self {
        Self {
            counters: Rc::new(Counters::default()),
            leaves: 0,
            fail_at,
        }
    }

    fn handle(&self, size: usize) -> Handle {
        self.counters.live.set(self.counters.live.get() + 1);
        self.counters.created.set(self.counters.created.get() + 1);
        Handle {
            size,
            children: Vec::new(),
            counters: Rc::clone(&self.counters),
        }
    }

    fn leaf(&mut self, size: usize) -> Result<Handle, BackendError> {
        self.leaves += 1;
        if self.leaves == self.fail_at {
            return Err(BackendError::new("copy", "forced failure"));
        }
        Ok(self.handle(size))
    }
}

impl TypeBackend for FailingBackend {
    type Handle = Handle;

    fn integer(&mut self, ty: IntegerType) -> Result<Handle, BackendError> {
        self.leaf(ty.size as usize)
    }

    fn float(&mut self, ty: FloatType) -> Result<Handle, BackendError> {
        self.leaf(ty.size as usize)
    }

    fn string(&mut self, ty: StringType) -> Result<Handle, BackendError> {
        self.leaf(ty.size())
    }

    fn reference(&mut self, kind: ReferenceType) -> Result<Handle, BackendError> {
        self.leaf(kind.size())
    }

    fn enumeration(&mut self, base: IntegerType) -> Result<Handle, BackendError> {
        Ok(self.handle(base.size as usize))
    }

    fn enum_insert(&mut self, _: &mut Handle, _: &str, _: i32) -> Result<(), BackendError> {
        Ok(())
    }

    fn compound(&mut self) -> Result<Handle, BackendError> {
        Ok(self.handle(0))
    }

    fn compound_insert(
        &mut self,
        ty: &mut Handle,
        _: &str,
        offset: usize,
        member: Handle,
    ) -> Result<(), BackendError> {
        ty.size = ty.size.max(offset + member.size);
        ty.children.push(member);
        Ok(())
    }

    fn array(&mut self, element: Handle, dims: &[u64]) -> Result<Handle, BackendError> {
        let count: u64 = dims.iter().product();
        let mut array = self.handle(element.size * count as usize);
        array.children.push(element);
        Ok(array)
    }

    fn size_of(&self, ty: &Handle) -> usize {
        ty.size
    }
}

#[test]
fn test_kth_member_failure_releases_earlier_members() {
    for k in 1..=4usize {
        let backend = FailingBackend::new(k);
        let counters = Rc::clone(&backend.counters);
        let mut gen = TypeGenerator::new(backend, Limits::default()).unwrap();

        // a 4-member compound of integers
        let mut script = vec![idx::COMPOUND, 3];
        for _ in 0..4 {
            script.extend([idx::INTEGER, 0]);
        }
        let err = gen
            .generate_type(&mut ScriptedDraw::new(script), None)
            .err()
            .unwrap();

        assert!(err.is_construction(), "k={}: {}", k, err);
        assert_eq!(counters.live.get(), 0, "k={}", k);
        // k-1 members plus the compound itself
        assert_eq!(counters.created.get(), k as u64, "k={}", k);
        assert_eq!(counters.released.get(), k as u64, "k={}", k);
    }
}

#[test]
fn test_failure_inside_array_member() {
    let backend = FailingBackend::new(2);
    let counters = Rc::clone(&backend.counters);
    let mut gen = TypeGenerator::new(backend, Limits::default()).unwrap();
    let script = [idx::COMPOUND, 1, idx::FLOAT, 0, idx::ARRAY, 1, 2, 3, idx::INTEGER, 0];

    let err = gen
        .generate_type(&mut ScriptedDraw::new(script), None)
        .err()
        .unwrap();
    assert!(err.is_construction());
    assert_eq!(counters.live.get(), 0);
    assert_eq!(counters.created.get(), counters.released.get());
}

proptest! {
    #[test]
    fn prop_no_leak_at_any_failure_point(seed in any::<u64>(), fail_at in 1usize..20) {
        let backend = FailingBackend::new(fail_at);
        let counters = Rc::clone(&backend.counters);
        let mut gen = TypeGenerator::new(backend, Limits::default()).unwrap();
        let (mut draw, _) = RngDraw::seeded(Some(seed));

        match gen.generate_type(&mut draw, None) {
            Ok(handle) => {
                prop_assert!(counters.live.get() > 0);
                drop(handle);
            }
            Err(e) => prop_assert!(e.is_construction()),
        }
        prop_assert_eq!(counters.live.get(), 0);
        prop_assert_eq!(counters.created.get(), counters.released.get());
    }
}
