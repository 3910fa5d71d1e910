//! Invariant checks for generated descriptors
//!
//! These checks restate what the generators promise, so a probe (or a
//! test) can confirm a descriptor before handing it to a connector:
//!
//! - compound members sit at the running prefix sum of earlier member sizes
//! - arrays hold only integer, float or string elements
//! - composite nesting stays within `recursion_max_depth`
//! - every count and extent stays within its configured bound

use crate::category::TypeCategory;
use crate::error::Violation;
use crate::limits::Limits;
use crate::shape::ShapeDescriptor;
use crate::types::{CompoundType, IntegerType, ReferenceType, StringLength, TypeClass};

/// Check a datatype descriptor against the generator invariants
pub fn check_type(ty: &TypeClass, limits: &Limits) -> Result<(), Violation> {
    let depth = ty.depth();
    if depth > limits.recursion_max_depth {
        return Err(Violation::Depth {
            depth,
            max: limits.recursion_max_depth,
        });
    }
    check_node(ty, limits)
}

fn check_node(ty: &TypeClass, limits: &Limits) -> Result<(), Violation> {
    match ty {
        TypeClass::Integer(_) | TypeClass::Float(_) => Ok(()),
        TypeClass::String(s) => match s.length {
            StringLength::Fixed(length) if length >= limits.string_max_size => {
                Err(Violation::StringLength {
                    length,
                    max: limits.string_max_size,
                })
            }
            _ => Ok(()),
        },
        TypeClass::Reference(ReferenceType::Object) => Ok(()),
        TypeClass::Reference(ReferenceType::DatasetRegion) => Err(Violation::RegionReference),
        TypeClass::Enum(e) => {
            check_count(TypeCategory::Enum, e.members.len(), limits.enum_max_members)?;
            if e.base != IntegerType::native_int() {
                return Err(Violation::EnumBase);
            }
            for m in &e.members {
                if m.name.len() >= limits.enum_max_member_name_length {
                    return Err(Violation::EnumName {
                        name: m.name.clone(),
                        max: limits.enum_max_member_name_length,
                    });
                }
            }
            Ok(())
        }
        TypeClass::Compound(c) => {
            check_count(
                TypeCategory::Compound,
                c.members.len(),
                limits.compound_max_members,
            )?;
            let mut expected = 0;
            for m in &c.members {
                if m.offset != expected {
                    return Err(Violation::CompoundOffset {
                        member: m.name.clone(),
                        expected,
                        actual: m.offset,
                    });
                }
                check_node(&m.ty, limits)?;
                expected = CompoundType::member_end(expected, &m.ty).ok_or(
                    Violation::SizeOverflow {
                        category: TypeCategory::Compound,
                    },
                )?;
            }
            if c.size != expected {
                return Err(Violation::CompoundSize {
                    expected,
                    actual: c.size,
                });
            }
            Ok(())
        }
        TypeClass::Array(a) => {
            let rank = a.dims.len();
            if rank == 0 || rank > limits.array_max_dims {
                return Err(Violation::Rank {
                    rank,
                    max: limits.array_max_dims,
                });
            }
            check_extents(&a.dims, limits)?;
            if a.checked_size().is_none() {
                return Err(Violation::SizeOverflow {
                    category: TypeCategory::Array,
                });
            }
            match a.element.category() {
                TypeCategory::Integer | TypeCategory::Float | TypeCategory::String => {
                    check_node(&a.element, limits)
                }
                element => Err(Violation::IllegalArrayElement { element }),
            }
        }
    }
}

/// Check a shape descriptor against the shape generator invariants
pub fn check_shape(shape: &ShapeDescriptor, limits: &Limits) -> Result<(), Violation> {
    let rank = shape.rank();
    if rank > limits.max_rank {
        return Err(Violation::Rank {
            rank,
            max: limits.max_rank,
        });
    }
    check_extents(&shape.extents, limits)?;
    if let Some(max) = &shape.max_extents {
        if max.len() != rank {
            return Err(Violation::MaxExtentsLength {
                expected: rank,
                actual: max.len(),
            });
        }
    }
    Ok(())
}

/// Whether a datatype is larger than the advisory size ceiling
///
/// The generator does not enforce `max_datatype_size`; probes that store
/// datatypes in size-limited headers can skip oversized ones with this.
pub fn exceeds_size_limit(ty: &TypeClass, limits: &Limits) -> bool {
    ty.size() > limits.max_datatype_size
}

fn check_count(category: TypeCategory, count: usize, max: usize) -> Result<(), Violation> {
    if count == 0 || count > max {
        return Err(Violation::MemberCount {
            category,
            count,
            max,
        });
    }
    Ok(())
}

fn check_extents(extents: &[u64], limits: &Limits) -> Result<(), Violation> {
    let max = limits.max_dim_size as u64;
    for (dim, &extent) in extents.iter().enumerate() {
        if extent == 0 || extent > max {
            return Err(Violation::Extent { dim, extent, max });
        }
    }
    Ok(())
}
