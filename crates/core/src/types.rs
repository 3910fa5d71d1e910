//! The datatype algebra
//!
//! This module defines the supported datatype descriptors:
//! - [`TypeClass`]: tagged union over every category the generator can produce
//! - [`IntegerType`], [`FloatType`]: predefined primitive encodings
//! - [`StringType`]: fixed or variable-length strings
//! - [`CompoundType`], [`EnumType`], [`ArrayType`]: composite descriptors
//! - [`ReferenceType`]: object and region references
//!
//! A `TypeClass` owns its nested member and element types exclusively.
//! Dropping it releases the whole tree.

use crate::category::TypeCategory;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Storage size of a variable-length string slot (one pointer)
pub const VARIABLE_STRING_SIZE: usize = 8;

/// Storage size of an object reference
pub const OBJECT_REFERENCE_SIZE: usize = 8;

/// Storage size of a dataset region reference
pub const REGION_REFERENCE_SIZE: usize = 12;

// ============================================================================
// Primitive encodings
// ============================================================================

/// Byte order of a primitive encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// Most significant byte first
    BigEndian,
    /// Least significant byte first
    LittleEndian,
}

impl ByteOrder {
    /// Byte order of the host
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }

    const fn suffix(&self) -> &'static str {
        match self {
            ByteOrder::BigEndian => "BE",
            ByteOrder::LittleEndian => "LE",
        }
    }
}

/// A fixed-width integer encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntegerType {
    /// Width in bytes (1, 2, 4 or 8)
    pub size: u8,
    /// Byte order
    pub order: ByteOrder,
    /// Two's complement signed when true
    pub signed: bool,
}

const fn int(size: u8, order: ByteOrder, signed: bool) -> IntegerType {
    IntegerType {
        size,
        order,
        signed,
    }
}

impl IntegerType {
    /// The predefined integer encodings, in draw order
    pub const PREDEFINED: [IntegerType; 16] = [
        int(1, ByteOrder::BigEndian, true),
        int(1, ByteOrder::LittleEndian, true),
        int(2, ByteOrder::BigEndian, true),
        int(2, ByteOrder::LittleEndian, true),
        int(4, ByteOrder::BigEndian, true),
        int(4, ByteOrder::LittleEndian, true),
        int(8, ByteOrder::BigEndian, true),
        int(8, ByteOrder::LittleEndian, true),
        int(1, ByteOrder::BigEndian, false),
        int(1, ByteOrder::LittleEndian, false),
        int(2, ByteOrder::BigEndian, false),
        int(2, ByteOrder::LittleEndian, false),
        int(4, ByteOrder::BigEndian, false),
        int(4, ByteOrder::LittleEndian, false),
        int(8, ByteOrder::BigEndian, false),
        int(8, ByteOrder::LittleEndian, false),
    ];

    /// The host's native `int`: 4 bytes, signed, host byte order
    pub const fn native_int() -> Self {
        int(4, ByteOrder::native(), true)
    }
}

impl fmt::Display for IntegerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.signed { 'I' } else { 'U' };
        write!(f, "{}{}{}", sign, self.size * 8, self.order.suffix())
    }
}

/// An IEEE floating-point encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloatType {
    /// Width in bytes (4 or 8)
    pub size: u8,
    /// Byte order
    pub order: ByteOrder,
}

impl FloatType {
    /// The predefined floating-point encodings, in draw order
    pub const PREDEFINED: [FloatType; 4] = [
        FloatType {
            size: 4,
            order: ByteOrder::BigEndian,
        },
        FloatType {
            size: 4,
            order: ByteOrder::LittleEndian,
        },
        FloatType {
            size: 8,
            order: ByteOrder::BigEndian,
        },
        FloatType {
            size: 8,
            order: ByteOrder::LittleEndian,
        },
    ];
}

impl fmt::Display for FloatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}{}", self.size * 8, self.order.suffix())
    }
}

// ============================================================================
// Strings
// ============================================================================

/// Length of a string datatype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringLength {
    /// Exactly this many bytes
    Fixed(usize),
    /// Length carried by each value
    Variable,
}

/// Padding applied to short string values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringPadding {
    /// Null terminated
    NullTerm,
    /// Padded with nulls, no terminator required
    NullPad,
    /// Padded with spaces
    SpacePad,
}

/// Character set of a string datatype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterSet {
    /// 7-bit ASCII
    Ascii,
    /// UTF-8
    Utf8,
}

/// A string datatype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringType {
    /// Fixed byte length or variable
    pub length: StringLength,
    /// Padding mode
    pub padding: StringPadding,
    /// Character set
    pub charset: CharacterSet,
}

impl StringType {
    /// Fixed-length, null-padded ASCII string
    pub const fn fixed(length: usize) -> Self {
        Self {
            length: StringLength::Fixed(length),
            padding: StringPadding::NullPad,
            charset: CharacterSet::Ascii,
        }
    }

    /// Variable-length, null-terminated ASCII string
    pub const fn variable() -> Self {
        Self {
            length: StringLength::Variable,
            padding: StringPadding::NullTerm,
            charset: CharacterSet::Ascii,
        }
    }

    /// Storage size in bytes
    pub const fn size(&self) -> usize {
        match self.length {
            StringLength::Fixed(n) => n,
            StringLength::Variable => VARIABLE_STRING_SIZE,
        }
    }
}

// ============================================================================
// References
// ============================================================================

/// Kind of reference datatype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    /// Reference to an object
    Object,
    /// Reference to a region of a dataset
    DatasetRegion,
}

impl ReferenceType {
    /// Storage size in bytes
    pub const fn size(&self) -> usize {
        match self {
            ReferenceType::Object => OBJECT_REFERENCE_SIZE,
            ReferenceType::DatasetRegion => REGION_REFERENCE_SIZE,
        }
    }
}

// ============================================================================
// Composites
// ============================================================================

/// A member of a compound datatype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundMember {
    /// Member name
    pub name: String,
    /// Byte offset from the start of the compound
    pub offset: usize,
    /// Member datatype
    pub ty: TypeClass,
}

/// A compound datatype: named members at byte offsets
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompoundType {
    /// Members in declaration order
    pub members: Vec<CompoundMember>,
    /// Total size in bytes
    pub size: usize,
}

impl CompoundType {
    /// Create an empty compound
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a member at `offset`, growing the total size to cover it
    ///
    /// The total saturates at `usize::MAX`; use [`CompoundType::member_end`]
    /// first when the member may not fit.
    pub fn insert(&mut self, name: impl Into<String>, offset: usize, ty: TypeClass) {
        let end = offset.saturating_add(ty.size());
        self.size = self.size.max(end);
        self.members.push(CompoundMember {
            name: name.into(),
            offset,
            ty,
        });
    }

    /// End of a member of `ty` placed at `offset`, or `None` past `usize::MAX`
    pub fn member_end(offset: usize, ty: &TypeClass) -> Option<usize> {
        offset.checked_add(ty.checked_size()?)
    }
}

/// A named constant of an enum datatype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    /// Constant name
    pub name: String,
    /// Constant value; duplicates are legal
    pub value: i32,
}

/// An enum datatype over an integer base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    /// Base integer encoding
    pub base: IntegerType,
    /// Members in insertion order
    pub members: Vec<EnumMember>,
}

impl EnumType {
    /// Create an enum with no members
    pub fn new(base: IntegerType) -> Self {
        Self {
            base,
            members: Vec::new(),
        }
    }

    /// Append a member. Values are not deduplicated.
    pub fn insert(&mut self, name: impl Into<String>, value: i32) {
        self.members.push(EnumMember {
            name: name.into(),
            value,
        });
    }
}

/// An array datatype: fixed extents of a single element type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayType {
    /// Element datatype
    pub element: Box<TypeClass>,
    /// Extent of each dimension
    pub dims: SmallVec<[u64; 4]>,
}

impl ArrayType {
    /// Total number of elements, or `None` if the product overflows `u64`
    pub fn element_count(&self) -> Option<u64> {
        self.dims.iter().try_fold(1u64, |acc, &d| acc.checked_mul(d))
    }

    /// Size in bytes, or `None` if it does not fit in `usize`
    pub fn checked_size(&self) -> Option<usize> {
        let count = usize::try_from(self.element_count()?).ok()?;
        self.element.checked_size()?.checked_mul(count)
    }
}

// ============================================================================
// TypeClass
// ============================================================================

/// A fully constructed datatype descriptor
///
/// Only the supported categories have variants, so an unsupported category
/// can never escape the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "class", content = "type", rename_all = "snake_case")]
pub enum TypeClass {
    /// Fixed-width integer
    Integer(IntegerType),
    /// IEEE float
    Float(FloatType),
    /// String
    String(StringType),
    /// Compound of named members
    Compound(CompoundType),
    /// Enumeration over an integer base
    Enum(EnumType),
    /// Fixed-extent array
    Array(ArrayType),
    /// Reference
    Reference(ReferenceType),
}

impl TypeClass {
    /// Category of this descriptor
    pub fn category(&self) -> TypeCategory {
        match self {
            TypeClass::Integer(_) => TypeCategory::Integer,
            TypeClass::Float(_) => TypeCategory::Float,
            TypeClass::String(_) => TypeCategory::String,
            TypeClass::Compound(_) => TypeCategory::Compound,
            TypeClass::Enum(_) => TypeCategory::Enum,
            TypeClass::Array(_) => TypeCategory::Array,
            TypeClass::Reference(_) => TypeCategory::Reference,
        }
    }

    /// Storage size in bytes, saturating at `usize::MAX`
    pub fn size(&self) -> usize {
        self.checked_size().unwrap_or(usize::MAX)
    }

    /// Storage size in bytes, or `None` if an array extent product overflows
    pub fn checked_size(&self) -> Option<usize> {
        match self {
            TypeClass::Integer(t) => Some(t.size as usize),
            TypeClass::Float(t) => Some(t.size as usize),
            TypeClass::String(t) => Some(t.size()),
            TypeClass::Compound(t) => Some(t.size),
            TypeClass::Enum(t) => Some(t.base.size as usize),
            TypeClass::Array(t) => t.checked_size(),
            TypeClass::Reference(t) => Some(t.size()),
        }
    }

    /// Number of nested composite layers; leaves are 0
    pub fn depth(&self) -> usize {
        match self {
            TypeClass::Compound(t) => {
                1 + t.members.iter().map(|m| m.ty.depth()).max().unwrap_or(0)
            }
            TypeClass::Array(t) => 1 + t.element.depth(),
            _ => 0,
        }
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeClass::Integer(t) => write!(f, "{}", t),
            TypeClass::Float(t) => write!(f, "{}", t),
            TypeClass::String(t) => {
                match t.length {
                    StringLength::Fixed(n) => write!(f, "string[{}]", n)?,
                    StringLength::Variable => f.write_str("string[*]")?,
                }
                let padding = match t.padding {
                    StringPadding::NullTerm => "nullterm",
                    StringPadding::NullPad => "nullpad",
                    StringPadding::SpacePad => "spacepad",
                };
                let charset = match t.charset {
                    CharacterSet::Ascii => "ascii",
                    CharacterSet::Utf8 => "utf8",
                };
                write!(f, " {} {}", padding, charset)
            }
            TypeClass::Compound(t) => {
                write!(f, "compound({}) {{ ", t.size)?;
                for (i, m) in t.members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}@{}: {}", m.name, m.offset, m.ty)?;
                }
                f.write_str(" }")
            }
            TypeClass::Enum(t) => {
                write!(f, "enum<{}> {{ ", t.base)?;
                for (i, m) in t.members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} = {}", m.name, m.value)?;
                }
                f.write_str(" }")
            }
            TypeClass::Array(t) => {
                f.write_str("array[")?;
                for (i, d) in t.dims.iter().enumerate() {
                    if i > 0 {
                        f.write_str("x")?;
                    }
                    write!(f, "{}", d)?;
                }
                write!(f, "] of {}", t.element)
            }
            TypeClass::Reference(ReferenceType::Object) => f.write_str("ref(object)"),
            TypeClass::Reference(ReferenceType::DatasetRegion) => f.write_str("ref(region)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn i32be() -> TypeClass {
        TypeClass::Integer(IntegerType::PREDEFINED[4])
    }

    // ===== Primitive Tests =====

    #[test]
    fn test_predefined_integer_names() {
        let names: Vec<String> = IntegerType::PREDEFINED
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(names[0], "I8BE");
        assert_eq!(names[4], "I32BE");
        assert_eq!(names[7], "I64LE");
        assert_eq!(names[8], "U8BE");
        assert_eq!(names[15], "U64LE");
    }

    #[test]
    fn test_predefined_float_names() {
        let names: Vec<String> = FloatType::PREDEFINED.iter().map(|t| t.to_string()).collect();
        assert_eq!(names, vec!["F32BE", "F32LE", "F64BE", "F64LE"]);
    }

    #[test]
    fn test_native_int_is_four_signed_bytes() {
        let t = IntegerType::native_int();
        assert_eq!(t.size, 4);
        assert!(t.signed);
        assert_eq!(t.order, ByteOrder::native());
    }

    #[test]
    fn test_string_sizes() {
        assert_eq!(StringType::fixed(17).size(), 17);
        assert_eq!(StringType::fixed(0).size(), 0);
        assert_eq!(StringType::variable().size(), VARIABLE_STRING_SIZE);
        assert_eq!(StringType::fixed(3).padding, StringPadding::NullPad);
        assert_eq!(StringType::variable().padding, StringPadding::NullTerm);
    }

    // ===== Composite Tests =====

    #[test]
    fn test_compound_insert_grows_size() {
        let mut c = CompoundType::new();
        c.insert("a", 0, i32be());
        c.insert("b", 4, TypeClass::Float(FloatType::PREDEFINED[2]));
        assert_eq!(c.size, 12);
        assert_eq!(c.members[1].offset, 4);
    }

    #[test]
    fn test_enum_keeps_duplicate_values() {
        let mut e = EnumType::new(IntegerType::native_int());
        e.insert("enum_val0", 7);
        e.insert("enum_val1", 7);
        assert_eq!(e.members.len(), 2);
        assert_eq!(TypeClass::Enum(e).size(), 4);
    }

    #[test]
    fn test_array_size_is_element_times_extents() {
        let a = TypeClass::Array(ArrayType {
            element: Box::new(TypeClass::Float(FloatType::PREDEFINED[3])),
            dims: smallvec![2, 3],
        });
        assert_eq!(a.size(), 8 * 6);
        assert_eq!(a.depth(), 1);
    }

    #[test]
    fn test_array_extent_overflow_is_detected() {
        // 2^20 ^ 4 = 2^80 elements
        let big = ArrayType {
            element: Box::new(i32be()),
            dims: smallvec![1 << 20, 1 << 20, 1 << 20, 1 << 20],
        };
        assert_eq!(big.element_count(), None);
        assert_eq!(big.checked_size(), None);

        let t = TypeClass::Array(big);
        assert_eq!(t.checked_size(), None);
        assert_eq!(t.size(), usize::MAX);

        // element count fits but the byte size does not
        let wide = TypeClass::Array(ArrayType {
            element: Box::new(TypeClass::Float(FloatType::PREDEFINED[3])),
            dims: smallvec![u64::MAX / 4],
        });
        assert_eq!(wide.checked_size(), None);
    }

    #[test]
    fn test_member_end_overflow() {
        assert_eq!(CompoundType::member_end(4, &i32be()), Some(8));
        assert_eq!(CompoundType::member_end(usize::MAX - 1, &i32be()), None);

        let mut c = CompoundType::new();
        c.insert("a", usize::MAX - 1, i32be());
        assert_eq!(c.size, usize::MAX);
    }

    #[test]
    fn test_depth_counts_composite_layers() {
        let mut inner = CompoundType::new();
        inner.insert("x", 0, i32be());
        let mut outer = CompoundType::new();
        outer.insert("leaf", 0, i32be());
        outer.insert("nested", 4, TypeClass::Compound(inner));
        let t = TypeClass::Compound(outer);
        assert_eq!(t.depth(), 2);
        assert_eq!(i32be().depth(), 0);
    }

    // ===== Display / Serde Tests =====

    #[test]
    fn test_display_compound() {
        let mut c = CompoundType::new();
        c.insert("compound_member0", 0, i32be());
        c.insert("compound_member1", 4, TypeClass::Reference(ReferenceType::Object));
        assert_eq!(
            TypeClass::Compound(c).to_string(),
            "compound(12) { compound_member0@0: I32BE, compound_member1@4: ref(object) }"
        );
    }

    #[test]
    fn test_display_array_and_string() {
        let a = TypeClass::Array(ArrayType {
            element: Box::new(TypeClass::String(StringType::fixed(5))),
            dims: smallvec![4, 1, 2],
        });
        assert_eq!(a.to_string(), "array[4x1x2] of string[5] nullpad ascii");
        assert_eq!(
            TypeClass::String(StringType::variable()).to_string(),
            "string[*] nullterm ascii"
        );
    }

    #[test]
    fn test_serde_is_tagged_by_class() {
        let t = TypeClass::Reference(ReferenceType::Object);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["class"], "reference");

        let mut c = CompoundType::new();
        c.insert("m", 0, i32be());
        let t = TypeClass::Compound(c);
        let text = serde_json::to_string(&t).unwrap();
        let back: TypeClass = serde_json::from_str(&text).unwrap();
        assert_eq!(back, t);
    }
}
