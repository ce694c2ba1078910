//! The [`Reflect`] trait and its implementations for std types.
//!
//! Most users derive this trait with `#[derive(JsonSchema)]`. It can also be
//! implemented by hand, which is how well-known special types such as URIs
//! are declared:
//!
//! ```rust
//! use jsonschema_reflect::{Reflect, TypeInfo, TypeKind};
//!
//! struct Website(String);
//!
//! impl Reflect for Website {
//!     fn type_info() -> TypeInfo {
//!         TypeInfo::new::<Self>("Website", TypeKind::Uri)
//!     }
//! }
//! ```
//!
//! ## Provided implementations
//!
//! - **Primitives**: `bool`, `char`, integers, floats, `String`, `str`
//! - **Containers**: `Vec<T>`, `VecDeque<T>`, `[T]`, `[T; N]`, `HashSet<T>`, `BTreeSet<T>`
//! - **Maps**: `HashMap<K, V>`, `BTreeMap<K, V>`, `serde_json::Map`
//! - **Pointers**: `Box<T>`, `Rc<T>`, `Arc<T>`, `Option<T>`
//! - **Special**: `SystemTime`, `IpAddr`, `Ipv4Addr`, `Ipv6Addr`, `serde_json::Value`, `()`
//! - **Feature-gated**: `chrono::DateTime<Tz>`, `NaiveDateTime`, `NaiveDate` (chrono), `Uuid` (uuid)
//! - **Unsupported**: `mpsc` channel endpoints and function pointers describe
//!   themselves so reflection can report them by name

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::sync::Arc;
use std::time::SystemTime;

use crate::types::{Primitive, TypeInfo, TypeKind, TypeRef};

/// Types that can describe their own shape to the reflector.
pub trait Reflect: 'static {
    /// Returns the description of this type.
    fn type_info() -> TypeInfo;
}

// =============================================================================
// Primitives
// =============================================================================

macro_rules! impl_reflect_for_primitive {
    ($($ty:ty => $name:literal, $prim:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::new::<Self>($name, TypeKind::Primitive(Primitive::$prim))
                }
            }
        )*
    };
}

impl_reflect_for_primitive!(
    bool => "bool", Bool,
    i8 => "i8", I8,
    i16 => "i16", I16,
    i32 => "i32", I32,
    i64 => "i64", I64,
    i128 => "i128", I128,
    isize => "isize", Isize,
    u8 => "u8", U8,
    u16 => "u16", U16,
    u32 => "u32", U32,
    u64 => "u64", U64,
    u128 => "u128", U128,
    usize => "usize", Usize,
    f32 => "f32", F32,
    f64 => "f64", F64,
    char => "char", Char,
    String => "String", String,
    str => "str", String,
);

impl Reflect for () {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("()", TypeKind::Unit)
    }
}

// =============================================================================
// Containers
// =============================================================================

macro_rules! impl_reflect_for_sequence {
    ($($ty:ident => $name:literal),* $(,)?) => {
        $(
            impl<T: Reflect> Reflect for $ty<T> {
                fn type_info() -> TypeInfo {
                    TypeInfo::new::<Self>($name, TypeKind::Sequence(TypeRef::of::<T>()))
                }
            }
        )*
    };
}

impl_reflect_for_sequence!(
    Vec => "Vec",
    VecDeque => "VecDeque",
    HashSet => "HashSet",
    BTreeSet => "BTreeSet",
);

impl<T: Reflect> Reflect for [T] {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("slice", TypeKind::Sequence(TypeRef::of::<T>()))
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("array", TypeKind::Sequence(TypeRef::of::<T>()))
    }
}

impl<K: Reflect, V: Reflect> Reflect for HashMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(
            "HashMap",
            TypeKind::Map {
                key: TypeRef::of::<K>(),
                value: TypeRef::of::<V>(),
            },
        )
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(
            "BTreeMap",
            TypeKind::Map {
                key: TypeRef::of::<K>(),
                value: TypeRef::of::<V>(),
            },
        )
    }
}

// =============================================================================
// Pointers
// =============================================================================

macro_rules! impl_reflect_for_pointer {
    ($($ty:ident => $name:literal),* $(,)?) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $ty<T> {
                fn type_info() -> TypeInfo {
                    TypeInfo::new::<Self>($name, TypeKind::Pointer(TypeRef::of::<T>()))
                }
            }
        )*
    };
}

impl_reflect_for_pointer!(Box => "Box", Rc => "Rc", Arc => "Arc");

impl<T: Reflect> Reflect for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("Option", TypeKind::Optional(TypeRef::of::<T>()))
    }
}

// =============================================================================
// Well-known special types
// =============================================================================

impl Reflect for SystemTime {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("SystemTime", TypeKind::Time)
    }
}

impl Reflect for IpAddr {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("IpAddr", TypeKind::Ipv4)
    }
}

impl Reflect for Ipv4Addr {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("Ipv4Addr", TypeKind::Ipv4)
    }
}

impl Reflect for Ipv6Addr {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("Ipv6Addr", TypeKind::Ipv6)
    }
}

impl Reflect for serde_json::Value {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("Value", TypeKind::Any)
    }
}

impl Reflect for serde_json::Map<String, serde_json::Value> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(
            "Map",
            TypeKind::Map {
                key: TypeRef::of::<String>(),
                value: TypeRef::of::<serde_json::Value>(),
            },
        )
    }
}

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone + 'static> Reflect for chrono::DateTime<Tz> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("DateTime", TypeKind::Time)
    }
}

#[cfg(feature = "chrono")]
impl Reflect for chrono::NaiveDateTime {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("NaiveDateTime", TypeKind::Time)
    }
}

#[cfg(feature = "chrono")]
impl Reflect for chrono::NaiveDate {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("NaiveDate", TypeKind::Time)
    }
}

#[cfg(feature = "uuid")]
impl Reflect for uuid::Uuid {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("Uuid", TypeKind::Uuid)
    }
}

// =============================================================================
// Types without a JSON encoding
// =============================================================================

impl<T: 'static> Reflect for Sender<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("Sender", TypeKind::Unsupported("channel"))
    }
}

impl<T: 'static> Reflect for SyncSender<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("SyncSender", TypeKind::Unsupported("channel"))
    }
}

impl<T: 'static> Reflect for Receiver<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("Receiver", TypeKind::Unsupported("channel"))
    }
}

impl<R: 'static> Reflect for fn() -> R {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("fn", TypeKind::Unsupported("function"))
    }
}

impl<A: 'static, R: 'static> Reflect for fn(A) -> R {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("fn", TypeKind::Unsupported("function"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;

    #[test]
    fn test_primitive_descriptions() {
        assert!(matches!(
            i32::type_info().kind,
            TypeKind::Primitive(Primitive::I32)
        ));
        assert!(matches!(
            str::type_info().kind,
            TypeKind::Primitive(Primitive::String)
        ));
        assert_eq!(String::type_info().id, TypeId::of::<String>());
    }

    #[test]
    fn test_containers_reference_element_type() {
        let TypeKind::Sequence(item) = Vec::<u8>::type_info().kind else {
            panic!("Expected sequence");
        };
        assert_eq!(item.info().id, TypeId::of::<u8>());

        let TypeKind::Map { key, value } = HashMap::<String, bool>::type_info().kind else {
            panic!("Expected map");
        };
        assert_eq!(key.info().id, TypeId::of::<String>());
        assert_eq!(value.info().id, TypeId::of::<bool>());
    }

    #[test]
    fn test_pointers_wrap_inner_type() {
        assert!(matches!(
            Box::<str>::type_info().kind,
            TypeKind::Pointer(_)
        ));
        assert!(matches!(
            Option::<i64>::type_info().kind,
            TypeKind::Optional(_)
        ));
    }

    #[test]
    fn test_channels_are_unsupported() {
        assert!(matches!(
            Sender::<i32>::type_info().kind,
            TypeKind::Unsupported("channel")
        ));
        assert!(matches!(
            <fn() -> i32>::type_info().kind,
            TypeKind::Unsupported("function")
        ));
    }
}
