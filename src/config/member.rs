//! Explicit member registries standing in for runtime reflection.
//!
//! A settings type describes its assignable members once, in a
//! [`MemberTable`], and every loader reads and writes the instance through
//! those entries.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::ConfigError;

/// Scalar category of a member's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Bool,
    Integer,
    Unsigned,
    Float,
    /// Anything else; environment values are read as JSON literals.
    Json,
}

/// Declared type of a member, as far as the loaders care about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: Kind,
    pub sequence: bool,
    pub optional: bool,
}

impl Shape {
    pub const fn scalar(kind: Kind) -> Self {
        Self {
            kind,
            sequence: false,
            optional: false,
        }
    }
}

/// Types that can back a settings member.
///
/// Implement this for custom enums (usually with `Kind::String`) to make them
/// assignable from JSON and environment variables.
pub trait Shaped {
    const SHAPE: Shape;
}

macro_rules! shaped {
    ($kind:ident: $($ty:ty),+) => {
        $(impl Shaped for $ty {
            const SHAPE: Shape = Shape::scalar(Kind::$kind);
        })+
    };
}

shaped!(String: String, PathBuf, char);
shaped!(Bool: bool);
shaped!(Integer: i8, i16, i32, i64, isize);
shaped!(Unsigned: u8, u16, u32, u64, usize);
shaped!(Float: f32, f64);
shaped!(Json: Value);

impl<T: Shaped> Shaped for Vec<T> {
    const SHAPE: Shape = Shape {
        sequence: true,
        ..T::SHAPE
    };
}

impl<T: Shaped> Shaped for Option<T> {
    const SHAPE: Shape = Shape {
        optional: true,
        ..T::SHAPE
    };
}

type Reader<T> = Box<dyn Fn(&T) -> Result<Value, serde_json::Error> + Send + Sync>;
type Writer<T> = Box<dyn Fn(&mut T, Value) -> Result<(), serde_json::Error> + Send + Sync>;

/// Read/write access to one named member of `T`.
pub struct Member<T> {
    name: &'static str,
    path: Option<&'static str>,
    shape: Shape,
    read: Reader<T>,
    write: Writer<T>,
}

impl<T: 'static> Member<T> {
    /// Binds `name` to the field reached through `get` / `get_mut`.
    pub fn new<F>(name: &'static str, get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self
    where
        F: Shaped + Serialize + DeserializeOwned + 'static,
    {
        Self {
            name,
            path: None,
            shape: F::SHAPE,
            read: Box::new(move |target| serde_json::to_value(get(target))),
            write: Box::new(move |target, value| {
                *get_mut(target) = serde_json::from_value(value)?;
                Ok(())
            }),
        }
    }

    /// Sets the JSON path this member is loaded from.
    #[must_use]
    pub fn at(mut self, path: &'static str) -> Self {
        self.path = Some(path);
        self
    }
}

impl<T> Member<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The explicit path annotation, if any.
    pub fn path(&self) -> Option<&'static str> {
        self.path
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn read(&self, target: &T) -> Result<Value, serde_json::Error> {
        (self.read)(target)
    }

    pub fn write(&self, target: &mut T, value: Value) -> Result<(), serde_json::Error> {
        (self.write)(target, value)
    }
}

impl<T> std::fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

/// Ordered set of members, in declaration order.
#[derive(Debug)]
pub struct MemberTable<T> {
    members: Vec<Member<T>>,
}

impl<T> Default for MemberTable<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<T> MemberTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn member(mut self, member: Member<T>) -> Self {
        self.members.push(member);
        self
    }

    /// Looks up a member by its exact, case-sensitive name.
    pub fn get(&self, name: &str) -> Option<&Member<T>> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member<T>> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Rejects tables with empty or repeated member names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for member in &self.members {
            if member.name.is_empty() {
                return Err(ConfigError::InvalidArgument(
                    "member names must not be empty".into(),
                ));
            }
            if !seen.insert(member.name) {
                return Err(ConfigError::InvalidArgument(format!(
                    "member {} is declared more than once",
                    member.name
                )));
            }
        }
        Ok(())
    }
}

/// A settings type with an explicit member registry.
///
/// Usually implemented through the [`schema!`](crate::schema) macro.
pub trait Schema: Default + Sized + 'static {
    fn schema() -> MemberTable<Self>;
}

/// Reads every member of `settings` into a name-keyed JSON object.
pub fn snapshot<T: Schema>(settings: &T) -> Result<Map<String, Value>, serde_json::Error> {
    T::schema()
        .iter()
        .map(|member| Ok((member.name().to_string(), member.read(settings)?)))
        .collect()
}

/// Implements [`Schema`] for a struct from a list of member bindings.
///
/// Each entry is `"MemberName" => field`, optionally with an explicit JSON
/// path: `"MemberName" at "some.nested.path" => field`.
///
/// ```
/// use dragon_settings::schema;
///
/// #[derive(Debug, Default)]
/// struct Limits {
///     max_retry_count: u32,
///     region: Option<String>,
/// }
///
/// schema!(Limits {
///     "MaxRetryCount" at "retry.max" => max_retry_count,
///     "Region" => region,
/// });
/// ```
#[macro_export]
macro_rules! schema {
    ($ty:ty { $($name:literal $(at $path:literal)? => $field:ident),* $(,)? }) => {
        impl $crate::config::Schema for $ty {
            fn schema() -> $crate::config::MemberTable<Self> {
                $crate::config::MemberTable::new()
                $(
                    .member({
                        let member = $crate::config::Member::new(
                            $name,
                            |settings: &Self| &settings.$field,
                            |settings: &mut Self| &mut settings.$field,
                        );
                        $(let member = member.at($path);)?
                        member
                    })
                )*
            }
        }
    };
}
