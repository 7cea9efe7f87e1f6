//! Name-based construction of registered types.
//!
//! Types are registered up front under their qualified path (or any alias)
//! and built later from that name, e.g. when the name comes from a config
//! file.
//!
//! ```rust
//! use mlutilz::utils::{qualified_type_name, TypeRegistry};
//!
//! #[derive(Default)]
//! struct Linear {
//!     width: usize,
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Linear>();
//!
//! let name = qualified_type_name::<Linear>();
//! let layer: Linear = registry.instantiate(&name).unwrap();
//! assert_eq!(layer.width, 0);
//! ```

use crate::error::{Error, Result};

use std::any::{self, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builds a fresh boxed instance of a registered type.
pub type Factory = Arc<dyn Fn() -> Box<dyn Any + Send> + Send + Sync>;

const BUILTIN_CRATES: [&str; 3] = ["core::", "alloc::", "std::"];

/// Fully qualified path of `T`.
///
/// Types from `core`, `alloc` and `std` are shortened to their bare name, so
/// `String` is reported as `String` rather than `alloc::string::String`.
pub fn qualified_type_name<T: ?Sized>() -> String {
    let full = any::type_name::<T>();
    let (head, generics) = match full.find('<') {
        Some(idx) => full.split_at(idx),
        None => (full, ""),
    };
    if BUILTIN_CRATES.iter().any(|prefix| head.starts_with(prefix)) {
        let bare = head.rsplit("::").next().unwrap_or(head);
        format!("{}{}", bare, generics)
    } else {
        full.to_string()
    }
}

/// Qualified type name of `value`.
pub fn qualified_name_of<T: ?Sized>(_value: &T) -> String {
    qualified_type_name::<T>()
}

fn normalize(name: &str) -> String {
    name.replace('.', "::")
}

/// Maps type names to factories.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    factories: HashMap<String, Factory>,
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under its qualified name, built with `T::default()`.
    pub fn register<T>(&mut self) -> &mut Self
    where
        T: Default + Send + 'static,
    {
        let name = qualified_type_name::<T>();
        self.register_as(&name, || Box::new(T::default()) as Box<dyn Any + Send>)
    }

    /// Register `factory` under `name`.
    ///
    /// `.` in `name` is read as `::`. A previous entry is replaced.
    pub fn register_as<F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Any + Send> + Send + Sync + 'static,
    {
        let name = normalize(name);
        debug!("Registering type {}", name);
        self.factories.insert(name, Arc::new(factory));
        self
    }

    /// Whether a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&normalize(name))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build the type registered under `name`.
    ///
    /// Both `my_crate::models::Linear` and `my_crate.models.Linear` resolve to
    /// the same entry.
    pub fn import_class_from_string(&self, name: &str) -> Result<Box<dyn Any + Send>> {
        let factory = self
            .factories
            .get(&normalize(name))
            .ok_or_else(|| Error::UnknownType(name.to_string()))?;
        Ok(factory())
    }

    /// Build the type registered under `name` and downcast it to `T`.
    pub fn instantiate<T: 'static>(&self, name: &str) -> Result<T> {
        self.import_class_from_string(name)?
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| {
                Error::UnknownType(format!(
                    "{} is not a {}",
                    name,
                    qualified_type_name::<T>()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Encoder {
        layers: usize,
    }

    #[test]
    fn test_qualified_type_name() {
        assert_eq!(qualified_type_name::<String>(), "String");
        assert_eq!(qualified_type_name::<i32>(), "i32");
        assert_eq!(qualified_type_name::<Vec<u8>>(), "Vec<u8>");
        assert!(qualified_type_name::<Encoder>().ends_with("registry::tests::Encoder"));
        assert_eq!(qualified_name_of(&Encoder::default()), qualified_type_name::<Encoder>());
    }

    #[test]
    fn test_dotted_names_resolve() {
        let mut registry = TypeRegistry::new();
        registry.register_as("models.Encoder", || {
            Box::new(Encoder { layers: 2 }) as Box<dyn Any + Send>
        });

        assert!(registry.contains("models::Encoder"));
        let encoder: Encoder = registry.instantiate("models.Encoder").unwrap();
        assert_eq!(encoder, Encoder { layers: 2 });
    }

    #[test]
    fn test_unknown_type() {
        let registry = TypeRegistry::new();
        let err = registry.import_class_from_string("torch.nn.Linear").unwrap_err();
        assert!(matches!(err, Error::UnknownType(name) if name == "torch.nn.Linear"));
    }

    #[test]
    fn test_wrong_type_downcast() {
        let mut registry = TypeRegistry::new();
        registry.register::<Encoder>();
        let name = qualified_type_name::<Encoder>();
        assert!(registry.instantiate::<String>(&name).is_err());
    }
}
