//! The error type surfaced by every fallible container operation.

use crate::core::BindingKey;
use std::error::Error as StdError;
use thiserror::Error;

/// Why a resolution or construction request could not be satisfied.
///
/// Every failure mode of the container maps onto exactly one variant, so
/// callers can distinguish a configuration mistake (`NotRegistered`,
/// `AmbiguousConstructor`, `CyclicDependency`) from a runtime failure inside
/// a factory or constructor (`ConstructionFailure`).
#[derive(Debug, Error)]
pub enum ResolveError {
  /// An abstract type was requested but no binding exists for its key.
  #[error("no binding registered for {}", render(.type_name, .name))]
  NotRegistered {
    type_name: &'static str,
    name: Option<String>,
  },

  /// A concrete type declares zero, or more than one, public constructor,
  /// so the container cannot pick one to auto-wire.
  #[error("`{type_name}` declares {found} public constructors, exactly one is required")]
  AmbiguousConstructor {
    type_name: &'static str,
    found: usize,
  },

  /// A factory failed, or the resolved arguments were rejected when the
  /// constructor was invoked. The underlying cause is preserved as the
  /// error source.
  #[error("construction of `{type_name}` failed: {source}")]
  ConstructionFailure {
    type_name: &'static str,
    source: Box<dyn StdError + Send + Sync>,
  },

  /// A resolution chain re-entered a key it had not finished resolving,
  /// which would otherwise recurse forever.
  #[error("circular dependency detected while resolving {}", render(.type_name, .name))]
  CyclicDependency {
    type_name: &'static str,
    name: Option<String>,
  },
}

impl ResolveError {
  /// Wraps an arbitrary failure from user code as a [`ConstructionFailure`]
  /// for the type being produced.
  ///
  /// Factories registered with [`Container::add_singleton`] and friends
  /// return `Result<_, ResolveError>`; this is the intended way to lift a
  /// domain error (or a plain message) into that signature.
  ///
  /// [`ConstructionFailure`]: ResolveError::ConstructionFailure
  /// [`Container::add_singleton`]: crate::Container::add_singleton
  pub fn construction(
    type_name: &'static str,
    source: impl Into<Box<dyn StdError + Send + Sync>>,
  ) -> Self {
    Self::ConstructionFailure {
      type_name,
      source: source.into(),
    }
  }

  pub(crate) fn not_registered(key: &BindingKey) -> Self {
    Self::NotRegistered {
      type_name: key.type_name,
      name: key.name.clone(),
    }
  }

  pub(crate) fn ambiguous(type_name: &'static str, found: usize) -> Self {
    Self::AmbiguousConstructor { type_name, found }
  }

  pub(crate) fn cyclic(key: &BindingKey) -> Self {
    Self::CyclicDependency {
      type_name: key.type_name,
      name: key.name.clone(),
    }
  }

  /// The binding produced a payload that does not match the requested type.
  /// Only reachable when a provider was registered through unchecked means,
  /// since the typed registration methods pair key and payload statically.
  pub(crate) fn mismatched(key: &BindingKey) -> Self {
    Self::construction(
      key.type_name,
      format!("binding for {key} produced a value of a different type"),
    )
  }
}

fn render(type_name: &str, name: &Option<String>) -> String {
  match name {
    Some(name) => format!("`{type_name}` (name: \"{name}\")"),
    None => format!("`{type_name}`"),
  }
}
