//! Core, non-public data structures for the container.

use crate::container::Container;
use crate::error::ResolveError;
use once_cell::sync::OnceCell;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The key under which a binding is stored: the abstract type's `TypeId`
/// plus an optional discriminating name.
///
/// The human-readable type name rides along for diagnostics but takes no
/// part in equality or hashing.
#[derive(Debug, Clone)]
pub(crate) struct BindingKey {
  pub(crate) type_id: TypeId,
  pub(crate) type_name: &'static str,
  pub(crate) name: Option<String>,
}

impl BindingKey {
  /// Creates an unnamed key for any `'static` type, sized or not.
  pub(crate) fn new<T: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
      name: None,
    }
  }

  /// Creates a named key, used to register multiple bindings for one type.
  pub(crate) fn named<T: ?Sized + Any>(name: &str) -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
      name: Some(name.to_owned()),
    }
  }

  pub(crate) fn of<T: ?Sized + Any>(name: Option<&str>) -> Self {
    match name {
      Some(name) => Self::named::<T>(name),
      None => Self::new::<T>(),
    }
  }
}

impl PartialEq for BindingKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id && self.name == other.name
  }
}

impl Eq for BindingKey {}

impl Hash for BindingKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
    self.name.hash(state);
  }
}

impl fmt::Display for BindingKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.name {
      Some(name) => write!(f, "`{}` (name: \"{}\")", self.type_name, name),
      None => write!(f, "`{}`", self.type_name),
    }
  }
}

/// Type-erased binding payload: a `Box` holding an `Arc<T>` for the key's
/// `T`, downcast back at the typed resolution entry points.
pub(crate) type AnyShared = Box<dyn Any + Send + Sync>;

/// A registered production strategy. Factories receive the resolving
/// container so they can look up their own dependencies recursively.
pub(crate) type FactoryFn = dyn Fn(&Container) -> Result<AnyShared, ResolveError> + Send + Sync;

/// A single binding as stored in the container.
///
/// Cloning is shallow: the cell and factory are shared, so a clone taken
/// out of the providers map observes the same singleton state as the map
/// entry it came from.
#[derive(Clone)]
pub(crate) enum Provider {
  /// Lazily initialized once, then served from the cell on every request.
  /// A failed initialization leaves the cell empty so a later request can
  /// try again.
  Singleton {
    cell: Arc<OnceCell<AnyShared>>,
    factory: Arc<FactoryFn>,
  },
  /// Runs the factory on every request.
  Transient { factory: Arc<FactoryFn> },
}

/// Identity of a live container, taken from its address. Guard entries
/// carry it, so a resolution chain that delegates to a different container
/// for the same key is not treated as re-entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ContainerId(usize);

impl ContainerId {
  pub(crate) fn of<C>(container: &C) -> Self {
    Self(container as *const C as usize)
  }
}

/// Which mode of resolution holds a guard entry: the registry serving a
/// binding, or the engine running a declared constructor. The modes are
/// tracked separately, so a binding's factory may construct the very type
/// the binding is registered under.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ResolutionKind {
  Binding,
  Construction,
}

thread_local! {
  // Every (container, mode, key) triple this thread is currently resolving.
  // A recursive resolution chain that arrives back at a triple still on the
  // stack has a cycle.
  static RESOLVING_STACK: RefCell<HashSet<(ContainerId, ResolutionKind, BindingKey)>> =
    RefCell::new(HashSet::new());
}

/// RAII marker for one in-progress resolution on the current thread.
///
/// Acquiring the guard for a (container, mode, key) triple that is already
/// held fails with [`ResolveError::CyclicDependency`]; dropping it releases
/// the triple, which also keeps the stack accurate when a nested resolution
/// errors out.
pub(crate) struct ResolutionGuard {
  id: ContainerId,
  kind: ResolutionKind,
  key: BindingKey,
}

impl ResolutionGuard {
  pub(crate) fn acquire(
    id: ContainerId,
    kind: ResolutionKind,
    key: BindingKey,
  ) -> Result<Self, ResolveError> {
    let entered = RESOLVING_STACK.with(|stack| stack.borrow_mut().insert((id, kind, key.clone())));
    if !entered {
      log::error!("circular dependency detected while resolving {key}");
      return Err(ResolveError::cyclic(&key));
    }
    Ok(Self { id, kind, key })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&(self.id, self.kind, self.key.clone()));
    });
  }
}
