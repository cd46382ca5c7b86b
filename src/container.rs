//! The main `Container` struct and its associated methods.

use crate::construct::{Constructible, Resolvable};
use crate::core::{AnyShared, BindingKey, ContainerId, Provider, ResolutionGuard, ResolutionKind};
use crate::error::ResolveError;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::any::{self, Any};
use std::sync::Arc;

/// The thread-safe Inversion of Control (IoC) container.
///
/// A `Container` is a registry of bindings, each mapping an abstract type
/// (plus an optional name) to a strategy for producing instances, and a
/// resolution engine that satisfies constructor dependencies recursively.
/// Registration and resolution both take `&self`, so a container can be
/// shared freely across threads.
///
/// Three binding lifecycles exist:
///
/// - **instance**: a value supplied up front, returned as-is on every
///   request ([`add_instance`](Container::add_instance) and friends),
/// - **singleton**: a factory run at most once, its result cached and
///   shared ([`add_singleton`](Container::add_singleton) and friends),
/// - **transient**: a factory run on every request
///   ([`add_transient`](Container::add_transient) and friends).
///
/// Registering a second binding under the same key replaces the first.
///
/// Resolution has two entry points. [`lookup`](Container::lookup) consults
/// the registry only. [`resolve`](Container::resolve) dispatches on the
/// requested type's declared capability: abstract types go to the registry,
/// concrete types are constructed afresh through their declared constructor
/// (see [`construct`](Container::construct)).
#[derive(Default)]
pub struct Container {
  providers: DashMap<BindingKey, Provider>,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn insert(&self, kind: &'static str, key: BindingKey, provider: Provider) {
    log::trace!("registering {kind} binding for {key}");
    self.providers.insert(key, provider);
  }

  fn add_instance_trait_internal<I: ?Sized + Any + Send + Sync>(
    &self,
    name: Option<&str>,
    instance: Arc<I>,
  ) {
    let provider = Provider::Singleton {
      cell: Arc::new(OnceCell::with_value(Box::new(instance))),
      factory: Arc::new(|_: &Container| {
        panic!("pre-initialized singleton factory should not be called")
      }),
    };
    self.insert("instance", BindingKey::of::<I>(name), provider);
  }

  fn add_singleton_internal<T: Any + Send + Sync>(
    &self,
    name: Option<&str>,
    factory: impl Fn(&Container) -> Result<T, ResolveError> + Send + Sync + 'static,
  ) {
    let provider = Provider::Singleton {
      cell: Arc::new(OnceCell::new()),
      factory: Arc::new(move |container: &Container| {
        factory(container).map(|instance| Box::new(Arc::new(instance)) as AnyShared)
      }),
    };
    self.insert("singleton", BindingKey::of::<T>(name), provider);
  }

  fn add_transient_internal<T: Any + Send + Sync>(
    &self,
    name: Option<&str>,
    factory: impl Fn(&Container) -> Result<T, ResolveError> + Send + Sync + 'static,
  ) {
    let provider = Provider::Transient {
      factory: Arc::new(move |container: &Container| {
        factory(container).map(|instance| Box::new(Arc::new(instance)) as AnyShared)
      }),
    };
    self.insert("transient", BindingKey::of::<T>(name), provider);
  }

  fn add_singleton_trait_internal<I: ?Sized + Any + Send + Sync>(
    &self,
    name: Option<&str>,
    factory: impl Fn(&Container) -> Result<Arc<I>, ResolveError> + Send + Sync + 'static,
  ) {
    let provider = Provider::Singleton {
      cell: Arc::new(OnceCell::new()),
      factory: Arc::new(move |container: &Container| {
        factory(container).map(|instance| Box::new(instance) as AnyShared)
      }),
    };
    self.insert("singleton", BindingKey::of::<I>(name), provider);
  }

  fn add_transient_trait_internal<I: ?Sized + Any + Send + Sync>(
    &self,
    name: Option<&str>,
    factory: impl Fn(&Container) -> Result<Arc<I>, ResolveError> + Send + Sync + 'static,
  ) {
    let provider = Provider::Transient {
      factory: Arc::new(move |container: &Container| {
        factory(container).map(|instance| Box::new(instance) as AnyShared)
      }),
    };
    self.insert("transient", BindingKey::of::<I>(name), provider);
  }

  // --- PUBLIC API ---

  // --- Instance Registration ---
  pub fn add_instance<T: Any + Send + Sync>(&self, instance: T) {
    self.add_instance_trait_internal::<T>(None, Arc::new(instance));
  }
  pub fn add_instance_with_name<T: Any + Send + Sync>(&self, name: &str, instance: T) {
    self.add_instance_trait_internal::<T>(Some(name), Arc::new(instance));
  }
  /// Registers an existing `Arc` under the unsized type `I`, typically a
  /// trait object: `add_instance_trait::<dyn Logger>(logger)`.
  pub fn add_instance_trait<I: ?Sized + Any + Send + Sync>(&self, instance: Arc<I>) {
    self.add_instance_trait_internal(None, instance);
  }
  pub fn add_instance_trait_with_name<I: ?Sized + Any + Send + Sync>(
    &self,
    name: &str,
    instance: Arc<I>,
  ) {
    self.add_instance_trait_internal(Some(name), instance);
  }

  // --- Singleton Registration ---
  pub fn add_singleton<T: Any + Send + Sync>(
    &self,
    factory: impl Fn(&Container) -> Result<T, ResolveError> + Send + Sync + 'static,
  ) {
    self.add_singleton_internal(None, factory);
  }
  pub fn add_singleton_with_name<T: Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&Container) -> Result<T, ResolveError> + Send + Sync + 'static,
  ) {
    self.add_singleton_internal(Some(name), factory);
  }

  // --- Transient Registration ---
  pub fn add_transient<T: Any + Send + Sync>(
    &self,
    factory: impl Fn(&Container) -> Result<T, ResolveError> + Send + Sync + 'static,
  ) {
    self.add_transient_internal(None, factory);
  }
  pub fn add_transient_with_name<T: Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&Container) -> Result<T, ResolveError> + Send + Sync + 'static,
  ) {
    self.add_transient_internal(Some(name), factory);
  }

  // --- Trait Registration ---
  pub fn add_singleton_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    factory: impl Fn(&Container) -> Result<Arc<I>, ResolveError> + Send + Sync + 'static,
  ) {
    self.add_singleton_trait_internal(None, factory);
  }
  pub fn add_singleton_trait_with_name<I: ?Sized + Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&Container) -> Result<Arc<I>, ResolveError> + Send + Sync + 'static,
  ) {
    self.add_singleton_trait_internal(Some(name), factory);
  }
  pub fn add_transient_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    factory: impl Fn(&Container) -> Result<Arc<I>, ResolveError> + Send + Sync + 'static,
  ) {
    self.add_transient_trait_internal(None, factory);
  }
  pub fn add_transient_trait_with_name<I: ?Sized + Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&Container) -> Result<Arc<I>, ResolveError> + Send + Sync + 'static,
  ) {
    self.add_transient_trait_internal(Some(name), factory);
  }

  // --- Resolution ---

  /// Resolves `T` through its declared [`Resolvable`] capability.
  ///
  /// Abstract types, declared with `injectable!(trait ..)` or
  /// `injectable!(value ..)`, are served by their registered unnamed binding
  /// and fail with [`ResolveError::NotRegistered`] when none exists.
  /// Concrete types, declared with a constructor list, are auto-wired
  /// afresh on every call, even when a binding for the same type exists;
  /// such a binding stays reachable through [`lookup`](Container::lookup).
  pub fn resolve<T: Resolvable + ?Sized>(&self) -> Result<Arc<T>, ResolveError> {
    log::trace!("resolving `{}`", any::type_name::<T>());
    T::resolve_with(self)
  }

  /// Looks up the binding for `T` under `name` and runs its strategy.
  ///
  /// This is the registry half of resolution and performs no auto-wiring.
  /// Singleton bindings construct on first use and serve the cached
  /// instance afterwards; a failed first construction leaves the binding
  /// uninitialized so a later call can retry. Transient bindings construct
  /// on every call.
  ///
  /// Cycle detection is scoped to the serving container on the current
  /// thread: a nested chain that re-enters a key this container is still
  /// serving fails with [`ResolveError::CyclicDependency`], while
  /// delegating to a different container for the same key does not trip
  /// the guard.
  pub fn lookup<T: ?Sized + Any + Send + Sync>(
    &self,
    name: Option<&str>,
  ) -> Result<Arc<T>, ResolveError> {
    let key = BindingKey::of::<T>(name);
    let _guard =
      ResolutionGuard::acquire(ContainerId::of(self), ResolutionKind::Binding, key.clone())?;

    // Clone the provider out of the map so no shard lock is held while the
    // factory runs; factories may re-enter the container freely.
    let provider = match self.providers.get(&key) {
      Some(entry) => entry.value().clone(),
      None => {
        log::debug!("lookup miss for {key}");
        return Err(ResolveError::not_registered(&key));
      }
    };

    match provider {
      Provider::Singleton { cell, factory } => {
        let shared = cell.get_or_try_init(|| factory(self))?;
        let instance = shared
          .downcast_ref::<Arc<T>>()
          .cloned()
          .ok_or_else(|| ResolveError::mismatched(&key))?;
        log::trace!("{key} resolved (singleton)");
        Ok(instance)
      }
      Provider::Transient { factory } => {
        let instance = factory(self)?
          .downcast::<Arc<T>>()
          .map(|boxed| *boxed)
          .map_err(|_| ResolveError::mismatched(&key))?;
        log::trace!("{key} resolved (transient)");
        Ok(instance)
      }
    }
  }

  /// Constructs the concrete type `C` by resolving the parameters of its
  /// declared constructor in declaration order.
  ///
  /// `C` must declare exactly one public constructor; zero or several fail
  /// with [`ResolveError::AmbiguousConstructor`]. Every call produces a
  /// fresh instance: lifecycles belong to bindings, never to types, so
  /// nothing is cached here. A failure while resolving a parameter
  /// propagates unchanged.
  ///
  /// A binding's factory may call `construct` for the very type it is
  /// bound under; the registry and the engine track their in-progress keys
  /// separately, and only a chain that re-enters a constructor already
  /// running on this container fails with
  /// [`ResolveError::CyclicDependency`].
  pub fn construct<C: Constructible>(&self) -> Result<C, ResolveError> {
    let key = BindingKey::new::<C>();
    let _guard =
      ResolutionGuard::acquire(ContainerId::of(self), ResolutionKind::Construction, key.clone())?;

    let mut constructors = C::constructors();
    if constructors.len() != 1 {
      log::error!(
        "cannot construct {key}: {} public constructors declared",
        constructors.len()
      );
      return Err(ResolveError::ambiguous(key.type_name, constructors.len()));
    }
    let constructor = constructors.remove(0);
    log::trace!(
      "constructing {key} via `{}` ({} parameters)",
      constructor.name(),
      constructor.dependencies().len()
    );
    constructor.instantiate(self)
  }

  /// Whether a binding exists for `T` under `name`.
  pub fn contains<T: ?Sized + Any>(&self, name: Option<&str>) -> bool {
    self.providers.contains_key(&BindingKey::of::<T>(name))
  }
}
