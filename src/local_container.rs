//! A single-threaded, non-thread-safe Inversion of Control container.
//!
//! Enabled with the `local` feature.

use crate::core::{BindingKey, ContainerId, ResolutionGuard, ResolutionKind};
use crate::error::ResolveError;
use once_cell::unsync::OnceCell;
use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

type AnyLocal = Box<dyn Any>;
type LocalFactoryFn = dyn Fn(&LocalContainer) -> Result<AnyLocal, ResolveError>;

enum LocalProvider {
  Singleton {
    cell: OnceCell<AnyLocal>,
    factory: Box<LocalFactoryFn>,
  },
  Transient {
    factory: Box<LocalFactoryFn>,
  },
}

/// A single-threaded Inversion of Control (IoC) container.
///
/// Offers the same registry semantics as [`Container`](crate::Container):
/// named bindings, the instance/singleton/transient lifecycles, last
/// registration wins, and cycle detection. The differences are what the
/// missing `Send + Sync` bounds buy:
///
/// - services may be `!Send`/`!Sync` (`Rc`, `Cell`, and friends),
/// - instances are shared as `Rc<T>` rather than `Arc<T>`,
/// - registration takes `&mut self`, since the underlying map has no
///   interior mutability.
///
/// Constructor auto-wiring is tied to the thread-safe container; a
/// `LocalContainer` serves registered bindings only, so
/// [`resolve`](LocalContainer::resolve) is simply an unnamed
/// [`lookup`](LocalContainer::lookup).
#[derive(Default)]
pub struct LocalContainer {
  providers: HashMap<BindingKey, LocalProvider>,
}

impl LocalContainer {
  /// Creates a new, empty `LocalContainer`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn insert(&mut self, kind: &'static str, key: BindingKey, provider: LocalProvider) {
    log::trace!("registering local {kind} binding for {key}");
    self.providers.insert(key, provider);
  }

  fn add_instance_trait_internal<I: ?Sized + Any>(&mut self, name: Option<&str>, instance: Rc<I>) {
    let provider = LocalProvider::Singleton {
      cell: OnceCell::with_value(Box::new(instance)),
      factory: Box::new(|_: &LocalContainer| {
        panic!("pre-initialized singleton factory should not be called")
      }),
    };
    self.insert("instance", BindingKey::of::<I>(name), provider);
  }

  fn add_singleton_internal<T: Any>(
    &mut self,
    name: Option<&str>,
    factory: impl Fn(&LocalContainer) -> Result<T, ResolveError> + 'static,
  ) {
    let provider = LocalProvider::Singleton {
      cell: OnceCell::new(),
      factory: Box::new(move |container: &LocalContainer| {
        factory(container).map(|instance| Box::new(Rc::new(instance)) as AnyLocal)
      }),
    };
    self.insert("singleton", BindingKey::of::<T>(name), provider);
  }

  fn add_transient_internal<T: Any>(
    &mut self,
    name: Option<&str>,
    factory: impl Fn(&LocalContainer) -> Result<T, ResolveError> + 'static,
  ) {
    let provider = LocalProvider::Transient {
      factory: Box::new(move |container: &LocalContainer| {
        factory(container).map(|instance| Box::new(Rc::new(instance)) as AnyLocal)
      }),
    };
    self.insert("transient", BindingKey::of::<T>(name), provider);
  }

  fn add_singleton_trait_internal<I: ?Sized + Any>(
    &mut self,
    name: Option<&str>,
    factory: impl Fn(&LocalContainer) -> Result<Rc<I>, ResolveError> + 'static,
  ) {
    let provider = LocalProvider::Singleton {
      cell: OnceCell::new(),
      factory: Box::new(move |container: &LocalContainer| {
        factory(container).map(|instance| Box::new(instance) as AnyLocal)
      }),
    };
    self.insert("singleton", BindingKey::of::<I>(name), provider);
  }

  fn add_transient_trait_internal<I: ?Sized + Any>(
    &mut self,
    name: Option<&str>,
    factory: impl Fn(&LocalContainer) -> Result<Rc<I>, ResolveError> + 'static,
  ) {
    let provider = LocalProvider::Transient {
      factory: Box::new(move |container: &LocalContainer| {
        factory(container).map(|instance| Box::new(instance) as AnyLocal)
      }),
    };
    self.insert("transient", BindingKey::of::<I>(name), provider);
  }

  // --- PUBLIC API ---

  // --- Instance Registration ---
  pub fn add_instance<T: Any>(&mut self, instance: T) {
    self.add_instance_trait_internal::<T>(None, Rc::new(instance));
  }
  pub fn add_instance_with_name<T: Any>(&mut self, name: &str, instance: T) {
    self.add_instance_trait_internal::<T>(Some(name), Rc::new(instance));
  }
  pub fn add_instance_trait<I: ?Sized + Any>(&mut self, instance: Rc<I>) {
    self.add_instance_trait_internal(None, instance);
  }
  pub fn add_instance_trait_with_name<I: ?Sized + Any>(&mut self, name: &str, instance: Rc<I>) {
    self.add_instance_trait_internal(Some(name), instance);
  }

  // --- Singleton Registration ---
  pub fn add_singleton<T: Any>(
    &mut self,
    factory: impl Fn(&LocalContainer) -> Result<T, ResolveError> + 'static,
  ) {
    self.add_singleton_internal(None, factory);
  }
  pub fn add_singleton_with_name<T: Any>(
    &mut self,
    name: &str,
    factory: impl Fn(&LocalContainer) -> Result<T, ResolveError> + 'static,
  ) {
    self.add_singleton_internal(Some(name), factory);
  }

  // --- Transient Registration ---
  pub fn add_transient<T: Any>(
    &mut self,
    factory: impl Fn(&LocalContainer) -> Result<T, ResolveError> + 'static,
  ) {
    self.add_transient_internal(None, factory);
  }
  pub fn add_transient_with_name<T: Any>(
    &mut self,
    name: &str,
    factory: impl Fn(&LocalContainer) -> Result<T, ResolveError> + 'static,
  ) {
    self.add_transient_internal(Some(name), factory);
  }

  // --- Trait Registration ---
  pub fn add_singleton_trait<I: ?Sized + Any>(
    &mut self,
    factory: impl Fn(&LocalContainer) -> Result<Rc<I>, ResolveError> + 'static,
  ) {
    self.add_singleton_trait_internal(None, factory);
  }
  pub fn add_singleton_trait_with_name<I: ?Sized + Any>(
    &mut self,
    name: &str,
    factory: impl Fn(&LocalContainer) -> Result<Rc<I>, ResolveError> + 'static,
  ) {
    self.add_singleton_trait_internal(Some(name), factory);
  }
  pub fn add_transient_trait<I: ?Sized + Any>(
    &mut self,
    factory: impl Fn(&LocalContainer) -> Result<Rc<I>, ResolveError> + 'static,
  ) {
    self.add_transient_trait_internal(None, factory);
  }
  pub fn add_transient_trait_with_name<I: ?Sized + Any>(
    &mut self,
    name: &str,
    factory: impl Fn(&LocalContainer) -> Result<Rc<I>, ResolveError> + 'static,
  ) {
    self.add_transient_trait_internal(Some(name), factory);
  }

  // --- Resolution ---

  /// Resolves the unnamed binding for `T`.
  pub fn resolve<T: ?Sized + Any>(&self) -> Result<Rc<T>, ResolveError> {
    self.lookup::<T>(None)
  }

  /// Looks up the binding for `T` under `name` and runs its strategy.
  pub fn lookup<T: ?Sized + Any>(&self, name: Option<&str>) -> Result<Rc<T>, ResolveError> {
    let key = BindingKey::of::<T>(name);
    let _guard =
      ResolutionGuard::acquire(ContainerId::of(self), ResolutionKind::Binding, key.clone())?;

    let provider = match self.providers.get(&key) {
      Some(provider) => provider,
      None => {
        log::debug!("local lookup miss for {key}");
        return Err(ResolveError::not_registered(&key));
      }
    };

    match provider {
      LocalProvider::Singleton { cell, factory } => {
        let shared = cell.get_or_try_init(|| factory(self))?;
        shared
          .downcast_ref::<Rc<T>>()
          .cloned()
          .ok_or_else(|| ResolveError::mismatched(&key))
      }
      LocalProvider::Transient { factory } => factory(self)?
        .downcast::<Rc<T>>()
        .map(|boxed| *boxed)
        .map_err(|_| ResolveError::mismatched(&key)),
    }
  }

  /// Whether a binding exists for `T` under `name`.
  pub fn contains<T: ?Sized + Any>(&self, name: Option<&str>) -> bool {
    self.providers.contains_key(&BindingKey::of::<T>(name))
  }
}
