//! Constructor plans and the resolution dispatch trait.
//!
//! This is the auto-wiring half of the container. A concrete type declares
//! its public constructors (normally through [`injectable!`]), and
//! [`Container::construct`] resolves each declared parameter in order before
//! invoking the constructor. Abstract types (traits and leaf value types)
//! instead route resolution to whatever binding is registered for them.
//!
//! [`injectable!`]: crate::injectable
//! [`Container::construct`]: crate::Container::construct

use crate::container::Container;
use crate::core::AnyShared;
use crate::error::ResolveError;
use std::any::{self, Any};
use std::collections::VecDeque;
use std::sync::Arc;

/// How a type is produced when requested through [`Container::resolve`].
///
/// Implementations are normally generated by [`injectable!`]:
///
/// - `injectable!(trait T)` routes `dyn T` to its registered unnamed binding,
/// - `injectable!(value V)` routes `V` to its registered unnamed binding,
/// - `injectable! { impl C { .. } }` routes `C` to constructor auto-wiring.
///
/// This trait is how the container tells abstract from concrete: a type
/// whose impl delegates to [`Container::construct`] is built afresh on every
/// request, while everything else must have been registered first.
///
/// [`injectable!`]: crate::injectable
/// [`Container::resolve`]: crate::Container::resolve
/// [`Container::construct`]: crate::Container::construct
pub trait Resolvable: Any + Send + Sync {
  /// Produces an instance, using `container` for any recursive resolution.
  fn resolve_with(container: &Container) -> Result<Arc<Self>, ResolveError>;
}

/// A concrete type the container knows how to construct.
///
/// `constructors()` enumerates the type's public constructors as invocable
/// plans, in declaration order. Auto-wiring requires the list to hold
/// exactly one entry; zero or several fail with
/// [`ResolveError::AmbiguousConstructor`]. The list is rebuilt on every
/// construction and never cached.
pub trait Constructible: Sized + Any {
  fn constructors() -> Vec<Constructor<Self>>;
}

/// One declared constructor parameter: the parameter type's name plus a
/// thunk that resolves it against a container.
pub struct Dependency {
  type_name: &'static str,
  resolve: fn(&Container) -> Result<AnyShared, ResolveError>,
}

impl Dependency {
  /// Declares a dependency on `P`, satisfied through `P`'s [`Resolvable`]
  /// implementation at construction time.
  pub fn on<P: Resolvable + ?Sized>() -> Self {
    Self {
      type_name: any::type_name::<P>(),
      resolve: |container| {
        P::resolve_with(container).map(|instance| Box::new(instance) as AnyShared)
      },
    }
  }

  /// The declared parameter type, for diagnostics.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }
}

/// The arguments for one constructor invocation, resolved and held in
/// declaration order. The plan's build function drains them positionally
/// with [`take`](ResolvedArgs::take).
pub struct ResolvedArgs {
  target: &'static str,
  constructor: &'static str,
  values: VecDeque<AnyShared>,
  position: usize,
}

impl ResolvedArgs {
  fn new(target: &'static str, constructor: &'static str, values: Vec<AnyShared>) -> Self {
    Self {
      target,
      constructor,
      values: values.into(),
      position: 0,
    }
  }

  /// Takes the next argument as an `Arc<P>`.
  ///
  /// Fails with [`ResolveError::ConstructionFailure`] when the argument list
  /// is exhausted or the value at this position is not an `Arc<P>`, which
  /// means the build function disagrees with the declared dependency list.
  pub fn take<P: ?Sized + Any + Send + Sync>(&mut self) -> Result<Arc<P>, ResolveError> {
    self.position += 1;
    let value = self.values.pop_front().ok_or_else(|| {
      ResolveError::construction(
        self.target,
        format!(
          "constructor `{}` takes more arguments than it declares (argument {})",
          self.constructor, self.position
        ),
      )
    })?;
    match value.downcast::<Arc<P>>() {
      Ok(instance) => Ok(*instance),
      Err(_) => Err(ResolveError::construction(
        self.target,
        format!(
          "constructor `{}` argument {} is not `{}`",
          self.constructor,
          self.position,
          any::type_name::<P>()
        ),
      )),
    }
  }
}

/// An invocable view of one public constructor: its name, its parameters in
/// declaration order, and a build function that consumes the resolved
/// arguments.
pub struct Constructor<T> {
  name: &'static str,
  dependencies: Vec<Dependency>,
  build: fn(&mut ResolvedArgs) -> Result<T, ResolveError>,
}

impl<T> Constructor<T> {
  /// Creates a plan. The order of `dependencies` must match the positional
  /// `take` calls inside `build`.
  pub fn new(
    name: &'static str,
    dependencies: Vec<Dependency>,
    build: fn(&mut ResolvedArgs) -> Result<T, ResolveError>,
  ) -> Self {
    Self {
      name,
      dependencies,
      build,
    }
  }

  /// The constructor's name, for diagnostics.
  pub fn name(&self) -> &'static str {
    self.name
  }

  /// The declared parameters, in resolution order.
  pub fn dependencies(&self) -> &[Dependency] {
    &self.dependencies
  }

  /// Resolves every declared dependency in order against `container`, then
  /// invokes the build function. A failure while resolving any parameter
  /// propagates unchanged, so the caller sees the innermost cause.
  pub(crate) fn instantiate(&self, container: &Container) -> Result<T, ResolveError> {
    let mut values = Vec::with_capacity(self.dependencies.len());
    for dependency in &self.dependencies {
      log::trace!(
        "resolving parameter `{}` of `{}::{}`",
        dependency.type_name(),
        any::type_name::<T>(),
        self.name
      );
      values.push((dependency.resolve)(container)?);
    }
    let mut args = ResolvedArgs::new(any::type_name::<T>(), self.name, values);
    (self.build)(&mut args)
  }
}
