//! Public macros for declaring injectable types and resolving services.

/// Resolves a required service from the [`global()`](crate::global)
/// container, panicking on failure.
///
/// Intended for application startup and composition roots, where a missing
/// binding is a programming error. Use [`maybe_resolve!`](crate::maybe_resolve)
/// when absence is an expected outcome, or
/// [`Container::resolve`](crate::Container::resolve) /
/// [`Container::lookup`](crate::Container::lookup) to handle the error.
///
/// Four forms are accepted:
///
/// - `resolve!(MyType)` resolves `MyType` through its declared capability,
/// - `resolve!(MyType, "name")` looks up a named binding for `MyType`,
/// - `resolve!(trait MyTrait)` resolves `dyn MyTrait`,
/// - `resolve!(trait MyTrait, "name")` looks up a named `dyn MyTrait`.
///
/// The unnamed forms require the type to be declared with
/// [`injectable!`](crate::injectable); the named forms consult the registry
/// directly.
///
/// # Examples
///
/// ```
/// use bindery::{global, resolve};
///
/// struct HttpPort(u16);
///
/// global().add_instance_with_name("http", HttpPort(8080));
///
/// let port = resolve!(HttpPort, "http");
/// assert_eq!(port.0, 8080);
/// ```
///
/// # Panics
///
/// Panics with a message starting with `Failed to resolve required service`
/// (or `Failed to resolve required trait service`) when resolution fails.
#[macro_export]
macro_rules! resolve {
  (trait $tr:path) => {
    $crate::resolve_from!($crate::global(), trait $tr)
  };
  (trait $tr:path, $name:expr) => {
    $crate::resolve_from!($crate::global(), trait $tr, $name)
  };
  ($ty:ty) => {
    $crate::resolve_from!($crate::global(), $ty)
  };
  ($ty:ty, $name:expr) => {
    $crate::resolve_from!($crate::global(), $ty, $name)
  };
}

/// Like [`resolve!`](crate::resolve), but returns an `Option` instead of
/// panicking. Accepts the same four forms.
///
/// # Examples
///
/// ```
/// use bindery::{global, maybe_resolve};
///
/// struct Undeclared;
///
/// assert!(maybe_resolve!(Undeclared, "missing").is_none());
/// ```
#[macro_export]
macro_rules! maybe_resolve {
  (trait $tr:path) => {
    $crate::maybe_resolve_from!($crate::global(), trait $tr)
  };
  (trait $tr:path, $name:expr) => {
    $crate::maybe_resolve_from!($crate::global(), trait $tr, $name)
  };
  ($ty:ty) => {
    $crate::maybe_resolve_from!($crate::global(), $ty)
  };
  ($ty:ty, $name:expr) => {
    $crate::maybe_resolve_from!($crate::global(), $ty, $name)
  };
}

/// Like [`resolve!`](crate::resolve), but against an explicit container
/// expression instead of the global one.
///
/// Works with both [`Container`](crate::Container) and, under the `local`
/// feature, `LocalContainer`.
#[macro_export]
macro_rules! resolve_from {
  ($container:expr, trait $tr:path) => {
    match $container.resolve::<dyn $tr>() {
      ::core::result::Result::Ok(instance) => instance,
      ::core::result::Result::Err(error) => panic!(
        "Failed to resolve required trait service `{}`: {}",
        ::std::any::type_name::<dyn $tr>(),
        error
      ),
    }
  };
  ($container:expr, trait $tr:path, $name:expr) => {
    match $container.lookup::<dyn $tr>(::core::option::Option::Some($name)) {
      ::core::result::Result::Ok(instance) => instance,
      ::core::result::Result::Err(error) => panic!(
        "Failed to resolve required trait service `{}`: {}",
        ::std::any::type_name::<dyn $tr>(),
        error
      ),
    }
  };
  ($container:expr, $ty:ty) => {
    match $container.resolve::<$ty>() {
      ::core::result::Result::Ok(instance) => instance,
      ::core::result::Result::Err(error) => panic!(
        "Failed to resolve required service `{}`: {}",
        ::std::any::type_name::<$ty>(),
        error
      ),
    }
  };
  ($container:expr, $ty:ty, $name:expr) => {
    match $container.lookup::<$ty>(::core::option::Option::Some($name)) {
      ::core::result::Result::Ok(instance) => instance,
      ::core::result::Result::Err(error) => panic!(
        "Failed to resolve required service `{}`: {}",
        ::std::any::type_name::<$ty>(),
        error
      ),
    }
  };
}

/// Like [`maybe_resolve!`](crate::maybe_resolve), but against an explicit
/// container expression instead of the global one.
#[macro_export]
macro_rules! maybe_resolve_from {
  ($container:expr, trait $tr:path) => {
    $container.resolve::<dyn $tr>().ok()
  };
  ($container:expr, trait $tr:path, $name:expr) => {
    $container
      .lookup::<dyn $tr>(::core::option::Option::Some($name))
      .ok()
  };
  ($container:expr, $ty:ty) => {
    $container.resolve::<$ty>().ok()
  };
  ($container:expr, $ty:ty, $name:expr) => {
    $container
      .lookup::<$ty>(::core::option::Option::Some($name))
      .ok()
  };
}

/// Binds a trait to a concrete implementation that the container constructs
/// through auto-wiring.
///
/// `bind!(container, trait MyTrait => MyImpl)` registers a transient
/// binding: every resolution of `dyn MyTrait` constructs a fresh `MyImpl`
/// via [`Container::construct`](crate::Container::construct). Append
/// `, singleton` to construct once and share the instance.
///
/// `MyImpl` must be declared constructible with
/// [`injectable!`](crate::injectable), and the trait must be declared with
/// `injectable!(trait MyTrait)` for unnamed resolution to find it.
///
/// # Examples
///
/// ```
/// use bindery::{bind, injectable, Container};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///   fn greet(&self) -> String;
/// }
///
/// struct FriendlyGreeter;
///
/// impl FriendlyGreeter {
///   fn new() -> Self {
///     Self
///   }
/// }
///
/// impl Greeter for FriendlyGreeter {
///   fn greet(&self) -> String {
///     "Hello!".to_string()
///   }
/// }
///
/// injectable!(trait Greeter);
/// injectable! {
///   impl FriendlyGreeter {
///     fn new();
///   }
/// }
///
/// let container = Container::new();
/// bind!(container, trait Greeter => FriendlyGreeter);
///
/// let first = container.resolve::<dyn Greeter>().unwrap();
/// let second = container.resolve::<dyn Greeter>().unwrap();
/// assert_eq!(first.greet(), "Hello!");
/// // The default lifecycle is transient: each resolution constructs anew.
/// assert!(!Arc::ptr_eq(&first, &second));
/// ```
#[macro_export]
macro_rules! bind {
  ($container:expr, trait $tr:path => $concrete:ty) => {
    $container.add_transient_trait::<dyn $tr>(|container| {
      ::core::result::Result::Ok(
        ::std::sync::Arc::new(container.construct::<$concrete>()?) as ::std::sync::Arc<dyn $tr>,
      )
    })
  };
  ($container:expr, trait $tr:path => $concrete:ty, singleton) => {
    $container.add_singleton_trait::<dyn $tr>(|container| {
      ::core::result::Result::Ok(
        ::std::sync::Arc::new(container.construct::<$concrete>()?) as ::std::sync::Arc<dyn $tr>,
      )
    })
  };
}

/// Declares how a type participates in resolution.
///
/// Three forms exist, one per kind of participant:
///
/// - `injectable!(trait MyTrait)` marks a trait abstract: resolving
///   `dyn MyTrait` consults the registry for its unnamed binding. The trait
///   needs `Send + Sync` supertraits.
/// - `injectable!(value MyType)` marks a leaf value type abstract in the
///   same way: resolving `MyType` consults the registry, never a
///   constructor. Use this for configuration-style types that are always
///   registered, not built.
/// - `injectable! { impl MyType { fn new(dep: dyn Dep, cfg: Config); } }`
///   marks `MyType` concrete and declares its public constructors.
///   Resolving `MyType` then constructs it afresh by resolving each
///   declared parameter in order. Exactly one constructor must be declared
///   for construction to succeed.
///
/// In the `impl` form, each parameter is written as `name: ServiceType`,
/// where `ServiceType` is the type as it resolves (`dyn Dep` for a trait,
/// a plain type otherwise). The actual constructor receives every
/// parameter wrapped in an `Arc`, so the declaration above corresponds to
/// `fn new(dep: Arc<dyn Dep>, cfg: Arc<Config>) -> Self`.
///
/// # Examples
///
/// ```
/// use bindery::{injectable, Container};
/// use std::sync::Arc;
///
/// trait Store: Send + Sync {
///   fn get(&self, key: &str) -> Option<String>;
/// }
///
/// struct MemoryStore;
/// impl Store for MemoryStore {
///   fn get(&self, _key: &str) -> Option<String> {
///     None
///   }
/// }
///
/// struct AppConfig {
///   cache_size: usize,
/// }
///
/// struct CacheService {
///   store: Arc<dyn Store>,
///   config: Arc<AppConfig>,
/// }
///
/// impl CacheService {
///   fn new(store: Arc<dyn Store>, config: Arc<AppConfig>) -> Self {
///     Self { store, config }
///   }
/// }
///
/// injectable!(trait Store);
/// injectable!(value AppConfig);
/// injectable! {
///   impl CacheService {
///     fn new(store: dyn Store, config: AppConfig);
///   }
/// }
///
/// let container = Container::new();
/// container.add_singleton_trait::<dyn Store>(|_| Ok(Arc::new(MemoryStore)));
/// container.add_instance(AppConfig { cache_size: 128 });
///
/// let service = container.resolve::<CacheService>().unwrap();
/// assert_eq!(service.config.cache_size, 128);
/// assert!(service.store.get("missing").is_none());
/// ```
#[macro_export]
macro_rules! injectable {
  (trait $tr:path) => {
    impl $crate::Resolvable for dyn $tr {
      fn resolve_with(
        container: &$crate::Container,
      ) -> ::core::result::Result<::std::sync::Arc<Self>, $crate::ResolveError> {
        container.lookup::<dyn $tr>(::core::option::Option::None)
      }
    }
  };
  (value $ty:ty) => {
    impl $crate::Resolvable for $ty {
      fn resolve_with(
        container: &$crate::Container,
      ) -> ::core::result::Result<::std::sync::Arc<Self>, $crate::ResolveError> {
        container.lookup::<$ty>(::core::option::Option::None)
      }
    }
  };
  (impl $ty:ty { $( fn $ctor:ident ( $( $pname:ident : $pty:ty ),* $(,)? ); )* }) => {
    impl $crate::Constructible for $ty {
      fn constructors() -> ::std::vec::Vec<$crate::Constructor<Self>> {
        ::std::vec![
          $(
            $crate::Constructor::new(
              ::core::stringify!($ctor),
              ::std::vec![ $( $crate::Dependency::on::<$pty>() ),* ],
              |args| {
                ::core::result::Result::Ok(<$ty>::$ctor( $( args.take::<$pty>()? ),* ))
              },
            )
          ),*
        ]
      }
    }

    impl $crate::Resolvable for $ty {
      fn resolve_with(
        container: &$crate::Container,
      ) -> ::core::result::Result<::std::sync::Arc<Self>, $crate::ResolveError> {
        container.construct::<$ty>().map(::std::sync::Arc::new)
      }
    }
  };
}
