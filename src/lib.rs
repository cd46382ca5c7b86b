//! # Bindery
//!
//! A minimal, thread-safe Inversion of Control (IoC) container with
//! recursive constructor auto-wiring.
//!
//! - **Bindings**: map an abstract type (a trait object or a leaf value
//!   type), optionally discriminated by a name, to a production strategy.
//! - **Lifecycles**: *instance* (pre-built value), *singleton* (built once,
//!   then shared), *transient* (built on every request).
//! - **Auto-wiring**: concrete types declare their public constructor with
//!   [`injectable!`]; the container resolves each parameter recursively, in
//!   declaration order, and invokes the constructor.
//! - **Failure taxonomy**: every failure is a [`ResolveError`] variant, so
//!   a wiring mistake ([`NotRegistered`], [`AmbiguousConstructor`],
//!   [`CyclicDependency`]) is distinguishable from a factory failure
//!   ([`ConstructionFailure`]).
//! - **Thread-safety**: registration and resolution both take `&self` and
//!   may happen concurrently from any thread; a singleton factory runs at
//!   most once even under contention.
//!
//! [`NotRegistered`]: ResolveError::NotRegistered
//! [`AmbiguousConstructor`]: ResolveError::AmbiguousConstructor
//! [`CyclicDependency`]: ResolveError::CyclicDependency
//! [`ConstructionFailure`]: ResolveError::ConstructionFailure
//!
//! ## Quick Start
//!
//! ```
//! use bindery::{bind, global, injectable, resolve};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!   fn log(&self, message: &str);
//! }
//!
//! struct ConsoleLogger;
//!
//! impl ConsoleLogger {
//!   fn new() -> Self {
//!     Self
//!   }
//! }
//!
//! impl Logger for ConsoleLogger {
//!   fn log(&self, message: &str) {
//!     println!("[log] {message}");
//!   }
//! }
//!
//! struct ReportService {
//!   logger: Arc<dyn Logger>,
//! }
//!
//! impl ReportService {
//!   fn new(logger: Arc<dyn Logger>) -> Self {
//!     Self { logger }
//!   }
//!
//!   fn run(&self) {
//!     self.logger.log("report generated");
//!   }
//! }
//!
//! injectable!(trait Logger);
//! injectable! {
//!   impl ConsoleLogger {
//!     fn new();
//!   }
//! }
//! injectable! {
//!   impl ReportService {
//!     fn new(logger: dyn Logger);
//!   }
//! }
//!
//! fn main() {
//!   // One shared logger; a fresh ReportService per resolution.
//!   bind!(global(), trait Logger => ConsoleLogger, singleton);
//!
//!   let report = resolve!(ReportService);
//!   report.run();
//! }
//! ```
//!
//! ## Abstract vs concrete
//!
//! Resolution dispatches on the requested type's declared capability, not
//! on registry contents. A type declared abstract (`injectable!(trait ..)`
//! or `injectable!(value ..)`) is always served from its registered
//! binding. A type declared concrete (`injectable! { impl .. }`) is always
//! constructed afresh through its single declared constructor, even when a
//! binding under the same type exists; such bindings stay reachable through
//! [`Container::lookup`]. Lifecycles therefore belong to bindings, never to
//! types.
//!
//! ## Feature Flags
//!
//! - `local`: enables `LocalContainer`, a single-threaded variant without
//!   `Send + Sync` bounds, for `Rc`-based services.

mod container;
mod construct;
mod core;
mod error;
mod global;
#[cfg(feature = "local")]
mod local_container;
mod macros;

pub use construct::{Constructible, Constructor, Dependency, Resolvable, ResolvedArgs};
pub use container::Container;
pub use error::ResolveError;
pub use global::global;
#[cfg(feature = "local")]
pub use local_container::LocalContainer;
