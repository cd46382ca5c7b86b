//! The process-wide container instance and access function.

use crate::container::Container;
use once_cell::sync::Lazy;

// The one process-wide container, created on first access.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Returns a reference to the process-wide [`Container`].
///
/// Bindings may be registered from anywhere, though the supported pattern
/// is to configure everything during application startup and only resolve
/// afterwards. The [`resolve!`](crate::resolve) and
/// [`maybe_resolve!`](crate::maybe_resolve) macros operate on this
/// container.
///
/// # Examples
///
/// ```
/// use bindery::global;
///
/// fn register_services() {
///   global().add_instance_with_name("motd", String::from("Hello from the global container!"));
/// }
///
/// register_services();
/// assert!(global().contains::<String>(Some("motd")));
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
