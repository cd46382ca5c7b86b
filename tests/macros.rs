//! Tests for the resolution macros, against the global `Container`, custom
//! `Container` instances, and the `LocalContainer`.

use bindery::{
  global, injectable, maybe_resolve, maybe_resolve_from, resolve, resolve_from, Container,
  LocalContainer,
};
use std::rc::Rc;
use std::sync::Arc;

// --- Test Fixtures ---

// Service for thread-safe container tests.
struct MacroTestService {
  value: i32,
}
trait MacroTestTrait: Send + Sync {
  fn value(&self) -> i32;
}
impl MacroTestTrait for MacroTestService {
  fn value(&self) -> i32 {
    self.value
  }
}
// An unregistered type.
struct UnregisteredService;

injectable!(value MacroTestService);
injectable!(trait MacroTestTrait);
injectable!(value UnregisteredService);

// Service for single-threaded container tests (doesn't need Send + Sync).
struct LocalTestService {
  value: i32,
}
trait LocalTestTrait {
  fn value(&self) -> i32;
}
impl LocalTestTrait for LocalTestService {
  fn value(&self) -> i32 {
    self.value
  }
}
struct LocalUnregisteredService;

// --- Global Macro Tests ---

#[test]
fn test_maybe_resolve_global() {
  // Arrange
  global().add_singleton(|_| Ok(MacroTestService { value: 42 }));
  global().add_singleton_with_name("named", |_| Ok(MacroTestService { value: 43 }));
  global().add_singleton_trait::<dyn MacroTestTrait>(|_| Ok(Arc::new(MacroTestService { value: 44 })));
  global().add_singleton_trait_with_name::<dyn MacroTestTrait>("named_trait", |_| {
    Ok(Arc::new(MacroTestService { value: 45 }))
  });

  // Act & Assert: success cases
  assert_eq!(maybe_resolve!(MacroTestService).unwrap().value, 42);
  assert_eq!(maybe_resolve!(MacroTestService, "named").unwrap().value, 43);
  assert_eq!(maybe_resolve!(trait MacroTestTrait).unwrap().value(), 44);
  assert_eq!(
    maybe_resolve!(trait MacroTestTrait, "named_trait").unwrap().value(),
    45
  );

  // Act & Assert: failure cases
  assert!(maybe_resolve!(UnregisteredService).is_none());
  assert!(maybe_resolve!(MacroTestService, "no_such_name").is_none());
}

#[test]
fn test_resolve_global_named_with_dynamic_name() {
  // Arrange
  global().add_instance_with_name("dynamic_7", MacroTestService { value: 77 });

  // Act
  let name = format!("dynamic_{}", 7);
  let service = resolve!(MacroTestService, &name);

  // Assert
  assert_eq!(service.value, 77);
}

// --- Explicit Container Macro Tests ---

#[test]
fn test_resolve_from_custom_container() {
  // Arrange
  let container = Container::new();
  container.add_singleton(|_| Ok(MacroTestService { value: 10 }));
  container.add_singleton_trait::<dyn MacroTestTrait>(|_| Ok(Arc::new(MacroTestService { value: 11 })));
  container.add_instance_with_name("named", MacroTestService { value: 12 });

  // Act & Assert
  assert_eq!(resolve_from!(container, MacroTestService).value, 10);
  assert_eq!(resolve_from!(container, trait MacroTestTrait).value(), 11);
  assert_eq!(resolve_from!(container, MacroTestService, "named").value, 12);
}

#[test]
fn test_maybe_resolve_from_custom_container() {
  // Arrange
  let container = Container::new();
  container.add_singleton(|_| Ok(MacroTestService { value: 20 }));

  // Act & Assert
  assert_eq!(
    maybe_resolve_from!(container, MacroTestService).unwrap().value,
    20
  );
  assert!(maybe_resolve_from!(container, trait MacroTestTrait).is_none());
  assert!(maybe_resolve_from!(container, MacroTestService, "absent").is_none());
}

#[test]
#[should_panic(expected = "Failed to resolve required service")]
fn test_resolve_from_panics_on_empty_container() {
  let container = Container::new();
  let _ = resolve_from!(container, MacroTestService);
}

// --- Local Container Macro Tests ---

#[test]
fn test_macros_with_local_container() {
  // Arrange
  let mut local = LocalContainer::new();
  local.add_singleton(|_| Ok(LocalTestService { value: 30 }));
  local.add_singleton_trait::<dyn LocalTestTrait>(|_| Ok(Rc::new(LocalTestService { value: 31 })));
  local.add_instance_with_name("named", LocalTestService { value: 32 });

  // Act & Assert
  assert_eq!(resolve_from!(local, LocalTestService).value, 30);
  assert_eq!(resolve_from!(local, trait LocalTestTrait).value(), 31);
  assert_eq!(resolve_from!(local, LocalTestService, "named").value, 32);
  assert!(maybe_resolve_from!(local, LocalUnregisteredService).is_none());
}

#[test]
#[should_panic(expected = "Failed to resolve required trait service")]
fn test_resolve_from_panics_on_missing_local_trait() {
  let local = LocalContainer::new();
  let _ = resolve_from!(local, trait LocalTestTrait);
}
