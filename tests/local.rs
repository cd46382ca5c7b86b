//! Tests for the single-threaded `LocalContainer`, including services that
//! are deliberately not `Send` or `Sync`.

use bindery::{LocalContainer, ResolveError};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn test_local_instance_resolution() {
  // Arrange
  let mut container = LocalContainer::new();
  container.add_instance(String::from("local value"));

  // Act
  let s1 = container.resolve::<String>().unwrap();
  let s2 = container.resolve::<String>().unwrap();

  // Assert
  assert_eq!(*s1, "local value");
  assert!(Rc::ptr_eq(&s1, &s2));
}

#[test]
fn test_local_singleton_factory() {
  // Arrange
  struct Session {
    id: u32,
  }

  let mut container = LocalContainer::new();
  container.add_singleton(|_| Ok(Session { id: 9 }));
  container.add_singleton_with_name("alt", |_| Ok(Session { id: 10 }));

  // Act
  let a = container.resolve::<Session>().unwrap();
  let b = container.resolve::<Session>().unwrap();
  let named = container.lookup::<Session>(Some("alt")).unwrap();

  // Assert
  assert_eq!(a.id, 9);
  assert!(Rc::ptr_eq(&a, &b));
  assert_eq!(named.id, 10);
}

#[test]
fn test_local_transient_with_interior_mutability() {
  // Arrange: Cell makes the service !Sync, which the local container allows.
  struct ClickCounter {
    clicks: Cell<u32>,
  }

  let mut container = LocalContainer::new();
  container.add_transient(|_| {
    Ok(ClickCounter {
      clicks: Cell::new(0),
    })
  });

  // Act
  let c1 = container.resolve::<ClickCounter>().unwrap();
  c1.clicks.set(c1.clicks.get() + 1);
  let c2 = container.resolve::<ClickCounter>().unwrap();

  // Assert: each resolution produced its own counter.
  assert_eq!(c1.clicks.get(), 1);
  assert_eq!(c2.clicks.get(), 0);
}

#[test]
fn test_local_trait_resolution() {
  // Arrange: no Send + Sync supertraits required here.
  trait LocalGreeter {
    fn greet(&self) -> String;
  }
  struct QuietGreeter;
  impl LocalGreeter for QuietGreeter {
    fn greet(&self) -> String {
      "hi".to_string()
    }
  }

  let mut container = LocalContainer::new();
  container.add_singleton_trait::<dyn LocalGreeter>(|_| Ok(Rc::new(QuietGreeter)));

  // Act
  let greeter = container.resolve::<dyn LocalGreeter>().unwrap();

  // Assert
  assert_eq!(greeter.greet(), "hi");

  // An existing Rc can be bound directly under a name.
  let loud: Rc<dyn LocalGreeter> = Rc::new(QuietGreeter);
  container.add_instance_trait_with_name::<dyn LocalGreeter>("loud", loud.clone());
  let bound = container.lookup::<dyn LocalGreeter>(Some("loud")).unwrap();
  assert!(Rc::ptr_eq(&loud, &bound));
}

#[test]
fn test_local_factory_resolves_its_own_dependencies() {
  // Arrange
  struct Config {
    greeting: &'static str,
  }
  struct App {
    config: Rc<Config>,
  }

  let mut container = LocalContainer::new();
  container.add_instance(Config {
    greeting: "hello",
  });
  container.add_singleton(|container: &LocalContainer| {
    Ok(App {
      config: container.resolve::<Config>()?,
    })
  });

  // Act
  let app = container.resolve::<App>().unwrap();

  // Assert
  assert_eq!(app.config.greeting, "hello");
}

#[test]
fn test_local_missing_binding_errors() {
  // Arrange
  struct Nowhere;

  let container = LocalContainer::new();

  // Act
  let error = container.resolve::<Nowhere>().unwrap_err();

  // Assert
  assert!(matches!(error, ResolveError::NotRegistered { .. }));
}

#[test]
fn test_local_circular_dependency_errors() {
  // Arrange
  struct Yin {
    _other: Rc<Yang>,
  }
  struct Yang {
    _other: Rc<Yin>,
  }

  let mut container = LocalContainer::new();
  container.add_singleton(|container: &LocalContainer| {
    Ok(Yin {
      _other: container.resolve::<Yang>()?,
    })
  });
  container.add_singleton(|container: &LocalContainer| {
    Ok(Yang {
      _other: container.resolve::<Yin>()?,
    })
  });

  // Act
  let error = container.resolve::<Yin>().unwrap_err();

  // Assert
  assert!(matches!(error, ResolveError::CyclicDependency { .. }));
}

#[test]
fn test_local_last_registration_wins() {
  // Arrange
  let mut container = LocalContainer::new();
  container.add_instance_with_name("motd", String::from("first"));
  container.add_instance_with_name("motd", String::from("second"));

  // Act
  let motd = container.lookup::<String>(Some("motd")).unwrap();

  // Assert
  assert_eq!(*motd, "second");
}
