use bindery::{bind, global, injectable, resolve};
use std::sync::Arc;

struct AppConfig {
  connection_string: String,
}

trait UserRepository: Send + Sync {
  fn find(&self, id: u32) -> Option<String>;
}

struct SqlUserRepository {
  config: Arc<AppConfig>,
}

impl SqlUserRepository {
  fn new(config: Arc<AppConfig>) -> Self {
    Self { config }
  }
}

impl UserRepository for SqlUserRepository {
  fn find(&self, id: u32) -> Option<String> {
    Some(format!("user {id} via {}", self.config.connection_string))
  }
}

struct UserLookup {
  repository: Arc<dyn UserRepository>,
}

impl UserLookup {
  fn new(repository: Arc<dyn UserRepository>) -> Self {
    Self { repository }
  }

  fn describe(&self, id: u32) -> String {
    self
      .repository
      .find(id)
      .unwrap_or_else(|| format!("user {id} not found"))
  }
}

injectable!(value AppConfig);
injectable!(trait UserRepository);
injectable! {
  impl SqlUserRepository {
    fn new(config: AppConfig);
  }
}
injectable! {
  impl UserLookup {
    fn new(repository: dyn UserRepository);
  }
}

fn main() {
  // The only thing registered by hand is the configuration value; the rest
  // of the graph is constructed on demand.
  global().add_instance(AppConfig {
    connection_string: "sqlserver://db-01/users".to_string(),
  });
  bind!(global(), trait UserRepository => SqlUserRepository, singleton);

  let lookup = resolve!(UserLookup);
  let line = lookup.describe(42);

  println!("{line}");
  assert!(line.contains("db-01"));
}
