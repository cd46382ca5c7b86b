use bindery::{bind, global, injectable, resolve};
use std::sync::Arc;

// --- Service Abstractions ---

trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

trait Database: Send + Sync {
  fn query(&self, sql: &str) -> String;
}

// --- Concrete Implementations ---

struct ConsoleLogger;
impl ConsoleLogger {
  fn new() -> Self {
    Self
  }
}
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[LOG] {message}");
  }
}

struct PostgresDatabase;
impl PostgresDatabase {
  fn new() -> Self {
    Self
  }
}
impl Database for PostgresDatabase {
  fn query(&self, sql: &str) -> String {
    format!("postgres result for '{sql}'")
  }
}

// A service depending on both abstractions.
struct AppService {
  logger: Arc<dyn Logger>,
  database: Arc<dyn Database>,
}

impl AppService {
  fn new(logger: Arc<dyn Logger>, database: Arc<dyn Database>) -> Self {
    Self { logger, database }
  }

  fn run_query(&self, sql: &str) -> String {
    self.logger.log(&format!("running query: {sql}"));
    self.database.query(sql)
  }
}

// --- Wiring Declarations ---

injectable!(trait Logger);
injectable!(trait Database);
injectable! {
  impl ConsoleLogger {
    fn new();
  }
}
injectable! {
  impl PostgresDatabase {
    fn new();
  }
}
injectable! {
  impl AppService {
    fn new(logger: dyn Logger, database: dyn Database);
  }
}

fn main() {
  bind!(global(), trait Logger => ConsoleLogger, singleton);
  bind!(global(), trait Database => PostgresDatabase, singleton);

  // AppService is concrete: resolving it constructs it, wiring both
  // dependencies automatically.
  let app = resolve!(AppService);
  let result = app.run_query("SELECT * FROM users");

  println!("{result}");
  assert_eq!(result, "postgres result for 'SELECT * FROM users'");
}
