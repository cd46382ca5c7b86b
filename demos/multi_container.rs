use bindery::{global, Container, ResolveError};

// A function that wires and uses its own dependencies. Accepting a
// `&Container` lets callers hand it a controlled environment.
fn process_data(container: &Container) -> Result<String, ResolveError> {
  container.add_instance("test data".to_string());

  let data = container.lookup::<String>(None)?;
  Ok(format!("Processed: {}", data.to_uppercase()))
}

fn main() {
  println!("--- Running with a scoped container ---");
  let scoped = Container::new();
  let result = process_data(&scoped).expect("processing failed");

  println!("Result: {result}");
  assert_eq!(result, "Processed: TEST DATA");

  // Nothing leaked into the global container.
  assert!(!global().contains::<String>(None));
  println!("Verified that the scoped container is isolated from the global one.");
}
