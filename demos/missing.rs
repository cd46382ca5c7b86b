use bindery::{global, injectable, resolve, ResolveError};

struct NotRegisteredService;
injectable!(value NotRegisteredService);

fn main() {
  // A direct lookup reports the failure as a value.
  match global().lookup::<NotRegisteredService>(None) {
    Ok(_) => unreachable!("nothing was registered"),
    Err(error @ ResolveError::NotRegistered { .. }) => {
      println!("lookup failed as expected: {error}");
    }
    Err(error) => panic!("unexpected error: {error}"),
  }

  // The resolve! macro treats the same failure as fatal.
  let result = std::panic::catch_unwind(|| {
    let _ = resolve!(NotRegisteredService);
  });
  assert!(result.is_err());
  println!("resolve! panicked as expected for a missing binding");
}
