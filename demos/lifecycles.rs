use bindery::{global, injectable, resolve};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
struct AppState {
  id: usize,
}

#[derive(Debug)]
struct RequestContext {
  id: usize,
}

injectable!(value AppState);
injectable!(value RequestContext);

fn main() {
  // A singleton is built once; a transient is built on every resolution.
  global().add_singleton(|_| {
    Ok(AppState {
      id: NEXT_ID.fetch_add(1, Ordering::SeqCst),
    })
  });
  global().add_transient(|_| {
    Ok(RequestContext {
      id: NEXT_ID.fetch_add(1, Ordering::SeqCst),
    })
  });

  let state_a = resolve!(AppState);
  let state_b = resolve!(AppState);
  println!("singleton ids: {} / {}", state_a.id, state_b.id);
  assert_eq!(state_a.id, state_b.id);

  let request_a = resolve!(RequestContext);
  let request_b = resolve!(RequestContext);
  println!("transient ids: {} / {}", request_a.id, request_b.id);
  assert_ne!(request_a.id, request_b.id);
}
