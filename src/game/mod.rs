//! Game model — board layout, session state, its codecs and persistence.
//!
//! Nothing in here holds global state; the wasm boundary in `lib.rs` owns
//! the one live `Session`.

pub mod board;
pub mod codec;
pub mod reconcile;
pub mod session;
pub mod state;
pub mod store;
