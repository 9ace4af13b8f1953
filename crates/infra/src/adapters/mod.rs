//! `StoreAdapter` implementations

mod in_process;
mod key_locks;
mod remote;

pub use in_process::InProcessBounded;
pub use remote::RemoteAsync;
