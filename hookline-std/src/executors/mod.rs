//! Standard executor adapters.

pub mod guard;
pub mod map;
pub mod traced;

pub use guard::GuardExecutor;
pub use map::MapExecutor;
pub use traced::TracingExecutor;
