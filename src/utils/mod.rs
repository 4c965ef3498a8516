//! Commonly used utilities like pools, call journals and the buffered logger.

pub mod handle;
pub mod handle_pool;
pub mod journal;
pub mod logger;
pub mod object_pool;

pub use self::handle::{Handle, HandleIndex};
pub use self::handle_pool::HandlePool;
pub use self::journal::Journal;
pub use self::object_pool::ObjectPool;
