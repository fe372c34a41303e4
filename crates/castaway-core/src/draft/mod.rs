pub mod order;
pub(crate) mod pool;
pub mod snake;
pub mod types;
