pub mod block_formatter;
pub mod collector;
