pub mod ids;
pub mod lenient;
pub mod time;
