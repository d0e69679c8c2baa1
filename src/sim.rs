pub mod cursor;
pub mod data;
