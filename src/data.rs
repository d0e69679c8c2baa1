pub mod domain;
pub mod indicator;
pub mod record;
pub mod view;
