pub mod host;
pub mod memory_page;
pub mod page_model;
