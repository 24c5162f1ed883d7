pub mod folder_handlers;
pub mod product_handlers;
pub mod scan_handlers;
