pub mod bindings;
pub mod edit;
pub mod filter;
pub mod sort;
pub mod store;
