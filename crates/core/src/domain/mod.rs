pub mod error;
pub mod list_store;
pub mod load_state;
pub mod model;
pub mod scroll;
