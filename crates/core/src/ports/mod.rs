pub mod blog_api;
pub mod clock;
