pub mod credentials;
pub mod logging;
pub mod reqwest_api;
pub mod settings;
pub mod system_clock;
