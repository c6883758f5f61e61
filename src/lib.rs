pub mod errors;
pub mod functions;
pub mod providers;
pub mod settings;
pub mod utility;
