pub mod endpoint;
pub mod proc_loader;
pub mod settings;
