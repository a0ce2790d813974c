pub mod connections;
pub mod emails;
pub mod export;
pub mod leads;
pub mod prospects;
pub mod settings;
pub mod templates;
