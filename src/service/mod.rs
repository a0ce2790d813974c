pub mod connections;
pub mod emails;
pub mod export;
pub mod leads;
pub mod prospects;
pub mod settings;
pub mod template;

pub use connections::ConnectionService;
pub use emails::{EmailService, SendReport};
pub use export::ExportService;
pub use leads::LeadService;
pub use prospects::ProspectService;
pub use settings::SettingsService;
