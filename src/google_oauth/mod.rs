//! Google OAuth2 token handling for the spreadsheet export.

pub mod endpoints;

pub use endpoints::{GoogleOauthEndpoints, SheetsCredential};
