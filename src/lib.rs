//! WestFax REST client and fax-send workflow for PDF documents.
//!
//! The library side covers what a host application needs: persisted account
//! [`Settings`] (with the stored password base64-obfuscated, not encrypted),
//! the blocking [`WestFaxClient`] for the three REST endpoints, contact list
//! filtering, fax number validation, and the [`send`] workflow that stages a
//! temporary copy of the PDF, uploads it and classifies the outcome into a
//! [`SendReport`].

pub mod client;
pub mod contacts;
pub mod error;
pub mod report;
pub mod send;
pub mod settings;
pub mod validate;

pub use client::{ApiResponse, SendFaxRequest, WestFaxClient};
pub use error::{Error, Result};
pub use report::SendReport;
pub use send::SendJob;
pub use settings::Settings;
