//! Send outcome classification and rendering.
//!
//! Stands in for the editor's result dialog: a one-line verdict, a short
//! summary, and the raw response behind a details toggle.

use crate::client::ApiResponse;
use crate::error::Error;

#[derive(Debug)]
pub struct SendReport {
    pub to_number: String,
    pub subject: String,
    pub response: Option<ApiResponse>,
    pub error: Option<String>,
}

impl SendReport {
    pub fn from_response(to_number: &str, subject: &str, response: ApiResponse) -> Self {
        Self {
            to_number: to_number.to_string(),
            subject: subject.to_string(),
            response: Some(response),
            error: None,
        }
    }

    pub fn from_error(to_number: &str, subject: &str, error: Error) -> Self {
        Self {
            to_number: to_number.to_string(),
            subject: subject.to_string(),
            response: None,
            error: Some(error.to_string()),
        }
    }

    /// Success iff no transport error occurred and the API did not declare
    /// `Success: false`. A response without a boolean `Success` still counts
    /// as success.
    pub fn success(&self) -> bool {
        self.error.is_none()
            && self
                .response
                .as_ref()
                .and_then(ApiResponse::success)
                != Some(false)
    }

    pub fn title(&self) -> &'static str {
        if self.success() { "Fax sent" } else { "Fax failed" }
    }

    /// Summary lines: recipient, subject, then the API's own messages when
    /// it declared failure, then the transport error when there was one.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.to_number.is_empty() {
            lines.push(format!("To: {}", self.to_number));
        }
        if !self.subject.is_empty() {
            lines.push(format!("Subject: {}", self.subject));
        }
        if let Some(resp) = &self.response
            && resp.success() == Some(false)
        {
            let info = resp.info_string();
            let err = resp.error_string();
            if info.is_some() || err.is_some() {
                lines.push(String::new());
            }
            if let Some(info) = info {
                lines.push(info.to_string());
            }
            if let Some(err) = err
                && err != info.unwrap_or("")
            {
                lines.push(err.to_string());
            }
        }
        if let Some(error) = &self.error {
            lines.push(String::new());
            lines.push(error.clone());
        }
        lines
    }

    /// Raw details: the error text, or the response pretty-printed.
    pub fn details(&self) -> String {
        if let Some(error) = &self.error {
            return error.clone();
        }
        match &self.response {
            Some(resp) => resp.pretty(),
            None => String::new(),
        }
    }
}
