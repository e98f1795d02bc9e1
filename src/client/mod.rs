//! Thin blocking client for the WestFax REST API.
//!
//! Three POST operations: send fax (multipart), list contacts, get user
//! info. Every call carries the account credentials as form fields, raises
//! on a non-2xx status, and returns the parsed JSON body or raises when the
//! body is not JSON.

mod response;

pub use response::ApiResponse;

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};

use crate::error::{Error, Result};
use crate::settings::Settings;

pub const DEFAULT_BASE_URL: &str = "https://api2.westfax.com";

const SEND_PATH: &str = "/REST/Fax_SendFax/json";
const CONTACTS_PATH: &str = "/REST/Contact_GetContactList/json";
const USER_INFO_PATH: &str = "/REST/Security_GetUserInfo/json";

/// Uploads get more time than the small query endpoints.
const SEND_TIMEOUT: Duration = Duration::from_secs(60);
const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// One fax job as the send endpoint wants it. Numbers must already be
/// normalized to bare digits (see [`crate::validate::normalize_fax_number`]).
#[derive(Debug)]
pub struct SendFaxRequest<'a> {
    pub ani: &'a str,
    pub to_number: &'a str,
    pub job_name: &'a str,
    pub billing_code: &'a str,
    pub header: &'a str,
    pub feedback_email: Option<&'a str>,
    pub pdf: &'a Path,
}

pub struct WestFaxClient {
    http: reqwest::blocking::Client,
    base_url: String,
    username: String,
    password: String,
    product_id: String,
}

impl WestFaxClient {
    pub fn new(username: &str, password: &str, product_id: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(QUERY_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            username: username.trim().to_string(),
            password: password.to_string(),
            product_id: product_id.trim().to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.username, &settings.password, &settings.product_id)
    }

    /// Point the client somewhere other than the production API (tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// POST the fax job as a multipart form; the PDF travels as `Files0`.
    pub fn send_fax(&self, request: &SendFaxRequest<'_>) -> Result<ApiResponse> {
        let mut form = Form::new()
            .text("Username", self.username.clone())
            .text("Password", self.password.clone())
            .text("Cookies", "false")
            .text("ProductId", self.product_id.clone())
            .text("JobName", request.job_name.to_string())
            .text("Header", request.header.to_string())
            .text("BillingCode", request.billing_code.to_string())
            .text("Numbers1", request.to_number.to_string())
            .text("ANI", request.ani.to_string())
            .text("StartDate", "1/1/1999");
        if let Some(email) = request.feedback_email {
            form = form.text("FeedbackEmail", email.to_string());
        }
        let pdf = Part::file(request.pdf)?.mime_str("application/pdf")?;
        let form = form.part("Files0", pdf);

        tracing::info!(to = request.to_number, "sending fax");
        let response = self
            .http
            .post(self.url(SEND_PATH))
            .timeout(SEND_TIMEOUT)
            .multipart(form)
            .send()?
            .error_for_status()?;
        Self::parse_json(response)
    }

    /// Fetch the account's contact list.
    pub fn get_contacts(&self) -> Result<ApiResponse> {
        self.post_form(CONTACTS_PATH)
    }

    /// Fetch account details (notification email lives in `Result.Email`).
    pub fn get_user_info(&self) -> Result<ApiResponse> {
        self.post_form(USER_INFO_PATH)
    }

    /// Resolve the account's notification email via user info. Fails when
    /// the API declares failure or the email comes back empty.
    pub fn get_user_email(&self) -> Result<String> {
        let info = self.get_user_info()?;
        if info.success() != Some(true) {
            let message = info
                .error_string()
                .or_else(|| info.info_string())
                .unwrap_or("failed to get WestFax user info");
            return Err(Error::Api(message.to_string()));
        }
        let email = info
            .result()
            .and_then(|r| r.get("Email"))
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .unwrap_or("");
        if email.is_empty() {
            return Err(Error::Api("WestFax user email was empty".to_string()));
        }
        Ok(email.to_string())
    }

    fn post_form(&self, path: &str) -> Result<ApiResponse> {
        let mut params = vec![
            ("Username", self.username.as_str()),
            ("Password", self.password.as_str()),
            ("Cookies", "false"),
        ];
        if !self.product_id.is_empty() {
            params.push(("ProductId", self.product_id.as_str()));
        }
        tracing::debug!(path, "POST");
        let response = self
            .http
            .post(self.url(path))
            .form(&params)
            .send()?
            .error_for_status()?;
        Self::parse_json(response)
    }

    fn parse_json(response: reqwest::blocking::Response) -> Result<ApiResponse> {
        response
            .json::<ApiResponse>()
            .map_err(Error::MalformedResponse)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
