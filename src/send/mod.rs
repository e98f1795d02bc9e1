//! The fax-send workflow.
//!
//! Linear sequence: validate the recipient and the configured sender number,
//! require the PDF on disk, stage a temporary copy, resolve the delivery
//! receipt email when asked for one, POST the job, classify the outcome.
//!
//! Precondition failures (bad number, no ANI, missing PDF) are hard errors;
//! anything that goes wrong once we start talking to the API ends up in the
//! [`SendReport`] instead, like the result dialog it replaces. The staged
//! copy is removed on every path.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::client::{SendFaxRequest, WestFaxClient};
use crate::error::{Error, Result};
use crate::report::SendReport;
use crate::settings::Settings;
use crate::validate::normalize_fax_number;

/// One send action's worth of user input.
#[derive(Debug, Clone)]
pub struct SendJob {
    /// Destination fax number, free-form.
    pub to_number: String,
    /// Subject / job name.
    pub subject: String,
    /// Billing reference passed through to the API.
    pub billing_code: String,
    /// Request a delivery receipt email.
    pub receipt: bool,
    /// The saved PDF to fax.
    pub pdf: PathBuf,
}

/// Run the whole send sequence. Mutates `settings` only to cache the
/// notification email after the first user-info fetch.
pub fn send(client: &WestFaxClient, settings: &mut Settings, job: &SendJob) -> Result<SendReport> {
    let to_number = normalize_fax_number(&job.to_number)?;

    let ani = settings.ani.trim();
    if ani.is_empty() {
        return Err(Error::AniNotConfigured);
    }
    let ani = normalize_fax_number(ani)?;

    if !job.pdf.is_file() {
        return Err(Error::PdfNotFound(job.pdf.clone()));
    }

    let subject = job.subject.trim();
    let billing_code = job.billing_code.trim();

    // The upload reads a staged copy, never the user's document.
    // NamedTempFile removes it on drop, success or not.
    let staged = stage_copy(job)?;

    let outcome = (|| {
        let feedback_email = if job.receipt {
            Some(resolve_receipt_email(client, settings)?)
        } else {
            None
        };
        client.send_fax(&SendFaxRequest {
            ani: &ani,
            to_number: &to_number,
            job_name: subject,
            billing_code,
            header: "",
            feedback_email: feedback_email.as_deref(),
            pdf: staged.path(),
        })
    })();

    let report = match outcome {
        Ok(response) => SendReport::from_response(&to_number, subject, response),
        Err(error) => {
            tracing::warn!("fax send failed: {error}");
            SendReport::from_error(&to_number, subject, error)
        }
    };
    Ok(report)
}

/// Cached notification email, or fetch it once and cache it. A failed cache
/// write is ignored; a failed fetch fails the send.
fn resolve_receipt_email(client: &WestFaxClient, settings: &mut Settings) -> Result<String> {
    if let Some(email) = settings.user_email.as_deref().map(str::trim)
        && !email.is_empty()
    {
        return Ok(email.to_string());
    }
    let email = client.get_user_email()?;
    tracing::debug!("caching notification email");
    settings.user_email = Some(email.clone());
    settings.persist();
    Ok(email)
}

fn stage_copy(job: &SendJob) -> Result<NamedTempFile> {
    let mut staged = tempfile::Builder::new()
        .prefix("westfax_")
        .suffix(".pdf")
        .tempfile()?;
    let mut source = std::fs::File::open(&job.pdf)?;
    std::io::copy(&mut source, staged.as_file_mut())?;
    staged.as_file_mut().flush()?;
    tracing::debug!(
        "staged {} at {}",
        job.pdf.display(),
        staged.path().display()
    );
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const SEND_PATH: &str = "/REST/Fax_SendFax/json";
    const USER_INFO_PATH: &str = "/REST/Security_GetUserInfo/json";

    struct Fixture {
        server: mockito::ServerGuard,
        settings: Settings,
        job: SendJob,
        _dir: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let server = mockito::Server::new();
        let dir = tempfile::tempdir().unwrap();

        let pdf = dir.path().join("letter.pdf");
        std::fs::write(&pdf, b"%PDF-1.4 fixture").unwrap();

        let settings = Settings {
            username: "alice".into(),
            password: "hunter2".into(),
            product_id: "prod-1".into(),
            ani: "+1 (210) 555-0000".into(),
            source: Some(dir.path().join("settings.toml")),
            ..Settings::default()
        };
        let job = SendJob {
            to_number: "210-555-1234".into(),
            subject: "Quarterly report".into(),
            billing_code: "ACME-7".into(),
            receipt: false,
            pdf,
        };
        Fixture {
            server,
            settings,
            job,
            _dir: dir,
        }
    }

    fn client(f: &Fixture) -> WestFaxClient {
        WestFaxClient::from_settings(&f.settings)
            .unwrap()
            .with_base_url(&f.server.url())
    }

    #[test]
    fn happy_path_normalizes_numbers_and_succeeds() {
        let mut f = fixture();
        let mock = f
            .server
            .mock("POST", SEND_PATH)
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="Numbers1"\s+2105551234"#.into()),
                Matcher::Regex(r#"name="ANI"\s+12105550000"#.into()),
            ]))
            .with_status(200)
            .with_body(r#"{"Success": true, "Result": "job-9"}"#)
            .create();

        let client = client(&f);
        let report = send(&client, &mut f.settings, &f.job).unwrap();
        assert!(report.success());
        assert_eq!(report.to_number, "2105551234");
        mock.assert();
    }

    #[test]
    fn api_failure_becomes_failed_report() {
        let mut f = fixture();
        f.server
            .mock("POST", SEND_PATH)
            .with_status(200)
            .with_body(r#"{"Success": false, "ErrorString": "no credit"}"#)
            .create();

        let client = client(&f);
        let report = send(&client, &mut f.settings, &f.job).unwrap();
        assert!(!report.success());
        assert!(report.summary().contains(&"no credit".to_string()));
    }

    #[test]
    fn transport_failure_becomes_failed_report() {
        let mut f = fixture();
        f.server.mock("POST", SEND_PATH).with_status(500).create();

        let client = client(&f);
        let report = send(&client, &mut f.settings, &f.job).unwrap();
        assert!(!report.success());
        assert!(report.error.is_some());
    }

    #[test]
    fn invalid_recipient_is_a_hard_error() {
        let mut f = fixture();
        f.job.to_number = "555".into();
        let client = client(&f);
        assert!(matches!(
            send(&client, &mut f.settings, &f.job),
            Err(Error::InvalidNumber(_))
        ));
    }

    #[test]
    fn unset_ani_is_a_hard_error() {
        let mut f = fixture();
        f.settings.ani = "  ".into();
        let client = client(&f);
        assert!(matches!(
            send(&client, &mut f.settings, &f.job),
            Err(Error::AniNotConfigured)
        ));
    }

    #[test]
    fn missing_pdf_is_a_hard_error() {
        let mut f = fixture();
        f.job.pdf = f.job.pdf.with_file_name("gone.pdf");
        let client = client(&f);
        assert!(matches!(
            send(&client, &mut f.settings, &f.job),
            Err(Error::PdfNotFound(_))
        ));
    }

    #[test]
    fn receipt_fetches_and_caches_notification_email() {
        let mut f = fixture();
        f.job.receipt = true;
        let info = f
            .server
            .mock("POST", USER_INFO_PATH)
            .with_status(200)
            .with_body(r#"{"Success": true, "Result": {"Email": "alice@example.com"}}"#)
            .expect(1)
            .create();
        f.server
            .mock("POST", SEND_PATH)
            .match_body(Matcher::Regex(
                r#"name="FeedbackEmail"\s+alice@example.com"#.into(),
            ))
            .with_status(200)
            .with_body(r#"{"Success": true}"#)
            .expect(2)
            .create();

        let client = client(&f);
        let report = send(&client, &mut f.settings, &f.job).unwrap();
        assert!(report.success());
        assert_eq!(f.settings.user_email.as_deref(), Some("alice@example.com"));

        // Cached email is persisted alongside the other settings.
        let reloaded = Settings::load_from(f.settings.source.as_deref().unwrap()).unwrap();
        assert_eq!(reloaded.user_email.as_deref(), Some("alice@example.com"));

        // Second send reuses the cache instead of hitting user info again.
        let report = send(&client, &mut f.settings, &f.job).unwrap();
        assert!(report.success());
        info.assert();
    }

    #[test]
    fn staged_copy_mirrors_the_pdf_and_is_removed_on_drop() {
        let f = fixture();
        let staged = stage_copy(&f.job).unwrap();
        let staged_path = staged.path().to_path_buf();
        assert!(staged_path.exists());
        assert_eq!(
            std::fs::read(&staged_path).unwrap(),
            std::fs::read(&f.job.pdf).unwrap()
        );
        drop(staged);
        assert!(!staged_path.exists());
    }
}
