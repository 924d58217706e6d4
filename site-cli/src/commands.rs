//! Command implementations.

use std::process::ExitCode;
use std::time::Duration;

use contact_api::{ApiError, ContactClient, ContactTransport};
use sitedom::{Document, Element};
use sitekit::contact::{CONTACT_FORM_CLASS, Outcome};
use sitekit::flash::Severity;
use sitekit::format::FormatError;
use sitekit::settings::{FileBackend, SettingsError, SettingsProvider};
use sitekit::validation::{Field, FieldKind, presenter};
use sitekit::{Page, Services};
use thiserror::Error;

use crate::config::CliConfig;
use crate::paths;

const FORM_ID: &str = "contact-form";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("no base URL: pass --base-url or set base_url in the config file")]
    MissingBaseUrl,
    #[error("cannot determine a data directory for stored settings")]
    NoDataDir,
}

pub fn validate(
    config: &CliConfig,
    kind: FieldKind,
    required: bool,
    value: &str,
) -> Result<ExitCode, CliError> {
    let field = Field::new(value, kind, required);
    match sitekit::validation::validate(&field, &config.site.messages).message() {
        None => {
            println!("valid");
            Ok(ExitCode::SUCCESS)
        }
        Some(message) => {
            println!("{message}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// What a contact run showed the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReport {
    /// `(field name, message)` for every field flagged on the way through.
    pub field_errors: Vec<(String, String)>,
    pub flashes: Vec<(String, Severity)>,
    pub outcome: Option<Outcome>,
}

pub async fn contact(
    config: &CliConfig,
    base_url: Option<String>,
    fields: Vec<(String, String)>,
) -> Result<ExitCode, CliError> {
    let base = base_url
        .or_else(|| config.base_url.clone())
        .ok_or(CliError::MissingBaseUrl)?;

    let mut builder = ContactClient::builder()
        .base_url(base)
        .endpoint(config.site.contact_endpoint.clone());
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build()?;
    log::info!("contact endpoint: {}", client.endpoint());

    let report = run_contact(config, &client, &fields).await;

    for (name, message) in &report.field_errors {
        eprintln!("{name}: {message}");
    }
    for (text, severity) in &report.flashes {
        let label = match severity {
            Severity::Success => "success",
            Severity::Error => "error",
        };
        println!("[{label}] {text}");
    }

    Ok(match report.outcome {
        Some(Outcome::Success) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

/// Fill the contact form, leave every field once, submit and wait for the
/// answer.
pub async fn run_contact(
    config: &CliConfig,
    transport: &dyn ContactTransport,
    fields: &[(String, String)],
) -> ContactReport {
    let mut page = Page::load(contact_page(fields), config.site.clone(), Services::default());

    let ids: Vec<String> = fields.iter().map(|(name, _)| field_id(name)).collect();
    for id in &ids {
        page.focus(id);
    }
    page.blur();

    let field_errors = fields
        .iter()
        .zip(&ids)
        .flat_map(|((name, _), id)| {
            presenter::messages_for(page.document(), id)
                .into_iter()
                .filter_map(|node| page.document().get(&node).map(Element::text_content))
                .map(|message| (name.clone(), message))
                .collect::<Vec<_>>()
        })
        .collect();

    page.submit(FORM_ID);
    page.settle(transport).await;

    ContactReport {
        field_errors,
        flashes: page.flash().visible(page.document()),
        outcome: page.contact().last_outcome(),
    }
}

fn field_id(name: &str) -> String {
    format!("field-{name}")
}

/// The site's contact form with the given values filled in.
pub fn contact_page(fields: &[(String, String)]) -> Document {
    let mut form = Element::form().id(FORM_ID).class(CONTACT_FORM_CLASS);
    for (name, value) in fields {
        let control = match name.as_str() {
            "email" => Element::input("email"),
            "phone" => Element::input("tel"),
            "message" => Element::textarea(),
            _ => Element::input("text"),
        };
        let mut control = control.id(field_id(name)).name(name.clone()).value(value.clone());
        if matches!(name.as_str(), "name" | "email" | "message") {
            control = control.required();
        }
        form = form.child(control);
    }
    form = form.child(Element::button("Envoyer").attr("type", "submit"));
    Document::new(Element::body().child(form))
}

pub fn dark_mode(config: &CliConfig, toggle: bool) -> Result<ExitCode, CliError> {
    let path = paths::settings_file().ok_or(CliError::NoDataDir)?;
    let settings = SettingsProvider::new(FileBackend::open(&path)?);

    let mut page = Page::load(
        Document::default(),
        config.site.clone(),
        Services::default().with_settings(settings),
    );
    if toggle {
        page.toggle_dark_mode();
    }

    println!("dark mode: {}", if page.is_dark_mode() { "on" } else { "off" });
    Ok(ExitCode::SUCCESS)
}

pub fn format_date(date: &str) -> Result<ExitCode, CliError> {
    println!("{}", sitekit::format::format_date(date)?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use contact_api::{ContactRequest, ContactResponse};

    use super::*;

    struct Recording {
        reply: &'static str,
        seen: Mutex<Vec<ContactRequest>>,
    }

    #[async_trait]
    impl ContactTransport for Recording {
        async fn submit(&self, request: &ContactRequest) -> Result<ContactResponse, ApiError> {
            self.seen.lock().unwrap().push(request.clone());
            ContactResponse::from_body(self.reply)
                .map_err(|e| ApiError::parse_with_body(e.to_string(), self.reply))
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_contact_run_sends_form() {
        let transport = Recording {
            reply: r#"{"success":true,"message":"Message envoyé"}"#,
            seen: Mutex::new(Vec::new()),
        };
        let form = fields(&[
            ("name", "Alice"),
            ("email", "a@b.com"),
            ("phone", "+223 76 12 34 56"),
            ("message", "Bonjour"),
        ]);

        let report = run_contact(&CliConfig::default(), &transport, &form).await;

        assert_eq!(report.outcome, Some(Outcome::Success));
        assert!(report.field_errors.is_empty());
        assert_eq!(
            report.flashes,
            vec![("Message envoyé".to_string(), Severity::Success)]
        );
        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].get("phone"), Some("+223 76 12 34 56"));
    }

    #[tokio::test]
    async fn test_contact_run_reports_field_errors() {
        let transport = Recording {
            reply: r#"{"success":true,"message":"ok"}"#,
            seen: Mutex::new(Vec::new()),
        };
        let form = fields(&[("name", "Alice"), ("email", "nope"), ("message", "")]);

        let report = run_contact(&CliConfig::default(), &transport, &form).await;

        assert_eq!(
            report.field_errors,
            vec![
                (
                    "email".to_string(),
                    "Please enter a valid email address".to_string()
                ),
                ("message".to_string(), "This field is required".to_string()),
            ]
        );
        assert_eq!(report.outcome, Some(Outcome::Failure));
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_contact_page_marks_required_fields() {
        let doc = contact_page(&fields(&[("name", "A"), ("subject", "Devis")]));
        assert!(doc.get("field-name").unwrap().is_required());
        assert!(!doc.get("field-subject").unwrap().is_required());
        assert_eq!(doc.value("field-subject"), Some("Devis"));
    }
}
