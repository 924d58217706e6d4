#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use contact_api::{ApiError, ContactRequest, ContactResponse, ContactTransport};
use sitekit::prelude::*;

/// Minimal contact page: name, email, message and a submit button.
pub fn contact_form() -> Element {
    Element::form()
        .id("contact-form")
        .class("contact-form")
        .child(Element::input("text").id("name").name("name").required())
        .child(Element::input("email").id("email").name("email").required())
        .child(Element::textarea().id("message").name("message").required())
        .child(Element::button("Send").id("send").attr("type", "submit"))
}

pub fn contact_page() -> Document {
    Document::new(Element::body().child(contact_form()))
}

pub fn load(doc: Document) -> Page {
    Page::load(doc, SiteConfig::default(), Services::default())
}

pub fn fill(page: &mut Page, name: &str, email: &str, message: &str) {
    let doc = page.document_mut();
    doc.set_value("name", name);
    doc.set_value("email", email);
    doc.set_value("message", message);
}

pub fn value<'a>(page: &'a Page, id: &str) -> &'a str {
    page.document().value(id).unwrap()
}

/// Error annotations bound to a field.
pub fn error_nodes(page: &Page, id: &str) -> Vec<String> {
    sitekit::validation::presenter::messages_for(page.document(), id)
}

pub fn visible_flashes(page: &Page) -> Vec<(String, Severity)> {
    page.flash().visible(page.document())
}

/// Transport answering every request with the same canned body.
pub struct FakeTransport {
    reply: Reply,
    delay: Option<Duration>,
    requests: Mutex<Vec<ContactRequest>>,
}

enum Reply {
    Body(&'static str),
    Timeout,
}

impl FakeTransport {
    pub fn replying(body: &'static str) -> Self {
        Self {
            reply: Reply::Body(body),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn timing_out() -> Self {
        Self {
            reply: Reply::Timeout,
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<ContactRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactTransport for FakeTransport {
    async fn submit(&self, request: &ContactRequest) -> Result<ContactResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.reply {
            Reply::Body(body) => ContactResponse::from_body(body)
                .map_err(|e| ApiError::parse_with_body(e.to_string(), body)),
            Reply::Timeout => Err(ApiError::Timeout(Duration::from_secs(30))),
        }
    }
}
