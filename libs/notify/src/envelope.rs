//! Outbound message composition.

use serde::Serialize;

use crate::config::MailSettings;
use crate::pipeline::Route;
use crate::submission::Submission;

/// A fully composed message handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl Envelope {
    /// Compose the notification for `submission`, annotated when sent on a fallback route.
    pub fn compose(submission: &Submission, settings: &MailSettings, route: Route) -> Self {
        let fallback = route == Route::Fallback;
        let name = submission.name.trim();
        let email = submission.email.trim();
        let message = submission.message.trim();

        let mut subject = format!("New Contact Form Submission from {name}");
        let mut heading = "New Contact Form Submission".to_string();
        if fallback {
            subject.push_str(" (Fallback)");
            heading.push_str(" (Sent via fallback method)");
        }

        let text = format!("Name: {name}\nEmail: {email}\nMessage: {message}\n");
        let html = format!(
            "<h2>{heading}</h2>\n\
             <p><strong>Name:</strong> {}</p>\n\
             <p><strong>Email:</strong> {}</p>\n\
             <p><strong>Message:</strong></p>\n\
             <p>{}</p>\n",
            escape_html(name),
            escape_html(email),
            escape_html(message).replace('\n', "<br>"),
        );

        Self {
            from: settings.user.clone(),
            to: settings.recipient.clone(),
            subject,
            text,
            html,
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StaticConfig, EMAIL_PASS, EMAIL_USER};

    fn settings() -> MailSettings {
        let config = StaticConfig::new()
            .with(EMAIL_USER, "owner@example.com")
            .with(EMAIL_PASS, "secret");
        MailSettings::resolve(&config).unwrap()
    }

    #[test]
    fn test_primary_envelope() {
        let s = Submission::new("Ada", "ada@example.com", "Hi there");
        let env = Envelope::compose(&s, &settings(), Route::Primary);
        assert_eq!(env.from, "owner@example.com");
        assert_eq!(env.to, "owner@example.com");
        assert_eq!(env.subject, "New Contact Form Submission from Ada");
        assert!(env.text.contains("Email: ada@example.com"));
        assert!(env.text.contains("Message: Hi there"));
        assert!(!env.html.contains("fallback"));
    }

    #[test]
    fn test_fallback_envelope_is_annotated() {
        let s = Submission::new("Ada", "ada@example.com", "Hi");
        let env = Envelope::compose(&s, &settings(), Route::Fallback);
        assert_eq!(env.subject, "New Contact Form Submission from Ada (Fallback)");
        assert!(env.html.contains("Sent via fallback method"));
    }

    #[test]
    fn test_html_escapes_user_content() {
        let s = Submission::new("<b>Eve</b>", "eve@example.com", "a & b\nnext");
        let env = Envelope::compose(&s, &settings(), Route::Primary);
        assert!(env.html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(env.html.contains("a &amp; b<br>next"));
        assert!(env.text.contains("<b>Eve</b>"));
    }
}
