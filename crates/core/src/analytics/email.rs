//! Email capture: turns an anonymous session into an identified user.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use housewatch_domain::analytics::{
    EmailCaptureAttemptedProps, EmailCaptureErrorProps, EmailFieldFocusedProps,
    UserIdentifiedProps,
};
use housewatch_domain::{AnalyticsEvent, ApiError, Traits};
use serde_json::Value;
use tracing::{info, warn};

use super::ports::AnalyticsProvider;

const IDENTIFICATION_METHOD: &str = "email_capture";
const USER_TYPE: &str = "house_enthusiast";

/// Email capture form bound to an optional favourite house.
pub struct EmailCapture {
    analytics: Arc<dyn AnalyticsProvider>,
    house_id: Option<String>,
    house_name: Option<String>,
}

impl EmailCapture {
    pub fn new(analytics: Arc<dyn AnalyticsProvider>) -> Self {
        Self { analytics, house_id: None, house_name: None }
    }

    pub fn for_house(mut self, house_id: Option<&str>, house_name: Option<&str>) -> Self {
        self.house_id = house_id.map(str::to_string);
        self.house_name = house_name.map(str::to_string);
        self
    }

    pub async fn focus(&self) {
        let event = AnalyticsEvent::from(EmailFieldFocusedProps {
            house_name: self.house_name.clone(),
            house_id: self.house_id.clone(),
        });
        self.analytics.track(&event).await;
    }

    /// Submit an address.
    ///
    /// Blank input is ignored (`Ok(None)`). On success the session is
    /// identified under the lowercased address, which is returned.
    pub async fn submit(&self, email: &str) -> Result<Option<String>, ApiError> {
        let email = email.trim();
        if email.is_empty() {
            return Ok(None);
        }

        let email_domain = email
            .split('@')
            .nth(1)
            .filter(|domain| !domain.is_empty())
            .unwrap_or("unknown")
            .to_string();
        self.track(EmailCaptureAttemptedProps {
            house_name: self.house_name.clone(),
            house_id: self.house_id.clone(),
            email_domain,
        })
        .await;

        if let Err(err) = validate_email(email) {
            warn!(error = %err, "email capture rejected");
            self.track(EmailCaptureErrorProps {
                house_name: self.house_name.clone(),
                house_id: self.house_id.clone(),
                error_message: err.message.clone(),
            })
            .await;
            return Err(err);
        }

        let user_id = email.to_lowercase();
        self.analytics.identify(&user_id, Some(self.traits(&user_id))).await;
        self.track(UserIdentifiedProps {
            identification_method: IDENTIFICATION_METHOD.to_string(),
            house_name: self.house_name.clone(),
            house_id: self.house_id.clone(),
            user_id: user_id.clone(),
        })
        .await;

        info!(house = ?self.house_name, "user identified via email capture");
        Ok(Some(user_id))
    }

    fn traits(&self, email: &str) -> Traits {
        let mut traits = Traits::new();
        traits.insert("email".into(), Value::from(email));
        if let Some(name) = &self.house_name {
            traits.insert("favorite_house".into(), Value::from(name.as_str()));
        }
        if let Some(id) = &self.house_id {
            traits.insert("favorite_house_id".into(), Value::from(id.as_str()));
        }
        traits.insert("identification_method".into(), Value::from(IDENTIFICATION_METHOD));
        traits.insert(
            "identified_at".into(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        traits.insert("user_type".into(), Value::from(USER_TYPE));
        traits
    }

    async fn track(&self, props: impl Into<AnalyticsEvent>) {
        self.analytics.track(&props.into()).await;
    }
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ApiError::validation(format!("Invalid email address: {email}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{RecordedCall, RecordingProvider};

    fn capture() -> (EmailCapture, RecordingProvider) {
        let recorder = RecordingProvider::new();
        let capture = EmailCapture::new(Arc::new(recorder.clone()))
            .for_house(Some("h-1"), Some("Gryffindor"));
        (capture, recorder)
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let (capture, recorder) = capture();
        assert_eq!(capture.submit("   ").await, Ok(None));
        assert!(recorder.is_empty());
    }

    #[tokio::test]
    async fn valid_address_identifies_lowercased_user() {
        let (capture, recorder) = capture();

        let user_id = capture.submit(" Harry@Hogwarts.edu ").await.unwrap();

        assert_eq!(user_id.as_deref(), Some("harry@hogwarts.edu"));
        assert_eq!(recorder.event_names(), vec!["EmailCaptureAttempted", "UserIdentified"]);
        let attempted = recorder.last_properties("EmailCaptureAttempted").unwrap();
        assert_eq!(attempted["email_domain"], "Hogwarts.edu");

        let calls = recorder.calls();
        let RecordedCall::Identify { user_id, traits: Some(traits) } = &calls[1] else {
            panic!("expected identify, got {:?}", calls[1]);
        };
        assert_eq!(user_id, "harry@hogwarts.edu");
        assert_eq!(traits["favorite_house"], "Gryffindor");
        assert_eq!(traits["identification_method"], "email_capture");
        assert_eq!(traits["user_type"], "house_enthusiast");
        assert!(traits["identified_at"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn invalid_address_reports_capture_error() {
        let (capture, recorder) = capture();

        let err = capture.submit("not-an-email").await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(recorder.event_names(), vec!["EmailCaptureAttempted", "EmailCaptureError"]);
        let attempted = recorder.last_properties("EmailCaptureAttempted").unwrap();
        assert_eq!(attempted["email_domain"], "unknown");
    }

    #[tokio::test]
    async fn focus_reports_house_context() {
        let (capture, recorder) = capture();
        capture.focus().await;
        let props = recorder.last_properties("EmailFieldFocused").unwrap();
        assert_eq!(props["house_id"], "h-1");
    }
}
