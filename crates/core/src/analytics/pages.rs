//! Page-view and session tracking.
//!
//! A [`PageTracker`] follows one navigation session: the first `navigate`
//! opens the session, every `navigate` records a page view, and
//! `end_session` reports how long it lasted.

use std::sync::Arc;
use std::time::Instant;

use housewatch_domain::analytics::{
    PageLoadCompletedProps, ScrollReachedBottomProps, SessionEndedProps, SessionStartedProps,
};
use housewatch_domain::constants::{
    PAGE_HOUSES_LIST, PAGE_HOUSE_DETAIL, PAGE_UNKNOWN, SCROLL_BOTTOM_THRESHOLD_PERCENT,
};
use housewatch_domain::{AnalyticsEvent, PageViewProps};
use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::ports::{AnalyticsProvider, Delivery};

/// Map a route path to its logical page name.
pub fn page_name_for_path(path: &str) -> &'static str {
    match path {
        "/" | "/houses" => PAGE_HOUSES_LIST,
        p if p.starts_with("/house/") => PAGE_HOUSE_DETAIL,
        _ => PAGE_UNKNOWN,
    }
}

/// Percentage of the scrollable height reached, rounded.
///
/// A page that cannot scroll counts as fully read.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scroll_depth(scroll_top: f64, document_height: f64, viewport_height: f64) -> u32 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 100;
    }
    // Clamped to 0..=100 before the cast.
    (scroll_top.max(0.0) / scrollable * 100.0).round().min(100.0) as u32
}

#[derive(Debug)]
struct Session {
    id: String,
    started_at: Instant,
    pages_visited: u32,
    current_page: &'static str,
}

/// Navigation session tracker.
pub struct PageTracker {
    analytics: Arc<dyn AnalyticsProvider>,
    platform: Option<String>,
    user_agent: Option<String>,
    session: Mutex<Option<Session>>,
}

impl PageTracker {
    pub fn new(analytics: Arc<dyn AnalyticsProvider>) -> Self {
        Self { analytics, platform: None, user_agent: None, session: Mutex::new(None) }
    }

    /// Platform and user agent reported with `SessionStarted`.
    pub fn with_client(mut self, platform: Option<String>, user_agent: Option<String>) -> Self {
        self.platform = platform;
        self.user_agent = user_agent;
        self
    }

    /// Current session id, if a session is open.
    pub fn session_id(&self) -> Option<String> {
        self.session.lock().as_ref().map(|session| session.id.clone())
    }

    /// Page name of the most recent navigation.
    pub fn current_page(&self) -> &'static str {
        self.session.lock().as_ref().map_or(PAGE_UNKNOWN, |session| session.current_page)
    }

    /// Record a navigation to `path`.
    pub async fn navigate(&self, path: &str) -> Delivery {
        let page_name = page_name_for_path(path);

        let new_session = {
            let mut guard = self.session.lock();
            match guard.as_mut() {
                Some(session) => {
                    session.pages_visited += 1;
                    session.current_page = page_name;
                    None
                }
                None => {
                    let id = Uuid::new_v4().to_string();
                    *guard = Some(Session {
                        id: id.clone(),
                        started_at: Instant::now(),
                        pages_visited: 1,
                        current_page: page_name,
                    });
                    Some(id)
                }
            }
        };

        let delivery = self
            .analytics
            .page(
                page_name,
                Some(PageViewProps {
                    page_name: page_name.to_string(),
                    path: Some(path.to_string()),
                }),
            )
            .await;

        if let Some(session_id) = new_session {
            debug!(%session_id, "session started");
            let event = AnalyticsEvent::from(SessionStartedProps {
                session_id,
                platform: self.platform.clone(),
                user_agent: self.user_agent.clone(),
            });
            self.analytics.track(&event).await;
        }

        delivery
    }

    /// Report that the current page finished loading after `load_time_ms`.
    pub async fn page_loaded(&self, load_time_ms: u64) -> Delivery {
        let event = AnalyticsEvent::from(PageLoadCompletedProps {
            page_name: self.current_page().to_string(),
            load_time: load_time_ms,
            performance_score: None,
        });
        self.analytics.track(&event).await
    }

    /// Report a scroll position. Emits `ScrollReachedBottom` once the depth
    /// reaches the bottom threshold; returns `None` otherwise.
    pub async fn scrolled(
        &self,
        scroll_top: f64,
        document_height: f64,
        viewport_height: f64,
    ) -> Option<Delivery> {
        let depth = scroll_depth(scroll_top, document_height, viewport_height);
        if depth < SCROLL_BOTTOM_THRESHOLD_PERCENT {
            return None;
        }
        let event = AnalyticsEvent::from(ScrollReachedBottomProps {
            page_name: self.current_page().to_string(),
            scroll_depth: depth,
        });
        Some(self.analytics.track(&event).await)
    }

    /// Close the session. Returns `None` when no session was open.
    pub async fn end_session(&self) -> Option<Delivery> {
        let session = self.session.lock().take()?;
        let event = AnalyticsEvent::from(SessionEndedProps {
            session_id: session.id,
            session_duration: u64::try_from(session.started_at.elapsed().as_millis())
                .unwrap_or(u64::MAX),
            pages_visited: session.pages_visited,
        });
        Some(self.analytics.track(&event).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{RecordedCall, RecordingProvider};

    fn tracker() -> (PageTracker, RecordingProvider) {
        let recorder = RecordingProvider::new();
        (PageTracker::new(Arc::new(recorder.clone())), recorder)
    }

    #[test]
    fn paths_map_to_page_names() {
        assert_eq!(page_name_for_path("/"), "houses_list");
        assert_eq!(page_name_for_path("/houses"), "houses_list");
        assert_eq!(page_name_for_path("/house/0367baf3"), "house_detail");
        assert_eq!(page_name_for_path("/spells"), "unknown");
    }

    #[test]
    fn scroll_depth_rounds_and_handles_short_pages() {
        assert_eq!(scroll_depth(450.0, 1000.0, 500.0), 90);
        assert_eq!(scroll_depth(100.0, 1000.0, 500.0), 20);
        assert_eq!(scroll_depth(0.0, 400.0, 800.0), 100);
    }

    #[tokio::test]
    async fn first_navigation_starts_a_session() {
        let (tracker, recorder) = tracker();

        tracker.navigate("/houses").await;
        tracker.navigate("/house/abc").await;

        assert_eq!(recorder.event_names(), vec!["PageView", "SessionStarted", "PageView"]);
        let started = recorder.last_properties("SessionStarted").unwrap();
        assert_eq!(started["session_id"], tracker.session_id().unwrap().as_str());
        assert_eq!(
            recorder.calls()[2],
            RecordedCall::Page {
                name: "house_detail".into(),
                properties: Some(PageViewProps {
                    page_name: "house_detail".into(),
                    path: Some("/house/abc".into()),
                }),
            }
        );
    }

    #[tokio::test]
    async fn scroll_below_threshold_is_ignored() {
        let (tracker, recorder) = tracker();
        tracker.navigate("/").await;
        recorder.clear();

        assert!(tracker.scrolled(100.0, 2000.0, 800.0).await.is_none());
        assert!(tracker.scrolled(1150.0, 2000.0, 800.0).await.is_some());

        let props = recorder.last_properties("ScrollReachedBottom").unwrap();
        assert_eq!(props["page_name"], "houses_list");
        assert_eq!(props["scroll_depth"], 96);
    }

    #[tokio::test]
    async fn end_session_reports_pages_and_closes() {
        let (tracker, recorder) = tracker();
        tracker.navigate("/").await;
        tracker.navigate("/house/1").await;
        tracker.page_loaded(42).await;

        assert!(tracker.end_session().await.is_some());
        assert!(tracker.end_session().await.is_none());

        let loaded = recorder.last_properties("PageLoadCompleted").unwrap();
        assert_eq!(loaded["page_name"], "house_detail");
        assert_eq!(loaded["load_time"], 42);
        let ended = recorder.last_properties("SessionEnded").unwrap();
        assert_eq!(ended["pages_visited"], 2);
    }
}
