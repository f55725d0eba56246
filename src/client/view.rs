use std::sync::Arc;

use crate::{
    client::{posters::assign_posters, search::SearchRoute, service::RecommendationService},
    models::Recommendation,
};

/// Message shown to the user whenever a fetch fails, whatever the cause
pub const ERROR_MESSAGE: &str = "Failed to get recommendations. Please try again.";

/// Lifecycle of one results view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    /// Recommendations with posters attached; empty means nothing was found
    Success(Vec<Recommendation>),
    /// User-facing message; details go to the log
    Error(String),
}

/// Non-blocking notice surfaced alongside a state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

/// Results view: owns the single fetch for its query
///
/// A new search builds a new view. Nothing is cancelled; the old view is simply dropped.
pub struct ResultsView {
    service: Arc<dyn RecommendationService>,
    query: String,
    state: ViewState,
    notifications: Vec<Notification>,
}

impl ResultsView {
    pub fn new(service: Arc<dyn RecommendationService>) -> Self {
        Self {
            service,
            query: String::new(),
            state: ViewState::Idle,
            notifications: Vec::new(),
        }
    }

    /// Enters the view for `route`: `Loading` for a real query, empty `Success` otherwise
    pub fn navigate(&mut self, route: &SearchRoute) {
        self.query = route.query().trim().to_string();
        self.state = if self.query.is_empty() {
            ViewState::Success(Vec::new())
        } else {
            ViewState::Loading
        };
    }

    /// Performs the fetch if the view is waiting for one
    pub async fn load(&mut self) {
        if self.state != ViewState::Loading {
            return;
        }

        tracing::info!(query = %self.query, "Fetching recommendations");

        match self.service.fetch(&self.query).await {
            Ok(recommendations) => {
                tracing::info!(
                    query = %self.query,
                    count = recommendations.len(),
                    "Recommendations received"
                );
                self.state = ViewState::Success(assign_posters(recommendations));
            }
            Err(e) => {
                tracing::error!(query = %self.query, error = %e, "Error fetching recommendations");
                self.notifications.push(Notification {
                    title: "Error".to_string(),
                    description: ERROR_MESSAGE.to_string(),
                });
                self.state = ViewState::Error(ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Navigates and loads in one step
    pub async fn mount(&mut self, route: &SearchRoute) {
        self.navigate(route);
        self.load().await;
    }

    /// Full reload: restarts the lifecycle for the current query from the top
    pub async fn reload(&mut self) {
        let route = SearchRoute::submit(&self.query);
        match route {
            Some(route) => self.mount(&route).await,
            None => self.state = ViewState::Success(Vec::new()),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the view should offer a retry action
    pub fn can_retry(&self) -> bool {
        matches!(self.state, ViewState::Error(_))
    }

    /// Drains notifications queued since the last call
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{
        posters::PLACEHOLDER_POSTERS,
        service::{ClientError, MockRecommendationService},
    };

    fn recommendations(count: usize) -> Vec<Recommendation> {
        (0..count)
            .map(|i| Recommendation {
                id: i as u32 + 1,
                title: format!("Movie {}", i + 1),
                year: 2010,
                rating: 8.0,
                genre: "Drama".to_string(),
                description: "A moving drama.".to_string(),
                poster: None,
            })
            .collect()
    }

    fn route(query: &str) -> SearchRoute {
        SearchRoute::submit(query).unwrap()
    }

    fn service_failure() -> ClientError {
        ClientError::Service {
            status: 500,
            error: "Failed to generate recommendations".to_string(),
            details: "Upstream API error: 503 overloaded".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_query_shows_empty_state_without_fetching() {
        let mut service = MockRecommendationService::new();
        service.expect_fetch().times(0);
        let mut view = ResultsView::new(Arc::new(service));

        let url = reqwest::Url::parse("http://localhost/search?query=").unwrap();
        view.mount(&SearchRoute::from_url(&url)).await;

        assert_eq!(view.state(), &ViewState::Success(Vec::new()));
        assert!(!view.can_retry());
    }

    #[tokio::test]
    async fn test_query_moves_from_loading_to_success_with_cycled_posters() {
        let mut service = MockRecommendationService::new();
        service.expect_fetch().times(1).returning(|title: &str| {
            assert_eq!(title, "Inception");
            Ok(recommendations(10))
        });
        let mut view = ResultsView::new(Arc::new(service));
        assert_eq!(view.state(), &ViewState::Idle);

        view.navigate(&route("Inception"));
        assert_eq!(view.state(), &ViewState::Loading);

        view.load().await;
        let ViewState::Success(results) = view.state() else {
            panic!("expected success, got {:?}", view.state());
        };
        assert_eq!(results.len(), 10);
        for (position, rec) in results.iter().enumerate() {
            assert_eq!(
                rec.poster.as_deref(),
                Some(PLACEHOLDER_POSTERS[position % 4])
            );
        }
        assert_eq!(results[0].poster, results[4].poster);
        assert_eq!(results[4].poster, results[8].poster);
        assert_eq!(results[1].poster, results[9].poster);
        assert!(view.take_notifications().is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_shows_error_and_notifies() {
        let mut service = MockRecommendationService::new();
        service
            .expect_fetch()
            .times(1)
            .returning(|_| Err(service_failure()));
        let mut view = ResultsView::new(Arc::new(service));

        view.mount(&route("Inception")).await;

        assert_eq!(view.state(), &ViewState::Error(ERROR_MESSAGE.to_string()));
        assert!(view.can_retry());

        let notifications = view.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "Error");
        assert!(view.take_notifications().is_empty());
    }

    #[tokio::test]
    async fn test_reload_after_error_refetches() {
        let mut service = MockRecommendationService::new();
        let mut seq = mockall::Sequence::new();
        service
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(service_failure()));
        service
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(recommendations(10)));
        let mut view = ResultsView::new(Arc::new(service));

        view.mount(&route("Dark")).await;
        assert!(view.can_retry());

        view.reload().await;
        assert!(matches!(view.state(), ViewState::Success(results) if results.len() == 10));
        assert_eq!(view.query(), "Dark");
    }

    #[tokio::test]
    async fn test_successful_empty_list_is_not_an_error() {
        let mut service = MockRecommendationService::new();
        service
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let mut view = ResultsView::new(Arc::new(service));

        view.mount(&route("Obscure")).await;

        assert_eq!(view.state(), &ViewState::Success(Vec::new()));
        assert!(!view.can_retry());
    }

    #[tokio::test]
    async fn test_load_outside_loading_state_does_nothing() {
        let mut service = MockRecommendationService::new();
        service.expect_fetch().times(0);
        let mut view = ResultsView::new(Arc::new(service));

        view.load().await;
        assert_eq!(view.state(), &ViewState::Idle);
    }
}
