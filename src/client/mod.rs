//! Client half of MovieMatch: the search form, the results view state machine and a
//! plain-text rendering of its screens.

pub mod posters;
pub mod render;
pub mod search;
pub mod service;
pub mod view;

pub use search::SearchRoute;
pub use service::{ClientError, HttpRecommendationClient, RecommendationService};
pub use view::{Notification, ResultsView, ViewState};
