use crate::{
    client::view::{ResultsView, ViewState},
    models::Recommendation,
};

/// One numbered movie card
pub fn render_card(rank: usize, recommendation: &Recommendation) -> String {
    let mut card = format!(
        "{:>2}. {}  \u{2605} {:.1}\n    {} \u{2022} {}\n",
        rank,
        recommendation.title,
        recommendation.rating,
        recommendation.year,
        recommendation.genre
    );
    if let Some(poster) = &recommendation.poster {
        card.push_str(&format!("    Poster: {}\n", poster));
    }
    card.push_str(&format!("    {}\n", recommendation.description));
    card
}

/// Whole results screen for the view's current state
pub fn render_view(view: &ResultsView) -> String {
    match view.state() {
        ViewState::Idle => "Enter a movie or TV series name to get recommendations.\n".to_string(),
        ViewState::Loading => format!("Finding recommendations for \"{}\"...\n", view.query()),
        ViewState::Error(message) => format!("{}\n[r] Retry\n", message),
        ViewState::Success(results) if results.is_empty() => {
            "No recommendations found. Try searching for another title.\n".to_string()
        }
        ViewState::Success(results) => {
            let mut screen = format!(
                "Recommendations for \"{}\"\nHere are {} movies and TV series similar to your search\n\n",
                view.query(),
                results.len()
            );
            for (index, recommendation) in results.iter().enumerate() {
                screen.push_str(&render_card(index + 1, recommendation));
                screen.push('\n');
            }
            screen
        }
    }
}
