use crate::models::Recommendation;

/// Placeholder artwork, handed out in rotation by result position
pub const PLACEHOLDER_POSTERS: [&str; 4] = [
    "/assets/poster-1.jpg",
    "/assets/poster-2.jpg",
    "/assets/poster-3.jpg",
    "/assets/poster-4.jpg",
];

pub fn poster_for(position: usize) -> &'static str {
    PLACEHOLDER_POSTERS[position % PLACEHOLDER_POSTERS.len()]
}

/// Attaches a placeholder poster to every record, replacing whatever was there
pub fn assign_posters(recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    recommendations
        .into_iter()
        .enumerate()
        .map(|(position, recommendation)| Recommendation {
            poster: Some(poster_for(position).to_string()),
            ..recommendation
        })
        .collect()
}
