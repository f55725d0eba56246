use crate::models::RECOMMENDATION_COUNT;

/// Builds the instruction sent to the language model for one title
///
/// The model is asked for a bare JSON array so the reply can be parsed directly; the
/// parser still tolerates a surrounding code fence because models add one anyway.
pub fn build_prompt(movie_title: &str) -> String {
    format!(
        r#"You are a movie recommendation expert. Based on the movie/TV series "{title}", recommend exactly {count} similar movies or TV series that the user would enjoy.

For each recommendation, provide the following information in JSON format:
- title: The exact title of the movie/TV series
- year: Release year (number)
- rating: IMDb rating (number between 1-10, realistic ratings)
- genre: Genre(s) as a string (e.g., "Action, Thriller")
- description: A brief, engaging description (2-3 sentences) that explains why someone who liked "{title}" would enjoy this, without major spoilers

Return ONLY a valid JSON array with exactly {count} recommendations. No additional text or formatting.

Example format:
[
  {{
    "title": "Movie Title",
    "year": 2020,
    "rating": 8.2,
    "genre": "Action, Thriller",
    "description": "A gripping thriller that combines intense action with psychological depth, similar to {title} in its complex character development and suspenseful plot."
  }}
]"#,
        title = movie_title,
        count = RECOMMENDATION_COUNT,
    )
}
