use serde_json::{Map, Value};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{CompletionRequest, Recommendation, RECOMMENDATION_COUNT},
    services::{prompt::build_prompt, providers::LanguageModelProvider},
};

/// Sampling temperature for recommendation prompts
pub const TEMPERATURE: f32 = 0.7;

/// Token ceiling for one recommendation reply
pub const MAX_TOKENS: u32 = 2000;

/// Generates ten recommendations similar to `movie_title`
///
/// Makes at most one provider call. The reply is accepted only if all ten entries are
/// complete; any problem fails the whole call and no partial list is returned.
pub async fn generate_recommendations(
    provider: Arc<dyn LanguageModelProvider>,
    movie_title: &str,
) -> AppResult<Vec<Recommendation>> {
    let movie_title = movie_title.trim();
    if movie_title.is_empty() {
        return Err(AppError::InvalidInput("Movie title is required".to_string()));
    }

    tracing::info!(
        movie_title = %movie_title,
        provider = provider.name(),
        "Generating recommendations"
    );

    let raw = provider
        .complete(CompletionRequest {
            prompt: build_prompt(movie_title),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        })
        .await?;

    tracing::debug!(response = %raw, "Raw model response");

    let recommendations = parse_recommendations(&raw)?;

    tracing::info!(
        movie_title = %movie_title,
        count = recommendations.len(),
        "Successfully generated recommendations"
    );

    Ok(recommendations)
}

/// Removes a Markdown code fence wrapped around the model's reply
///
/// Handles both a bare fence and one tagged with a language (```` ```json ````).
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        body = match rest.find('\n') {
            Some(pos) if rest[..pos].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
                &rest[pos + 1..]
            }
            _ => rest.trim_start_matches("json"),
        };
    }

    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }

    body.trim()
}

/// Parses and validates the model's reply into exactly ten recommendations
pub fn parse_recommendations(raw: &str) -> AppResult<Vec<Recommendation>> {
    let cleaned = strip_code_fences(raw);

    let value: Value = serde_json::from_str(cleaned).map_err(|e| {
        tracing::error!(error = %e, raw = %raw, "Failed to parse model response as JSON");
        AppError::MalformedResponse(format!(
            "Failed to parse recommendations from model response: {}",
            e
        ))
    })?;

    let items = value
        .as_array()
        .ok_or_else(|| AppError::invalid_shape("expected a JSON array of recommendations"))?;

    if items.len() != RECOMMENDATION_COUNT {
        return Err(AppError::invalid_shape(format!(
            "expected {} recommendations, got {}",
            RECOMMENDATION_COUNT,
            items.len()
        )));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| normalize_recommendation(index, item))
        .collect()
}

fn normalize_recommendation(index: usize, item: &Value) -> AppResult<Recommendation> {
    let object = item
        .as_object()
        .ok_or_else(|| AppError::invalid_shape_at(index, "expected an object"))?;

    let title = required_text(object, index, "title")?;
    let year = required_year(object, index)?;
    let rating = required_rating(object, index)?;
    let genre = required_genre(object, index)?;
    let description = required_text(object, index, "description")?;

    Ok(Recommendation {
        id: index as u32 + 1,
        title,
        year,
        rating,
        genre,
        description,
        poster: None,
    })
}

/// Returns the field if it is present, non-null and not a blank string
fn required<'a>(object: &'a Map<String, Value>, index: usize, field: &str) -> AppResult<&'a Value> {
    match object.get(field) {
        None | Some(Value::Null) => Err(AppError::invalid_shape_at(
            index,
            format!("missing field `{}`", field),
        )),
        Some(Value::String(s)) if s.trim().is_empty() => Err(AppError::invalid_shape_at(
            index,
            format!("field `{}` is empty", field),
        )),
        Some(value) => Ok(value),
    }
}

fn required_text(object: &Map<String, Value>, index: usize, field: &str) -> AppResult<String> {
    match required(object, index, field)? {
        Value::String(s) => Ok(s.trim().to_string()),
        // Titles such as 1917 come back as bare numbers.
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(AppError::invalid_shape_at(
            index,
            format!("field `{}` must be a string", field),
        )),
    }
}

fn required_genre(object: &Map<String, Value>, index: usize) -> AppResult<String> {
    match required(object, index, "genre")? {
        Value::Array(parts) => {
            let names: Vec<&str> = parts
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            if names.is_empty() || names.len() != parts.len() {
                return Err(AppError::invalid_shape_at(
                    index,
                    "field `genre` must be a string or a list of strings",
                ));
            }
            Ok(names.join(", "))
        }
        _ => required_text(object, index, "genre"),
    }
}

fn required_year(object: &Map<String, Value>, index: usize) -> AppResult<i32> {
    let value = required(object, index, "year")?;
    let year = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => leading_integer(s),
        _ => None,
    };

    year.and_then(|y| i32::try_from(y).ok())
        .filter(|y| *y > 0)
        .ok_or_else(|| {
            AppError::invalid_shape_at(index, format!("field `year` is not a year: {}", value))
        })
}

fn required_rating(object: &Map<String, Value>, index: usize) -> AppResult<f64> {
    let value = required(object, index, "rating")?;
    let rating = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_float(s),
        _ => None,
    };

    let rating = rating
        .filter(|r| r.is_finite() && *r > 0.0)
        .ok_or_else(|| {
            AppError::invalid_shape_at(index, format!("field `rating` is not a number: {}", value))
        })?;

    if !(1.0..=10.0).contains(&rating) {
        tracing::warn!(index, rating, "Rating outside the expected 1-10 range");
    }

    Ok(rating)
}

/// Parses the integer at the start of `text`, ignoring anything after it ("2010-2013")
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

/// Parses the decimal number at the start of `text`, ignoring anything after it ("8.1/10")
fn leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let mut seen_dot = false;
    let end = text
        .char_indices()
        .find(|&(i, c)| {
            let accepted = c.is_ascii_digit()
                || (i == 0 && (c == '-' || c == '+'))
                || (c == '.' && !seen_dot && {
                    seen_dot = true;
                    true
                });
            !accepted
        })
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].parse().ok()
}
