use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use entity::{city, prelude::City};
use sea_orm::{sea_query::LikeExpr, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::db::is_unique_violation;
use crate::error::ServerError;
use crate::handlers::ValidatedJson;
use crate::server::State;

/// The JSON input for `POST /cities/`
#[derive(Debug, Validate, Deserialize)]
pub(crate) struct NewCityInput {
    /// Free-text city name, normalized before use.
    #[validate(length(
        min = 1,
        max = 128,
        message = "Minimum length is 1 character, maximum is 128"
    ))]
    pub(crate) name: String,
}

/// Query parameters for `GET /cities/`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CityFilter {
    /// Name prefix.
    pub(crate) q: Option<String>,
}

/// A city together with its current temperature, `None` when the weather service didn't answer.
#[derive(Debug, Serialize)]
pub(crate) struct CityResponse {
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) weather: Option<f64>,
}

/// Trim `name`, upper-case its first character and lower-case the rest, so that
/// "kazan", "KAZAN" and " Kazan " all name the same city.
pub(crate) fn normalize_city_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Handler for `POST /cities/`
pub(crate) async fn create_city(
    state: Extension<Arc<State>>,
    ValidatedJson(input): ValidatedJson<NewCityInput>,
) -> Result<Json<CityResponse>, ServerError> {
    let name = normalize_city_name(&input.name);
    if name.is_empty() {
        return Err(ServerError::BlankCityName);
    }

    // a weather reading is the proof that the city exists
    let weather = match state.weather.current_temperature(&name).await {
        Some(temperature) => temperature,
        None => return Err(ServerError::UnknownCity(name)),
    };

    let new_city = city::ActiveModel {
        name: Set(name.clone()),
        ..Default::default()
    };
    let city = match new_city.insert(&state.db).await {
        Ok(city) => {
            tracing::info!("Created city {} ({})", city.name, city.id);
            city
        }
        // already stored, earlier or by a concurrent request
        Err(e) if is_unique_violation(&e) => find_city_by_name(&state, &name)
            .await?
            .ok_or(ServerError::DbError(e))?,
        Err(e) => return Err(e.into()),
    };

    Ok(Json(CityResponse {
        id: city.id,
        name: city.name,
        weather: Some(weather),
    }))
}

/// Handler for `GET /cities/`
pub(crate) async fn list_cities(
    state: Extension<Arc<State>>,
    filter: Result<Query<CityFilter>, QueryRejection>,
) -> Result<Json<Vec<CityResponse>>, ServerError> {
    let Query(filter) = filter?;

    let mut query = City::find();
    if let Some(prefix) = &filter.q {
        let pattern = LikeExpr::new(prefix_pattern(prefix)).escape('\\');
        query = query.filter(city::Column::Name.like(pattern));
    }
    let cities = query.all(&state.db).await?;

    let mut response = Vec::with_capacity(cities.len());
    for city in cities {
        let weather = state.weather.current_temperature(&city.name).await;
        response.push(CityResponse {
            id: city.id,
            name: city.name,
            weather,
        });
    }

    Ok(Json(response))
}

/// `LIKE` pattern matching names that start with `prefix` literally: `%`, `_` and `\` itself
/// are escaped with `\`.
fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

async fn find_city_by_name(state: &State, name: &str) -> Result<Option<city::Model>, ServerError> {
    Ok(City::find()
        .filter(city::Column::Name.eq(name))
        .one(&state.db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_matches_capitalize() {
        assert_eq!(normalize_city_name("kazan"), "Kazan");
        assert_eq!(normalize_city_name("KAZAN"), "Kazan");
        assert_eq!(normalize_city_name("  mOSCOW "), "Moscow");
        assert_eq!(normalize_city_name("new york"), "New york");
    }

    #[test]
    fn normalization_handles_non_ascii_and_empty_names() {
        assert_eq!(normalize_city_name("казань"), "Казань");
        assert_eq!(normalize_city_name("   "), "");
    }

    #[test]
    fn prefix_pattern_escapes_wildcards() {
        assert_eq!(prefix_pattern("Ka"), "Ka%");
        assert_eq!(prefix_pattern("100%"), "100\\%%");
        assert_eq!(prefix_pattern("a_b\\"), "a\\_b\\\\%");
    }
}
