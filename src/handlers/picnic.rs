use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use chrono::{NaiveDateTime, Utc};
use entity::{
    picnic, picnic_registration,
    prelude::{City, Picnic, PicnicRegistration, User},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use validator::Validate;

use crate::error::ServerError;
use crate::handlers::{UserResponse, ValidatedJson};
use crate::server::State;

/// The JSON input for `POST /picnics/`
#[derive(Debug, Validate, Deserialize)]
pub(crate) struct NewPicnicInput {
    pub(crate) city_id: i32,
    /// When the picnic takes place, in UTC.
    pub(crate) datetime: NaiveDateTime,
}

/// Query parameters for `GET /picnics/`
#[derive(Debug, Deserialize)]
pub(crate) struct PicnicFilter {
    /// Only picnics at exactly this time.
    pub(crate) datetime: Option<NaiveDateTime>,
    /// Whether picnics that already took place are included.
    #[serde(default = "include_past_default")]
    pub(crate) past: bool,
}

fn include_past_default() -> bool {
    true
}

/// The response output for `POST /picnics/`
#[derive(Debug, Serialize)]
pub(crate) struct PicnicResponse {
    pub(crate) id: i32,
    pub(crate) city: String,
    pub(crate) time: NaiveDateTime,
}

/// A picnic as listed by `GET /picnics/`, with everyone registered for it.
#[derive(Debug, Serialize)]
pub(crate) struct PicnicListItem {
    pub(crate) id: i32,
    pub(crate) city: String,
    pub(crate) time: NaiveDateTime,
    pub(crate) users: Vec<UserResponse>,
}

/// Handler for `GET /picnics/`
pub(crate) async fn list_picnics(
    state: Extension<Arc<State>>,
    filter: Result<Query<PicnicFilter>, QueryRejection>,
) -> Result<Json<Vec<PicnicListItem>>, ServerError> {
    let Query(filter) = filter?;

    let mut query = Picnic::find();
    if let Some(time) = filter.datetime {
        query = query.filter(picnic::Column::Time.eq(time));
    }
    if !filter.past {
        query = query.filter(picnic::Column::Time.gte(Utc::now().naive_utc()));
    }
    let picnics = query
        .order_by_asc(picnic::Column::Id)
        .find_also_related(City)
        .all(&state.db)
        .await?;

    let mut users_by_picnic = registered_users(&state, picnics.iter().map(|(p, _)| p.id)).await?;

    let response = picnics
        .into_iter()
        .map(|(picnic, city)| PicnicListItem {
            id: picnic.id,
            city: city.map(|c| c.name).unwrap_or_default(),
            time: picnic.time,
            users: users_by_picnic.remove(&picnic.id).unwrap_or_default(),
        })
        .collect();

    Ok(Json(response))
}

/// Handler for `POST /picnics/`
pub(crate) async fn create_picnic(
    state: Extension<Arc<State>>,
    ValidatedJson(input): ValidatedJson<NewPicnicInput>,
) -> Result<Json<PicnicResponse>, ServerError> {
    let city = City::find_by_id(input.city_id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::CityNotFound(input.city_id))?;

    let picnic = picnic::ActiveModel {
        city_id: Set(city.id),
        time: Set(input.datetime),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    tracing::info!("Created picnic {} in {} at {}", picnic.id, city.name, picnic.time);
    Ok(Json(PicnicResponse {
        id: picnic.id,
        city: city.name,
        time: picnic.time,
    }))
}

/// Users registered for each of `picnic_ids`, keyed by picnic id, in registration order.
async fn registered_users(
    state: &State,
    picnic_ids: impl Iterator<Item = i32>,
) -> Result<HashMap<i32, Vec<UserResponse>>, ServerError> {
    let picnic_ids: Vec<i32> = picnic_ids.collect();
    let mut users_by_picnic: HashMap<i32, Vec<UserResponse>> = HashMap::new();
    if picnic_ids.is_empty() {
        return Ok(users_by_picnic);
    }

    let registrations = PicnicRegistration::find()
        .filter(picnic_registration::Column::PicnicId.is_in(picnic_ids))
        .order_by_asc(picnic_registration::Column::Id)
        .find_also_related(User)
        .all(&state.db)
        .await?;

    for (registration, user) in registrations {
        if let Some(user) = user {
            users_by_picnic
                .entry(registration.picnic_id)
                .or_default()
                .push(user.into());
        }
    }

    Ok(users_by_picnic)
}
