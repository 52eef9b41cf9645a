use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use entity::{prelude::User, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::ServerError;
use crate::handlers::ValidatedJson;
use crate::server::State;

/// The JSON input for `POST /users/`
#[derive(Debug, Validate, Deserialize)]
pub(crate) struct NewUserInput {
    #[validate(length(
        min = 1,
        max = 64,
        message = "Minimum length is 1 character, maximum is 64"
    ))]
    pub(crate) name: String,
    #[validate(length(
        min = 1,
        max = 64,
        message = "Minimum length is 1 character, maximum is 64"
    ))]
    pub(crate) surname: String,
    #[validate(range(min = 0, max = 150, message = "Must be between 0 and 150"))]
    pub(crate) age: Option<i32>,
}

/// Query parameters for `GET /users/`. Both bounds are inclusive.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AgeFilter {
    pub(crate) min_age: Option<i32>,
    pub(crate) max_age: Option<i32>,
}

/// The response output for a single user, also nested into picnic listings.
#[derive(Debug, Serialize)]
pub(crate) struct UserResponse {
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) surname: String,
    pub(crate) age: Option<i32>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            surname: user.surname,
            age: user.age,
        }
    }
}

/// Handler for `GET /users/`
pub(crate) async fn list_users(
    state: Extension<Arc<State>>,
    filter: Result<Query<AgeFilter>, QueryRejection>,
) -> Result<Json<Vec<UserResponse>>, ServerError> {
    let Query(filter) = filter?;

    let mut query = User::find();
    if let Some(min_age) = filter.min_age {
        query = query.filter(user::Column::Age.gte(min_age));
    }
    if let Some(max_age) = filter.max_age {
        query = query.filter(user::Column::Age.lte(max_age));
    }

    let users = query.all(&state.db).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Handler for `POST /users/`
pub(crate) async fn create_user(
    state: Extension<Arc<State>>,
    ValidatedJson(input): ValidatedJson<NewUserInput>,
) -> Result<Json<UserResponse>, ServerError> {
    // same-name users are fine, no conflict check here
    let user = user::ActiveModel {
        name: Set(input.name),
        surname: Set(input.surname),
        age: Set(input.age),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    tracing::info!("Created user {} ({})", user.name, user.id);
    Ok(Json(user.into()))
}
