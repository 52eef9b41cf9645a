use axum::{extract::Extension, Json};
use entity::{
    picnic_registration,
    prelude::{Picnic, User},
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::db::is_unique_violation;
use crate::error::ServerError;
use crate::handlers::ValidatedJson;
use crate::server::State;

/// The JSON input for `POST /picnic-register/`
#[derive(Debug, Validate, Deserialize)]
pub(crate) struct RegistrationInput {
    pub(crate) user_id: i32,
    pub(crate) picnic_id: i32,
}

/// The response output for `POST /picnic-register/`
#[derive(Debug, Serialize)]
pub(crate) struct RegistrationResponse {
    pub(crate) id: i32,
    /// Id of the picnic registered for.
    pub(crate) picnic: i32,
    /// Name of the registered user.
    pub(crate) user: String,
}

/// Handler for `POST /picnic-register/`
pub(crate) async fn register_to_picnic(
    state: Extension<Arc<State>>,
    ValidatedJson(input): ValidatedJson<RegistrationInput>,
) -> Result<Json<RegistrationResponse>, ServerError> {
    let RegistrationInput { user_id, picnic_id } = input;

    if Picnic::find_by_id(picnic_id).one(&state.db).await?.is_none() {
        return Err(ServerError::PicnicNotFound(picnic_id));
    }
    let user = User::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or(ServerError::UserNotFound(user_id))?;

    // duplicates are refused by the unique index on (user_id, picnic_id)
    let registration = picnic_registration::ActiveModel {
        user_id: Set(user_id),
        picnic_id: Set(picnic_id),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ServerError::AlreadyRegistered { user_id, picnic_id }
        } else {
            e.into()
        }
    })?;

    tracing::info!("Registered user {} for picnic {}", user_id, picnic_id);
    Ok(Json(RegistrationResponse {
        id: registration.id,
        picnic: registration.picnic_id,
        user: user.name,
    }))
}
