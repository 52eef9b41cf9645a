use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Something went wrong on our side";

/// Any possible server errors
#[derive(Debug, Error)]
pub(crate) enum ServerError {
    #[error(transparent)]
    ValidationError(#[from] validator::ValidationErrors),

    #[error(transparent)]
    AxumJsonRejection(#[from] JsonRejection),

    #[error(transparent)]
    AxumQueryRejection(#[from] QueryRejection),

    #[error("City name must not be blank")]
    BlankCityName,

    /// The weather service does not know a city by this name.
    #[error("City '{0}' does not exist")]
    UnknownCity(String),

    #[error("City city_id = {0} not found")]
    CityNotFound(i32),

    #[error("Picnic picnic_id = {0} not found")]
    PicnicNotFound(i32),

    #[error("User user_id = {0} not found")]
    UserNotFound(i32),

    #[error("User user_id = {user_id} is already registered for picnic {picnic_id}")]
    AlreadyRegistered { user_id: i32, picnic_id: i32 },

    #[error(transparent)]
    DbError(#[from] sea_orm::DbErr),
}

impl ServerError {
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            ServerError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::AxumJsonRejection(rejection) => rejection.status(),
            ServerError::AxumQueryRejection(rejection) => rejection.status(),
            ServerError::BlankCityName
            | ServerError::UnknownCity(_)
            | ServerError::AlreadyRegistered { .. } => StatusCode::BAD_REQUEST,
            ServerError::CityNotFound(_)
            | ServerError::PicnicNotFound(_)
            | ServerError::UserNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::DbError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = match &self {
            ServerError::ValidationError(_) => {
                format!("Input validation error: [{}]", self).replace('\n', ", ")
            }
            ServerError::DbError(e) => {
                tracing::error!("Database error occurred: {:?}", e);
                INTERNAL_SERVER_ERROR_MESSAGE.to_owned()
            }
            _ => self.to_string(),
        };

        (self.status(), Json(json!({ "detail": message }))).into_response()
    }
}
