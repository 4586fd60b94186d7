//! Error handling for the Bar Costing Platform server
//!
//! Provides consistent error responses in English and Portuguese

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{CompletionError, StockError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_pt: String,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {message}")]
    Conflict {
        resource: String,
        message: String,
        message_pt: String,
    },

    // Business logic errors
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Stock changed during completion: {0}")]
    StaleStock(String),

    // Internal errors
    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Validation failure on one input field
    pub fn validation(field: &str, message: &str, message_pt: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
            message_pt: message_pt.to_string(),
        }
    }
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::NonPositiveQuantity(_) => AppError::validation(
                "quantity",
                "Quantity must be positive",
                "A quantidade deve ser positiva",
            ),
            StockError::NonPositivePrice(_) => AppError::validation(
                "total_price",
                "Total price must be positive",
                "O preço total deve ser positivo",
            ),
            StockError::UnitCostOutOfRange { .. } => AppError::validation(
                "total_price",
                "Total price is out of range for this quantity",
                "O preço total está fora do intervalo para esta quantidade",
            ),
            StockError::InsufficientStock { .. } => AppError::InsufficientStock(err.to_string()),
            StockError::LotNotFound { .. }
            | StockError::LotChanged { .. }
            | StockError::IngredientMismatch { .. } => AppError::StaleStock(err.to_string()),
        }
    }
}

impl From<CompletionError> for AppError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::InvalidDuration { .. } => AppError::InvalidEvent(err.to_string()),
            CompletionError::EventMismatch { .. } | CompletionError::Stock(_) => {
                AppError::StaleStock(err.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|field| field.to_string())
            .unwrap_or_default();
        AppError::Validation {
            message: format!("Invalid value for {}", field),
            message_pt: format!("Valor inválido para {}", field),
            field,
        }
    }
}

/// Turn an input check into a field error
pub fn check_field(field: &str, result: Result<(), &'static str>) -> AppResult<()> {
    result.map_err(|message| AppError::Validation {
        field: field.to_string(),
        message: message.to_string(),
        message_pt: translate(message),
    })
}

fn translate(message: &str) -> String {
    let translated = match message {
        "Name cannot be empty" => "O nome não pode ficar vazio",
        "Consumption rates cannot be negative" => "As taxas de consumo não podem ser negativas",
        "Recipe must have at least one ingredient" => "A receita deve ter pelo menos um insumo",
        "Recipe quantities must be positive" => "As quantidades da receita devem ser positivas",
        "Low stock threshold cannot be negative" => "O alerta de estoque baixo não pode ser negativo",
        "End time must be after start time" => "A data de término deve ser posterior à data de início",
        "Select at least one drink" => "Selecione pelo menos um drink",
        "Event must have at least one guest" => "O evento deve ter pelo menos um convidado",
        "Profit margin cannot be negative" => "A margem de lucro não pode ser negativa",
        "Staff cost cannot be negative" => "O custo da equipe não pode ser negativo",
        other => return format!("Valor inválido: {}", other),
    };
    translated.to_string()
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_pt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation {
                field,
                message,
                message_pt,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_pt: message_pt.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_pt: format!("{} não encontrado", resource),
                    field: None,
                },
            ),
            AppError::Conflict {
                resource,
                message,
                message_pt,
            } => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "CONFLICT".to_string(),
                    message_en: message.clone(),
                    message_pt: message_pt.clone(),
                    field: Some(resource.clone()),
                },
            ),
            AppError::InsufficientStock(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INSUFFICIENT_STOCK".to_string(),
                    message_en: msg.clone(),
                    message_pt: format!("Estoque insuficiente: {}", msg),
                    field: Some("quantity".to_string()),
                },
            ),
            AppError::InvalidEvent(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_EVENT".to_string(),
                    message_en: msg.clone(),
                    message_pt: format!("Evento inválido: {}", msg),
                    field: None,
                },
            ),
            AppError::StaleStock(msg) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "STALE_STOCK".to_string(),
                    message_en: msg.clone(),
                    message_pt: format!("O estoque mudou durante a operação: {}", msg),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_pt: "Ocorreu um erro interno no servidor".to_string(),
                    field: None,
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
