//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities and read models to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    NameRequest, NamesQuery, RefreshTokenRequest, SignInRequest, UpdatePredictionRequest,
};

pub use responses::{
    AuthResponse, CurrentUserResponse, HealthChecks, HealthResponse, MyPredictionResponse,
    NameBoardResponse, NameResponse, NameRowResponse, PredictionBoardResponse,
    PredictionResponse, ReadinessResponse, VoteResponse,
};
