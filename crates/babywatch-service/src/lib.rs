//! # babywatch-service
//!
//! Application layer containing use cases, the live hub, sessions, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, LiveHub, NameService, NamesSubscription, PredictionService,
    PredictionsSubscription, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    SessionRegistry, WatchFeed,
};
