// HTTP layer: one router per resource, composed in routes.rs

pub mod admin;
pub mod analysis;
pub mod auth;
pub mod cardio;
pub mod exercises;
pub mod health;
pub mod invites;
pub mod preferences;
pub mod programs;
pub mod routes;
pub mod sessions;
pub mod suggestions;
pub mod trainers;
