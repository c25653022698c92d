//! DTOs de la superficie HTTP

pub mod api_response;
pub mod fleet_dto;
pub mod session_dto;
