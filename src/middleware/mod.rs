//! Middleware HTTP
//! 
//! Solo CORS: la demo no tiene autenticación real ni rate limiting.

pub mod cors;
