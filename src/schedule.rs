pub mod api;
pub mod dto;
pub mod games;
pub mod model;
