pub mod attachment_repository;
pub mod attachment_service;
pub mod repository;
pub mod service;
