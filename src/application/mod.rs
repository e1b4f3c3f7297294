// Application layer - Use cases and data-access seams
pub mod dashboard_service;
pub mod portal_repository;
