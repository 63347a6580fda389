pub mod application_repository;
pub mod association_repository;
pub mod company_repository;
pub mod event_repository;
pub mod person_repository;
