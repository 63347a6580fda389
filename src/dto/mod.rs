pub mod application_dto;
pub mod association_dto;
pub mod common_dto;
pub mod company_dto;
pub mod event_dto;
pub mod person_dto;
