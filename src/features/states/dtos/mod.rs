mod state_dto;

pub use state_dto::StateResponseDto;
