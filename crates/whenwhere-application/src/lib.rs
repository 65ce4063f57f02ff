//! Application layer: orchestrates the domain core for the presentation.

pub mod study_usecase;

pub use study_usecase::StudyUseCase;
