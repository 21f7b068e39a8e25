/// Use cases module containing application business logic orchestration
mod generate_image_vex;

pub use generate_image_vex::GenerateImageVexUseCase;
