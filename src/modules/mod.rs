pub mod generation;
pub mod image_to_video;
pub mod text_to_image;
pub mod text_to_video;
