use utoipa::OpenApi;

use crate::modules::generation::delivery::DeliveryMode;
use crate::modules::generation::dto::{InputImage, InputImageType, ProcessingResponse, ReadyResponse};
use crate::modules::image_to_video::dto::{ImageToVideoModel, ImageToVideoParams, ImageToVideoRequest};
use crate::modules::text_to_image::dto::{TextToImageModel, TextToImageParams, TextToImageRequest};
use crate::modules::text_to_video::dto::{TextToVideoModel, TextToVideoParams, TextToVideoRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::text_to_image::handler::nano_banana,
        crate::modules::text_to_image::handler::seedream,
        crate::modules::text_to_image::handler::generate_image,
        crate::modules::text_to_image::handler::generate_image_bytes,
        crate::modules::text_to_image::handler::wait_image,
        crate::modules::image_to_video::handler::wan_25_fast,
        crate::modules::image_to_video::handler::generate_video,
        crate::modules::image_to_video::handler::generate_video_bytes,
        crate::modules::image_to_video::handler::wait_video,
        crate::modules::text_to_video::handler::minimax_t2v,
        crate::modules::text_to_video::handler::seedance_v1_lite_t2v,
        crate::modules::text_to_video::handler::generate_video,
        crate::modules::text_to_video::handler::generate_video_bytes,
        crate::modules::text_to_video::handler::wait_video,
    ),
    components(
        schemas(
            DeliveryMode, InputImage, InputImageType, ReadyResponse, ProcessingResponse,
            TextToImageModel, TextToImageParams, TextToImageRequest,
            ImageToVideoModel, ImageToVideoParams, ImageToVideoRequest,
            TextToVideoModel, TextToVideoParams, TextToVideoRequest,
        )
    ),
    tags(
        (name = "Text to Image", description = "Image generation"),
        (name = "Image to Video", description = "Video generation from a driving image"),
        (name = "Text to Video", description = "Video generation from a prompt")
    )
)]
pub struct ApiDoc;
