mod destroy_result;
mod transformation;
mod upload_params;
mod upload_result;

pub use destroy_result::*;
pub use transformation::*;
pub use upload_params::*;
pub use upload_result::*;

/// Something that can be sent to Cloudinary as a single form parameter value.
pub trait CloudinaryParam {
    fn as_cloudinary_param(&self) -> String;
}
