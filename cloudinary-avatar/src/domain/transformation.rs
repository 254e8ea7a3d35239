use strum::{Display, EnumString};

use super::CloudinaryParam;

pub const AVATAR_SIZE: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Crop {
    #[strum(serialize = "fill")]
    Fill,
    #[strum(serialize = "fit")]
    Fit,
    #[strum(serialize = "thumb")]
    Thumb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Gravity {
    #[strum(serialize = "face")]
    Face,
    #[strum(serialize = "center")]
    Center,
    #[strum(serialize = "auto")]
    Auto,
}

/// Server-side resize instructions applied while the image is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformation {
    pub width: u32,
    pub height: u32,
    pub crop: Crop,
    pub gravity: Gravity,
}

impl Transformation {
    /// 200x200, crop-to-fill, anchored on the detected face.
    pub fn avatar() -> Self {
        Self {
            width: AVATAR_SIZE,
            height: AVATAR_SIZE,
            crop: Crop::Fill,
            gravity: Gravity::Face,
        }
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::avatar()
    }
}

impl CloudinaryParam for Transformation {
    /// Components are emitted in alphabetical key order, e.g. `c_fill,g_face,h_200,w_200`.
    fn as_cloudinary_param(&self) -> String {
        format!(
            "c_{},g_{},h_{},w_{}",
            self.crop, self.gravity, self.height, self.width
        )
    }
}
