use time::OffsetDateTime;

use super::{CloudinaryParam, Transformation};
use crate::SignedParams;

pub const AVATAR_FOLDER: &str = "avatars";

/// Parameters for a single avatar upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    pub folder: String,
    /// Object name inside `folder`, `<user_id>_<unix millis>`.
    pub filename: String,
    pub transformation: Transformation,
}

impl AvatarUpload {
    pub fn for_user(user_id: &str, now: OffsetDateTime) -> Self {
        let millis = now.unix_timestamp_nanos() / 1_000_000;

        Self {
            folder: AVATAR_FOLDER.to_string(),
            filename: format!("{user_id}_{millis}"),
            transformation: Transformation::avatar(),
        }
    }

    /// The id the stored object will be addressable by, e.g. `avatars/user_123_1700000000000`.
    pub fn public_id(&self) -> String {
        format!("{}/{}", self.folder, self.filename)
    }

    pub(crate) fn params(&self) -> SignedParams {
        SignedParams::new()
            .with("folder", &self.folder)
            .with("public_id", &self.filename)
            .with("transformation", self.transformation.as_cloudinary_param())
    }
}
