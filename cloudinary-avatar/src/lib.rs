mod auth;
mod client;
mod cloudinary_url;
pub mod domain;
mod public_id;
mod signature;

pub use auth::*;
pub use client::*;
pub use cloudinary_url::*;
pub use domain::{AvatarUpload, DestroyOutcome, Transformation, UploadResult};
pub use public_id::extract_public_id;
pub use signature::SignedParams;
