//! Uploads an image for a user, prints where it landed, then removes it again.
//!
//! Needs real credentials, e.g. in `.env.local`:
//!
//! ```text
//! CLOUDINARY_CLOUD_NAME=your-cloud-name
//! CLOUDINARY_API_KEY=123456789012345
//! CLOUDINARY_API_SECRET=your-api-secret
//! ```
//!
//! Run with `cargo run -p cloudinary-avatar --example avatar_roundtrip -- <image> <user-id>`.

use std::env;
use std::error::Error;

use cloudinary_avatar::{extract_public_id, CloudinaryClient, CloudinaryConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::from_filename(".env.local").ok();

    let mut args = env::args().skip(1);
    let path = args.next().ok_or("usage: avatar_roundtrip <image> <user-id>")?;
    let user_id = args.next().ok_or("usage: avatar_roundtrip <image> <user-id>")?;

    let client = CloudinaryClient::new(CloudinaryConfig::from_env());

    let image = tokio::fs::read(&path).await?;
    let result = client.upload_avatar(image, &user_id).await?;
    println!(
        "{} ({}x{}, {} bytes)",
        result.secure_url, result.width, result.height, result.bytes
    );

    let public_id = extract_public_id(&result.secure_url);
    println!("public id from url: {public_id}");

    client.delete_avatar(&result.public_id).await?;
    println!("deleted {}", result.public_id);

    Ok(())
}
