pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudinaryURL(String);

impl AsRef<str> for CloudinaryURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Default for CloudinaryURL {
    fn default() -> Self {
        Self(DEFAULT_API_BASE_URL.to_string())
    }
}

impl CloudinaryURL {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// `{base}/{cloud_name}/image/{action}`
    pub fn image_action(&self, cloud_name: &str, action: &str) -> Self {
        self.append_path(cloud_name)
            .append_path("image")
            .append_path(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_public_api() {
        assert_eq!(
            CloudinaryURL::default().image_action("demo", "upload").as_ref(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }

    #[test]
    fn slashes_are_normalized() {
        let url = CloudinaryURL::new("http://localhost:8080/").image_action("demo", "/destroy");
        assert_eq!(url.as_ref(), "http://localhost:8080/demo/image/destroy");
    }
}
