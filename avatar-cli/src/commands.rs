use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use cloudinary_avatar::{
    extract_public_id, CloudinaryClient, CloudinaryConfig, DestroyOutcome, UploadResult,
};
use playwright_scaffold::{BrowserTestTemplate, TemplateValues};
use tracing::{info, warn};

use crate::settings::Settings;

pub fn build_client(settings: &Settings) -> Result<CloudinaryClient> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = settings.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let http = builder.build().context("Failed to build HTTP client")?;

    Ok(CloudinaryClient::with_http_client(
        CloudinaryConfig::from_env(),
        http,
    ))
}

pub async fn upload(
    client: &CloudinaryClient,
    file: &Path,
    user_id: &str,
) -> Result<UploadResult> {
    let image = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read image at {}", file.display()))?;

    let result = client.upload_avatar(image, user_id).await?;
    info!(public_id = %result.public_id, "avatar uploaded");

    Ok(result)
}

pub async fn delete(client: &CloudinaryClient, public_id: &str) -> Result<DestroyOutcome> {
    let outcome = client.destroy(public_id).await?;
    if outcome != DestroyOutcome::Ok {
        warn!(public_id, ?outcome, "nothing was deleted");
    }
    Ok(outcome)
}

pub fn extract_id(url: &str) -> String {
    extract_public_id(url)
}

fn load_template(template: Option<&Path>) -> Result<BrowserTestTemplate> {
    match template {
        Some(path) => BrowserTestTemplate::load(path)
            .with_context(|| format!("Failed to load template {}", path.display())),
        None => Ok(BrowserTestTemplate::builtin()),
    }
}

pub fn placeholders(template: Option<&Path>) -> Result<Vec<String>> {
    Ok(load_template(template)?.placeholders())
}

pub struct ScaffoldArgs {
    pub values: PathBuf,
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub partial: bool,
}

/// Renders the template. Writes to `output` when given and returns the text otherwise.
pub fn scaffold(args: &ScaffoldArgs) -> Result<Option<String>> {
    let template = load_template(args.template.as_deref())?;
    let values = TemplateValues::load(&args.values).context("Failed to load template values")?;

    let rendered = if args.partial {
        template.render_partial(&values)
    } else {
        template.render(&values)?
    };

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(output = %path.display(), "browser test written");
            Ok(None)
        }
        None => Ok(Some(rendered)),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn values_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn extract_id_prints_empty_for_unversioned_urls() {
        assert_eq!(
            extract_id("https://res.cloudinary.com/demo/image/upload/v1234/avatars/test.png"),
            "avatars/test"
        );
        assert_eq!(
            extract_id("https://res.cloudinary.com/demo/image/upload/avatars/test.png"),
            ""
        );
    }

    #[test]
    fn builtin_placeholders_are_listed() {
        let names = placeholders(None).unwrap();
        assert!(names.iter().any(|n| n == "FEATURE_NAME"));
    }

    #[test]
    fn scaffold_writes_rendered_file() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("t.spec.ts");
        std::fs::write(&template, "test('{NAME}', async () => {});").unwrap();
        let values = values_file("[placeholders]\nNAME = \"works\"\n");
        let output = dir.path().join("out").join("feature.spec.ts");

        let printed = scaffold(&ScaffoldArgs {
            values: values.path().to_path_buf(),
            template: Some(template),
            output: Some(output.clone()),
            partial: false,
        })
        .unwrap();

        assert_eq!(printed, None);
        assert_eq!(
            std::fs::read_to_string(output).unwrap(),
            "test('works', async () => {});"
        );
    }

    #[test]
    fn strict_scaffold_fails_on_missing_values() {
        let values = values_file("[placeholders]\nFEATURE_NAME = \"Only one\"\n");

        let err = scaffold(&ScaffoldArgs {
            values: values.path().to_path_buf(),
            template: None,
            output: None,
            partial: false,
        })
        .unwrap_err();

        assert!(err.to_string().contains("Missing values for placeholders"));
    }

    #[test]
    fn partial_scaffold_returns_text() {
        let values = values_file("[placeholders]\nFEATURE_NAME = \"Only one\"\n");

        let rendered = scaffold(&ScaffoldArgs {
            values: values.path().to_path_buf(),
            template: None,
            output: None,
            partial: true,
        })
        .unwrap()
        .unwrap();

        assert!(rendered.contains("test.describe('Only one'"));
        assert!(rendered.contains("{STEP_1_URL}"));
    }
}
