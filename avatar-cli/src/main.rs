use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod settings;

#[derive(Parser)]
#[command(
    name = "avatar-cli",
    about = "Manage Cloudinary avatars and scaffold Playwright browser tests"
)]
struct Opts {
    /// Extra settings file, layered over ./avatar-cli.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Upload an image as a user's avatar and print the result as JSON
    Upload {
        file: PathBuf,
        #[arg(long)]
        user_id: String,
    },
    /// Delete an avatar by public id
    Delete { public_id: String },
    /// Print the public id contained in a delivery URL
    ExtractId { url: String },
    /// List the placeholders of a browser test template
    Placeholders {
        #[arg(long)]
        template: Option<PathBuf>,
    },
    /// Render a browser test from a template and a TOML file of values
    Scaffold {
        #[arg(long)]
        values: PathBuf,
        #[arg(long)]
        template: Option<PathBuf>,
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Keep placeholders without a value instead of failing
        #[arg(long)]
        partial: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename(".env.local").ok();

    let opts = Opts::parse();
    let settings =
        settings::read_settings(opts.config.as_deref()).context("Failed to read settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match opts.command {
        Command::Upload { file, user_id } => {
            let client = commands::build_client(&settings)?;
            let result = commands::upload(&client, &file, &user_id).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Delete { public_id } => {
            let client = commands::build_client(&settings)?;
            let outcome = commands::delete(&client, &public_id).await?;
            println!("{:?}", outcome);
        }
        Command::ExtractId { url } => {
            println!("{}", commands::extract_id(&url));
        }
        Command::Placeholders { template } => {
            for name in commands::placeholders(template.as_deref())? {
                println!("{name}");
            }
        }
        Command::Scaffold {
            values,
            template,
            output,
            partial,
        } => {
            let args = commands::ScaffoldArgs {
                values,
                template,
                output,
                partial,
            };
            if let Some(rendered) = commands::scaffold(&args)? {
                print!("{rendered}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upload_command() {
        let opts = Opts::try_parse_from([
            "avatar-cli",
            "upload",
            "me.png",
            "--user-id",
            "user_123",
        ])
        .unwrap();

        assert_eq!(
            opts.command,
            Command::Upload {
                file: PathBuf::from("me.png"),
                user_id: "user_123".to_string(),
            }
        );
    }

    #[test]
    fn upload_requires_user_id() {
        assert!(Opts::try_parse_from(["avatar-cli", "upload", "me.png"]).is_err());
    }

    #[test]
    fn config_flag_is_global() {
        let opts = Opts::try_parse_from([
            "avatar-cli",
            "extract-id",
            "https://example.com/v1/a.png",
            "--config",
            "local.toml",
        ])
        .unwrap();

        assert_eq!(opts.config, Some(PathBuf::from("local.toml")));
    }

    #[test]
    fn scaffold_flags() {
        let opts = Opts::try_parse_from([
            "avatar-cli",
            "scaffold",
            "--values",
            "feature.toml",
            "-o",
            "tests/feature.spec.ts",
            "--partial",
        ])
        .unwrap();

        assert_eq!(
            opts.command,
            Command::Scaffold {
                values: PathBuf::from("feature.toml"),
                template: None,
                output: Some(PathBuf::from("tests/feature.spec.ts")),
                partial: true,
            }
        );
    }
}
