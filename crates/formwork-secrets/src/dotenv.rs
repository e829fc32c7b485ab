//! Dotenv file export
//!
//! Renders loaded secrets into a `.env`-style file for local development.
//! An existing file is never replaced unless the overwrite flag is set.

use crate::error::{Result, SecretsError};
use crate::store::SecretValue;
use std::path::Path;
use tracing::info;

/// Render loaded secrets as dotenv content
///
/// Plain secrets use the env key derived from their secret name; map
/// secrets contribute one line per entry, keyed by their own field names.
pub fn render(secrets: &[(String, SecretValue)]) -> String {
    let mut content = String::new();
    content.push_str(&format!(
        "# Generated by formwork at {}\n# Do not commit this file\n",
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    ));

    for (name, value) in secrets {
        content.push('\n');
        content.push_str(&format!("# {}\n", name));
        match value {
            SecretValue::Plain(secret) => {
                content.push_str(&format!("{}={}\n", env_key(name), quote(secret)));
            }
            SecretValue::Map(map) => {
                for (field, secret) in map {
                    content.push_str(&format!("{}={}\n", env_key(field), quote(secret)));
                }
            }
        }
    }

    content
}

/// Write the rendered dotenv file
///
/// Refuses to replace an existing file unless `overwrite` is set.
pub async fn write_env_file(
    path: &Path,
    secrets: &[(String, SecretValue)],
    overwrite: bool,
) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(SecretsError::FileExists(path.to_path_buf()));
    }

    let content = render(secrets);
    tokio::fs::write(path, content).await?;

    info!(path = %path.display(), count = secrets.len(), "Wrote dotenv file");
    Ok(())
}

/// Derive an env var key from a secret or field name
///
/// Uppercased, with every non-alphanumeric character replaced by `_`:
/// `media-dev/database` → `MEDIA_DEV_DATABASE`.
fn env_key(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Quote a value when it would break line-based parsing
fn quote(value: &str) -> String {
    let needs_quoting = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '#' || c == '"' || c == '\'');

    if needs_quoting {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_env_key() {
        assert_eq!(env_key("media-dev/database"), "MEDIA_DEV_DATABASE");
        assert_eq!(env_key("api_token"), "API_TOKEN");
        assert_eq!(env_key("simple"), "SIMPLE");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote("has space"), "\"has space\"");
        assert_eq!(quote("has\"quote"), "\"has\\\"quote\"");
        assert_eq!(quote(""), "\"\"");
    }

    #[test]
    fn test_render_plain_and_map() {
        let secrets = vec![
            (
                "api-token".to_string(),
                SecretValue::Plain("tok-123".to_string()),
            ),
            (
                "database".to_string(),
                SecretValue::Map(BTreeMap::from([
                    ("db_user".to_string(), "admin".to_string()),
                    ("db_password".to_string(), "p w".to_string()),
                ])),
            ),
        ];

        let content = render(&secrets);
        assert!(content.starts_with("# Generated by formwork at "));
        assert!(content.contains("API_TOKEN=tok-123\n"));
        assert!(content.contains("DB_USER=admin\n"));
        assert!(content.contains("DB_PASSWORD=\"p w\"\n"));
    }

    #[tokio::test]
    async fn test_write_env_file_refuses_to_overwrite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(".env");
        std::fs::write(&path, "EXISTING=1\n").unwrap();

        let secrets = vec![(
            "api-token".to_string(),
            SecretValue::Plain("tok-123".to_string()),
        )];

        let result = write_env_file(&path, &secrets, false).await;
        assert!(matches!(result, Err(SecretsError::FileExists(_))));
        // The existing file is untouched
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "EXISTING=1\n");

        write_env_file(&path, &secrets, true).await.unwrap();
        assert!(
            std::fs::read_to_string(&path)
                .unwrap()
                .contains("API_TOKEN=tok-123")
        );
    }
}
