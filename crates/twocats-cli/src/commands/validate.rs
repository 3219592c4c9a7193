use std::path::Path;

use anyhow::{bail, Context, Result};
use twocats_core::form::{validate, FieldName, FieldValues};

/// Read form values from a TOML file with `name`, `email`, `service` and `message` keys
pub async fn load_values(path: &Path) -> Result<FieldValues> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let values = toml::from_str(&content)
        .with_context(|| format!("parsing form values in {}", path.display()))?;
    Ok(values)
}

pub fn run(values: &FieldValues) -> Result<()> {
    let errors = validate(values);

    for field in FieldName::ALL {
        let status = match errors.iter().find(|e| e.field() == field) {
            Some(error) => format!("✗ {}", error),
            None => "✓".to_string(),
        };
        println!("  {:<8} {}", field.as_str(), status);
    }

    if !errors.is_empty() {
        bail!("{} field(s) failed validation", errors.len());
    }
    println!("Form is valid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_values_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("form.toml");
        std::fs::write(
            &path,
            "name = \"Mia\"\nemail = \"mia@example.com\"\nservice = \"web\"\n",
        )
        .unwrap();

        let values = load_values(&path).await.unwrap();
        assert_eq!(values.name, "Mia");
        assert_eq!(values.service, "web");
        assert!(values.message.is_empty());

        // Message is missing
        assert!(run(&values).is_err());
    }

    #[test]
    fn test_valid_values_pass() {
        let values = FieldValues {
            name: "Mia".to_string(),
            email: "mia@example.com".to_string(),
            service: "web".to_string(),
            message: "We need a new landing page".to_string(),
        };
        assert!(run(&values).is_ok());
    }
}
