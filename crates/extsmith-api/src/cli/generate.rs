//! One-shot bundle generation from a requirements JSON file.

use std::path::{Path, PathBuf};

use anyhow::Context;

use extsmith_core::bundle::generator::BundleGenerator;
use extsmith_infra::config::{load_global_config, resolve_output_root};
use extsmith_infra::filesystem::{resolve_data_dir, LocalBundleStore};
use extsmith_types::requirements::Requirements;

/// Run the generator against a requirements file and print the zip path.
pub async fn run_generate(requirements_path: &Path, out: Option<PathBuf>) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(requirements_path)
        .await
        .with_context(|| format!("failed to read {}", requirements_path.display()))?;
    let requirements: Requirements = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", requirements_path.display()))?;

    let output_root = match out {
        Some(dir) => dir,
        None => {
            let data_dir = resolve_data_dir();
            let config = load_global_config(&data_dir).await;
            resolve_output_root(&config, &data_dir)
        }
    };
    tokio::fs::create_dir_all(&output_root).await?;

    let generator = BundleGenerator::new(LocalBundleStore::new(output_root.clone()));
    let result = generator.generate(&requirements).await?;

    println!("{}", output_root.join(result.zip_path).display());
    Ok(())
}
