//! Key management commands.
//!
//! `quire keys generate` - Generate a new HS256 signing secret.

use quire_jwt::SigningKey;
use quire_jwt::secret::generate_secret;
use std::fs;
use std::path::PathBuf;

/// Generate a new signing secret of `length` bytes, printed or written as hex.
pub fn generate(length: usize, output: Option<PathBuf>) -> anyhow::Result<()> {
    anyhow::ensure!(length > 0, "Secret length must be at least 1 byte");

    let key = SigningKey::new(generate_secret(length));

    if let Some(output_path) = output {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, key.to_hex())?;

        println!("✔ Generated {}-byte signing secret:", key.len());
        println!("  Secret: {}", output_path.display());
        println!();
        println!("⚠️  Keep this secret secure! Never commit it to version control.");
        println!();
        println!("Use it with:");
        println!("  quire token issue --key {}", output_path.display());
    } else {
        println!("{}", key.to_hex());
    }

    Ok(())
}
