//! RSA key material for signing and verifying auth tokens.
//!
//! Both keys are read once at startup and shared read-only afterwards.

use std::path::{Path, PathBuf};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{json, Value};

use crate::errors::AppError;

#[derive(Clone)]
pub struct KeyMaterial {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyMaterial {
    /// Reads both PEM files and checks that they form a working RS256 pair.
    /// Relative paths resolve against the process working directory.
    pub fn load(private_path: &Path, public_path: &Path) -> Result<Self, AppError> {
        let encoding = load_private_key(private_path)?;
        let decoding = load_public_key(public_path)?;
        check_pair(&encoding, &decoding)?;

        tracing::info!(
            private = %private_path.display(),
            public = %public_path.display(),
            "loaded token signing keys"
        );
        Ok(Self { encoding, decoding })
    }

    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, AppError> {
        let encoding = parse_private_key(private_pem)?;
        let decoding = parse_public_key(public_pem)?;
        check_pair(&encoding, &decoding)?;
        Ok(Self { encoding, decoding })
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

pub fn load_private_key(path: &Path) -> Result<EncodingKey, AppError> {
    let pem = read_pem(path)?;
    parse_private_key(&pem)
        .map_err(|e| AppError::KeyLoad(format!("{}: {e}", path.display())))
}

pub fn load_public_key(path: &Path) -> Result<DecodingKey, AppError> {
    let pem = read_pem(path)?;
    parse_public_key(&pem)
        .map_err(|e| AppError::KeyLoad(format!("{}: {e}", path.display())))
}

fn parse_private_key(pem: &[u8]) -> Result<EncodingKey, AppError> {
    expect_label(pem, &["PRIVATE KEY", "RSA PRIVATE KEY"])?;
    EncodingKey::from_rsa_pem(pem).map_err(|e| AppError::KeyLoad(e.to_string()))
}

fn parse_public_key(pem: &[u8]) -> Result<DecodingKey, AppError> {
    expect_label(pem, &["PUBLIC KEY", "RSA PUBLIC KEY"])?;
    DecodingKey::from_rsa_pem(pem).map_err(|e| AppError::KeyLoad(e.to_string()))
}

fn resolve(path: &Path) -> Result<PathBuf, AppError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| AppError::KeyLoad(format!("cannot resolve working directory: {e}")))?;
    Ok(cwd.join(path))
}

fn read_pem(path: &Path) -> Result<Vec<u8>, AppError> {
    let full = resolve(path)?;
    std::fs::read(&full).map_err(|e| AppError::KeyLoad(format!("{}: {e}", full.display())))
}

fn expect_label(pem: &[u8], labels: &[&str]) -> Result<(), AppError> {
    let text = std::str::from_utf8(pem)
        .map_err(|_| AppError::KeyLoad("key file is not valid utf-8".into()))?;
    let found = labels
        .iter()
        .any(|l| text.contains(&format!("-----BEGIN {l}-----")));
    if !found {
        return Err(AppError::KeyLoad(format!(
            "expected a PEM block labelled {}",
            labels.join(" or ")
        )));
    }
    Ok(())
}

// PEM parsing alone does not touch the key bytes, so sign and verify once to
// surface malformed or mismatched keys at startup.
fn check_pair(encoding: &EncodingKey, decoding: &DecodingKey) -> Result<(), AppError> {
    let signed = encode(
        &Header::new(Algorithm::RS256),
        &json!({ "check": true }),
        encoding,
    )
    .map_err(|e| AppError::KeyLoad(format!("private key cannot sign: {e}")))?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    validation.validate_aud = false;

    decode::<Value>(&signed, decoding, &validation)
        .map_err(|e| AppError::KeyLoad(format!("public key does not match private key: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    #[test]
    fn loads_matching_pair() {
        let keys = KeyMaterial::load(&fixture("app.rsa"), &fixture("app.rsa.pub"));
        assert!(keys.is_ok());
    }

    #[test]
    fn missing_file_is_key_load_error() {
        let err = load_private_key(&fixture("does-not-exist.rsa")).err().unwrap();
        assert!(matches!(err, AppError::KeyLoad(_)));
    }

    #[test]
    fn public_key_is_not_accepted_as_private_key() {
        let err = load_private_key(&fixture("app.rsa.pub")).err().unwrap();
        assert!(matches!(err, AppError::KeyLoad(_)));
    }

    #[test]
    fn private_key_is_not_accepted_as_public_key() {
        let err = load_public_key(&fixture("app.rsa")).err().unwrap();
        assert!(matches!(err, AppError::KeyLoad(_)));
    }

    #[test]
    fn garbage_pem_is_rejected() {
        let truncated = b"-----BEGIN PUBLIC KEY-----\nMIIBIjAN...\n-----END PUBLIC KEY-----";
        let private = std::fs::read(fixture("app.rsa")).unwrap();
        let err = KeyMaterial::from_pem(&private, truncated).err().unwrap();
        assert!(matches!(err, AppError::KeyLoad(_)));
    }

    #[test]
    fn mismatched_pair_is_rejected() {
        let err = KeyMaterial::load(&fixture("other.rsa"), &fixture("app.rsa.pub"))
            .err()
            .unwrap();
        assert!(matches!(err, AppError::KeyLoad(_)));
    }
}
