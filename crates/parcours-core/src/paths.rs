use crate::error::{CaseError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const PARCOURS_DIR: &str = ".parcours";
pub const CASES_DIR: &str = ".parcours/cases";

pub const CONFIG_FILE: &str = ".parcours/config.yaml";
pub const STATE_FILE: &str = ".parcours/state.yaml";

pub const MANIFEST_FILE: &str = "manifest.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn parcours_dir(root: &Path) -> PathBuf {
    root.join(PARCOURS_DIR)
}

pub fn cases_dir(root: &Path) -> PathBuf {
    root.join(CASES_DIR)
}

pub fn case_dir(root: &Path, slug: &str) -> PathBuf {
    root.join(CASES_DIR).join(slug)
}

pub fn case_manifest(root: &Path, slug: &str) -> PathBuf {
    case_dir(root, slug).join(MANIFEST_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 64 || !slug_re().is_match(slug) {
        return Err(CaseError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_slugs() {
        for slug in ["dupont-jean", "a", "case-2024-017", "x1"] {
            validate_slug(slug).unwrap_or_else(|_| panic!("expected valid: {slug}"));
        }
    }

    #[test]
    fn invalid_slugs() {
        for slug in [
            "",
            "-starts-with-dash",
            "ends-with-dash-",
            "has spaces",
            "UPPER",
            "a_b",
        ] {
            assert!(validate_slug(slug).is_err(), "expected invalid: {slug}");
        }
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/proj/.parcours/config.yaml")
        );
        assert_eq!(
            case_manifest(root, "dupont-jean"),
            PathBuf::from("/tmp/proj/.parcours/cases/dupont-jean/manifest.yaml")
        );
    }
}
