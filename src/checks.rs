use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::{cli::Cli, error::CheckFailure, path_utils::get_path};

pub const FORTRAN_DIR: &str = "Fortran";

/// Everything the copier needs once all checks have passed.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyPlan {
    pub form_factor: String,
    pub ufo: PathBuf,
    pub source: PathBuf,
    pub destination: PathBuf,
}

struct Guard<'a> {
    path: &'a Path,
    holds: fn(&Path) -> bool,
    failure: fn(PathBuf) -> CheckFailure,
}

impl Guard<'_> {
    fn check(&self) -> Result<(), CheckFailure> {
        let holds = (self.holds)(self.path);
        debug!("check {} -> {}", self.path.display(), holds);

        if holds {
            Ok(())
        } else {
            Err((self.failure)(self.path.to_path_buf()))
        }
    }
}

fn is_free(path: &Path) -> bool {
    // a dangling symlink still occupies the name
    path.symlink_metadata().is_err()
}

/// `<root>/<name>`, with any root of `name` dropped so the lookup stays under `root`.
fn form_factor_dir(root: &Path, name: &str) -> PathBuf {
    let relative = Path::new(name)
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect::<PathBuf>();

    root.join(relative)
}

/// Runs the checks in order and stops at the first one that fails.
/// Nothing on disk is modified here.
pub fn validate(cli: &Cli) -> Result<CopyPlan, CheckFailure> {
    let ufo = cli
        .ufo
        .as_ref()
        .filter(|ufo| !ufo.as_os_str().is_empty())
        .map(get_path)
        .ok_or(CheckFailure::MissingUfo)?;

    let form_factor_dir = form_factor_dir(&get_path(&cli.form_factors_dir), &cli.form_factor);
    let destination = ufo.join(FORTRAN_DIR);

    let guards = [
        Guard {
            path: &ufo,
            holds: Path::exists,
            failure: CheckFailure::UfoNotFound,
        },
        Guard {
            path: &form_factor_dir,
            holds: Path::exists,
            failure: CheckFailure::FormFactorNotFound,
        },
        Guard {
            path: &destination,
            holds: is_free,
            failure: CheckFailure::DestinationExists,
        },
    ];

    for guard in &guards {
        guard.check()?;
    }

    Ok(CopyPlan {
        form_factor: cli.form_factor.clone(),
        source: form_factor_dir.join(FORTRAN_DIR),
        ufo,
        destination,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::{tempdir, TempDir};

    use super::*;

    fn cli_for(root: &TempDir, ufo: Option<&str>, form_factor: &str) -> Cli {
        let form_factors = root.path().join("FormFactors");
        let mut args = vec!["add-form-factor".to_string()];

        if let Some(ufo) = ufo {
            args.push(root.path().join(ufo).display().to_string());
        }

        args.extend([
            "-f".to_string(),
            form_factor.to_string(),
            "--form-factors-dir".to_string(),
            form_factors.display().to_string(),
        ]);

        Cli::try_parse_from(args).unwrap()
    }

    fn setup() -> TempDir {
        let root = tempdir().expect("Failed to create temp dir");
        fs::create_dir_all(root.path().join("FormFactors/X/Fortran")).unwrap();
        fs::create_dir_all(root.path().join("model")).unwrap();
        root
    }

    #[test]
    fn missing_ufo_is_reported_first() {
        let root = setup();
        let cli = cli_for(&root, None, "does-not-exist");

        assert_eq!(validate(&cli), Err(CheckFailure::MissingUfo));
        assert_eq!(CheckFailure::MissingUfo.path(), None);
    }

    #[test]
    fn empty_ufo_counts_as_missing() {
        let mut cli = cli_for(&setup(), None, "X");
        cli.ufo = Some(PathBuf::new());

        assert_eq!(validate(&cli), Err(CheckFailure::MissingUfo));
    }

    #[test]
    fn missing_ufo_directory_names_the_path() {
        let root = setup();
        let cli = cli_for(&root, Some("nowhere"), "does-not-exist");

        let failure = validate(&cli).unwrap_err();

        assert_eq!(failure, CheckFailure::UfoNotFound(root.path().join("nowhere")));
        assert!(failure.to_string().contains("nowhere"));
        assert_eq!(failure.path(), Some(root.path().join("nowhere").as_path()));
        assert_eq!(failure.exit_code(), 1);
    }

    #[test]
    fn missing_form_factor_is_checked_before_collision() {
        let root = setup();
        fs::create_dir(root.path().join("model/Fortran")).unwrap();
        let cli = cli_for(&root, Some("model"), "Y");

        assert_eq!(
            validate(&cli),
            Err(CheckFailure::FormFactorNotFound(
                root.path().join("FormFactors/Y")
            ))
        );
    }

    #[test]
    fn existing_fortran_directory_is_a_collision() {
        let root = setup();
        fs::create_dir(root.path().join("model/Fortran")).unwrap();
        let cli = cli_for(&root, Some("model"), "X");

        let failure = validate(&cli).unwrap_err();

        assert_eq!(
            failure,
            CheckFailure::DestinationExists(root.path().join("model/Fortran"))
        );
        assert_eq!(failure.to_string(), "Fortran directory already exists in UFO");
    }

    #[cfg(unix)]
    #[test]
    fn absolute_form_factor_name_stays_under_the_root() {
        let root = setup();
        let outside = tempdir().unwrap();
        fs::create_dir(outside.path().join("Fortran")).unwrap();
        let name = outside.path().display().to_string();
        let cli = cli_for(&root, Some("model"), &name);

        let failure = validate(&cli).unwrap_err();

        let relative = outside.path().strip_prefix("/").unwrap();
        assert_eq!(
            failure,
            CheckFailure::FormFactorNotFound(root.path().join("FormFactors").join(relative))
        );
    }

    #[cfg(unix)]
    #[test]
    fn dangling_fortran_symlink_is_a_collision() {
        let root = setup();
        let link = root.path().join("model/Fortran");
        std::os::unix::fs::symlink(root.path().join("gone"), &link).unwrap();
        let cli = cli_for(&root, Some("model"), "X");

        assert_eq!(validate(&cli), Err(CheckFailure::DestinationExists(link.clone())));
        assert!(link.symlink_metadata().unwrap().file_type().is_symlink());
        assert!(!root.path().join("gone").exists());
    }

    #[test]
    fn plan_points_at_both_fortran_directories() {
        let root = setup();
        let cli = cli_for(&root, Some("model"), "X");

        let plan = validate(&cli).unwrap();

        assert_eq!(plan.form_factor, "X");
        assert_eq!(plan.ufo, root.path().join("model"));
        assert_eq!(plan.source, root.path().join("FormFactors/X/Fortran"));
        assert_eq!(plan.destination, root.path().join("model/Fortran"));
        assert!(!plan.destination.exists());
    }
}
