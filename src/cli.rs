use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, PartialEq, Parser)]
#[command(about = "Add Form Factor to UFO")]
pub struct Cli {
    /// Original UFO Model
    #[arg(value_name = "UFO")]
    pub ufo: Option<PathBuf>,

    /// Form Factor Name
    #[arg(short = 'f', long = "formfactor", value_name = "FORMFACTOR")]
    pub form_factor: String,

    /// Directory holding the form factor bundles
    #[arg(long, default_value = "FormFactors")]
    pub form_factors_dir: PathBuf,

    /// Compare the hash of every copied file against its source
    #[arg(long, default_value = "false")]
    pub verify: bool,

    /// Do not show progress bars
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Run the checks and list the files that would be copied
    #[arg(long, default_value = "false")]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_and_short_flag() {
        let cli = Cli::try_parse_from(["add-form-factor", "model", "-f", "X"]).unwrap();

        assert_eq!(cli.ufo, Some(PathBuf::from("model")));
        assert_eq!(cli.form_factor, "X");
        assert_eq!(cli.form_factors_dir, PathBuf::from("FormFactors"));
        assert!(!cli.verify);
        assert!(!cli.dry_run);
    }

    #[test]
    fn ufo_is_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["add-form-factor", "--formfactor", "X"]).unwrap();

        assert_eq!(cli.ufo, None);
    }

    #[test]
    fn form_factor_is_required() {
        let err = Cli::try_parse_from(["add-form-factor", "model"]).unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn form_factor_needs_a_value() {
        assert!(Cli::try_parse_from(["add-form-factor", "model", "-f"]).is_err());
    }
}
