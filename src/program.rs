use log::info;

use crate::{
    checks::validate,
    cli::Cli,
    colour::{paint, BOLD, OK_BLUE, OK_GREEN, RESET, WARNING},
    error::Error,
    file_operations::{copy_tree, CopyOptions},
};

pub fn run(cli: Cli) -> Result<(), Error> {
    let plan = validate(&cli)?;
    info!("checks passed: {:?}", plan);

    let options = CopyOptions {
        verify: cli.verify,
        show_progress: !cli.quiet,
        dry_run: cli.dry_run,
        ..Default::default()
    };

    let report = copy_tree(&plan, &options)?;
    info!(
        "{} files in {} directories under {}",
        report.files.len(),
        report.directories.len(),
        plan.destination.display()
    );

    if cli.dry_run {
        println!("{}", paint(WARNING, "Dry run, nothing was copied"));

        for file in &report.files {
            println!("{}", paint(OK_BLUE, file.display()));
        }

        return Ok(());
    }

    println!(
        "{}",
        paint(
            OK_GREEN,
            format!(
                "Added form factor {}{}{}{} to {} ({} files, {} bytes)",
                BOLD,
                plan.form_factor,
                RESET,
                OK_GREEN,
                plan.ufo.display(),
                report.files.len(),
                report.bytes
            )
        )
    );

    Ok(())
}
