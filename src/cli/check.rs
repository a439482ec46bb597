use anyhow::Result;
use log::info;

use super::design::load;
use super::RunArgs;

/// Validate a run's tables against its replicate map
pub fn run(args: RunArgs) -> Result<()> {
    info!("mqprep Consistency Check");
    info!("Run: {}", args.dir.display());

    match load(&args) {
        Ok(loaded) => {
            let report = loaded.pipeline.report(
                &loaded.identifiers,
                &loaded.resolution,
                loaded.layout.run_dir().display().to_string(),
            );

            #[cfg(feature = "colorized_output")]
            {
                println!("{}", report.format_colored());
            }

            #[cfg(not(feature = "colorized_output"))]
            {
                println!("{}", report);
            }

            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Check error: {:#}", e);
            std::process::exit(1);
        }
    }
}
