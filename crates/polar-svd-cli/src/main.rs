use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use polar_svd::{run_polar, PolarInput, PolarOptions, PolarReport};

/// Polar decomposition CLI.
#[derive(Debug, Parser)]
#[command(author, version, about = "Polar decomposition A = R·T of a square matrix via SVD")]
struct Args {
    /// Path to JSON file containing PolarInput (`{"matrix": [[...], ...]}`, row-major).
    #[arg(long)]
    input: String,

    /// Optional path to JSON PolarOptions. Defaults are used if omitted.
    #[arg(long)]
    config: Option<String>,
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(value)
}

fn write_report_json(report: &PolarReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn run_polar_from_files(input_path: &str, config_path: Option<&str>) -> Result<String> {
    let input: PolarInput = load_json_file(Path::new(input_path))?;

    let options = if let Some(cfg_path) = config_path {
        load_json_file::<PolarOptions>(Path::new(cfg_path))?
    } else {
        PolarOptions::default()
    };

    let report = run_polar(&input, &options)?;
    info!(
        "decomposed {}x{} matrix: det(R) = {:.6}, residual = {:.3e}",
        report.dim, report.dim, report.rotation_determinant, report.reconstruction_error
    );
    write_report_json(&report)
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    if let Err(err) = try_main() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    let json = run_polar_from_files(&args.input, args.config.as_deref())?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polar_svd::{PolarError, ReflectionPolicy};
    use std::{fs, path::Path};
    use tempfile::NamedTempFile;

    fn write_json<T: serde::Serialize>(value: &T, path: &Path) {
        serde_json::to_writer_pretty(fs::File::create(path).unwrap(), value).unwrap();
    }

    fn mirror_input() -> PolarInput {
        PolarInput {
            matrix: vec![
                vec![2.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, -0.5],
            ],
        }
    }

    #[test]
    fn cli_reports_decomposition_with_defaults() {
        let input_file = NamedTempFile::new().unwrap();
        write_json(&mirror_input(), input_file.path());

        let json = run_polar_from_files(input_file.path().to_str().unwrap(), None).unwrap();
        let report: PolarReport = serde_json::from_str(&json).unwrap();

        assert_eq!(report.dim, 3);
        assert!(report.reflection);
        assert!(!report.reflection_corrected);
        assert!((report.rotation_determinant + 1.0).abs() < 1e-9);
        assert!(report.reconstruction_error < 1e-9);
        assert!((report.singular_values[0] - 2.0).abs() < 1e-9);
        assert!((report.singular_values[2] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn cli_applies_config_reflection_policy() {
        let input_file = NamedTempFile::new().unwrap();
        let config_file = NamedTempFile::new().unwrap();
        write_json(&mirror_input(), input_file.path());
        write_json(
            &PolarOptions {
                reflection: ReflectionPolicy::FlipLastColumn,
                ..PolarOptions::default()
            },
            config_file.path(),
        );

        let json = run_polar_from_files(
            input_file.path().to_str().unwrap(),
            Some(config_file.path().to_str().unwrap()),
        )
        .unwrap();
        let report: PolarReport = serde_json::from_str(&json).unwrap();

        assert!(report.reflection_corrected);
        assert!((report.rotation_determinant - 1.0).abs() < 1e-9);
        // Flip residual is twice the smallest singular value.
        assert!((report.reconstruction_error - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cli_surfaces_invalid_matrix() {
        let input_file = NamedTempFile::new().unwrap();
        fs::write(input_file.path(), r#"{"matrix": [[1.0, 2.0], [3.0]]}"#).unwrap();

        let err = run_polar_from_files(input_file.path().to_str().unwrap(), None).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PolarError>(),
            Some(&PolarError::RaggedRows {
                row: 1,
                len: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn cli_reports_missing_file() {
        let err = run_polar_from_files("/nonexistent/polar-input.json", None).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }
}
