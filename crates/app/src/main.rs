use std::path::PathBuf;

use clap::Parser;

const DEFAULT_OUTPUT: &str = "Inventario";

#[derive(Parser)]
#[command(
    name = "inventario",
    about = "Consolidate barcode/QR scanner exports into one inventory workbook"
)]
struct Cli {
    /// Scanner export files (.csv); finished goods and coils may be mixed.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Base name of the output workbook, without the .xlsx extension.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut consolidated = Vec::new();
    let mut imported_files = 0usize;

    // Each file stands alone: a bad one is reported and skipped, the rest
    // keep going.
    for path in &cli.files {
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("skipping {}: {e}", path.display());
                continue;
            }
        };

        match inventario_import::import_bytes(&bytes, &label) {
            Ok(records) => {
                tracing::info!("{}: {} record(s)", path.display(), records.len());
                if !records.is_empty() {
                    imported_files += 1;
                }
                consolidated.extend(records);
            }
            Err(e) => tracing::error!("skipping {}: {e}", path.display()),
        }
    }

    if consolidated.is_empty() {
        tracing::warn!("files were read, but no valid data was found");
        return Ok(());
    }

    let base = cli.output.trim();
    let base = if base.is_empty() { DEFAULT_OUTPUT } else { base };
    let artifact = format!("{base}.xlsx");

    let workbook = inventario_export::write_workbook(&consolidated)?;
    std::fs::write(&artifact, workbook)?;

    tracing::info!(
        "{imported_files} file(s) consolidated into {artifact} ({} records)",
        consolidated.len()
    );
    Ok(())
}
