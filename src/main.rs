use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use log::info;

use growth_ref::utils::validate_directory;
use growth_ref::{LoaderOptions, ReferenceStoreBuilder, SourceManifest, load_manifest};

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let Some(tables_dir) = args.next().map(PathBuf::from) else {
        eprintln!("Usage: growth-ref <tables-dir> [manifest.json]");
        std::process::exit(2);
    };
    let manifest_path = args.next().map(PathBuf::from);

    validate_directory(&tables_dir)?;

    let manifest = match &manifest_path {
        Some(path) => SourceManifest::from_json_path(path)
            .with_context(|| format!("reading manifest {}", path.display()))?,
        None => {
            info!("No manifest given, using the standard WHO table set");
            SourceManifest::who_default()
        }
    };

    let start = Instant::now();
    let mut builder = ReferenceStoreBuilder::new();
    let report = load_manifest(&tables_dir, &manifest, &LoaderOptions::default(), &mut builder);

    for load in &report.loads {
        info!(
            "{} [{} {} {}]: header at row {}, {} LMS / {} z-band / {} percentile rows, {} dropped",
            load.path.display(),
            load.version,
            load.sex,
            load.kind.as_str(),
            load.header_row,
            load.lms_rows,
            load.z_band_rows,
            load.percentile_rows,
            load.rows_dropped
        );
    }

    let store = builder.build();
    if store.is_empty() {
        anyhow::bail!("no reference data loaded from {}", tables_dir.display());
    }
    store
        .ensure_series(&manifest.declared_series())
        .context("a manifest-declared series is missing from the loaded store")?;

    for (version, sex, rows) in store.coverage() {
        info!("Series {version}/{sex}: {rows} reference points");
    }
    info!(
        "Reference store ready: {} points from {} files ({} omissions, {} files skipped) in {:?}",
        store.len(),
        report.loads.len(),
        report.omission_count(),
        report.skipped.len(),
        start.elapsed()
    );

    Ok(())
}
