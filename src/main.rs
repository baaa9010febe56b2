use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use env_logger::Env;
use log::info;

use iris_data::data::{filter, loader};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: iris-data <dataset.csv|.json|.parquet>");
    };

    let dataset = loader::load_file(Path::new(&path)).with_context(|| format!("loading {path}"))?;

    info!("loaded {} rows from {path}", dataset.len());
    info!(
        "labeled: {}, unlabeled: {}",
        filter::labeled_indices(&dataset).len(),
        filter::unlabeled_indices(&dataset).len()
    );
    for label in &dataset.species_labels {
        let selected: BTreeSet<String> = std::iter::once(label.clone()).collect();
        info!(
            "species `{label}`: {} rows",
            filter::indices_with_species(&dataset, &selected).len()
        );
    }

    Ok(())
}
