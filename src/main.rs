
use life_term::{
    config::Args,
    draw::App,
    load,
};

use std::{
    fs::File,
    io::{self, stdin},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    init_tracing();

    let config = Args::parse().into_config()?;
    let (h, w) = (config.height, config.width);

    let field = match &config.seed {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening seed file {}", path.display()))?;
            load::read_grid(file, h, w)
        }
        None => load::read_grid(stdin().lock(), h, w),
    }
    .context("loading seed grid")?;

    info!(population = field.population(), "seed loaded");

    let mut a = App::from_config(field, &config);
    let summary = if config.headless {
        a.run_headless(&mut io::stdout().lock())?
    } else {
        a.run()?
    };

    info!(
        generations = summary.generations,
        population = summary.population,
        settled = summary.settled,
        "simulation finished"
    );
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("life_term=warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
