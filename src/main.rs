use anyhow::{Context, Result};
use clap::Parser;

use maze_search::algorithms::search;
use maze_search::config::Config;
use maze_search::grid::Grid;
use maze_search::render::{self, AnimationOptions, AnimationOutput};
use maze_search::statistics::{optimal_path_length, print_comparison, SearchReport};
use std::time::Duration;
use tracing::{debug, warn};

fn main() -> Result<()> {
    let config = Config::parse();

    let default_filter = if config.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let grid = if config.random {
        Grid::random(config.width, config.height, config.num_walls, config.seed)
            .context("could not generate a random maze")?
    } else {
        let path = config.map_path();
        Grid::from_file(&path).with_context(|| format!("could not load map {}", path.display()))?
    };

    let optimal = optimal_path_length(&grid);

    if !config.quiet {
        println!("Map Size: {}x{}", grid.width(), grid.height());
        println!("Start: {:?}, Goal: {:?}", grid.start, grid.goal);
        println!("Testing Maze Algorithms...\n");
    }

    let animation = AnimationOptions {
        format: config.format,
        delay: Duration::from_millis(config.delay_ms),
        trailing_frames: config.trailing_frames,
        cell_size: config.cell_size,
        output_dir: config.output_dir.clone(),
    };

    let mut reports = Vec::with_capacity(config.algorithm.len());
    for (i, &method) in config.algorithm.iter().enumerate() {
        let outcome = search(&grid, method);
        let report = SearchReport::new(method, &outcome, optimal);
        println!("{}", report.summary_line(i + 1));
        if let Some(actions) = &outcome.actions {
            let moves: Vec<&str> = actions.iter().map(|a| a.name()).collect();
            debug!(algorithm = %method, moves = %moves.join(" "), "route");
        }
        reports.push(report);

        if config.no_visualization {
            continue;
        }

        // Rendering problems are reported but never discard the results above.
        let title = method.label();
        let rendered = if config.animate {
            render::animate(
                &grid,
                outcome.path.as_deref(),
                &outcome.history,
                title,
                &animation,
            )
            .map(|output| match output {
                AnimationOutput::Played { frames } => format!("played {} frames", frames),
                AnimationOutput::Written(file) => format!("saved {}", file.display()),
            })
        } else {
            render::write_static(
                &grid,
                outcome.path.as_deref(),
                title,
                &config.output_dir,
                config.cell_size,
            )
            .map(|file| {
                format!(
                    "{} saved to {}",
                    render::title_line(title, outcome.path.as_deref()),
                    file.display()
                )
            })
        };
        match rendered {
            Ok(message) if !config.quiet => println!("   {}", message),
            Ok(_) => {}
            Err(err) => warn!(algorithm = %method, %err, "rendering failed"),
        }
    }

    if !config.quiet {
        print_comparison(&reports);
    }

    Ok(())
}
