use anyhow::{Context, Result};
use markdown_weave_config::Config;
use markdown_weave_engine::frames::Node;
use markdown_weave_engine::{CmarkEngine, MarkdownComponent};
use std::{env, path::Path, path::PathBuf, process};

#[derive(Debug, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    fragments: bool,
    tree: PathBuf,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut config = None;
    let mut fragments = false;
    let mut tree = None;

    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(rest.next()?)),
            "--fragments" => fragments = true,
            _ if tree.is_none() && !arg.starts_with("--") => tree = Some(PathBuf::from(arg)),
            _ => return None,
        }
    }

    Some(Args {
        config,
        fragments,
        tree: tree?,
    })
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => {
            let expanded = Config::expand_path(path)
                .with_context(|| format!("Could not expand config path '{}'", path.display()))?;
            let config = Config::load_from_path(&expanded)?
                .with_context(|| format!("Config file '{}' not found", expanded.display()))?;
            Some(config)
        }
        None => Config::load()?,
    };

    Ok(loaded.unwrap_or_else(|| {
        log::info!(
            "No config file at {}, using defaults",
            Config::config_path().display()
        );
        Config::default()
    }))
}

fn render_file(tree: &Path, config: &Config, fragments: bool) -> Result<String> {
    let json = std::fs::read_to_string(tree)
        .with_context(|| format!("Failed to read host tree '{}'", tree.display()))?;
    let nodes: Vec<Node> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse host tree '{}'", tree.display()))?;
    let frames = Node::into_frames(nodes)
        .with_context(|| format!("Malformed host tree '{}'", tree.display()))?;
    log::info!("Weaving {} frames from {}", frames.len(), tree.display());

    let component = MarkdownComponent::new(
        CmarkEngine::new(config.extensions),
        config.component_options(),
    );

    if fragments {
        Ok(serde_json::to_string_pretty(&component.render(&frames))?)
    } else {
        Ok(component.render_html(&frames))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(parsed) = parse_args(&args) else {
        let program = args.first().map_or("markdown-weave-cli", String::as_str);
        eprintln!("Usage: {program} [--config <config.toml>] [--fragments] <tree.json>");
        eprintln!(
            "Settings are read from {} when --config is not given",
            Config::config_path().display()
        );
        process::exit(1);
    };

    let config = load_config(parsed.config.as_deref())?;
    let output = render_file(&parsed.tree, &config, parsed.fragments)?;
    println!("{output}");

    Ok(())
}
