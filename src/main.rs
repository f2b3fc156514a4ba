use std::{fs, process};

use anyhow::{Context, Result, bail};
use log::info;

use panim::{
    config::PreviewConfig,
    engine::{Scene, source::SourceScene},
    export::{PresentationEncoder, render_to_file},
    player::Player,
    renderer::{Renderer, assets::Assets},
    scenes::huffman,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const PREVIEW_USAGE: &str = "panim preview <scene.json>";
const RENDER_USAGE: &str = "panim render <scene.json> <output.json>";
const HUFFMAN_USAGE: &str = "panim huffman <text> [output.json]";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config = PreviewConfig::load();

    match args.next().as_deref() {
        Some("preview") => {
            let path = args.next().context(PREVIEW_USAGE)?;
            let (scene, assets) = load(&path)?;
            preview(scene, assets, &config)
        }
        Some("render") => {
            let source_path = args.next().context(RENDER_USAGE)?;
            let output_path = args.next().context(RENDER_USAGE)?;
            let (scene, assets) = load(&source_path)?;
            render(scene, assets, &config, &output_path)
        }
        Some("huffman") => {
            let text = args.next().context(HUFFMAN_USAGE)?;
            let (scene, assets) =
                huffman::build(&text).context("Failed to build the Huffman scene")?;
            match args.next() {
                Some(output_path) => render(scene, assets, &config, &output_path),
                None => preview(scene, assets, &config),
            }
        }
        _ => bail!(
            "panim — procedural animation engine\n\nUsage:\n  {PREVIEW_USAGE}\n  {RENDER_USAGE}\n  {HUFFMAN_USAGE}"
        ),
    }
}

fn load(path: &str) -> Result<(Scene, Assets)> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let source =
        SourceScene::from_json(&json).with_context(|| format!("Failed to parse {path}"))?;
    let built = source
        .build()
        .with_context(|| format!("Invalid scene in {path}"))?;
    info!("loaded {path}");
    Ok(built)
}

fn preview(mut scene: Scene, assets: Assets, config: &PreviewConfig) -> Result<()> {
    let renderer = Renderer::new(config.contract(), (scene.width, scene.height), assets);
    let mut player = Player::new(&mut scene, &renderer, config);
    player.play()
}

fn render(mut scene: Scene, assets: Assets, config: &PreviewConfig, output_path: &str) -> Result<()> {
    let contract = config.contract();
    let renderer = Renderer::new(contract, (scene.width, scene.height), assets);
    let mut encoder = PresentationEncoder::create(output_path, contract, config.fps)?;
    let summary = render_to_file(&mut scene, &renderer, &mut encoder)
        .with_context(|| format!("Failed to render {output_path}"))?;

    eprintln!("Rendered {} frames -> {}", summary.frames, output_path);
    Ok(())
}
