//! lagoon_inspect - load a world file and summarize it.
//!
//! Run with: cargo run --bin lagoon_inspect -- assets/pool.world --textures

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use lagoon_core::{
    load_world, Material, PointLight, PrimitiveKind, Scene, TextureCache, TextureRef,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "lagoon_inspect")]
#[command(about = "Load a world file and print a scene summary", long_about = None)]
struct Cli {
    /// World file to load
    scene: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Decode every referenced texture
    #[arg(long)]
    textures: bool,

    /// Directory for relative texture names (default: the world file's directory)
    #[arg(long)]
    texture_dir: Option<PathBuf>,
}

#[derive(Serialize)]
struct SceneSummary<'a> {
    name: &'a str,
    point_light: Option<&'a PointLight>,
    materials: &'a [Material],
    textures: Vec<TextureSummary<'a>>,
    objects: Vec<ObjectSummary<'a>>,
    triangles: usize,
    bounds: Option<[[f32; 3]; 2]>,
}

#[derive(Serialize)]
struct TextureSummary<'a> {
    #[serde(flatten)]
    texture: &'a TextureRef,
    size: Option<[u32; 2]>,
}

#[derive(Serialize)]
struct ObjectSummary<'a> {
    kind: PrimitiveKind,
    material: &'a str,
    vertices: usize,
    indices: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let scene = load_world(&cli.scene)
        .with_context(|| format!("Failed to load {}", cli.scene.display()))?;

    // Every object must resolve its material before anything is reported.
    scene.draw_list().context("Unresolved reference in scene")?;

    let sizes = if cli.textures {
        let base_dir = cli
            .texture_dir
            .clone()
            .unwrap_or_else(|| parent_dir(&cli.scene));
        Some(load_textures(&scene, base_dir)?)
    } else {
        None
    };

    let summary = summarize(&scene, sizes.as_deref());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Decode the scene's textures and return their sizes in texture-set order.
fn load_textures(scene: &Scene, base_dir: PathBuf) -> Result<Vec<[u32; 2]>> {
    log::info!("Loading textures from {}", base_dir.display());

    let mut cache = TextureCache::with_base_dir(base_dir);
    let images = cache.load_scene(scene)?;

    log::info!(
        "Decoded {} textures ({:.1} KB)",
        cache.len(),
        cache.total_size_bytes() as f32 / 1024.0
    );

    Ok(images.iter().map(|img| [img.width, img.height]).collect())
}

fn summarize<'a>(scene: &'a Scene, sizes: Option<&[[u32; 2]]>) -> SceneSummary<'a> {
    let textures = scene
        .textures
        .iter()
        .enumerate()
        .map(|(i, texture)| TextureSummary {
            texture,
            size: sizes.and_then(|s| s.get(i).copied()),
        })
        .collect();

    let objects = scene
        .objects
        .iter()
        .map(|o| ObjectSummary {
            kind: o.kind,
            material: &o.material_name,
            vertices: o.vertex_count(),
            indices: o.index_count(),
        })
        .collect();

    let bounds = scene.world_bounds();
    let bounds = (!bounds.is_empty()).then(|| [bounds.min.to_array(), bounds.max.to_array()]);

    SceneSummary {
        name: &scene.name,
        point_light: scene.point_light.as_ref(),
        materials: &scene.materials,
        textures,
        objects,
        triangles: scene.total_triangle_count(),
        bounds,
    }
}

fn print_summary(summary: &SceneSummary) {
    println!("=== Scene: {} ===", summary.name);

    match summary.point_light {
        Some(light) => println!(
            "Point light at ({:.2}, {:.2}, {:.2})",
            light.position.x, light.position.y, light.position.z
        ),
        None => println!("Point light: none"),
    }

    println!("\n--- Materials ({}) ---", summary.materials.len());
    for material in summary.materials {
        println!(
            "  {} - texture: {}, shininess: {}",
            material.name,
            material.texture().unwrap_or("none"),
            material.shininess
        );
    }

    println!("\n--- Textures ({}) ---", summary.textures.len());
    for entry in &summary.textures {
        match entry.size {
            Some([w, h]) => println!("  [{}] {} ({}x{})", entry.texture.id, entry.texture.name, w, h),
            None => println!("  [{}] {}", entry.texture.id, entry.texture.name),
        }
    }

    println!("\n--- Objects ({}) ---", summary.objects.len());
    for (i, object) in summary.objects.iter().enumerate() {
        println!(
            "  [{}] {:?} ({}) - {} vertices, {} indices",
            i, object.kind, object.material, object.vertices, object.indices
        );
    }

    println!("\nTotal triangles: {}", summary.triangles);
    if let Some([min, max]) = summary.bounds {
        println!(
            "Bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
            min[0], min[1], min[2], max[0], max[1], max[2]
        );
    }
}
