use chesster::board::slice_board;
use chesster::detect;
use chesster::io::VisionConfig;

#[cfg(feature = "tracing")]
use chesster::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use chesster::core::init_from_env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false);
    #[cfg(not(feature = "tracing"))]
    init_from_env()?;

    let Some(arg) = std::env::args().nth(1) else {
        eprintln!("Usage: locate_board <image_path | config.json>");
        return Ok(());
    };

    let cfg = if arg.ends_with(".json") {
        VisionConfig::load_json(&arg)?
    } else {
        VisionConfig::new(arg)
    };
    let params = cfg.build_params();

    let img = detect::load_rgb(&cfg.image_path)?;
    let Some(region) = detect::locate_board(&img, &params) else {
        println!("no board detected");
        return Ok(());
    };
    println!("board: {region}");

    let tiles = slice_board(&detect::rgb_view(&img), &region);
    for tile in &tiles {
        println!(
            "{} at ({}, {}) {}x{}",
            tile.square, tile.origin.0, tile.origin.1, tile.image.width, tile.image.height
        );
    }
    if let Some(dir) = cfg.tiles_dir.as_ref() {
        detect::save_tiles(&tiles, dir)?;
    }

    Ok(())
}
