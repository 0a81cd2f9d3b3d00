use depth_grasp::detect;
use depth_grasp::MaskGraspParams;

#[cfg(feature = "tracing")]
use depth_grasp::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false);

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: detect_mask <depth_png>");
        return Ok(());
    };

    let depth = detect::load_depth(path, true)?;
    let result = detect::detect_mask(&depth, &MaskGraspParams::default())?;
    let best = &result.best;
    println!(
        "grasp at ({:.1}, {:.1}), {:.1} deg, mask width {}, score {:.1}",
        best.x, best.y, best.angle_deg, best.mask_width, best.score
    );
    println!(
        "{} candidates over {} angles",
        result.candidates.len(),
        result.angles.len()
    );

    Ok(())
}
