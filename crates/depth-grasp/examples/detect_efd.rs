use depth_grasp::io::ImageBoundaryParams;
use depth_grasp::{detect, EfdGraspParams};

#[cfg(feature = "tracing")]
use depth_grasp::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false);

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: detect_efd <gray_png>");
        return Ok(());
    };

    let img = detect::load_gray(path)?;
    let result = detect::detect_efd_image(
        &img,
        &EfdGraspParams::default(),
        &ImageBoundaryParams::default(),
    )?;
    let [a, b] = result.points;
    println!(
        "contacts ({:.1}, {:.1}) and ({:.1}, {:.1}), normals {:.1} deg apart",
        a[0], a[1], b[0], b[1], result.pair.normal_angle_deg
    );

    Ok(())
}
