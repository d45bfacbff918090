use std::time::Instant;
use united_colors_effect::{EffectConfig, EffectSession, Image};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let (width, height) = (1920u32, 1080u32);
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / width) as u8);
            data.push((y * 255 / height) as u8);
            data.push(((x + y) * 255 / (width + height)) as u8);
        }
    }

    let start = Instant::now();
    let image = Image::from_raw(width, height, 3, data)?;
    let mut session = EffectSession::new(image, &EffectConfig::new())?;
    println!(
        "Delta matrix for {width}x{height}: {:.3} ms\n",
        start.elapsed().as_secs_f64() * 1000.0
    );

    println!("{:<12} {:>12} {:>12}", "Intensity", "Time (ms)", "Max FPS");
    println!("{}", "-".repeat(40));

    for percent in [0, 10, 25, 50, 75, 100] {
        let start = Instant::now();
        session.set_intensity(percent)?;
        let time_ms = start.elapsed().as_secs_f64() * 1000.0;

        println!(
            "{:<12} {:>12.3} {:>12.0}",
            format!("{percent}%"),
            time_ms,
            1000.0 / time_ms.max(f64::EPSILON)
        );
    }

    Ok(())
}
