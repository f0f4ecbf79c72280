use std::io;

use robtarget_gen::config::prompt_limits;
use robtarget_gen::format::format_points;
use robtarget_gen::output::{FileKind, OutputLayout, write_outputs};
use robtarget_gen::sampler::SamplerOptions;
use robtarget_gen::{ALIGN_TARGETS, generate};

fn main() {
    robtarget_gen::init_logger();
    if let Err(err) = run() {
        eprintln!("robtarget_cli error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let input = prompt_limits(&mut stdin.lock(), &mut stdout)
        .map_err(|e| format!("read limits: {e}"))?;

    let mut rng = rand::rng();
    let generation = generate(
        ALIGN_TARGETS,
        SamplerOptions::with_limits(input.limits),
        &mut rng,
    )
    .map_err(|e| e.to_string())?;

    let layout = OutputLayout::new(".");
    let written = write_outputs(&layout, &generation.points, &generation.groups)
        .map_err(|e| e.to_string())?;

    for file in &written {
        match file.kind {
            FileKind::Group => println!(
                "created {} with {} points",
                file.path.display(),
                file.points
            ),
            FileKind::Summary => println!("created summary {}", file.path.display()),
            FileKind::Flat => {}
        }
    }

    println!("\nAll generated points:");
    for line in format_points(&generation.points, &layout.prefix) {
        println!("{line}");
    }

    if let Some(flat) = written.iter().find(|file| file.kind == FileKind::Flat) {
        println!("\nwrote {}", flat.path.display());
    }

    Ok(())
}
