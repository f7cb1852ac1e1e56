//! File-level rendering: read the input, render it, write the PNG.

use std::{fs::File, path::Path};

use log::info;

use crate::{
    color::ColorSource,
    config::RenderConfig,
    draw,
    error::{Error, Result},
    progress::{NoProgress, Progress, ProgressBar},
};

/// Map a file into memory for read‑only access.
///
/// Safety rationale: the mapping is read‑only and the `File` is not mutated
/// for the lifetime of the returned map.
fn mmap_readonly(file: &File) -> std::io::Result<memmap2::Mmap> {
    // SAFETY: We create a read‑only mapping and only access it immutably.
    let map = unsafe { memmap2::MmapOptions::new().map(file)? };
    Ok(map)
}

/// Render `input` according to `config` and write the image to `output`.
pub fn run(config: &RenderConfig, input: &Path, output: &Path) -> Result<()> {
    let mut progress: Box<dyn Progress> = if config.progress {
        Box::new(ProgressBar::new())
    } else {
        Box::new(NoProgress)
    };
    run_with_progress(config, input, output, progress.as_mut())
}

/// As [`run`], reporting progress to `progress`.
pub fn run_with_progress(
    config: &RenderConfig,
    input: &Path,
    output: &Path,
    progress: &mut dyn Progress,
) -> Result<()> {
    config.validate()?;

    let file = File::open(input).map_err(|e| Error::io(input, e))?;
    let len = file.metadata().map_err(|e| Error::io(input, e))?.len();
    if len == 0 {
        return Err(Error::config(format!("{}: input is empty", input.display())));
    }
    let data = mmap_readonly(&file).map_err(|e| Error::io(input, e))?;

    let source = ColorSource::new(config.color, &data, config.block.clone())?;
    let image = draw::render(&source, &config.curve, config.size, config.layout, progress)?;
    draw::save(&image, output, config.replace_output)?;
    info!("{} -> {}", input.display(), output.display());
    Ok(())
}
