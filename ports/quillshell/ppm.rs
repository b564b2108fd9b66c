/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Binary PPM (P6) output for the rendered canvas.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use canvas::Canvas;

/// Write the canvas as a P6 PPM. The canvas is already packed RGB, which is
/// exactly the P6 raster format.
pub fn write_ppm(canvas: &Canvas, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "P6")?;
    writeln!(writer, "{} {}", canvas.width, canvas.height)?;
    writeln!(writer, "255")?;
    writer.write_all(canvas.pixels())?;
    writer.flush()
}
