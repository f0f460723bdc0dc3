//! Measurement rows and end-of-run dump files.
//!
//! Measurement file `cube-<name>.out` is appended to, one TSV row per
//! measurement, no header:
//! `volume boundary mean_r mean_r2 mean_r3 mean_r4 lambda alpha`.

use anyhow::{Context, Result};
use cubeball::dump;
use cubeball::mc::Couplings;
use cubeball::observables::{radius_moments, RadiusMoments};
use cubeball::Ball;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Column names of the measurement file, in order.
pub const COLUMNS: [&str; 8] = [
    "volume", "boundary", "mean_r", "mean_r2", "mean_r3", "mean_r4", "lambda", "alpha",
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub volume: usize,
    pub boundary: usize,
    pub moments: RadiusMoments,
    pub lambda: f64,
    pub alpha: f64,
}

impl Measurement {
    pub fn take(ball: &Ball, couplings: &Couplings) -> Self {
        Self {
            volume: ball.volume(),
            boundary: ball.boundary_len(),
            moments: radius_moments(ball),
            lambda: couplings.lambda,
            alpha: couplings.alpha,
        }
    }

    pub fn write_tsv(&self, mut out: impl Write) -> io::Result<()> {
        let [r, r2, r3, r4] = self.moments.as_array();
        writeln!(
            out,
            "{}\t{}\t{r}\t{r2}\t{r3}\t{r4}\t{}\t{}",
            self.volume, self.boundary, self.lambda, self.alpha
        )
    }
}

/// Sink for measurement rows; counts what it wrote.
pub struct MeasurementWriter<W: Write> {
    out: W,
    rows: usize,
}

impl<W: Write> MeasurementWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, rows: 0 }
    }

    pub fn record(&mut self, ball: &Ball, couplings: &Couplings) -> io::Result<Measurement> {
        let m = Measurement::take(ball, couplings);
        m.write_tsv(&mut self.out)?;
        self.rows += 1;
        Ok(m)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// File names of one run, all under `dir`.
#[derive(Clone, Debug)]
pub struct RunFiles {
    pub measurements: PathBuf,
    pub boundary: PathBuf,
    pub cubulation: PathBuf,
    pub density: PathBuf,
}

impl RunFiles {
    pub fn new(dir: &Path, name: &str) -> Self {
        Self {
            measurements: dir.join(format!("cube-{name}.out")),
            boundary: dir.join(format!("Boundary-{name}.out")),
            cubulation: dir.join(format!("Cubulation-{name}.out")),
            density: dir.join(format!("CubeDensity-{name}.out")),
        }
    }

    pub fn all(&self) -> [&Path; 4] {
        [
            &self.measurements,
            &self.boundary,
            &self.cubulation,
            &self.density,
        ]
    }

    /// Open the measurement file for appending.
    pub fn open_measurements(&self) -> Result<MeasurementWriter<BufWriter<File>>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.measurements)
            .with_context(|| format!("opening {}", self.measurements.display()))?;
        Ok(MeasurementWriter::new(BufWriter::new(file)))
    }

    /// Overwrite the three dump files from the final state.
    pub fn write_dumps(&self, ball: &Ball) -> Result<()> {
        write_file(&self.boundary, |w| dump::write_boundary_neighbors(ball, w))?;
        write_file(&self.cubulation, |w| dump::write_cube_neighbors(ball, w))?;
        write_file(&self.density, |w| dump::write_cube_coordinates(ball, w))?;
        Ok(())
    }
}

fn write_file(path: &Path, body: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(file);
    body(&mut w)
        .and_then(|_| w.flush())
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote dump");
    Ok(())
}

/// Create `dir` if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir).with_context(|| format!("creating output dir {}", dir.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn couplings() -> Couplings {
        Couplings {
            alpha: 0.5,
            lambda: -1.25,
            epsilon: 0.0,
            target_volume: 10,
            target_area: 0,
        }
    }

    #[test]
    fn row_has_eight_tab_separated_columns() {
        let mut w = MeasurementWriter::new(Vec::new());
        let m = w.record(&Ball::new(), &couplings()).unwrap();
        assert_eq!(m.volume, 1);
        assert_eq!(m.boundary, 6);
        assert_eq!(w.rows(), 1);
        let text = String::from_utf8(w.into_inner().unwrap()).unwrap();
        assert_eq!(text, "1\t6\t0\t0\t0\t0\t-1.25\t0.5\n");
        assert_eq!(text.trim_end().split('\t').count(), COLUMNS.len());
    }

    #[test]
    fn measurements_append_across_opens() {
        let dir = tempdir().unwrap();
        let files = RunFiles::new(dir.path(), "t");
        for _ in 0..2 {
            let mut w = files.open_measurements().unwrap();
            w.record(&Ball::with_start_size(2), &couplings()).unwrap();
            w.into_inner().unwrap();
        }
        let text = fs::read_to_string(&files.measurements).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("8\t24\t"));
    }

    #[test]
    fn dumps_land_under_the_run_name() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested");
        ensure_dir(&out).unwrap();
        let files = RunFiles::new(&out, "demo");
        assert!(files.cubulation.ends_with("Cubulation-demo.out"));
        files.write_dumps(&Ball::with_start_size(2)).unwrap();
        let density = fs::read_to_string(&files.density).unwrap();
        assert_eq!(density.lines().count(), 8);
        let boundary = fs::read_to_string(&files.boundary).unwrap();
        assert_eq!(boundary.lines().count(), 24);
        assert!(files.all()[1..].iter().all(|p| p.exists()));
        assert!(!files.measurements.exists());
    }
}
