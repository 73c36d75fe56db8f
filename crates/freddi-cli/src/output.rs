// ─────────────────────────────────────────────────────────────────────
// Freddi-rs — Text Output
// © 2026 Freddi-rs contributors
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
//! Tab-separated text output: the per-step summary table and optional
//! radial snapshots.

use freddi_core::evolution::DiskEvolution;
use freddi_types::config::PhotometricBand;
use freddi_types::constants::{DAY, SOLAR_RADIUS};
use freddi_types::error::FreddiResult;
use freddi_types::state::StepRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Summary table, one line per step.
pub struct SummaryWriter<W: Write> {
    out: W,
}

impl<W: Write> SummaryWriter<W> {
    /// Write the header: column names, units, outer radius [cm] and the
    /// invocation.
    pub fn new(
        mut out: W,
        bands: &[PhotometricBand],
        r_out: f64,
        invocation: &str,
    ) -> FreddiResult<Self> {
        write!(out, "#t\tMdot\tLx\tH2R\tRhot\tTphout\tMdisk\tCirr\tQirr2Qvisout")?;
        for band in bands {
            write!(out, "\tm{}", band.name)?;
        }
        writeln!(out)?;
        write!(out, "#days\tg/s\terg/s\tfloat\tRsun\tK\tg\tfloat\tfloat")?;
        for _ in bands {
            write!(out, "\tmag")?;
        }
        writeln!(out)?;
        writeln!(out, "# r_out = {r_out:e}")?;
        writeln!(out, "# {invocation}")?;
        Ok(SummaryWriter { out })
    }

    pub fn write_record(&mut self, record: &StepRecord) -> FreddiResult<()> {
        write!(
            self.out,
            "{}\t{:e}\t{:e}\t{:e}\t{}\t{}\t{:e}\t{:e}\t{:e}",
            record.time / DAY,
            record.mdot_in,
            record.lx,
            record.h_to_r_out,
            record.r_out / SOLAR_RADIUS,
            record.tph_out,
            record.m_disk,
            record.c_irr,
            record.qirr_to_qvis_out,
        )?;
        for m in &record.magnitudes {
            write!(self.out, "\t{m}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    pub fn flush(&mut self) -> FreddiResult<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl SummaryWriter<BufWriter<File>> {
    pub fn create(
        path: &Path,
        bands: &[PhotometricBand],
        r_out: f64,
        invocation: &str,
    ) -> FreddiResult<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), bands, r_out, invocation)
    }
}

/// `DIR/PREFIX.dat`
pub fn summary_path(dir: &str, prefix: &str) -> PathBuf {
    Path::new(dir).join(format!("{prefix}.dat"))
}

/// `DIR/PREFIX_<step>.dat`
pub fn snapshot_path(dir: &str, prefix: &str, step: usize) -> PathBuf {
    Path::new(dir).join(format!("{prefix}_{step}.dat"))
}

/// Radial structure after the last step, active indices from 1.
pub fn write_snapshot<W: Write>(mut out: W, disk: &DiskEvolution) -> FreddiResult<()> {
    writeln!(out, "#h\tR\tF\tW\tSigma\tTph\tTph_vis\tTirr\tHeight")?;
    writeln!(out, "#cm^2/s\tcm\tdyn*cm\tg/cm^2*cm^4/s^2\tg/cm^2\tK\tK\tK\tcm")?;
    writeln!(
        out,
        "# Time = {} Mdot_in = {:e}",
        disk.time() / DAY,
        disk.state().mdot_in
    )?;
    let grid = disk.grid();
    let (h, r, f) = (grid.h(), grid.r(), disk.torque());
    let fields = disk.fields();
    for i in 1..grid.len() {
        writeln!(
            out,
            "{:e}\t{:e}\t{:e}\t{:e}\t{:e}\t{}\t{}\t{}\t{:e}",
            h[i],
            r[i],
            f[i],
            fields.w[i],
            fields.sigma[i],
            fields.tph[i],
            fields.tph_vis[i],
            fields.tirr[i],
            fields.height[i],
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_snapshot_file(path: &Path, disk: &DiskEvolution) -> FreddiResult<()> {
    let file = File::create(path)?;
    write_snapshot(BufWriter::new(file), disk)
}
