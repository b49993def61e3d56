//! Newline-delimited JSON log of hit records, for diffing runs by hand.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use blockray_core::{IntersectionRecord, Ray};
use serde::Serialize;

/// One traced ray and what it hit.
#[derive(Debug, Clone, Serialize)]
pub struct HitSample<'a> {
    /// Label of the shape under test.
    pub shape: &'a str,
    /// Ray origin.
    pub origin: [f64; 3],
    /// Ray direction.
    pub direction: [f64; 3],
    /// Distance, or `None` on a miss.
    pub distance: Option<f64>,
    /// Hit normal, or `None` on a miss.
    pub normal: Option<[f64; 3]>,
}

impl<'a> HitSample<'a> {
    /// Capture a ray and an optional hit.
    pub fn new(shape: &'a str, ray: &Ray, hit: Option<&IntersectionRecord>) -> Self {
        Self {
            shape,
            origin: ray.origin.to_array(),
            direction: ray.direction.to_array(),
            distance: hit.map(|r| r.distance),
            normal: hit.map(|r| r.normal.to_array()),
        }
    }
}

/// A sink that writes newline-delimited JSON to disk.
pub struct HitLogSink {
    file: File,
}

impl HitLogSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            file: File::create(path)?,
        })
    }

    /// Append a sample to the log.
    pub fn write(&mut self, sample: &HitSample<'_>) -> Result<()> {
        let line = serde_json::to_string(sample)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}
