//! Schrijft gegroepeerde, samenvattende en platte uitvoerbestanden.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::classify::ConfigGroup;
use crate::format::{DEFAULT_PREFIX, format_points};
use crate::sampler::GeneratedPoint;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("kan map {} niet aanmaken: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("kan {} niet schrijven: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Bestandsindeling van een run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub group_dir: String,
    pub summary_file: String,
    pub flat_file: String,
    pub prefix: String,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            group_dir: "output_points".to_owned(),
            summary_file: "summary.txt".to_owned(),
            flat_file: "sum_output.txt".to_owned(),
            prefix: DEFAULT_PREFIX.to_owned(),
        }
    }

    #[must_use]
    pub fn group_dir_path(&self) -> PathBuf {
        self.root.join(&self.group_dir)
    }

    #[must_use]
    pub fn group_file_path(&self, label: &str) -> PathBuf {
        self.group_dir_path().join(format!("points_{label}.txt"))
    }

    #[must_use]
    pub fn summary_path(&self) -> PathBuf {
        self.group_dir_path().join(&self.summary_file)
    }

    #[must_use]
    pub fn flat_path(&self) -> PathBuf {
        self.root.join(&self.flat_file)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Group,
    Summary,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub kind: FileKind,
    pub points: usize,
}

/// Schrijft alle uitvoerbestanden en geeft ze terug in schrijfvolgorde.
pub fn write_outputs(
    layout: &OutputLayout,
    points: &[GeneratedPoint],
    groups: &[ConfigGroup],
) -> Result<Vec<WrittenFile>, OutputError> {
    let dir = layout.group_dir_path();
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|source| OutputError::CreateDir {
            path: dir.clone(),
            source,
        })?;
    }

    let mut written = Vec::with_capacity(groups.len() + 2);

    for group in groups {
        let path = layout.group_file_path(&group.label);
        write_lines(&path, &format_points(&group.points, &layout.prefix))?;
        log::debug!("{} geschreven ({} punten)", path.display(), group.points.len());
        written.push(WrittenFile {
            path,
            kind: FileKind::Group,
            points: group.points.len(),
        });
    }

    let summary_path = layout.summary_path();
    write_lines(&summary_path, &summary_lines(groups))?;
    written.push(WrittenFile {
        path: summary_path,
        kind: FileKind::Summary,
        points: points.len(),
    });

    let flat_path = layout.flat_path();
    write_lines(&flat_path, &format_points(points, &layout.prefix))?;
    written.push(WrittenFile {
        path: flat_path,
        kind: FileKind::Flat,
        points: points.len(),
    });

    Ok(written)
}

/// Regels van het samenvattingsbestand.
#[must_use]
pub fn summary_lines(groups: &[ConfigGroup]) -> Vec<String> {
    let mut lines = Vec::with_capacity(groups.len() + 1);
    lines.push("Axis configuration summary:".to_owned());
    lines.extend(
        groups
            .iter()
            .map(|group| format!("{}: {} points", group.label, group.points.len())),
    );
    lines
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), OutputError> {
    let to_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{line}").map_err(to_error)?;
    }
    writer.flush().map_err(to_error)
}
