use anyhow::Result;
use csv::Writer;
use log::info;
use std::fs::{self, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const EVENTS_FILE: &str = "events.csv";
pub const ATTENDANCE_FILE: &str = "attendance.csv";
pub const CONFIG_FILE: &str = "dashboard_config.yaml";

/// CsvConnection manages file paths inside the data directory and makes
/// sure each CSV file exists with its header.
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self { base_directory: base_path })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn events_file_path(&self) -> PathBuf {
        self.base_directory.join(EVENTS_FILE)
    }

    pub fn attendance_file_path(&self) -> PathBuf {
        self.base_directory.join(ATTENDANCE_FILE)
    }

    pub fn config_file_path(&self) -> PathBuf {
        self.base_directory.join(CONFIG_FILE)
    }

    /// Ensure a CSV file exists, creating it with just the header if not
    pub fn ensure_csv_file_exists(&self, file_path: &Path, header: &[&str]) -> Result<()> {
        if !file_path.exists() {
            self.write_csv_atomically(file_path, header, std::iter::empty::<Vec<String>>())?;
        }
        Ok(())
    }

    /// Write header and rows to a temp file, then move it over `file_path`
    pub fn write_csv_atomically<I>(&self, file_path: &Path, header: &[&str], rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let mut csv_writer = Writer::from_writer(BufWriter::new(file));
            csv_writer.write_record(header)?;
            for row in rows {
                csv_writer.write_record(&row)?;
            }
            csv_writer.flush()?;
        }

        fs::rename(&temp_path, file_path)?;
        Ok(())
    }
}
