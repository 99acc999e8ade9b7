use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use automin_utilities::AutominError;
use log::info;

/// Dumps intermediate files, mostly automata produced by (random) tests.
///
/// Dumping only happens when `AUTOMIN_DUMP` is set to an absolute directory;
/// every instance writes into its own subdirectory named after the test.
/// Combined with `AUTOMIN_SEED` this reproduces the inputs of a failing run.
pub struct DumpFiles {
    // None when dumping is disabled.
    directory: Option<PathBuf>,
}

impl DumpFiles {
    /// Creates a new `DumpFiles` writing into the given subdirectory.
    pub fn new(directory: &str) -> Self {
        match std::env::var("AUTOMIN_DUMP") {
            Ok(dump_dir) => {
                if !Path::new(dump_dir.as_str()).is_absolute() {
                    panic!("AUTOMIN_DUMP must be an absolute path, because tests write relative to their source file.");
                }

                Self {
                    directory: Some(Path::new(&dump_dir).join(directory)),
                }
            }
            Err(_) => Self { directory: None },
        }
    }

    /// Writes the file `filename` using the given function, when dumping is enabled.
    pub fn dump<F>(&mut self, filename: &str, mut write: F) -> Result<(), AutominError>
    where
        F: FnMut(&mut File) -> Result<(), AutominError>,
    {
        if let Some(directory) = &self.directory {
            let _ = std::fs::create_dir_all(directory);

            let path = directory.join(filename);
            let mut file = File::create(&path)?;
            write(&mut file)?;

            info!("Dumped file: {}", path.to_string_lossy());
        }

        Ok(())
    }
}
