use crate::cli::actions::Format;
use tracing::Level;

// Define the global arguments
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub format: Format,
    pub verbosity: Option<Level>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(format: Format, verbose: u8) -> Self {
        let verbosity = match verbose {
            0 => None,
            1 => Some(Level::INFO),
            _ => Some(Level::DEBUG),
        };

        Self { format, verbosity }
    }
}
