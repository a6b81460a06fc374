mod download;
mod files;
mod health;
mod results;
mod transcribe;
mod transcribers;
mod upload;

pub use download::download_handler;
pub use files::{delete_file_handler, list_files_handler};
pub use health::health_handler;
pub use results::{bulk_delete_results_handler, delete_results_handler, get_results_handler};
pub use transcribe::transcribe_handler;
pub use transcribers::list_transcribers_handler;
pub use upload::upload_handler;
