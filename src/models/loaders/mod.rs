pub mod toml_loader;

pub use toml_loader::{load_or_curated, load_question_bank, parse_question_bank};
