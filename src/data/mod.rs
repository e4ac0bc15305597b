mod loader;
mod markup;
mod opentdb;

pub use loader::{JsonFileLoader, QuestionLoader, load_questions_from_json, loader_for};
pub use markup::decode_entities;
pub use opentdb::OpenTdbLoader;
