pub mod document;
pub mod extract;
pub mod info;
pub mod photo;
pub mod publish;
pub mod refine;
pub mod results;
pub mod settings;

pub use document::extract_from_document;
pub use extract::{analyze, analyze_text, extract_from_text, extract_from_url, ExtractionInput};
pub use info::{help, show_catalog};
pub use photo::extract_from_photo;
pub use publish::{list_tags, publish_command};
pub use refine::refine_command;
pub use results::{
    format_exercise, format_result, send_export, show_exercise, show_exercises, show_raw,
    show_shortcodes,
};
pub use settings::{reset_session, set_prompt, show_log};
