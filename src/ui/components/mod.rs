pub mod category_bar;
mod command_input;
mod input;
mod key_result;

pub use command_input::{CommandEvent, CommandInput};
pub use key_result::KeyResult;
