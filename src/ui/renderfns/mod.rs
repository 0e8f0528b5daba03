pub mod footer;
pub mod header;
pub mod status;
pub mod utils;

pub use footer::draw_footer;
pub use header::draw_header;
pub use status::{draw_unresolved, NotFound};
pub use utils::{price_color, stars, truncate};
