pub mod footer;
pub mod header;
pub mod utils;

pub use footer::draw_footer;
pub use header::draw_header;
pub use utils::{availability_color, condition_color, format_mileage, format_price, truncate};
