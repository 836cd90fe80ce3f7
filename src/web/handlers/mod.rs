pub mod letter_handlers;
pub mod scrape_handlers;
pub mod system_handlers;

pub use letter_handlers::*;
pub use scrape_handlers::*;
pub use system_handlers::*;
