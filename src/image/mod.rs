pub mod grid;
pub mod io;
pub mod traits;

pub use self::grid::{GridOrigin, OccupancyGrid};
pub use self::traits::{ImageView, Rows};
