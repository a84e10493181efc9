pub mod expectations;
pub mod scene;

pub use expectations::{check_region_coverage, check_schedule, check_screen_partition, Coverage};
pub use scene::{main_scenes, GridScene};
