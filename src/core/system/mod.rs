pub mod system_order;

pub use system_order::{configure_frame_sets, FrameSet};
