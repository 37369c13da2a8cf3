#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    default_color, init_tracing, render_layout, render_layout_to_png, RenderConfig,
};
