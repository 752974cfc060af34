pub mod coerce;
pub mod draw;
pub mod pdf;
pub mod shaping;

pub use coerce::{coerce_max_names, coerce_muted};
pub use draw::pick_index;
pub use pdf::render_pdf;
pub use shaping::{PassthroughShaper, TextShaper, select_shaper};
