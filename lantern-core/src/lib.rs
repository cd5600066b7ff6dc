pub mod actor;
pub mod color;
pub mod item;

pub use actor::Actor;
pub use color::{DyeColor, RGBColor};
pub use item::{ItemStack, ANY_META};
