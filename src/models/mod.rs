mod price;
mod product;
mod product_id;

pub use price::*;
pub use product::*;
pub use product_id::*;
