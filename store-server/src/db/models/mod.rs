//! Database Models

pub mod order;
pub mod product;
pub mod serde_helpers;

pub use order::{Order, OrderCreate};
pub use product::{
    Product, ProductCategory, ProductCreate, ProductImage, ProductUpdate, Review,
};
