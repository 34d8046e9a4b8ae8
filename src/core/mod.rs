// src/core/mod.rs

pub mod currency;
pub mod html;
pub mod net;
pub mod sanitize;

pub use currency::{parse_amount, AmountSource};
pub use net::{FileFetcher, HttpFetcher, PageFetcher};
