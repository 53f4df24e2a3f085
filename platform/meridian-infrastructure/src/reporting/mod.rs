pub mod export;
pub mod html;
