pub mod assess_image;
pub mod assess_text;
