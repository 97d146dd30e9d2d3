mod result;

pub use result::Selection;
