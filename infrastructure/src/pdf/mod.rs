//! PDF text-layer reading

pub mod lopdf_reader;

pub use lopdf_reader::LopdfTextReader;
