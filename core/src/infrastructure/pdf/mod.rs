pub mod lopdf_writer;

pub use lopdf_writer::LopdfDocumentWriter;
