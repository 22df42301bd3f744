mod compressor_service;

pub use compressor_service::PdfCompressor;
