/// Output formatters for VEX documents
mod openvex_formatter;

pub use openvex_formatter::OpenVexFormatter;
