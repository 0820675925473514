pub mod scan;

pub use scan::ScanCommand;
