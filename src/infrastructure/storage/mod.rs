pub mod board_file;
pub mod writer;

pub use board_file::load_board;
pub use writer::{FileSolutionWriter, MemorySolutionWriter, SolutionWriter};
