pub mod atomic;
pub mod checkpoints;
pub mod input;
pub mod output_dir;
pub mod stores;

pub use checkpoints::CheckpointSlot;
pub use input::load_leads;
pub use output_dir::OutputDir;
pub use stores::{LeadSink, OutputStore};
